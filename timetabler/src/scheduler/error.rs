/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for placement requests.
//!
//! Two layers model the two kinds of failure:
//!
//! * [`RejectReason`]: why the validator refused a placement (carries the
//!   exact values that failed the check).
//! * [`SchedulerError`]: top-level failure of a single placement request,
//!   including the client-side checks that run before validation.
//!
//! None of these are fatal.  Every variant leaves the registry unchanged.
//!
//! | Variant | Surfaced as | Input |
//! |---|---|---|
//! | `EmptyInput` | prompt | kept |
//! | `Rejected(ModuleNotFound)` | error | cleared |
//! | `Rejected(RoomTooSmall)` | error | kept |
//! | `Rejected(ProgrammeClash)` / `Rejected(RoomClash)` | error | kept |

use thiserror::Error;

// ── Validator rejections ──────────────────────────────────────────────────────

/// Reason a placement failed validation.
///
/// Variants are listed in check order; only the first failing check is
/// reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The code does not resolve in the registry.
    ModuleNotFound { code: String },

    /// The proposed room is not in the catalog.
    UnknownRoom { room: String },

    /// The room seats fewer students than the module needs.
    RoomTooSmall {
        room: String,
        capacity: u32,
        required: u32,
    },

    /// Another module of the same programme already holds the timeslot.
    ProgrammeClash {
        programme: String,
        timeslot: String,
        conflicting: String,
    },

    /// Another module already holds the `(timeslot, room)` pair.
    RoomClash {
        timeslot: String,
        room: String,
        occupant: String,
    },
}

impl RejectReason {
    /// `true` when the caller should clear the code input (the code itself
    /// was wrong, not the chosen slot).
    pub fn clears_input(&self) -> bool {
        matches!(self, RejectReason::ModuleNotFound { .. })
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::ModuleNotFound { code } => {
                write!(f, "module '{}' does not exist", code)
            }

            RejectReason::UnknownRoom { room } => {
                write!(f, "room '{}' is not in the catalog", room)
            }

            RejectReason::RoomTooSmall {
                room,
                capacity,
                required,
            } => write!(
                f,
                "room {} seats {} but the module needs {}",
                room, capacity, required
            ),

            RejectReason::ProgrammeClash {
                programme,
                timeslot,
                conflicting,
            } => write!(
                f,
                "programme {} already has {} at {}",
                programme, conflicting, timeslot
            ),

            RejectReason::RoomClash {
                timeslot,
                room,
                occupant,
            } => write!(
                f,
                "room {} is already taken by {} at {}",
                room, occupant, timeslot
            ),
        }
    }
}

// ── Top-level request errors ──────────────────────────────────────────────────

/// Failure of one placement request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// No code was supplied (empty or whitespace-only).
    #[error("no input provided, enter a module code")]
    EmptyInput,

    /// The proposed timeslot is not in the calendar.
    #[error("unknown timeslot '{0}'")]
    UnknownTimeslot(String),

    /// The proposed room is not in the catalog.
    #[error("unknown room '{0}'")]
    UnknownRoom(String),

    /// The validator refused the placement.
    #[error("cannot place '{code}': {reason}")]
    Rejected { code: String, reason: RejectReason },

    /// `commit` was handed an acceptance whose id does not resolve to its
    /// code in this registry.
    ///
    /// Only reachable when the calling convention (validate first, against
    /// the same registry) is broken.
    #[error("module '{code}' is not registered; validate before committing")]
    NotRegistered { code: String },
}

impl SchedulerError {
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            SchedulerError::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
