/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Non-blocking placement advisories.
//!
//! An advisory is surfaced to the user *before* a placement is committed but
//! never stops the commit.  The only advisory today is the reserved
//! timeslot: the catalog may name one slot (historically Wednesday
//! afternoon, kept free for sports) that should ideally stay empty.

use std::fmt;

use crate::config::CatalogConfig;

/// Informational notice attached to an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The module was placed in the catalog's reserved timeslot.
    ReservedTimeslot { code: String, timeslot: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ReservedTimeslot { code, timeslot } => write!(
                f,
                "{} is scheduled in {}; keep in mind this slot is ideally reserved for sports",
                code, timeslot
            ),
        }
    }
}

/// Returns the reserved-timeslot advisory if `timeslot` is the catalog's
/// reserved slot.
pub fn check_reserved_timeslot(
    code: &str,
    timeslot: &str,
    catalog: &CatalogConfig,
) -> Option<Advisory> {
    match catalog.reserved_timeslot() {
        Some(reserved) if reserved == timeslot => Some(Advisory::ReservedTimeslot {
            code: code.to_string(),
            timeslot: timeslot.to_string(),
        }),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
