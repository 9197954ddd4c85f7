/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core module data structures for the timetabler.
//!
//! Two types model the two sides of a placement:
//!
//! ```text
//! ModulesIn.txt ──(parse_record)──► Module ──(scheduler)──► Placement ──(format_record)──► ModulesOut.txt
//!                                    ↑ owned by Registry      ↑ (timeslot, room) pair
//! ```
//!
//! # Sentinel handling
//! On disk an unscheduled field is the literal `?`.  In memory it is `None`,
//! so a stray `"?"` can never be mistaken for a real timeslot or room.  The
//! conversion back to `?` only happens in [`Module::format_record`].

use std::fmt;

/// Literal used on disk for an unscheduled timeslot or room.
pub const UNSCHEDULED: &str = "?";

/// Number of leading code characters that identify the programme.
pub const PROGRAMME_PREFIX_LEN: usize = 3;

// ── Placement ─────────────────────────────────────────────────────────────────

/// A committed or candidate `(timeslot, room)` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    pub timeslot: String,
    pub room: String,
}

impl Placement {
    pub fn new(timeslot: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            timeslot: timeslot.into(),
            room: room.into(),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.timeslot, self.room)
    }
}

// ── Record parse errors ───────────────────────────────────────────────────────

/// Why a single input line could not be turned into a [`Module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly five whitespace-separated fields.
    FieldCount { found: usize },

    /// The `size` field is not a non-negative integer.
    InvalidSize { value: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::FieldCount { found } => write!(
                f,
                "expected 5 fields (code title timeslot room size), found {}",
                found
            ),
            RecordError::InvalidSize { value } => {
                write!(f, "size '{}' is not a non-negative integer", value)
            }
        }
    }
}

// ── Module ────────────────────────────────────────────────────────────────────

/// One course offering.
///
/// `timeslot` and `room` are `None` while unscheduled.  A module is
/// *scheduled* only when both are set; a half-set module is not produced by
/// the scheduler but may arrive from a hand-edited input file and is carried
/// through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Unique module code, e.g. `CS101A`.
    pub code: String,

    /// Free-text title.  Not used by any check; preserved for export.
    pub title: String,

    pub timeslot: Option<String>,

    pub room: Option<String>,

    /// Minimum room capacity needed.
    pub size: u32,
}

impl Module {
    /// Parse one `code title timeslot room size` line.
    pub fn parse_record(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [code, title, timeslot, room, size] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        };

        let size = size.parse::<u32>().map_err(|_| RecordError::InvalidSize {
            value: size.to_string(),
        })?;

        Ok(Self {
            code: code.to_string(),
            title: title.to_string(),
            timeslot: from_field(timeslot),
            room: from_field(room),
            size,
        })
    }

    /// Render the module in the exact input record shape.
    pub fn format_record(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.code,
            self.title,
            to_field(self.timeslot.as_deref()),
            to_field(self.room.as_deref()),
            self.size
        )
    }

    /// Programme key: the first three characters of the code.
    ///
    /// Codes shorter than three characters are their own programme.
    pub fn programme(&self) -> &str {
        programme_of(&self.code)
    }

    /// Returns `true` when both timeslot and room are set.
    pub fn is_scheduled(&self) -> bool {
        self.timeslot.is_some() && self.room.is_some()
    }

    /// The current placement, if fully scheduled.
    pub fn placement(&self) -> Option<Placement> {
        match (&self.timeslot, &self.room) {
            (Some(t), Some(r)) => Some(Placement::new(t.clone(), r.clone())),
            _ => None,
        }
    }

    pub fn is_at_timeslot(&self, timeslot: &str) -> bool {
        self.timeslot.as_deref() == Some(timeslot)
    }

    pub fn occupies(&self, timeslot: &str, room: &str) -> bool {
        self.is_at_timeslot(timeslot) && self.room.as_deref() == Some(room)
    }
}

/// Programme key for an arbitrary code (char-boundary safe).
pub fn programme_of(code: &str) -> &str {
    match code.char_indices().nth(PROGRAMME_PREFIX_LEN) {
        Some((end, _)) => &code[..end],
        None => code,
    }
}

fn from_field(value: &str) -> Option<String> {
    if value == UNSCHEDULED {
        None
    } else {
        Some(value.to_string())
    }
}

fn to_field(value: Option<&str>) -> &str {
    value.unwrap_or(UNSCHEDULED)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
