/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Module registry: the authoritative in-memory set of modules.
//!
//! # Ownership model
//! The [`Registry`] owns every [`Module`] in a `Vec` arena.  Each module is
//! addressed by a [`ModuleId`] (its index), which is stable for the whole
//! session because the module set never grows or shrinks after
//! [`Registry::load`].  Readers get `&Module`; the only mutation path is
//! [`Registry::set_placement`], which is `pub(crate)` and called solely by
//! [`crate::scheduler::Scheduler::commit`].
//!
//! Lookups are linear, first-match scans in insertion order.  Duplicate
//! codes are rejected at load time, so first-match never has to choose.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::module::{Module, Placement, RecordError};

// ── ModuleId ──────────────────────────────────────────────────────────────────

/// Stable handle of a module inside its [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Load-time failure.  Fatal: no registry is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A record could not be decomposed into `code title timeslot room size`.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: RecordError },

    /// Two records share a module code.
    #[error("duplicate module code '{code}' on line {line} (first defined on line {first_line})")]
    DuplicateCode {
        code: String,
        first_line: usize,
        line: usize,
    },
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Ordered, fixed-size collection of modules keyed by unique code.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: Vec<Module>,
}

impl Registry {
    /// Parse `records` (one per line) into a registry.
    ///
    /// Every entry must be a full record; a blank line is malformed.  Line
    /// numbers in errors are 1-based positions in `records`.
    ///
    /// # Errors
    /// [`RegistryError::MalformedRecord`] for the first unparsable record,
    /// [`RegistryError::DuplicateCode`] for the first repeated code.
    pub fn load<I, S>(records: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modules = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for (idx, record) in records.into_iter().enumerate() {
            let line = idx + 1;
            let module = Module::parse_record(record.as_ref())
                .map_err(|reason| RegistryError::MalformedRecord { line, reason })?;

            if let Some(&first_line) = first_seen.get(&module.code) {
                return Err(RegistryError::DuplicateCode {
                    code: module.code,
                    first_line,
                    line,
                });
            }
            first_seen.insert(module.code.clone(), line);

            debug!(
                code = %module.code,
                timeslot = ?module.timeslot,
                room = ?module.room,
                size = module.size,
                "module loaded"
            );
            modules.push(module);
        }

        let registry = Self { modules };
        info!(
            modules = registry.len(),
            scheduled = registry.scheduled_count(),
            "Registry loaded"
        );
        Ok(registry)
    }

    /// Look up a module by code (first match in insertion order).
    pub fn find(&self, code: &str) -> Option<(ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .find(|(_, m)| m.code == code)
            .map(|(i, m)| (ModuleId(i), m))
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.0)
    }

    /// Read view of every module in insertion order.
    pub fn all(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn scheduled_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_scheduled()).count()
    }

    /// Overwrite the placement of `id`, returning the previous one if the
    /// module was fully scheduled.
    ///
    /// Only the scheduler calls this; it has already validated the move.
    pub(crate) fn set_placement(&mut self, id: ModuleId, placement: Placement) -> Option<Placement> {
        let module = &mut self.modules[id.0];
        let previous = module.placement();
        module.timeslot = Some(placement.timeslot);
        module.room = Some(placement.room);
        previous
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
