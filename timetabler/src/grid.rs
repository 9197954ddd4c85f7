/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Headless timetable grid: one row per timeslot, one column per room.
//!
//! The grid is a display collaborator.  It is seeded from the registry at
//! start-up and afterwards only changes through commit notifications
//! (clear the vacated cell, write the new one).

use std::fmt;

use tracing::debug;

use crate::config::CatalogConfig;
use crate::module::Placement;
use crate::registry::Registry;

const CELL_WIDTH: usize = 8;

/// Cell matrix addressed by `(timeslot, room)` identifiers.
#[derive(Debug, Clone)]
pub struct Grid {
    catalog: CatalogConfig,
    /// `cells[timeslot_index][room_index]`
    cells: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Empty grid shaped by the catalog.
    pub fn new(catalog: &CatalogConfig) -> Self {
        let cells = vec![vec![None; catalog.rooms().len()]; catalog.timeslots().len()];
        Self {
            catalog: catalog.clone(),
            cells,
        }
    }

    /// Grid showing every module whose timeslot and room are both in the
    /// catalog.  Anything else (unscheduled, half-set, or unknown ids) is
    /// skipped.
    pub fn from_registry(catalog: &CatalogConfig, registry: &Registry) -> Self {
        let mut grid = Self::new(catalog);
        for module in registry.all() {
            if let Some(placement) = module.placement() {
                if !grid.set(&placement, &module.code) {
                    debug!(code = %module.code, placement = %placement, "placement outside grid, not drawn");
                }
            }
        }
        grid
    }

    fn index(&self, placement: &Placement) -> Option<(usize, usize)> {
        let row = self.catalog.timeslot_index(&placement.timeslot)?;
        let col = self.catalog.room_index(&placement.room)?;
        Some((row, col))
    }

    /// Write `code` into the cell.  Returns `false` if the placement is not
    /// on the grid.
    pub fn set(&mut self, placement: &Placement, code: &str) -> bool {
        match self.index(placement) {
            Some((row, col)) => {
                self.cells[row][col] = Some(code.to_string());
                true
            }
            None => false,
        }
    }

    /// Blank the cell.  Returns `false` if the placement is not on the grid.
    pub fn clear(&mut self, placement: &Placement) -> bool {
        match self.index(placement) {
            Some((row, col)) => {
                self.cells[row][col] = None;
                true
            }
            None => false,
        }
    }

    pub fn cell(&self, placement: &Placement) -> Option<&str> {
        let (row, col) = self.index(placement)?;
        self.cells[row][col].as_deref()
    }

    /// Number of non-blank cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Text rendering; see the [`fmt::Display`] impl.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// A room-id header row, a capacity row, then one row per timeslot.  Empty
/// cells show as `.`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = CELL_WIDTH;
        let rooms = self.catalog.rooms();

        write!(f, "{:<w$}", "")?;
        for room in rooms {
            write!(f, "{:>w$}", room.id)?;
        }
        writeln!(f)?;

        write!(f, "{:<w$}", "")?;
        for room in rooms {
            write!(f, "{:>w$}", room.capacity)?;
        }
        writeln!(f)?;

        for (slot, row) in self.catalog.timeslots().iter().zip(&self.cells) {
            write!(f, "{:<w$}", slot)?;
            for cell in row {
                write!(f, "{:>w$}", cell.as_deref().unwrap_or("."))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
