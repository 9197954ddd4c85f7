/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Request/response façade over the scheduler.
//!
//! A [`Timetable`] owns the registry for one interactive session and runs
//! each [`PlacementRequest`] to completion:
//!
//! ```text
//! request ──► client checks ──► validate ──► advisory ──► commit ──► notify
//!               EmptyInput       Reject(..)   on_advisory             grid / report / export
//!               UnknownTimeslot
//!               UnknownRoom
//! ```
//!
//! `submit` takes `&mut self`, so the validate + commit pair can never
//! interleave with another request on the same registry.  Notification
//! failures (today: the export write) are returned as warnings and never
//! undo the commit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::grid::Grid;
use crate::registry::Registry;
use crate::report::to_report;
use crate::scheduler::{Advisory, CommitEvent, Scheduler, SchedulerError};
use crate::store::{write_export, PersistenceWriteError};

// ── Request ───────────────────────────────────────────────────────────────────

/// One placement request as collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub code: String,
    pub timeslot: String,
    pub room: String,
}

impl PlacementRequest {
    pub fn new(
        code: impl Into<String>,
        timeslot: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            timeslot: timeslot.into(),
            room: room.into(),
        }
    }

    /// Client-side checks that run before the validator.
    ///
    /// Whitespace only decides emptiness; the code is looked up exactly as
    /// typed, so `" CS101A"` does not resolve.
    pub fn check(&self, catalog: &CatalogConfig) -> Result<&str, SchedulerError> {
        if self.code.trim().is_empty() {
            return Err(SchedulerError::EmptyInput);
        }
        if !catalog.has_timeslot(&self.timeslot) {
            return Err(SchedulerError::UnknownTimeslot(self.timeslot.clone()));
        }
        if !catalog.has_room(&self.room) {
            return Err(SchedulerError::UnknownRoom(self.room.clone()));
        }
        Ok(&self.code)
    }
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// Downstream collaborator notified around each accepted placement.
pub trait PlacementObserver {
    /// Called after validation, *before* the commit.  Informational only.
    fn on_advisory(&mut self, _advisory: &Advisory) {}

    /// Called after the registry has been updated.
    fn on_commit(
        &mut self,
        _event: &CommitEvent,
        _registry: &Registry,
    ) -> Result<(), PersistenceWriteError> {
        Ok(())
    }
}

/// Keeps a [`Grid`] in step with commits.
#[derive(Debug, Clone)]
pub struct GridView {
    grid: Grid,
}

impl GridView {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl PlacementObserver for GridView {
    fn on_commit(
        &mut self,
        event: &CommitEvent,
        _registry: &Registry,
    ) -> Result<(), PersistenceWriteError> {
        if let Some(previous) = &event.previous {
            self.grid.clear(previous);
        }
        self.grid.set(&event.placement, &event.code);
        Ok(())
    }
}

/// Holds the current report text, regenerated on every commit.
#[derive(Debug, Clone, Default)]
pub struct ReportView {
    text: String,
}

impl ReportView {
    pub fn new(registry: &Registry) -> Self {
        Self {
            text: to_report(registry),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PlacementObserver for ReportView {
    fn on_commit(
        &mut self,
        _event: &CommitEvent,
        registry: &Registry,
    ) -> Result<(), PersistenceWriteError> {
        self.text = to_report(registry);
        Ok(())
    }
}

/// Rewrites the output file with the full registry on every commit.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    path: PathBuf,
}

impl ExportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, registry: &Registry) -> Result<(), PersistenceWriteError> {
        write_export(&self.path, registry)
    }
}

impl PlacementObserver for ExportWriter {
    fn on_commit(
        &mut self,
        _event: &CommitEvent,
        registry: &Registry,
    ) -> Result<(), PersistenceWriteError> {
        self.write(registry)
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of an accepted request.
#[derive(Debug)]
pub struct PlacementOutcome {
    pub event: CommitEvent,
    pub advisory: Option<Advisory>,
    /// Notification failures.  The commit stands regardless.
    pub warnings: Vec<PersistenceWriteError>,
}

// ── Timetable ─────────────────────────────────────────────────────────────────

/// One editing session: registry, scheduler and notification targets.
pub struct Timetable {
    scheduler: Scheduler,
    registry: Registry,
    grid: GridView,
    report: ReportView,
    export: Option<ExportWriter>,
    observers: Vec<Box<dyn PlacementObserver>>,
}

impl Timetable {
    /// Start a session; the grid and report are seeded from `registry`.
    pub fn new(catalog: Arc<CatalogConfig>, registry: Registry) -> Self {
        let grid = GridView::new(Grid::from_registry(&catalog, &registry));
        let report = ReportView::new(&registry);
        Self {
            scheduler: Scheduler::new(catalog),
            registry,
            grid,
            report,
            export: None,
            observers: Vec::new(),
        }
    }

    /// Persist the registry to `path` after every commit.
    pub fn with_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.export = Some(ExportWriter::new(path));
        self
    }

    /// Register an additional observer, notified after the built-in ones.
    pub fn add_observer(&mut self, observer: Box<dyn PlacementObserver>) {
        self.observers.push(observer);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn catalog(&self) -> &CatalogConfig {
        self.scheduler.catalog()
    }

    pub fn grid(&self) -> &Grid {
        self.grid.grid()
    }

    pub fn report(&self) -> &str {
        self.report.text()
    }

    /// Handle one placement request end to end.
    ///
    /// # Errors
    /// Any [`SchedulerError`]; the registry, grid and report are untouched
    /// when an error is returned.
    pub fn submit(&mut self, request: &PlacementRequest) -> Result<PlacementOutcome, SchedulerError> {
        let code = request.check(self.scheduler.catalog())?;

        let accepted = self
            .scheduler
            .validate(code, &request.timeslot, &request.room, &self.registry)
            .map_err(|reason| SchedulerError::Rejected {
                code: code.to_string(),
                reason,
            })?;

        if let Some(advisory) = &accepted.advisory {
            for observer in self.observers.iter_mut() {
                observer.on_advisory(advisory);
            }
        }

        let event = self.scheduler.commit(&mut self.registry, &accepted)?;

        let mut warnings = Vec::new();
        let registry = &self.registry;
        let mut targets: Vec<&mut dyn PlacementObserver> = Vec::with_capacity(3 + self.observers.len());
        targets.push(&mut self.grid);
        targets.push(&mut self.report);
        if let Some(export) = self.export.as_mut() {
            targets.push(export);
        }
        for observer in self.observers.iter_mut() {
            targets.push(observer.as_mut());
        }
        for target in targets {
            if let Err(e) = target.on_commit(&event, registry) {
                warn!("{}", e);
                warnings.push(e);
            }
        }

        info!(
            code = %event.code,
            placement = %event.placement,
            warnings = warnings.len(),
            "request complete"
        );

        Ok(PlacementOutcome {
            event,
            advisory: accepted.advisory,
            warnings,
        })
    }

    /// Write the export file now (used on exit).  No-op without an export
    /// target.
    pub fn save(&self) -> Result<(), PersistenceWriteError> {
        match &self.export {
            Some(export) => export.write(&self.registry),
            None => Ok(()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
