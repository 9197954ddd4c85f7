//! Room catalog and timeslot calendar.
//!
//! The catalog is the static configuration every placement is checked
//! against: the ordered list of timeslots, the ordered list of rooms with
//! their seating capacity, and an optional reserved timeslot that triggers
//! an advisory.
//!
//! The expected YAML structure is:
//! ```yaml
//! timeslots: [MonAM, MonPM, TueAM, TuePM, WedAM, WedPM, ThuAM, ThuPM, FriAM, FriPM]
//! reserved_timeslot: WedPM
//! rooms:
//!   - { id: A, capacity: 100 }
//!   - { id: F, capacity: 30 }
//! ```
//!
//! Rooms are a sequence rather than a map so the grid column order is the
//! file order.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::module::UNSCHEDULED;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    timeslots: Vec<String>,
    #[serde(default)]
    reserved_timeslot: Option<String>,
    rooms: Vec<RoomEntry>,
}

#[derive(Debug, Deserialize)]
struct RoomEntry {
    id: String,
    capacity: u32,
}

// ── Public data structures ────────────────────────────────────────────────────

/// One catalog entry: a room and its seating capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub capacity: u32,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// Immutable room catalog + timeslot calendar.
///
/// Built once (from YAML or [`CatalogConfig::default_config`]) and shared
/// behind an `Arc` for the lifetime of the process.  Lookups are by
/// identifier only.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    timeslots: Vec<String>,
    reserved_timeslot: Option<String>,
    rooms: Vec<Room>,
}

impl CatalogConfig {
    /// Build a catalog from explicit parts, checking it for consistency.
    ///
    /// # Errors
    /// Fails on an empty calendar or room list, duplicate timeslots or room
    /// ids, a `?` identifier, or a reserved timeslot that is not in the
    /// calendar.
    pub fn new(
        timeslots: Vec<String>,
        reserved_timeslot: Option<String>,
        rooms: Vec<Room>,
    ) -> Result<Self> {
        if timeslots.is_empty() {
            bail!("timeslot calendar is empty");
        }
        if rooms.is_empty() {
            bail!("room catalog is empty");
        }

        let mut seen = HashSet::new();
        for slot in &timeslots {
            if slot == UNSCHEDULED {
                bail!("'{}' is reserved for unscheduled modules and cannot be a timeslot", UNSCHEDULED);
            }
            if !seen.insert(slot.as_str()) {
                bail!("duplicate timeslot '{}'", slot);
            }
        }

        let mut seen = HashSet::new();
        for room in &rooms {
            if room.id == UNSCHEDULED {
                bail!("'{}' is reserved for unscheduled modules and cannot be a room", UNSCHEDULED);
            }
            if !seen.insert(room.id.as_str()) {
                bail!("duplicate room '{}'", room.id);
            }
        }

        if let Some(reserved) = &reserved_timeslot {
            if !timeslots.contains(reserved) {
                bail!("reserved timeslot '{}' is not in the calendar", reserved);
            }
        }

        Ok(Self {
            timeslots,
            reserved_timeslot,
            rooms,
        })
    }

    /// The historical fixed setup: ten half-day slots, Wednesday afternoon
    /// reserved, eight rooms A–H.
    pub fn default_config() -> Self {
        let timeslots = [
            "MonAM", "MonPM", "TueAM", "TuePM", "WedAM", "WedPM", "ThuAM", "ThuPM", "FriAM",
            "FriPM",
        ];
        let rooms = [
            ("A", 100),
            ("B", 100),
            ("C", 60),
            ("D", 60),
            ("E", 60),
            ("F", 30),
            ("G", 30),
            ("H", 30),
        ];
        Self {
            timeslots: timeslots.iter().map(|s| s.to_string()).collect(),
            reserved_timeslot: Some(String::from("WedPM")),
            rooms: rooms.iter().map(|&(id, cap)| Room::new(id, cap)).collect(),
        }
    }

    /// Parse a catalog from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// structurally invalid, or the catalog fails the checks in
    /// [`CatalogConfig::new`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading room catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open catalog file: {}", path.display()))?;

        let catalog = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))?;

        info!(
            timeslots = catalog.timeslots.len(),
            rooms = catalog.rooms.len(),
            reserved = ?catalog.reserved_timeslot,
            "Room catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content).context("Failed to parse YAML")?;

        for room in &file.rooms {
            debug!("  Room: {} | Capacity: {}", room.id, room.capacity);
        }

        Self::new(
            file.timeslots,
            file.reserved_timeslot,
            file.rooms
                .into_iter()
                .map(|r| Room::new(r.id, r.capacity))
                .collect(),
        )
    }

    /// Seating capacity of `room_id`, or `None` if the room is not catalogued.
    pub fn capacity_of(&self, room_id: &str) -> Option<u32> {
        self.room(room_id).map(|r| r.capacity)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Rooms in display order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Timeslots in calendar order.
    pub fn timeslots(&self) -> &[String] {
        &self.timeslots
    }

    pub fn has_timeslot(&self, timeslot: &str) -> bool {
        self.timeslots.iter().any(|t| t == timeslot)
    }

    pub fn has_room(&self, room_id: &str) -> bool {
        self.room(room_id).is_some()
    }

    /// Column index of `room_id` in display order.
    pub fn room_index(&self, room_id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == room_id)
    }

    /// Row index of `timeslot` in calendar order.
    pub fn timeslot_index(&self, timeslot: &str) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }

    pub fn reserved_timeslot(&self) -> Option<&str> {
        self.reserved_timeslot.as_deref()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
