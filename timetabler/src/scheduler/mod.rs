//! Placement validation and commit.
//!
//! [`Scheduler`] answers one question, *can module X go to (timeslot,
//! room)?*, and when the answer is yes, writes the new placement into the
//! [`Registry`].  It performs no search: every request is a single proposed
//! placement checked against the current committed state.
//!
//! # Check order
//! Only the first failing check is reported, so the order is part of the
//! contract:
//!
//! | # | Check | Rejection |
//! |---|---|---|
//! | 1 | code resolves in the registry | `ModuleNotFound` |
//! | 2 | room is catalogued and seats `>= size` | `UnknownRoom` / `RoomTooSmall` |
//! | 3 | no *other* module of the same programme at the timeslot | `ProgrammeClash` |
//! | 4 | no *other* module at the same (timeslot, room) | `RoomClash` |
//! | 5 | reserved timeslot | advisory only, never blocks |
//!
//! "Other" means a different code.  A module never clashes with itself, so
//! re-placing it at its current slot, or moving it, is always judged only
//! against the rest of the registry.
//!
//! Checks 3 and 4 are full linear scans in registry order.  Room and time
//! availability is always derived live from these scans; there is no
//! occupancy table to keep in sync, which is why a relocated module's old
//! slot is free the moment the commit returns.
//!
//! # Calling convention
//! [`Scheduler::commit`] does not re-validate.  Callers must obtain an
//! [`Acceptance`] from [`Scheduler::validate`] against the same registry
//! state and commit it before any other mutation; [`Scheduler::place`] does
//! both in one call.
//!
//! # Example
//! ```rust,ignore
//! let scheduler = Scheduler::new(Arc::new(CatalogConfig::default_config()));
//! let accepted = scheduler.validate("CS101A", "MonAM", "A", &registry)?;
//! let event = scheduler.commit(&mut registry, &accepted)?;
//! ```

pub mod advisory;
pub mod error;

pub use advisory::Advisory;
pub use error::{RejectReason, SchedulerError};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::module::{programme_of, Placement};
use crate::registry::{ModuleId, Registry};

use advisory::check_reserved_timeslot;

// ── Validator output ──────────────────────────────────────────────────────────

/// A placement that passed every blocking check.
///
/// Produced only by [`validate`]; consumed by [`Scheduler::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    pub id: ModuleId,
    pub code: String,
    pub placement: Placement,
    /// Non-blocking notice to show before committing.
    pub advisory: Option<Advisory>,
}

/// What a successful commit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEvent {
    pub id: ModuleId,
    pub code: String,
    /// Placement vacated by this commit, if the module was already scheduled.
    pub previous: Option<Placement>,
    pub placement: Placement,
}

// ── Pure validation ───────────────────────────────────────────────────────────

/// Validate placing `code` at `(timeslot, room)`.
///
/// Pure: reads `registry` and `catalog`, mutates nothing, keeps nothing.
pub fn validate(
    code: &str,
    timeslot: &str,
    room: &str,
    registry: &Registry,
    catalog: &CatalogConfig,
) -> Result<Acceptance, RejectReason> {
    // 1. Existence
    let (id, module) = registry
        .find(code)
        .ok_or_else(|| RejectReason::ModuleNotFound {
            code: code.to_string(),
        })?;

    // 2. Capacity (sufficient, not exact)
    let capacity = catalog
        .capacity_of(room)
        .ok_or_else(|| RejectReason::UnknownRoom {
            room: room.to_string(),
        })?;
    if capacity < module.size {
        return Err(RejectReason::RoomTooSmall {
            room: room.to_string(),
            capacity,
            required: module.size,
        });
    }

    // 3. Programme-time conflict
    let programme = programme_of(code);
    if let Some(other) = registry
        .all()
        .iter()
        .find(|m| m.code != code && m.is_at_timeslot(timeslot) && m.programme() == programme)
    {
        return Err(RejectReason::ProgrammeClash {
            programme: programme.to_string(),
            timeslot: timeslot.to_string(),
            conflicting: other.code.clone(),
        });
    }

    // 4. Room-time conflict
    if let Some(other) = registry
        .all()
        .iter()
        .find(|m| m.code != code && m.occupies(timeslot, room))
    {
        return Err(RejectReason::RoomClash {
            timeslot: timeslot.to_string(),
            room: room.to_string(),
            occupant: other.code.clone(),
        });
    }

    // 5. Advisory (non-blocking)
    let advisory = check_reserved_timeslot(code, timeslot, catalog);

    Ok(Acceptance {
        id,
        code: code.to_string(),
        placement: Placement::new(timeslot, room),
        advisory,
    })
}

/// Write an accepted placement into its module, vacating the previous slot.
///
/// The module is addressed by `accepted.id`.  Performs no validation; see
/// the module-level calling convention.
///
/// # Errors
/// [`SchedulerError::NotRegistered`] when the id does not resolve to the
/// accepted code, i.e. the acceptance came from another registry.
pub fn commit(registry: &mut Registry, accepted: &Acceptance) -> Result<CommitEvent, SchedulerError> {
    let id = accepted.id;
    if !matches!(registry.get(id), Some(module) if module.code == accepted.code) {
        return Err(SchedulerError::NotRegistered {
            code: accepted.code.clone(),
        });
    }

    let placement = accepted.placement.clone();
    let previous = registry.set_placement(id, placement.clone());

    info!(
        code = %accepted.code,
        id = %id,
        previous = ?previous.as_ref().map(|p| p.to_string()),
        placement = %placement,
        "✓ placement committed"
    );

    Ok(CommitEvent {
        id,
        code: accepted.code.clone(),
        previous,
        placement,
    })
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Validator + commit engine bound to one room catalog.
///
/// Holds only the shared, immutable catalog; the registry is passed into
/// each call so no module state outlives an operation.
#[derive(Debug, Clone)]
pub struct Scheduler {
    catalog: Arc<CatalogConfig>,
}

impl Scheduler {
    pub fn new(catalog: Arc<CatalogConfig>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Validate one proposed placement.  See [`validate`].
    pub fn validate(
        &self,
        code: &str,
        timeslot: &str,
        room: &str,
        registry: &Registry,
    ) -> Result<Acceptance, RejectReason> {
        let result = validate(code, timeslot, room, registry, &self.catalog);
        match &result {
            Ok(accepted) => {
                debug!(code = %code, timeslot = %timeslot, room = %room, "placement accepted");
                if let Some(advisory) = &accepted.advisory {
                    warn!(code = %code, timeslot = %timeslot, "{}", advisory);
                }
            }
            Err(reason) => {
                debug!(code = %code, timeslot = %timeslot, room = %room, %reason, "✗ placement rejected");
            }
        }
        result
    }

    /// Commit a previously validated placement.
    pub fn commit(
        &self,
        registry: &mut Registry,
        accepted: &Acceptance,
    ) -> Result<CommitEvent, SchedulerError> {
        commit(registry, accepted)
    }

    /// Validate then commit in one step.
    pub fn place(
        &self,
        registry: &mut Registry,
        code: &str,
        timeslot: &str,
        room: &str,
    ) -> Result<CommitEvent, SchedulerError> {
        let accepted = self
            .validate(code, timeslot, room, registry)
            .map_err(|reason| SchedulerError::Rejected {
                code: code.to_string(),
                reason,
            })?;
        self.commit(registry, &accepted)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Room;

    // ── Test helpers ──────────────────────────────────────────────────────────

    /// Catalog with A (100 seats) and F (30 seats), three slots, WedPM reserved.
    fn small_catalog() -> Arc<CatalogConfig> {
        Arc::new(
            CatalogConfig::new(
                vec!["MonAM".into(), "TueAM".into(), "WedPM".into()],
                Some("WedPM".into()),
                vec![Room::new("A", 100), Room::new("F", 30)],
            )
            .unwrap(),
        )
    }

    fn scheduler() -> Scheduler {
        Scheduler::new(small_catalog())
    }

    fn registry(records: &[&str]) -> Registry {
        Registry::load(records).unwrap()
    }

    fn rejection(result: Result<Acceptance, RejectReason>) -> RejectReason {
        result.expect_err("expected a rejection")
    }

    // ── Existence ─────────────────────────────────────────────────────────────

    #[test]
    fn unknown_code_is_module_not_found() {
        let reg = registry(&["CS101A Intro ? ? 40"]);
        let reason = rejection(scheduler().validate("CS999Z", "MonAM", "A", &reg));
        assert_eq!(reason, RejectReason::ModuleNotFound { code: "CS999Z".into() });
        assert!(reason.clears_input());
    }

    // ── Capacity ──────────────────────────────────────────────────────────────

    #[test]
    fn capacity_equal_to_size_is_accepted() {
        let reg = registry(&["CS101A Intro ? ? 30"]);
        assert!(scheduler().validate("CS101A", "MonAM", "F", &reg).is_ok());
    }

    #[test]
    fn capacity_one_short_is_rejected() {
        let reg = registry(&["CS101A Intro ? ? 31"]);
        let reason = rejection(scheduler().validate("CS101A", "MonAM", "F", &reg));
        assert_eq!(
            reason,
            RejectReason::RoomTooSmall {
                room: "F".into(),
                capacity: 30,
                required: 31,
            }
        );
        assert!(!reason.clears_input());
    }

    #[test]
    fn capacity_check_matches_catalog_for_every_room_and_size() {
        let sched = scheduler();
        for size in [0u32, 1, 29, 30, 31, 99, 100, 101] {
            let record = format!("CS101A Intro ? ? {size}");
            let reg = Registry::load([record]).unwrap();
            for room in sched.catalog().rooms() {
                let result = sched.validate("CS101A", "MonAM", &room.id, &reg);
                assert_eq!(
                    result.is_ok(),
                    room.capacity >= size,
                    "room {} ({} seats) vs size {}",
                    room.id,
                    room.capacity,
                    size
                );
            }
        }
    }

    #[test]
    fn uncatalogued_room_is_rejected() {
        let reg = registry(&["CS101A Intro ? ? 0"]);
        let reason = rejection(scheduler().validate("CS101A", "MonAM", "Z", &reg));
        assert_eq!(reason, RejectReason::UnknownRoom { room: "Z".into() });
    }

    // ── Programme clash ───────────────────────────────────────────────────────

    #[test]
    fn same_programme_same_time_is_programme_clash() {
        let mut reg = registry(&["CS101A Intro ? ? 10", "CS105B Algorithms ? ? 10"]);
        let sched = scheduler();
        sched.place(&mut reg, "CS101A", "TueAM", "A").unwrap();

        let reason = rejection(sched.validate("CS105B", "TueAM", "F", &reg));
        assert_eq!(
            reason,
            RejectReason::ProgrammeClash {
                programme: "CS1".into(),
                timeslot: "TueAM".into(),
                conflicting: "CS101A".into(),
            }
        );
    }

    #[test]
    fn different_programme_same_time_is_allowed() {
        let mut reg = registry(&["CS101A Intro ? ? 10", "MA101A Calculus ? ? 10"]);
        let sched = scheduler();
        sched.place(&mut reg, "CS101A", "TueAM", "A").unwrap();
        assert!(sched.validate("MA101A", "TueAM", "F", &reg).is_ok());
    }

    #[test]
    fn half_scheduled_module_still_blocks_its_programme() {
        // timeslot set, room unset: tolerated, and its timeslot still counts
        let reg = registry(&["CS101A Intro TueAM ? 10", "CS105B Algorithms ? ? 10"]);
        let reason = rejection(scheduler().validate("CS105B", "TueAM", "A", &reg));
        assert!(matches!(reason, RejectReason::ProgrammeClash { .. }));
    }

    // ── Room clash ────────────────────────────────────────────────────────────

    #[test]
    fn same_room_same_time_is_room_clash() {
        let reg = registry(&["CS101A Intro MonAM A 10", "MA101A Calculus ? ? 10"]);
        let reason = rejection(scheduler().validate("MA101A", "MonAM", "A", &reg));
        assert_eq!(
            reason,
            RejectReason::RoomClash {
                timeslot: "MonAM".into(),
                room: "A".into(),
                occupant: "CS101A".into(),
            }
        );
    }

    #[test]
    fn programme_clash_takes_precedence_over_room_clash() {
        let reg = registry(&["CS101A Intro MonAM A 10", "CS105B Algorithms ? ? 10"]);
        let reason = rejection(scheduler().validate("CS105B", "MonAM", "A", &reg));
        assert!(matches!(reason, RejectReason::ProgrammeClash { .. }));
    }

    #[test]
    fn capacity_takes_precedence_over_clashes() {
        let reg = registry(&["CS101A Intro MonAM F 10", "CS105B Algorithms ? ? 50"]);
        let reason = rejection(scheduler().validate("CS105B", "MonAM", "F", &reg));
        assert!(matches!(reason, RejectReason::RoomTooSmall { .. }));
    }

    // ── Self-exclusion ────────────────────────────────────────────────────────

    #[test]
    fn module_never_clashes_with_itself() {
        let reg = registry(&["CS101A Intro MonAM A 10", "MA101A Calculus TueAM F 10"]);
        let sched = scheduler();
        for (code, time, room) in [("CS101A", "MonAM", "A"), ("MA101A", "TueAM", "F")] {
            assert!(
                sched.validate(code, time, room, &reg).is_ok(),
                "{code} should re-validate at its own slot"
            );
        }
    }

    #[test]
    fn moving_within_same_timeslot_to_other_room_is_allowed() {
        let reg = registry(&["CS101A Intro MonAM A 10"]);
        assert!(scheduler().validate("CS101A", "MonAM", "F", &reg).is_ok());
    }

    // ── Advisory ──────────────────────────────────────────────────────────────

    #[test]
    fn reserved_timeslot_accepts_with_advisory() {
        let reg = registry(&["CS101A Intro ? ? 10"]);
        let accepted = scheduler().validate("CS101A", "WedPM", "A", &reg).unwrap();
        assert!(matches!(
            accepted.advisory,
            Some(Advisory::ReservedTimeslot { .. })
        ));
    }

    #[test]
    fn ordinary_timeslot_has_no_advisory() {
        let reg = registry(&["CS101A Intro ? ? 10"]);
        let accepted = scheduler().validate("CS101A", "MonAM", "A", &reg).unwrap();
        assert_eq!(accepted.advisory, None);
    }

    // ── Validation is pure ────────────────────────────────────────────────────

    #[test]
    fn rejection_leaves_registry_unchanged() {
        let mut reg = registry(&["CS101A Intro MonAM A 10", "MA101A Calculus ? ? 50"]);
        let before = reg.all().to_vec();
        let err = scheduler().place(&mut reg, "MA101A", "MonAM", "F").unwrap_err();
        assert!(matches!(
            err.reject_reason(),
            Some(RejectReason::RoomTooSmall { .. })
        ));
        assert_eq!(reg.all(), before.as_slice());
    }

    // ── Commit ────────────────────────────────────────────────────────────────

    #[test]
    fn commit_writes_placement() {
        let mut reg = registry(&["CS101A Intro ? ? 40"]);
        let sched = scheduler();
        let accepted = sched.validate("CS101A", "MonAM", "A", &reg).unwrap();
        let event = sched.commit(&mut reg, &accepted).unwrap();

        assert_eq!(event.previous, None);
        assert_eq!(event.placement, Placement::new("MonAM", "A"));
        let (_, m) = reg.find("CS101A").unwrap();
        assert_eq!(m.timeslot.as_deref(), Some("MonAM"));
        assert_eq!(m.room.as_deref(), Some("A"));
    }

    #[test]
    fn relocation_frees_prior_slot() {
        let mut reg = registry(&["CS101A Intro ? ? 10", "MA101A Calculus ? ? 10"]);
        let sched = scheduler();
        sched.place(&mut reg, "CS101A", "MonAM", "A").unwrap();
        assert!(sched.validate("MA101A", "MonAM", "A", &reg).is_err());

        let event = sched.place(&mut reg, "CS101A", "TueAM", "F").unwrap();
        assert_eq!(event.previous, Some(Placement::new("MonAM", "A")));
        assert!(sched.validate("MA101A", "MonAM", "A", &reg).is_ok());
    }

    #[test]
    fn commit_addresses_module_by_accepted_id() {
        let mut reg = registry(&["CS101A Intro ? ? 10", "MA101A Calculus ? ? 10"]);
        let sched = scheduler();
        let accepted = sched.validate("MA101A", "MonAM", "A", &reg).unwrap();
        let event = sched.commit(&mut reg, &accepted).unwrap();

        assert_eq!(event.id, accepted.id);
        assert_eq!(reg.get(event.id).unwrap().code, "MA101A");
        assert_eq!(reg.get(event.id).unwrap().placement(), Some(Placement::new("MonAM", "A")));
        assert_eq!(reg.find("CS101A").unwrap().1.placement(), None);
    }

    #[test]
    fn acceptance_from_another_registry_is_not_registered() {
        let larger = registry(&["CS101A Intro ? ? 10", "MA101A Calculus ? ? 10"]);
        let accepted = scheduler().validate("MA101A", "MonAM", "A", &larger).unwrap();

        let mut smaller = registry(&["MA101A Calculus ? ? 10"]);
        let err = commit(&mut smaller, &accepted).unwrap_err();
        assert_eq!(err, SchedulerError::NotRegistered { code: "MA101A".into() });

        let mut reordered = registry(&["MA101A Calculus ? ? 10", "CS101A Intro ? ? 10"]);
        assert!(commit(&mut reordered, &accepted).is_err());
        assert_eq!(reordered.find("CS101A").unwrap().1.placement(), None);
    }

    #[test]
    fn programme_exclusivity_holds_after_any_accepted_sequence() {
        let mut reg = registry(&[
            "CS101A Intro ? ? 10",
            "CS105B Algorithms ? ? 10",
            "CS110C Systems ? ? 10",
            "MA101A Calculus ? ? 10",
        ]);
        let sched = scheduler();
        let slots = sched.catalog().timeslots().to_vec();
        let rooms: Vec<String> = sched.catalog().rooms().iter().map(|r| r.id.clone()).collect();
        let codes = ["CS101A", "CS105B", "CS110C", "MA101A"];

        for (i, code) in codes.iter().cycle().take(24).enumerate() {
            let time = &slots[i % slots.len()];
            let room = &rooms[(i / slots.len()) % rooms.len()];
            let _ = sched.place(&mut reg, code, time, room);

            for a in reg.all() {
                for b in reg.all() {
                    if a.code == b.code || a.timeslot.is_none() || a.timeslot != b.timeslot {
                        continue;
                    }
                    assert_ne!(a.programme(), b.programme(), "programme clash slipped through");
                    assert_ne!(a.room, b.room, "room clash slipped through");
                }
            }
        }
    }

    // ── Worked scenarios ──────────────────────────────────────────────────────

    #[test]
    fn scenario_intro_then_too_small_room() {
        let mut reg = registry(&["CS101A Intro ? ? 40", "CS105B Algorithms ? ? 50"]);
        let sched = scheduler();

        let accepted = sched.validate("CS101A", "MonAM", "A", &reg).unwrap();
        sched.commit(&mut reg, &accepted).unwrap();
        assert_eq!(
            reg.find("CS101A").unwrap().1.placement(),
            Some(Placement::new("MonAM", "A"))
        );

        let reason = rejection(sched.validate("CS105B", "MonAM", "F", &reg));
        assert!(matches!(
            reason,
            RejectReason::RoomTooSmall {
                capacity: 30,
                required: 50,
                ..
            }
        ));
    }

    #[test]
    fn scenario_two_cs1_modules_on_tuesday_morning() {
        let mut reg = registry(&["CS101A Intro ? ? 10", "CS105B Algorithms ? ? 10"]);
        let sched = scheduler();
        sched.place(&mut reg, "CS101A", "TueAM", "A").unwrap();
        let err = sched.place(&mut reg, "CS105B", "TueAM", "F").unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Rejected {
                reason: RejectReason::ProgrammeClash { .. },
                ..
            }
        ));
    }
}
