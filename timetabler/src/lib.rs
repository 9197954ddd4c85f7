/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetabler – places course modules into timeslots and rooms.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/         – room catalog + timeslot calendar (YAML)
//! ├── module          – Module record, Placement, record format
//! ├── registry        – module arena, load / find / all
//! ├── scheduler/      – placement validator + commit engine
//! │   ├── error       – RejectReason / SchedulerError
//! │   └── advisory    – reserved-timeslot notice
//! ├── report          – report text and export lines
//! ├── grid            – headless timetable grid
//! ├── store           – flat-file read / write
//! └── session         – request → validate → commit → notify
//! ```

pub mod config;
pub mod grid;
pub mod module;
pub mod registry;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod store;
