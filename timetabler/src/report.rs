/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Read-only projections of the registry: the tabular report shown next to
//! the grid and the record lines written back to disk.
//!
//! Both keep registry (insertion) order; neither sorts.

use crate::module::{Module, UNSCHEDULED};
use crate::registry::Registry;

const CODE_WIDTH: usize = 9;
const TIME_WIDTH: usize = 10;
const ROOM_WIDTH: usize = 10;
const SIZE_WIDTH: usize = 12;

fn report_line(code: &str, time: &str, room: &str, size: &str) -> String {
    format!(
        "{:>cw$} {:>tw$} {:>rw$} {:>sw$}\n",
        code,
        time,
        room,
        size,
        cw = CODE_WIDTH,
        tw = TIME_WIDTH,
        rw = ROOM_WIDTH,
        sw = SIZE_WIDTH,
    )
}

fn report_row(module: &Module) -> String {
    report_line(
        &module.code,
        module.timeslot.as_deref().unwrap_or(UNSCHEDULED),
        module.room.as_deref().unwrap_or(UNSCHEDULED),
        &module.size.to_string(),
    )
}

/// Fixed-column report: a `Code Time Room Size` header, then one row per
/// module.
pub fn to_report(registry: &Registry) -> String {
    let mut out = report_line("Code", "Time", "Room", "Size");
    for module in registry.all() {
        out.push_str(&report_row(module));
    }
    out
}

/// One input-shaped record per module, suitable for reloading.
pub fn to_export_lines(registry: &Registry) -> Vec<String> {
    registry.all().iter().map(Module::format_record).collect()
}

/// The export lines joined into file content (newline-terminated).
pub fn to_export_text(registry: &Registry) -> String {
    to_export_lines(registry)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        Registry::load([
            "MA201A Calculus TueAM C 60",
            "CS101A Intro ? ? 40",
            "CS105B Algorithms MonAM A 50",
        ])
        .unwrap()
    }

    #[test]
    fn report_has_header_and_one_row_per_module() {
        let report = to_report(&sample());
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["Code", "Time", "Room", "Size"]
        );
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            vec!["CS101A", "?", "?", "40"]
        );
    }

    #[test]
    fn report_keeps_insertion_order() {
        let report = to_report(&sample());
        let codes: Vec<&str> = report
            .lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(codes, vec!["MA201A", "CS101A", "CS105B"]);
    }

    #[test]
    fn report_columns_are_fixed_width() {
        let report = to_report(&sample());
        let widths: Vec<usize> = report.lines().map(str::len).collect();
        let expected = CODE_WIDTH + TIME_WIDTH + ROOM_WIDTH + SIZE_WIDTH + 3;
        assert!(widths.iter().all(|&w| w == expected), "{widths:?}");
    }

    #[test]
    fn export_lines_match_input_shape_and_keep_title() {
        let lines = to_export_lines(&sample());
        assert_eq!(
            lines,
            vec![
                "MA201A Calculus TueAM C 60",
                "CS101A Intro ? ? 40",
                "CS105B Algorithms MonAM A 50",
            ]
        );
    }

    #[test]
    fn export_text_is_newline_terminated() {
        let reg = Registry::load(["CS101A Intro ? ? 40"]).unwrap();
        assert_eq!(to_export_text(&reg), "CS101A Intro ? ? 40\n");
        assert_eq!(to_export_text(&Registry::default()), "");
    }
}
