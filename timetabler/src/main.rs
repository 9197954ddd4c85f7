/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use timetabler::config::CatalogConfig;
use timetabler::scheduler::{Advisory, SchedulerError};
use timetabler::session::{PlacementObserver, PlacementRequest, Timetable};
use timetabler::store;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Timetabler – place course modules into timeslots and rooms.
///
/// Example:
///   timetabler -m ModulesIn.txt -o ModulesOut.txt place CS101A MonAM A
#[derive(Debug, Parser)]
#[command(name = "timetabler", about = "Course module timetabling assistant", long_about = None)]
struct Cli {
    /// Module records to load (`code title timeslot room size` per line).
    #[arg(short = 'm', long = "modules", default_value = "ModulesIn.txt")]
    modules: PathBuf,

    /// File rewritten with the full module list after every accepted placement.
    #[arg(short = 'o', long = "output", default_value = "ModulesOut.txt")]
    output: PathBuf,

    /// YAML room catalog / timeslot calendar.  Built-in rooms A–H when absent.
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the module report.
    Report,
    /// Print the timetable grid.
    Grid,
    /// Place one module and exit.
    Place {
        code: String,
        timeslot: String,
        room: String,
    },
    /// Read `CODE TIME ROOM` requests from stdin (default).
    Interactive,
}

// ── Front-end observer ────────────────────────────────────────────────────────

/// Shows advisories to the user before the commit goes ahead.
struct ConsoleNotice;

impl PlacementObserver for ConsoleNotice {
    fn on_advisory(&mut self, advisory: &Advisory) {
        println!("NOTE: {}", advisory);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr; stdout carries the report and grid.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        modules = %cli.modules.display(),
        output  = %cli.output.display(),
        rooms   = ?cli.rooms,
        "Configuration"
    );

    // ── Load room catalog ─────────────────────────────────────────────────────
    let catalog = match &cli.rooms {
        Some(path) => match CatalogConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load room catalog: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No room catalog provided, using default rooms A–H");
            CatalogConfig::default_config()
        }
    };

    // ── Load modules (fatal on any malformed record) ──────────────────────────
    let registry = match store::load_registry(&cli.modules) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            eprintln!("No usable modules list: {}", e);
            process::exit(1);
        }
    };

    let mut timetable = Timetable::new(Arc::new(catalog), registry).with_export(&cli.output);
    timetable.add_observer(Box::new(ConsoleNotice));

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Report => print!("{}", timetable.report()),
        Command::Grid => print!("{}", timetable.grid().render()),
        Command::Place {
            code,
            timeslot,
            room,
        } => {
            let request = PlacementRequest::new(code, timeslot, room);
            if !handle_request(&mut timetable, &request) {
                process::exit(2);
            }
            print!("{}", timetable.grid().render());
        }
        Command::Interactive => {
            if let Err(e) = run_interactive(&mut timetable) {
                error!("stdin error: {}", e);
            }
            // save and exit
            if let Err(e) = timetable.save() {
                warn!("{}", e);
                eprintln!("Error writing the output file: {}", e);
            }
        }
    }
}

/// Submit one request and print the result.  Returns `true` on success.
fn handle_request(timetable: &mut Timetable, request: &PlacementRequest) -> bool {
    match timetable.submit(request) {
        Ok(outcome) => {
            match &outcome.event.previous {
                Some(prev) => println!(
                    "Moved {} from {} to {}",
                    outcome.event.code, prev, outcome.event.placement
                ),
                None => println!("Placed {} at {}", outcome.event.code, outcome.event.placement),
            }
            for w in &outcome.warnings {
                eprintln!("WARNING: {}", w);
            }
            true
        }
        Err(SchedulerError::EmptyInput) => {
            println!("No input provided.");
            false
        }
        Err(e) => {
            println!("ERROR: {}", e);
            false
        }
    }
}

fn run_interactive(timetable: &mut Timetable) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    print!("{}", timetable.grid().render());
    println!("Enter `CODE TIME ROOM`, or: report | grid | save | exit");

    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["exit"] | ["quit"] => break,
            ["report"] => print!("{}", timetable.report()),
            ["grid"] => print!("{}", timetable.grid().render()),
            ["save"] => match timetable.save() {
                Ok(()) => println!("Saved."),
                Err(e) => eprintln!("WARNING: {}", e),
            },
            [code, timeslot, room] => {
                handle_request(timetable, &PlacementRequest::new(*code, *timeslot, *room));
            }
            _ => println!("Expected `CODE TIME ROOM`"),
        }
        out.flush()?;
    }
    Ok(())
}
