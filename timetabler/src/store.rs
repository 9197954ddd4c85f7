/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Flat-file persistence for the module record format.
//!
//! One record per line, `code title timeslot room size`, `?` for an
//! unscheduled field.  Reading happens once at start-up; writing rewrites
//! the whole file after every accepted placement (overwrite, never append).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::registry::{Registry, RegistryError};
use crate::report::to_export_text;

/// Start-up failure while reading the module file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read module file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid module file {path}: {source}")]
    Registry {
        path: PathBuf,
        #[source]
        source: RegistryError,
    },
}

/// Export failure.  Reported as a warning; the in-memory commit stands.
#[derive(Debug, Error)]
#[error("error writing output file {path}: {source}")]
pub struct PersistenceWriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Read every line of `path`.
pub fn read_records(path: &Path) -> Result<Vec<String>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = lines.len(), "module file read");
    Ok(lines)
}

/// Read and parse `path` into a [`Registry`].
pub fn load_registry(path: &Path) -> Result<Registry, StoreError> {
    info!("Loading modules from: {}", path.display());
    let records = read_records(path)?;
    Registry::load(&records).map_err(|source| StoreError::Registry {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` with the full registry dump.
pub fn write_export(path: &Path, registry: &Registry) -> Result<(), PersistenceWriteError> {
    fs::write(path, to_export_text(registry)).map_err(|source| PersistenceWriteError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), modules = registry.len(), "export written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Placement;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn modules_file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_registry_from_file() {
        let f = modules_file("CS101A Intro ? ? 40\nMA201A Calculus TueAM C 60\n");
        let reg = load_registry(f.path()).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(
            reg.find("MA201A").unwrap().1.placement(),
            Some(Placement::new("TueAM", "C"))
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_registry(Path::new("/nonexistent/ModulesIn.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_registry_error() {
        let f = modules_file("CS101A Intro ? ? forty\n");
        let err = load_registry(f.path()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Registry {
                source: RegistryError::MalformedRecord { line: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn export_then_reload_reproduces_registry() {
        let f = modules_file("CS101A Intro ? ? 40\nCS105B Algorithms MonAM A 50\nMA201A Calculus TueAM ? 60\n");
        let reg = load_registry(f.path()).unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("ModulesOut.txt");
        write_export(&out, &reg).unwrap();

        let reloaded = load_registry(&out).unwrap();
        assert_eq!(reloaded.all(), reg.all());
    }

    #[test]
    fn export_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("ModulesOut.txt");
        fs::write(&out, "stale line one\nstale line two\nstale line three\n").unwrap();

        let reg = Registry::load(["CS101A Intro ? ? 40"]).unwrap();
        write_export(&out, &reg).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "CS101A Intro ? ? 40\n");
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let reg = Registry::load(["CS101A Intro ? ? 40"]).unwrap();
        let err = write_export(Path::new("/nonexistent/dir/out.txt"), &reg).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/nonexistent/dir/out.txt"));
    }
}
