//! Filesystem sink for output artefacts.
//!
//! The body lands in a sibling temp file first and is renamed into place, so
//! a failed run never leaves a truncated artefact behind.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{BenchError, BenchResult};

use super::domain::ArtifactSink;

#[derive(Clone, Copy, Debug, Default)]
pub struct FsArtifactRepo;

impl FsArtifactRepo {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> BenchResult<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| BenchError::io(dir, e))
            }
            _ => Ok(()),
        }
    }

    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("output"));
        name.push(".partial");
        path.with_file_name(name)
    }
}

impl ArtifactSink for FsArtifactRepo {
    fn put_artifact(&self, path: &Path, body: &str) -> BenchResult<()> {
        Self::ensure_parent(path)?;
        let staging = Self::staging_path(path);
        fs::write(&staging, body).map_err(|e| BenchError::io(&staging, e))?;
        fs::rename(&staging, path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            BenchError::io(path, e)
        })
    }
}
