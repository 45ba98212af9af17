//! Error types for the I/O-bound peripherals
//!
//! The core resolution and tree-building algorithms never fail; only the
//! peripherals that touch the file system or parse the extractor's dump
//! construct these.

use std::path::PathBuf;

use thiserror::Error;

/// An error surfaced by a symdoc peripheral
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid record dump {path}: {source}")]
    RecordDump {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SiteError {
    /// Wrap a read failure with its path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    /// Wrap a write failure with its path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}
