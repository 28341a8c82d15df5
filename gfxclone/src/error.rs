//! Error types for the retargeting pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::tag::Tag;

#[derive(Error, Debug)]
pub enum RetargetError {
    /// The input could not be turned into a three-letter tag.
    #[error("Country tags must be three alphabetic characters (got '{input}'): {reason}")]
    InvalidTag { input: String, reason: String },

    /// An extra replacement was malformed.
    #[error("Invalid replacement: {0}")]
    InvalidReplacement(String),

    /// The new tag is the template tag, which would overwrite the template itself.
    #[error("New tag {0} is the same as the template tag")]
    SameTag(Tag),

    /// No candidate directory contained the marker directory.
    #[error(
        "Could not find a mod root containing {} (searched: {}). Please provide --mod-root.",
        .marker.display(),
        format_paths(.searched)
    )]
    Discovery {
        marker: PathBuf,
        searched: Vec<PathBuf>,
    },

    /// An explicitly given mod root is unusable.
    #[error("Mod root '{}' {reason}", .path.display())]
    ModRootInvalid { path: PathBuf, reason: String },

    #[error("Template file for {label} not found: {}", .path.display())]
    TemplateNotFound { label: String, path: PathBuf },

    /// Destinations that already exist and `--force` was not given.
    #[error("Target file(s) already exist (use --force to overwrite): {}", format_paths(.paths))]
    Conflict { paths: Vec<PathBuf> },

    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// At least one write failed after the plan was validated.
    #[error("Failed to write: {}{}", format_paths(.failed), format_conflicts(.conflicts))]
    WriteFailed {
        failed: Vec<PathBuf>,
        /// Files skipped in the same run because they already existed.
        conflicts: Vec<PathBuf>,
    },
}

impl RetargetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RetargetError::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_conflicts(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        String::new()
    } else {
        format!("; already exist (use --force to overwrite): {}", format_paths(paths))
    }
}

pub type Result<T> = std::result::Result<T, RetargetError>;
