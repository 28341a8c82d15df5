//! The read -> transform -> write pipeline.
//!
//! [`plan`] does every read and validation up front; nothing is written until
//! a complete [`Plan`] exists. [`execute`] then writes (or, for a dry run,
//! only describes) each file, and [`run`] ties both to the report.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{RetargetConfig, RetargetRequest};
use crate::discover;
use crate::encoding::{self, SourceEncoding};
use crate::error::{Result, RetargetError};
use crate::report;
use crate::rules::{Applied, RuleSet};
use crate::tag::Tag;

/// One template file and what it will become.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub label: String,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub original: String,
    pub applied: Applied,
    pub encoding: SourceEncoding,
    /// Whether `dest` existed when the plan was built.
    pub dest_exists: bool,
}

impl PlannedFile {
    /// Bytes that will be written to `dest`.
    pub fn output_bytes(&self) -> Vec<u8> {
        encoding::encode(&self.applied.text, self.encoding)
    }
}

/// Everything needed to perform a run, computed without side effects.
#[derive(Debug, Clone)]
pub struct Plan {
    pub mod_root: PathBuf,
    pub template_tag: Tag,
    pub new_tag: Tag,
    pub mesh_prefix: String,
    pub files: Vec<PlannedFile>,
    pub dry_run: bool,
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    Overwritten,
    /// Not written because the destination exists and `--force` was not set.
    Conflict,
    Failed(String),
    WouldCreate,
    WouldOverwrite,
    WouldConflict,
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub label: String,
    pub dest: PathBuf,
    pub status: FileStatus,
}

/// Destination paths for `new_tag`. Depends on nothing but its arguments.
pub fn output_paths(mod_root: &Path, new_tag: &Tag, config: &RetargetConfig) -> Vec<PathBuf> {
    config
        .files
        .iter()
        .map(|f| mod_root.join(f.relative_path(new_tag)))
        .collect()
}

/// Validates the request and reads/transforms every template file.
pub fn plan(request: &RetargetRequest, config: &RetargetConfig) -> Result<Plan> {
    let template_tag = request
        .template_tag
        .clone()
        .unwrap_or_else(|| config.default_template_tag.clone());
    let new_tag = request.new_tag.clone();

    if template_tag == new_tag {
        return Err(RetargetError::SameTag(new_tag));
    }

    let mod_root = match &request.mod_root {
        Some(path) => discover::validate_mod_root(path, config)?,
        None => discover::find_mod_root(config)?,
    };

    let mesh_prefix = request
        .mesh_prefix
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.default_mesh_prefix(&new_tag));

    let rules = RuleSet::new(
        &template_tag,
        &new_tag,
        &config.mesh_token(&template_tag),
        &mesh_prefix,
        request.extra.clone(),
    )?;

    log::info!(
        "Cloning {} -> {} in {} (mesh prefix {})",
        template_tag,
        new_tag,
        mod_root.display(),
        mesh_prefix
    );

    let dests = output_paths(&mod_root, &new_tag, config);
    let mut files = Vec::with_capacity(config.files.len());

    for (template, dest) in config.files.iter().zip(dests) {
        let source = mod_root.join(template.relative_path(&template_tag));
        if !source.is_file() {
            return Err(RetargetError::TemplateNotFound {
                label: template.label.clone(),
                path: source,
            });
        }

        let bytes = fs::read(&source).map_err(|e| RetargetError::io(&source, e))?;
        let (original, encoding) = encoding::decode(&bytes);
        log::debug!("Read {} ({}, {} bytes)", source.display(), encoding, bytes.len());

        let applied = rules.apply(&original);
        let dest_exists = dest.exists();

        files.push(PlannedFile {
            label: template.label.clone(),
            source,
            dest,
            original,
            applied,
            encoding,
            dest_exists,
        });
    }

    Ok(Plan {
        mod_root,
        template_tag,
        new_tag,
        mesh_prefix,
        files,
        dry_run: request.dry_run,
        force: request.force,
    })
}

/// Writes every planned file that is allowed to be written.
///
/// A conflict or failure on one file does not stop the others.
pub fn execute(plan: &Plan) -> Vec<FileOutcome> {
    plan.files
        .iter()
        .map(|file| FileOutcome {
            label: file.label.clone(),
            dest: file.dest.clone(),
            status: execute_one(plan, file),
        })
        .collect()
}

fn execute_one(plan: &Plan, file: &PlannedFile) -> FileStatus {
    if plan.dry_run {
        return match (file.dest_exists, plan.force) {
            (false, _) => FileStatus::WouldCreate,
            (true, true) => FileStatus::WouldOverwrite,
            (true, false) => FileStatus::WouldConflict,
        };
    }

    if file.dest_exists && !plan.force {
        log::warn!("Skipping existing file: {}", file.dest.display());
        return FileStatus::Conflict;
    }

    match write_file(&file.dest, &file.output_bytes(), plan.force) {
        Ok(true) => {
            log::info!("Wrote {}", file.dest.display());
            if file.dest_exists {
                FileStatus::Overwritten
            } else {
                FileStatus::Created
            }
        }
        Ok(false) => {
            log::warn!("Skipping file created during the run: {}", file.dest.display());
            FileStatus::Conflict
        }
        Err(e) => {
            log::error!("{}", e);
            FileStatus::Failed(e.to_string())
        }
    }
}

/// Writes `bytes` to `dest`, returning `false` if `dest` already exists and
/// `overwrite` is off.
///
/// Without `overwrite` the file is created exclusively, so a destination
/// that appeared after planning is never clobbered.
fn write_file(dest: &Path, bytes: &[u8], overwrite: bool) -> Result<bool> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| RetargetError::io(parent, e))?;
    }
    if overwrite {
        fs::write(dest, bytes).map_err(|e| RetargetError::io(dest, e))?;
        return Ok(true);
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(RetargetError::io(dest, e)),
    };
    file.write_all(bytes).map_err(|e| RetargetError::io(dest, e))?;
    Ok(true)
}

/// Plans, executes and reports a full run.
///
/// The per-file report is written before any conflict or write failure is
/// returned, so the caller always knows which files were written. Write
/// failures take precedence over conflicts, but the error names both.
pub fn run(
    request: &RetargetRequest,
    config: &RetargetConfig,
    writer: &mut impl Write,
) -> Result<Vec<FileOutcome>> {
    let plan = plan(request, config)?;
    let outcomes = execute(&plan);

    report::print_report(&plan, &outcomes, writer)
        .map_err(|e| RetargetError::io("<output>", e))?;

    let conflicts: Vec<PathBuf> = outcomes
        .iter()
        .filter(|o| o.status == FileStatus::Conflict)
        .map(|o| o.dest.clone())
        .collect();
    let failed: Vec<PathBuf> = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Failed(_)))
        .map(|o| o.dest.clone())
        .collect();

    if !failed.is_empty() {
        return Err(RetargetError::WriteFailed { failed, conflicts });
    }
    if !conflicts.is_empty() {
        return Err(RetargetError::Conflict { paths: conflicts });
    }

    Ok(outcomes)
}
