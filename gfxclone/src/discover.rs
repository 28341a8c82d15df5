use std::path::{Path, PathBuf};

use crate::config::RetargetConfig;
use crate::error::{Result, RetargetError};

/// Locates the mod root from the current directory and executable location.
///
/// Checks the working directory, up to `max_depth` of its ancestors, then the
/// directory holding the executable and its parent. The first one containing
/// the marker directory (`gfx/entities`) wins.
pub fn find_mod_root(config: &RetargetConfig) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| RetargetError::io(".", e))?;
    let exe = std::env::current_exe().ok();
    find_mod_root_from(&cwd, exe.as_deref(), config)
}

/// Same as [`find_mod_root`] with explicit starting points.
pub fn find_mod_root_from(
    start: &Path,
    exe: Option<&Path>,
    config: &RetargetConfig,
) -> Result<PathBuf> {
    let candidates = candidates(start, exe, config.max_depth);

    for candidate in &candidates {
        log::debug!("Checking mod root candidate: {}", candidate.display());
        if has_marker(candidate, &config.marker_dir) {
            log::info!("Auto-detected mod root: {}", candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(RetargetError::Discovery {
        marker: config.marker_dir.clone(),
        searched: candidates,
    })
}

/// Checks an explicitly given mod root, expanding a leading `~`.
pub fn validate_mod_root(path: &Path, config: &RetargetConfig) -> Result<PathBuf> {
    let path = expand_home(path);

    if !path.exists() {
        return Err(RetargetError::ModRootInvalid {
            path,
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(RetargetError::ModRootInvalid {
            path,
            reason: "is not a directory".to_string(),
        });
    }
    if !has_marker(&path, &config.marker_dir) {
        let reason = format!("does not contain {}", config.marker_dir.display());
        return Err(RetargetError::ModRootInvalid { path, reason });
    }

    Ok(path)
}

fn candidates(start: &Path, exe: Option<&Path>, max_depth: usize) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    let mut push = |p: &Path| {
        if !out.iter().any(|c| c == p) {
            out.push(p.to_path_buf());
        }
    };

    for dir in start.ancestors().take(max_depth + 1) {
        push(dir);
    }

    if let Some(exe_dir) = exe.and_then(Path::parent) {
        push(exe_dir);
        if let Some(parent) = exe_dir.parent() {
            push(parent);
        }
    }

    out
}

fn has_marker(dir: &Path, marker: &Path) -> bool {
    dir.join(marker).is_dir()
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
