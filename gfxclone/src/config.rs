//! Defaults and per-run inputs for the retargeter.
//!
//! Every built-in default lives in [`RetargetConfig`] so callers (and tests)
//! can override any of them independently. [`RetargetRequest`] carries what
//! changes from run to run, and is built by both the CLI and the prompt.

use std::path::PathBuf;

use crate::rules::Replacement;
use crate::tag::Tag;

/// Placeholder substituted by a tag in path and token patterns.
pub const TAG_PLACEHOLDER: &str = "{tag}";

/// A template file, described by a path pattern relative to the mod root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Relative path containing `{tag}`, e.g. `gfx/entities/zzz_{tag}_infantry.gfx`.
    pub pattern: String,
    /// Human-readable name used in reports.
    pub label: String,
}

impl TemplateFile {
    pub fn new(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }

    /// Relative path for the given tag.
    pub fn relative_path(&self, tag: &Tag) -> PathBuf {
        PathBuf::from(render(&self.pattern, tag))
    }
}

/// Built-in defaults for a retarget run.
#[derive(Debug, Clone)]
pub struct RetargetConfig {
    /// Template tag used when the request does not name one.
    pub default_template_tag: Tag,
    /// Pattern for the default mesh prefix of the new tag.
    pub mesh_prefix_pattern: String,
    /// Pattern for the mesh token searched for in the template files.
    pub mesh_token_pattern: String,
    /// Files cloned per run.
    pub files: Vec<TemplateFile>,
    /// Subdirectory that identifies a mod root.
    pub marker_dir: PathBuf,
    /// How many ancestors of the working directory discovery may climb.
    pub max_depth: usize,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            default_template_tag: Tag::from_static("BLR"),
            mesh_prefix_pattern: "MI_{tag}".to_string(),
            mesh_token_pattern: "MI_{tag}".to_string(),
            files: vec![
                TemplateFile::new("gfx/entities/zzz_{tag}_infantry.gfx", "Infantry gfx"),
                TemplateFile::new(
                    "gfx/entities/zzz_{tag}_infantry_asset.asset",
                    "Infantry asset",
                ),
            ],
            marker_dir: PathBuf::from("gfx").join("entities"),
            max_depth: 4,
        }
    }
}

impl RetargetConfig {
    /// Default mesh prefix for `tag`, e.g. `MI_LIT`.
    pub fn default_mesh_prefix(&self, tag: &Tag) -> String {
        render(&self.mesh_prefix_pattern, tag)
    }

    /// Mesh token present in the template files, e.g. `MI_BLR`.
    pub fn mesh_token(&self, template: &Tag) -> String {
        render(&self.mesh_token_pattern, template)
    }
}

/// Inputs for a single run.
#[derive(Debug, Clone)]
pub struct RetargetRequest {
    pub new_tag: Tag,
    /// `None` falls back to [`RetargetConfig::default_template_tag`].
    pub template_tag: Option<Tag>,
    /// `None` triggers mod-root discovery.
    pub mod_root: Option<PathBuf>,
    /// `None` falls back to [`RetargetConfig::default_mesh_prefix`].
    pub mesh_prefix: Option<String>,
    pub extra: Vec<Replacement>,
    pub dry_run: bool,
    pub force: bool,
}

impl RetargetRequest {
    pub fn new(new_tag: Tag) -> Self {
        Self {
            new_tag,
            template_tag: None,
            mod_root: None,
            mesh_prefix: None,
            extra: Vec::new(),
            dry_run: false,
            force: false,
        }
    }
}

fn render(pattern: &str, tag: &Tag) -> String {
    pattern.replace(TAG_PLACEHOLDER, tag.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = RetargetConfig::default();
        let lit = Tag::parse("LIT").unwrap();
        let paths: Vec<_> = config
            .files
            .iter()
            .map(|f| f.relative_path(&lit))
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("gfx/entities/zzz_LIT_infantry.gfx"),
                PathBuf::from("gfx/entities/zzz_LIT_infantry_asset.asset"),
            ]
        );
    }

    #[test]
    fn test_mesh_defaults() {
        let config = RetargetConfig::default();
        assert_eq!(config.default_template_tag.as_str(), "BLR");
        assert_eq!(config.default_mesh_prefix(&Tag::parse("LIT").unwrap()), "MI_LIT");
        assert_eq!(config.mesh_token(&Tag::parse("BLR").unwrap()), "MI_BLR");
    }

    #[test]
    fn test_overridden_pattern() {
        let config = RetargetConfig {
            mesh_prefix_pattern: "MESH_{tag}_X".to_string(),
            ..RetargetConfig::default()
        };
        assert_eq!(
            config.default_mesh_prefix(&Tag::parse("POL").unwrap()),
            "MESH_POL_X"
        );
    }
}
