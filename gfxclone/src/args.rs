use clap::{ArgAction, Parser};
use std::path::PathBuf;

use gfxclone::{Replacement, RetargetError, RetargetRequest, Tag};

#[derive(Parser, Debug)]
#[command(name = "gfxclone")]
#[command(version, about = "Clone infantry gfx/asset files from one country tag to another", long_about = None)]
pub struct Cli {
    /// Three-letter country tag to generate (e.g. LIT)
    #[arg(value_name = "NEW_TAG", value_parser = parse_tag)]
    pub new_tag: Tag,

    /// Source country tag to copy from (default: BLR)
    #[arg(long, env = "GFXCLONE_TEMPLATE_TAG", value_parser = parse_tag)]
    pub template_tag: Option<Tag>,

    /// Path to the mod root (auto-detected if not provided)
    #[arg(long, env = "GFXCLONE_MOD_ROOT")]
    pub mod_root: Option<PathBuf>,

    /// Replacement for MI_<TEMPLATE> (default: MI_<NEW_TAG>)
    #[arg(long)]
    pub mesh_prefix: Option<String>,

    /// Additional literal replacement, applied after the automatic ones (repeatable)
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], action = ArgAction::Append)]
    pub extra_replace: Vec<String>,

    /// Compute file contents without writing changes
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite targets if they already exist
    #[arg(long)]
    pub force: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_request(self) -> Result<RetargetRequest, RetargetError> {
        let extra = self
            .extra_replace
            .chunks_exact(2)
            .map(|pair| Replacement::new(pair[0].as_str(), pair[1].as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RetargetRequest {
            new_tag: self.new_tag,
            template_tag: self.template_tag,
            mod_root: self.mod_root,
            mesh_prefix: self.mesh_prefix,
            extra,
            dry_run: self.dry_run,
            force: self.force,
        })
    }
}

fn parse_tag(s: &str) -> Result<Tag, String> {
    Tag::parse(s).map_err(|e| e.to_string())
}
