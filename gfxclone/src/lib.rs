//! Clones a country's infantry `.gfx`/`.asset` pair to a new country tag.
//!
//! The template files are treated as plain text: the tag, its lowercase form
//! and the mesh prefix are swapped by ordered literal substitution (see
//! [`rules`]), and the results are written next to the templates under
//! `gfx/entities`.

pub mod config;
pub mod discover;
pub mod encoding;
pub mod error;
pub mod prompt;
pub mod report;
pub mod retarget;
pub mod rules;
pub mod tag;

pub use config::{RetargetConfig, RetargetRequest, TemplateFile};
pub use error::RetargetError;
pub use retarget::{FileOutcome, FileStatus, Plan};
pub use rules::Replacement;
pub use tag::Tag;
