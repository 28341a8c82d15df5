//! Interactive mode, used when the binary is started without arguments.
//!
//! Only collects answers; the result is the same [`RetargetRequest`] the
//! CLI builds.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{RetargetConfig, RetargetRequest};
use crate::rules::Replacement;
use crate::tag::Tag;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for every parameter in turn. `default_root` is shown as the mod
    /// root default and used when the answer is blank.
    pub fn ask_request(
        &mut self,
        config: &RetargetConfig,
        default_root: &Path,
    ) -> io::Result<RetargetRequest> {
        writeln!(
            self.output,
            "Interactive mode - press Ctrl+C to cancel. Leave a field blank to accept the default."
        )?;

        let new_tag = self.ask_tag("New country tag", None)?;
        let template_tag =
            self.ask_tag("Template tag", Some(&config.default_template_tag))?;

        let root = self.ask(&format!("Mod root [{}]", default_root.display()))?;
        let mod_root = if root.is_empty() {
            default_root.to_path_buf()
        } else {
            PathBuf::from(root)
        };

        let mesh = self.ask(&format!(
            "Mesh prefix [{}]",
            config.default_mesh_prefix(&new_tag)
        ))?;

        let mut extra = Vec::new();
        loop {
            let line = self.ask("Extra replacement (FROM=TO, blank to finish)")?;
            if line.is_empty() {
                break;
            }
            match Replacement::parse_pair(&line) {
                Ok(rule) => extra.push(rule),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        let dry_run = self.ask_bool("Preview only (dry run)?", false)?;
        let force = self.ask_bool("Overwrite existing files if present?", false)?;

        Ok(RetargetRequest {
            new_tag,
            template_tag: Some(template_tag),
            mod_root: Some(mod_root),
            mesh_prefix: (!mesh.is_empty()).then_some(mesh),
            extra,
            dry_run,
            force,
        })
    }

    /// Reads one trimmed line. End of input is an error so loops terminate.
    fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all answers were given",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_tag(&mut self, label: &str, default: Option<&Tag>) -> io::Result<Tag> {
        let label = match default {
            Some(tag) => format!("{} [{}]", label, tag),
            None => label.to_string(),
        };
        loop {
            let answer = self.ask(&label)?;
            if answer.is_empty() {
                if let Some(tag) = default {
                    return Ok(tag.clone());
                }
                writeln!(self.output, "Please enter a three-letter tag.")?;
                continue;
            }
            match Tag::parse(&answer) {
                Ok(tag) => return Ok(tag),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn ask_bool(&mut self, label: &str, default: bool) -> io::Result<bool> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{} {}", label, suffix))?.to_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer with 'y' or 'n'.")?,
            }
        }
    }
}
