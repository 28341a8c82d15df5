//! Ordered literal substitutions applied to template file contents.
//!
//! Application order is fixed:
//! 1. the template mesh token (`MI_BLR`) is swapped for a placeholder,
//! 2. the built-in tag rules run,
//! 3. the placeholder becomes the mesh prefix,
//! 4. user rules run in the order given.
//!
//! Shielding the mesh token keeps a custom mesh prefix out of reach of the
//! tag rules, so `--mesh-prefix MI_BLR` really keeps the original meshes.

use std::fmt;
use std::str::FromStr;

use crate::error::RetargetError;
use crate::tag::Tag;

/// A single `from -> to` literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, RetargetError> {
        let from = from.into();
        if from.is_empty() {
            return Err(RetargetError::InvalidReplacement(
                "replacement source cannot be empty".to_string(),
            ));
        }
        Ok(Self { from, to: to.into() })
    }

    /// Parses the `FROM=TO` form. Only the first `=` separates.
    pub fn parse_pair(value: &str) -> Result<Self, RetargetError> {
        let (from, to) = value.split_once('=').ok_or_else(|| {
            RetargetError::InvalidReplacement(format!(
                "extra replacements must look like FROM=TO (got '{}')",
                value
            ))
        })?;
        Self::new(from, to)
    }

    /// Replaces every occurrence and returns how many were replaced.
    fn apply(&self, text: &mut String) -> usize {
        let count = text.matches(self.from.as_str()).count();
        if count > 0 {
            *text = text.replace(self.from.as_str(), &self.to);
        }
        count
    }
}

impl FromStr for Replacement {
    type Err = RetargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Replacement::parse_pair(s)
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.from, self.to)
    }
}

/// Which stage of the rule set produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Mesh,
    Tag,
    Extra,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleKind::Mesh => "mesh",
            RuleKind::Tag => "tag",
            RuleKind::Extra => "extra",
        };
        f.pad(s)
    }
}

/// Number of substitutions one rule made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub kind: RuleKind,
    pub rule: Replacement,
    pub count: usize,
}

/// Result of running a [`RuleSet`] over one text.
#[derive(Debug, Clone)]
pub struct Applied {
    pub text: String,
    pub hits: Vec<RuleHit>,
}

impl Applied {
    pub fn total(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }
}

/// The complete ordered substitution plan for one run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    mesh: Replacement,
    tag_rules: Vec<Replacement>,
    extra: Vec<Replacement>,
}

impl RuleSet {
    /// Builds the rule set for cloning `template` into `new_tag`.
    ///
    /// `mesh_token` is what the template files use (e.g. `MI_BLR`) and
    /// `mesh_prefix` what it becomes (e.g. `MI_LIT`).
    pub fn new(
        template: &Tag,
        new_tag: &Tag,
        mesh_token: &str,
        mesh_prefix: &str,
        extra: Vec<Replacement>,
    ) -> Result<Self, RetargetError> {
        let (t, n) = (template.as_str(), new_tag.as_str());
        let (tl, nl) = (template.lower(), new_tag.lower());
        let tag_rules = vec![
            Replacement::new(format!("zzz_{t}_"), format!("zzz_{n}_"))?,
            Replacement::new(format!("{t}_"), format!("{n}_"))?,
            Replacement::new(format!("{tl}_"), format!("{nl}_"))?,
            Replacement::new(tl, nl)?,
            Replacement::new(t, n)?,
        ];

        Ok(Self {
            mesh: Replacement::new(mesh_token, mesh_prefix)?,
            tag_rules,
            extra,
        })
    }

    pub fn apply(&self, input: &str) -> Applied {
        let mut text = input.to_string();
        let mut hits = Vec::with_capacity(1 + self.tag_rules.len() + self.extra.len());

        let placeholder = placeholder_for(&text);
        let shield = Replacement {
            from: self.mesh.from.clone(),
            to: placeholder.clone(),
        };
        let mesh_count = shield.apply(&mut text);

        for rule in &self.tag_rules {
            let count = rule.apply(&mut text);
            hits.push(RuleHit {
                kind: RuleKind::Tag,
                rule: rule.clone(),
                count,
            });
        }

        if mesh_count > 0 {
            text = text.replace(&placeholder, &self.mesh.to);
        }
        // Reported after the tag rules to match application order
        hits.push(RuleHit {
            kind: RuleKind::Mesh,
            rule: self.mesh.clone(),
            count: mesh_count,
        });

        for rule in &self.extra {
            let count = rule.apply(&mut text);
            hits.push(RuleHit {
                kind: RuleKind::Extra,
                rule: rule.clone(),
                count,
            });
        }

        for hit in &hits {
            log::debug!("{} rule {}: {} hit(s)", hit.kind, hit.rule, hit.count);
        }

        Applied { text, hits }
    }
}

/// Placeholder that does not occur in `text` and contains no letters, so no
/// tag rule can touch it.
fn placeholder_for(text: &str) -> String {
    let mut n = 0usize;
    loop {
        let candidate = format!("\u{0}{}\u{0}", n);
        if !text.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
