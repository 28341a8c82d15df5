use std::io::Write;

use crate::retarget::{FileOutcome, FileStatus, Plan, PlannedFile};

/// Generate a human-readable report of a run.
///
/// Dry runs also get the substitution counts and a line diff per file.
pub fn print_report(
    plan: &Plan,
    outcomes: &[FileOutcome],
    writer: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "=== {} -> {} ===",
        plan.template_tag, plan.new_tag
    )?;
    writeln!(writer, "Mod root: {}", plan.mod_root.display())?;
    writeln!(writer, "Mesh prefix: {}", plan.mesh_prefix)?;
    writeln!(writer)?;

    for (file, outcome) in plan.files.iter().zip(outcomes) {
        writeln!(writer, "{}", status_line(outcome))?;
        if plan.dry_run {
            print_hits(file, writer)?;
            print_diff(file, writer)?;
            writeln!(writer)?;
        }
    }

    let written = outcomes
        .iter()
        .filter(|o| matches!(o.status, FileStatus::Created | FileStatus::Overwritten))
        .count();
    if plan.dry_run {
        writeln!(writer, "Dry run: no files were written.")?;
    } else {
        writeln!(writer, "{} of {} file(s) written.", written, outcomes.len())?;
    }

    Ok(())
}

fn status_line(outcome: &FileOutcome) -> String {
    let dest = outcome.dest.display();
    let label = &outcome.label;
    match &outcome.status {
        FileStatus::Created => format!("Created {}: {}", label, dest),
        FileStatus::Overwritten => format!("Overwrote {}: {}", label, dest),
        FileStatus::Conflict => format!(
            "[CONFLICT] {}: {} already exists (use --force to overwrite)",
            label, dest
        ),
        FileStatus::Failed(err) => format!("[FAILED] {}: {}", label, err),
        FileStatus::WouldCreate => format!("[dry-run] Would write {}: {}", label, dest),
        FileStatus::WouldOverwrite => format!("[dry-run] Would overwrite {}: {}", label, dest),
        FileStatus::WouldConflict => format!(
            "[dry-run] {}: {} already exists, --force needed to overwrite",
            label, dest
        ),
    }
}

fn print_hits(file: &PlannedFile, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "  source: {} ({})", file.source.display(), file.encoding)?;
    let hits: Vec<_> = file.applied.hits.iter().filter(|h| h.count > 0).collect();
    if hits.is_empty() {
        writeln!(writer, "  no replacements matched")?;
        return Ok(());
    }
    writeln!(writer, "  {} replacement(s):", file.applied.total())?;
    for hit in hits {
        writeln!(writer, "  {:<5} {} x{}", hit.kind, hit.rule, hit.count)?;
    }
    Ok(())
}

fn print_diff(file: &PlannedFile, writer: &mut impl Write) -> std::io::Result<()> {
    let before: Vec<&str> = file.original.lines().collect();
    let after: Vec<&str> = file.applied.text.lines().collect();

    if before.len() != after.len() {
        writeln!(
            writer,
            "  line count changes from {} to {}",
            before.len(),
            after.len()
        )?;
        return Ok(());
    }

    for (n, (old, new)) in before.iter().zip(&after).enumerate() {
        if old != new {
            writeln!(writer, "  @@ line {}", n + 1)?;
            writeln!(writer, "  - {}", old)?;
            writeln!(writer, "  + {}", new)?;
        }
    }
    Ok(())
}
