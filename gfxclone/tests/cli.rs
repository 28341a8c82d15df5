//! CLI integration tests using the pre-built binary.

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const GFX: &str = r#"objectTypes = {
	pdxmesh = {
		name = "MI_BLR_infantry_mesh"
		file = "gfx/models/units/BLR/infantry.mesh"
	}
}
"#;

const ASSET: &str = r#"entity = {
	name = "BLR_infantry_entity"
	pdxmesh = "MI_BLR_infantry_mesh"
	clone = "blr_soldier"
}
"#;

fn setup_mod(root: &Path) {
    let entities = root.join("gfx/entities");
    fs::create_dir_all(&entities).unwrap();
    fs::write(entities.join("zzz_BLR_infantry.gfx"), GFX).unwrap();
    fs::write(entities.join("zzz_BLR_infantry_asset.asset"), ASSET).unwrap();
}

fn gfxclone() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gfxclone"));
    cmd.env_remove("GFXCLONE_MOD_ROOT")
        .env_remove("GFXCLONE_TEMPLATE_TAG");
    cmd
}

#[test]
fn test_help() {
    gfxclone()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Clone infantry gfx/asset files"))
        .stdout(contains("--extra-replace <FROM> <TO>"));
}

#[test]
fn test_version() {
    gfxclone().arg("--version").assert().success();
}

#[test]
fn test_creates_lit_from_blr() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());

    gfxclone()
        .arg("LIT")
        .arg("--mod-root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Created Infantry gfx"))
        .stdout(contains("Created Infantry asset"))
        .stdout(contains("2 of 2 file(s) written."));

    let entities = dir.path().join("gfx/entities");
    let gfx = fs::read_to_string(entities.join("zzz_LIT_infantry.gfx")).unwrap();
    let asset = fs::read_to_string(entities.join("zzz_LIT_infantry_asset.asset")).unwrap();

    assert!(gfx.contains("\"MI_LIT_infantry_mesh\""));
    assert!(gfx.contains("gfx/models/units/LIT/infantry.mesh"));
    assert!(asset.contains("\"LIT_infantry_entity\""));
    assert!(asset.contains("\"lit_soldier\""));
    assert!(!gfx.contains("BLR") && !asset.contains("BLR"));

    // Templates are untouched
    assert_eq!(
        fs::read_to_string(entities.join("zzz_BLR_infantry.gfx")).unwrap(),
        GFX
    );
}

#[test]
fn test_second_run_conflicts_without_force() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let gfx_path = dir.path().join("gfx/entities/zzz_LIT_infantry.gfx");
    let asset_path = dir.path().join("gfx/entities/zzz_LIT_infantry_asset.asset");

    gfxclone()
        .args(["LIT", "--mod-root"])
        .arg(dir.path())
        .assert()
        .success();

    fs::write(&gfx_path, "edited").unwrap();
    fs::write(&asset_path, "edited too").unwrap();

    gfxclone()
        .args(["LIT", "--mod-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("[CONFLICT]"))
        .stdout(contains("0 of 2 file(s) written."))
        .stderr(contains("already exist"));

    assert_eq!(fs::read_to_string(&gfx_path).unwrap(), "edited");
    assert_eq!(fs::read_to_string(&asset_path).unwrap(), "edited too");
}

#[test]
fn test_partial_conflict_still_writes_other_file() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let gfx_path = dir.path().join("gfx/entities/zzz_LIT_infantry.gfx");
    fs::write(&gfx_path, "existing").unwrap();

    gfxclone()
        .args(["LIT", "--mod-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("Created Infantry asset"))
        .stdout(contains("1 of 2 file(s) written."));

    assert_eq!(fs::read_to_string(&gfx_path).unwrap(), "existing");
    assert!(dir
        .path()
        .join("gfx/entities/zzz_LIT_infantry_asset.asset")
        .exists());
}

#[test]
fn test_force_is_idempotent() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let gfx_path = dir.path().join("gfx/entities/zzz_LIT_infantry.gfx");

    gfxclone()
        .args(["LIT", "--force", "--mod-root"])
        .arg(dir.path())
        .assert()
        .success();
    let first = fs::read(&gfx_path).unwrap();

    gfxclone()
        .args(["LIT", "--force", "--mod-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Overwrote Infantry gfx"));
    assert_eq!(fs::read(&gfx_path).unwrap(), first);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());

    gfxclone()
        .args(["LIT", "--dry-run", "--force", "--mod-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("[dry-run] Would write Infantry gfx"))
        .stdout(contains("+ \t\tname = \"MI_LIT_infantry_mesh\""))
        .stdout(contains("Dry run: no files were written."));

    let entries = fs::read_dir(dir.path().join("gfx/entities")).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn test_dry_run_with_existing_target_succeeds() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let gfx_path = dir.path().join("gfx/entities/zzz_LIT_infantry.gfx");
    fs::write(&gfx_path, "existing").unwrap();

    gfxclone()
        .args(["LIT", "--dry-run", "--mod-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("--force needed to overwrite"));
    assert_eq!(fs::read_to_string(&gfx_path).unwrap(), "existing");
}

#[test]
fn test_invalid_tag() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());

    gfxclone()
        .args(["BL", "--mod-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("three alphabetic characters"));

    let entries = fs::read_dir(dir.path().join("gfx/entities")).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn test_mod_root_without_marker() {
    let dir = tempdir().unwrap();

    gfxclone()
        .args(["LIT", "--mod-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("does not contain"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_template_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("gfx/entities")).unwrap();

    gfxclone()
        .args(["LIT", "--mod-root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("Template file for Infantry gfx not found"));
}

#[test]
fn test_discovers_mod_root_from_subdirectory() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let scripts = dir.path().join("Scripts/tools");
    fs::create_dir_all(&scripts).unwrap();

    gfxclone()
        .current_dir(&scripts)
        .arg("LIT")
        .assert()
        .success();

    assert!(dir.path().join("gfx/entities/zzz_LIT_infantry.gfx").exists());
}

#[test]
fn test_mesh_prefix_and_extra_replace() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());

    gfxclone()
        .args([
            "LIT",
            "--mesh-prefix",
            "MI_BLR",
            "--extra-replace",
            "soldier",
            "rifleman",
            "--mod-root",
        ])
        .arg(dir.path())
        .assert()
        .success();

    let asset = fs::read_to_string(
        dir.path()
            .join("gfx/entities/zzz_LIT_infantry_asset.asset"),
    )
    .unwrap();
    assert!(asset.contains("\"MI_BLR_infantry_mesh\""));
    assert!(asset.contains("\"LIT_infantry_entity\""));
    assert!(asset.contains("\"lit_rifleman\""));
}

#[test]
fn test_template_tag_from_env() {
    let dir = tempdir().unwrap();
    let entities = dir.path().join("gfx/entities");
    fs::create_dir_all(&entities).unwrap();
    fs::write(entities.join("zzz_UKR_infantry.gfx"), "name = UKR").unwrap();
    fs::write(entities.join("zzz_UKR_infantry_asset.asset"), "name = ukr").unwrap();

    gfxclone()
        .env("GFXCLONE_TEMPLATE_TAG", "UKR")
        .env("GFXCLONE_MOD_ROOT", dir.path())
        .arg("LIT")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(entities.join("zzz_LIT_infantry_asset.asset")).unwrap(),
        "name = lit"
    );
}

#[test]
fn test_interactive_mode() {
    let dir = tempdir().unwrap();
    setup_mod(dir.path());
    let answers = format!("lit\n\n{}\n\n\n\n\n", dir.path().display());

    gfxclone()
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(contains("Interactive mode"))
        .stdout(contains("Created Infantry gfx"));

    assert!(dir.path().join("gfx/entities/zzz_LIT_infantry.gfx").exists());
}
