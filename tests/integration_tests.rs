//! Integration tests for kiln.
//!
//! Every invocation runs the real binary in automated mode against the
//! templates shipped in this repository, with the installer stubbed out so
//! no network is touched.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a kiln Command with a hermetic environment: repo
/// templates, automated mode, stubbed installer, no forced decisions.
fn kiln() -> Command {
    let mut cmd = cargo_bin_cmd!("kiln");
    cmd.env_remove("KILN_FORCE_OVERWRITE")
        .env_remove("KILN_RENAME_TO")
        .env("KILN_AUTOMATED", "1")
        .env("KILN_TEMPLATES_DIR", templates_dir())
        .env("KILN_INSTALL_CMD", "true");
    cmd
}

fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Relative paths of all regular files under `root`, sorted.
fn file_set(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            out.push(path.strip_prefix(root).unwrap().to_path_buf());
        }
    }
}

fn assert_no_tokens(root: &Path) {
    for rel in file_set(root) {
        let content = std::fs::read(root.join(&rel)).unwrap();
        let token = b"{{__PROJECT_NAME__}}";
        let found = content
            .windows(token.len())
            .any(|window| window == token.as_slice());
        assert!(!found, "token left behind in {}", rel.display());
    }
}

// =============================================================================
// Basic CLI
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help_exits_zero() {
        kiln()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("kiln"));
    }

    #[test]
    fn test_version_exits_zero() {
        kiln().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let dir = create_temp_project();
        kiln()
            .current_dir(dir.path())
            .args(["myapp", "--fortran"])
            .assert()
            .failure();
        assert!(!dir.path().join("myapp").exists());
    }
}

// =============================================================================
// Scaffolding
// =============================================================================

mod scaffolding {
    use super::*;

    #[test]
    fn test_named_project_with_flags() {
        let dir = create_temp_project();

        kiln()
            .current_dir(dir.path())
            .args(["myapp", "--ts", "--mongo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Project created"));

        let target = dir.path().join("myapp");
        assert_eq!(file_set(&target), file_set(&templates_dir().join("ts-mongo")));
        assert_no_tokens(&target);
        let manifest = std::fs::read_to_string(target.join("package.json")).unwrap();
        assert!(manifest.contains("\"myapp\""));
    }

    #[test]
    fn test_dot_uses_directory_basename() {
        let dir = create_temp_project();
        let cwd = dir.path().join("demo");
        std::fs::create_dir(&cwd).unwrap();

        // Automated defaults fill in js-mongo.
        kiln().current_dir(&cwd).arg(".").assert().success();

        assert_eq!(file_set(&cwd), file_set(&templates_dir().join("js-mongo")));
        let manifest = std::fs::read_to_string(cwd.join("package.json")).unwrap();
        assert!(manifest.contains("\"demo\""));
        assert!(!manifest.contains("\".\""));
    }

    #[test]
    fn test_every_combination_materializes_cleanly() {
        for (lang_flag, db_flag, combo) in [
            ("--js", "--mongo", "js-mongo"),
            ("--js", "--pg", "js-pg"),
            ("--ts", "--mongo", "ts-mongo"),
            ("--ts", "--pg", "ts-pg"),
        ] {
            let dir = create_temp_project();
            let name = format!("{combo}-app");

            kiln()
                .current_dir(dir.path())
                .args([name.as_str(), lang_flag, db_flag])
                .assert()
                .success();

            let target = dir.path().join(&name);
            assert_eq!(
                file_set(&target),
                file_set(&templates_dir().join(combo)),
                "file set mismatch for {combo}"
            );
            assert_no_tokens(&target);
        }
    }

    #[test]
    fn test_automated_defaults_without_any_args() {
        let dir = create_temp_project();

        kiln().current_dir(dir.path()).assert().success();

        // Automated defaults: test-app / js / mongo.
        let target = dir.path().join("test-app");
        assert!(target.join("package.json").exists());
        assert!(target.join("src/db.js").exists());
    }

    #[test]
    fn test_missing_template_combination_fails_before_writing() {
        let dir = create_temp_project();
        let broken_templates = create_temp_project();
        // Only one of the four combinations present.
        std::fs::create_dir(broken_templates.path().join("js-mongo")).unwrap();

        kiln()
            .current_dir(dir.path())
            .env("KILN_TEMPLATES_DIR", broken_templates.path())
            .args(["myapp", "--ts", "--pg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No template"));

        assert!(!dir.path().join("myapp").exists());
    }
}

// =============================================================================
// Conflict resolution
// =============================================================================

mod conflicts {
    use super::*;

    fn seed_existing(dir: &Path) -> PathBuf {
        let target = dir.join("existing");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("precious.txt"), "keep me").unwrap();
        target
    }

    #[test]
    fn test_conflict_without_decision_does_not_proceed() {
        let dir = create_temp_project();
        let target = seed_existing(dir.path());

        kiln()
            .current_dir(dir.path())
            .args(["existing", "--js", "--pg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not empty"));

        // Untouched: nothing deleted, nothing copied.
        assert_eq!(
            std::fs::read_to_string(target.join("precious.txt")).unwrap(),
            "keep me"
        );
        assert!(!target.join("package.json").exists());
    }

    #[test]
    fn test_forced_overwrite_replaces_contents() {
        let dir = create_temp_project();
        let target = seed_existing(dir.path());

        kiln()
            .current_dir(dir.path())
            .env("KILN_FORCE_OVERWRITE", "true")
            .args(["existing", "--js", "--mongo"])
            .assert()
            .success();

        assert!(!target.join("precious.txt").exists());
        assert_eq!(file_set(&target), file_set(&templates_dir().join("js-mongo")));
        assert_no_tokens(&target);
    }

    #[test]
    fn test_declined_overwrite_renames_into_fresh_sibling() {
        let dir = create_temp_project();
        let original = seed_existing(dir.path());

        kiln()
            .current_dir(dir.path())
            .env("KILN_FORCE_OVERWRITE", "false")
            .env("KILN_RENAME_TO", "fresh")
            .args(["existing", "--ts", "--pg"])
            .assert()
            .success();

        // Original untouched, sibling materialized under the new name.
        assert_eq!(
            std::fs::read_to_string(original.join("precious.txt")).unwrap(),
            "keep me"
        );
        let fresh = dir.path().join("fresh");
        assert_eq!(file_set(&fresh), file_set(&templates_dir().join("ts-pg")));
        let manifest = std::fs::read_to_string(fresh.join("package.json")).unwrap();
        assert!(manifest.contains("\"fresh\""));
    }

    #[test]
    fn test_declined_overwrite_without_rename_does_not_proceed() {
        let dir = create_temp_project();
        let target = seed_existing(dir.path());

        kiln()
            .current_dir(dir.path())
            .env("KILN_FORCE_OVERWRITE", "false")
            .args(["existing", "--js", "--mongo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not empty"));

        assert_eq!(
            std::fs::read_to_string(target.join("precious.txt")).unwrap(),
            "keep me"
        );
        assert!(!target.join("package.json").exists());
    }

    #[test]
    fn test_rename_chain_onto_occupied_name_gives_up() {
        let dir = create_temp_project();
        seed_existing(dir.path());
        let occupied = dir.path().join("also-taken");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("file.txt"), "x").unwrap();

        kiln()
            .current_dir(dir.path())
            .env("KILN_FORCE_OVERWRITE", "false")
            .env("KILN_RENAME_TO", "also-taken")
            .args(["existing", "--js", "--mongo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("rename attempts"));
    }
}

// =============================================================================
// Post-install
// =============================================================================

mod install {
    use super::*;

    #[test]
    fn test_installer_stdout_is_relayed() {
        let dir = create_temp_project();

        kiln()
            .current_dir(dir.path())
            .env("KILN_INSTALL_CMD", "echo deps-ok")
            .args(["myapp", "--js", "--mongo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("deps-ok"))
            .stdout(predicate::str::contains("Project created"));
    }

    #[test]
    fn test_installer_failure_fails_the_run_but_keeps_files() {
        let dir = create_temp_project();

        kiln()
            .current_dir(dir.path())
            .env("KILN_INSTALL_CMD", "echo install blew up >&2; exit 7")
            .args(["myapp", "--js", "--mongo"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Project created").not())
            .stderr(predicate::str::contains("install blew up"));

        // Copy and templating stay committed on disk.
        let target = dir.path().join("myapp");
        assert!(target.join("package.json").exists());
        assert_no_tokens(&target);
    }
}
