//! End-to-end CLI tests for acctmgr.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// acctmgr running in `dir` against `dir/store.json`.
fn acctmgr(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("acctmgr");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(store_path(dir))
        .arg("--color")
        .arg("never");
    cmd
}

fn store_path(dir: &Path) -> PathBuf {
    dir.join("store.json")
}

fn seed(dir: &Path, names: &[&str]) {
    let mut args = vec!["-i", "add", "cluster"];
    args.extend_from_slice(names);
    acctmgr(dir).args(&args).assert().success();
}

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("acctmgr"))
            .stdout(predicate::str::contains("--immediate"));
    }

    #[test]
    fn shows_version() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn help_verb_describes_modify() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["help", "modify"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Set <limit>=<value>"));
    }

    #[test]
    fn unknown_verb_suggests_alternative() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["lst", "cluster"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Did you mean 'list'"));
    }
}

mod add {
    use super::*;

    #[test]
    fn confirmed_add_is_written_to_store() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["add", "cluster", "alpha", "MaxJobs=50"])
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(" Adding Cluster(s)"))
            .stdout(predicate::str::contains("  MaxJobs       = 50"))
            .stderr(predicate::str::contains("Would you like to commit changes? (N/y): "));

        let doc = std::fs::read_to_string(store_path(temp.path())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["clusters"][0]["name"], "alpha");
        assert_eq!(value["clusters"][0]["max_jobs"], 50);
    }

    #[test]
    fn declined_add_leaves_no_store() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["add", "cluster", "alpha"])
            .write_stdin("n\n")
            .assert()
            .success();
        assert!(!store_path(temp.path()).exists());
    }

    #[test]
    fn existing_cluster_is_skipped() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha"]);
        acctmgr(temp.path())
            .args(["-i", "add", "cluster", "alpha", "beta"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "This cluster alpha already exists.  Not adding.",
            ))
            .stdout(predicate::str::contains("  Name          = beta"));
    }

    #[test]
    fn add_without_names_fails() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["-i", "add", "cluster", "FairShare=3"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Need name of cluster to add."));
    }
}

mod list {
    use super::*;

    #[test]
    fn lists_all_clusters() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha", "beta"]);
        acctmgr(temp.path())
            .args(["list", "cluster"])
            .assert()
            .success()
            .stdout("Name\n----------\nalpha\nbeta\n");
    }

    #[test]
    fn parsable_noheader_filtered() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha", "beta"]);
        acctmgr(temp.path())
            .args(["-p", "-n", "show", "cl", "where", "beta"])
            .assert()
            .success()
            .stdout("beta|\n");
    }

    #[test]
    fn json_output() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha"]);
        let output = acctmgr(temp.path())
            .args(["--json", "list", "cluster"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value[0]["name"], "alpha");
    }
}

mod modify {
    use super::*;

    #[test]
    fn modify_sets_limit() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha", "beta"]);
        acctmgr(temp.path())
            .args(["-i", "modify", "cluster", "where", "alpha", "set", "MaxWall=60"])
            .assert()
            .success()
            .stdout(predicate::str::contains(" Modifying clusters...\n  alpha\n"));

        acctmgr(temp.path())
            .args(["-p", "-n", "-l", "list", "cluster"])
            .assert()
            .success()
            .stdout("alpha|||||60|\nbeta||||||\n");
    }

    #[test]
    fn unguarded_modify_declined_aborts() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha"]);
        acctmgr(temp.path())
            .args(["modify", "cluster", "set", "MaxJobs=4"])
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Aborted"))
            .stderr(predicate::str::contains("You didn't set any conditions"));
    }

    #[test]
    fn modify_without_set_fails() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .args(["-i", "modify", "cluster", "where", "alpha"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("You didn't give me anything to set."));
    }
}

mod delete {
    use super::*;

    #[test]
    fn delete_without_conditions_fails() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha"]);
        acctmgr(temp.path())
            .args(["-i", "delete", "cluster"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "No conditions given to remove, not executing.",
            ));
    }

    #[test]
    fn delete_removes_cluster() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha", "beta"]);
        acctmgr(temp.path())
            .args(["delete", "cluster", "alpha"])
            .write_stdin("yes\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(" Deleting clusters...\n  alpha\n"));

        acctmgr(temp.path())
            .args(["-n", "list", "cluster"])
            .assert()
            .success()
            .stdout("beta\n");
    }

    #[test]
    fn delete_of_unknown_cluster_fails() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), &["alpha"]);
        acctmgr(temp.path())
            .args(["-i", "delete", "cluster", "ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no clusters matched"));
    }
}

mod interactive {
    use super::*;

    #[test]
    fn runs_lines_until_quit() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .arg("-i")
            .write_stdin("add cluster alpha\nadd cluster alpha beta\nlist cluster\nquit\nlist cluster\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "This cluster alpha already exists.  Not adding.",
            ))
            .stdout(predicate::str::contains("alpha\nbeta\n"));
    }

    #[test]
    fn failed_line_sets_exit_status() {
        let temp = TempDir::new().unwrap();
        acctmgr(temp.path())
            .arg("-i")
            .write_stdin("delete cluster\nadd cluster alpha\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No conditions given"));
        assert!(store_path(temp.path()).exists());
    }
}
