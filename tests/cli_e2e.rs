//! End-to-end CLI tests for linepack.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Files and directories convert via CLI
//! - **Output formats**: CSV, JSON, JSONL generation
//! - **Names**: Seed lists, shared registries, disabled inference
//! - **Filters**: Viewer cleanup, system notices, dates, senders
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const GROUP_EXPORT: &str = "[LINE] 讀書會的聊天記錄
儲存日期：2024/05/02 09:00

2024/05/01（三）
10:00 Alice Chen\t早安
10:01 Bob\t早
10:02 Alice Chen\t今天幾點集合？
10:03 Bob\t貼圖
10:05 Alice Chen  十點半
記得帶書
10:06 Bob  好
10:07 Carol已加入群組。

2024/05/02（四）
10:09 Alice Chen\t歡迎
";

const SPACED_EXPORT: &str = "2024/03/01（五）
09:00 林立皋 Eric 早安
09:01 林立皋 Eric 開會了
09:02 林立皋 Eric 好
09:03 林立皋 Eric 收到
09:04 林立皋 Eric 謝謝
09:05 林立皋 Eric 晚點說
";

const LATER_EXPORT: &str = "2024/05/03（五）
10:00 Alice Chen 你好
";

/// Creates a temporary directory with LINE export fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("group.txt"), GROUP_EXPORT).unwrap();
    fs::write(dir.path().join("spaced.txt"), SPACED_EXPORT).unwrap();
    dir
}

fn linepack_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_linepack"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_single_file_to_csv() {
        let fixtures = setup_fixtures();
        let input = fixture(&fixtures, "group.txt");

        linepack_cmd()
            .arg(arg(&input))
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary"))
            .stdout(predicate::str::contains("group.csv"));

        let content = fs::read_to_string(fixture(&fixtures, "group.csv")).unwrap();
        assert!(content.starts_with("Sender;Content"));
        assert!(content.contains("Alice Chen;早安"));
        assert!(content.contains("\"十點半\n記得帶書\""));
    }

    #[test]
    fn test_directory_input() {
        let fixtures = setup_fixtures();
        fs::write(fixture(&fixtures, "notes.md"), "not an export").unwrap();

        linepack_cmd()
            .arg(arg(fixtures.path()))
            .assert()
            .success()
            .stdout(predicate::str::contains("2 file(s)"));

        assert!(fixture(&fixtures, "group.csv").exists());
        assert!(fixture(&fixtures, "spaced.csv").exists());
        assert!(!fixture(&fixtures, "notes.csv").exists());
    }

    #[test]
    fn test_output_dir_is_created() {
        let fixtures = setup_fixtures();
        let out = fixture(&fixtures, "out/nested");

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "-o", arg(&out)])
            .assert()
            .success();

        assert!(out.join("group.csv").exists());
        assert!(!fixture(&fixtures, "group.csv").exists());
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();

        linepack_cmd()
            .arg(arg(dir.path()))
            .assert()
            .success()
            .stdout(predicate::str::contains("No .txt exports found"));
    }

    #[test]
    fn test_empty_export() {
        let fixtures = setup_fixtures();
        let input = fixture(&fixtures, "empty.txt");
        fs::write(&input, "").unwrap();

        linepack_cmd().arg(arg(&input)).assert().success();

        let content = fs::read_to_string(fixture(&fixtures, "empty.csv")).unwrap();
        assert_eq!(content.trim(), "Sender;Content");
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_json_output() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "-f", "json", "-t"])
            .assert()
            .success();

        let content = fs::read_to_string(fixture(&fixtures, "group.json")).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[0]["name"], "Alice Chen");
        assert_eq!(parsed[0]["time"], "10:00");
        assert_eq!(parsed[7]["date"], "2024/05/02（四）");
    }

    #[test]
    fn test_jsonl_output_with_kind() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "-f", "ndjson", "--kind"])
            .assert()
            .success();

        let content = fs::read_to_string(fixture(&fixtures, "group.jsonl")).unwrap();
        let values: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values.len(), 8);
        assert_eq!(values[6]["kind"], "system");
        assert_eq!(values[6]["name"], "");
    }

    #[test]
    fn test_csv_all_columns() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([
                arg(&fixture(&fixtures, "group.txt")),
                "-t",
                "--kind",
                "--line-count",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(fixture(&fixtures, "group.csv")).unwrap();
        assert!(content.starts_with("Date;Time;Sender;Content;Kind;Lines"));
        assert!(content.contains("2024/05/01（三）;10:00;Alice Chen;早安;user;1"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "-f", "html"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Name Handling Tests
// ============================================================================

mod names {
    use super::*;

    #[test]
    fn test_inferred_spaced_name() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "spaced.txt")), "--dump-names"])
            .assert()
            .success()
            .stdout(predicate::str::contains("+ 林立皋 Eric"))
            .stdout(predicate::str::contains("林立皋 → 林立皋 Eric"));

        let content = fs::read_to_string(fixture(&fixtures, "spaced.csv")).unwrap();
        assert!(content.contains("林立皋 Eric;早安"));
    }

    #[test]
    fn test_dump_names_labels_registry_by_policy() {
        let fixtures = setup_fixtures();
        let input = fixture(&fixtures, "group.txt");

        linepack_cmd()
            .args([arg(&input), "--dump-names"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Seed names (0 names)"))
            .stdout(predicate::str::contains("Registry (").not());

        linepack_cmd()
            .args([arg(&input), "--dump-names", "--shared-names"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Registry (3 names)"));
    }

    #[test]
    fn test_no_infer() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "spaced.txt")), "--no-infer"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--no-infer"));

        let content = fs::read_to_string(fixture(&fixtures, "spaced.csv")).unwrap();
        assert!(content.contains("林立皋;Eric 早安"));
    }

    #[test]
    fn test_seed_names_file() {
        let fixtures = setup_fixtures();
        let names = fixture(&fixtures, "names.txt");
        fs::write(&names, "# known members\nAlice Chen\n\n").unwrap();
        let input = fixture(&fixtures, "later.txt");
        fs::write(&input, LATER_EXPORT).unwrap();

        linepack_cmd()
            .args([arg(&input), "--names", arg(&names)])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 name(s)"));

        let content = fs::read_to_string(fixture(&fixtures, "later.csv")).unwrap();
        assert!(content.contains("Alice Chen;你好"));
    }

    #[test]
    fn test_shared_names_across_files() {
        let fixtures = setup_fixtures();
        let later = fixture(&fixtures, "zz_later.txt");
        fs::write(&later, LATER_EXPORT).unwrap();
        let group = fixture(&fixtures, "group.txt");

        linepack_cmd()
            .args([arg(&group), arg(&later)])
            .assert()
            .success();
        let independent = fs::read_to_string(fixture(&fixtures, "zz_later.csv")).unwrap();
        assert!(independent.contains("Alice;Chen 你好"));

        linepack_cmd()
            .args([arg(&group), arg(&later), "--shared-names"])
            .assert()
            .success()
            .stdout(predicate::str::contains("shared"));
        let shared = fs::read_to_string(fixture(&fixtures, "zz_later.csv")).unwrap();
        assert!(shared.contains("Alice Chen;你好"));
    }

    #[test]
    fn test_config_file_disables_inference() {
        let fixtures = setup_fixtures();
        let config = fixture(&fixtures, "linepack.json");
        fs::write(&config, r#"{"infer_names": false}"#).unwrap();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "spaced.txt")), "--config", arg(&config)])
            .assert()
            .success();

        let content = fs::read_to_string(fixture(&fixtures, "spaced.csv")).unwrap();
        assert!(content.contains("林立皋;Eric 早安"));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    fn run_csv(extra: &[&str]) -> String {
        let fixtures = setup_fixtures();
        let input = fixture(&fixtures, "group.txt");
        let mut args = vec![arg(&input)];
        args.extend_from_slice(extra);

        linepack_cmd().args(&args).assert().success();
        fs::read_to_string(fixture(&fixtures, "group.csv")).unwrap()
    }

    #[test]
    fn test_viewer_filters() {
        let content = run_csv(&["--viewer-filters"]);
        assert!(!content.contains("貼圖"));
        assert!(content.contains("Carol已加入群組。"));
    }

    #[test]
    fn test_skip_system() {
        let content = run_csv(&["--skip-system"]);
        assert!(!content.contains("Carol已加入群組。"));
        assert!(content.contains("貼圖"));
    }

    #[test]
    fn test_sender_filter() {
        let content = run_csv(&["--from", "bob"]);
        assert!(content.contains("Bob;早"));
        assert!(!content.contains("Alice Chen"));
    }

    #[test]
    fn test_date_filter() {
        let content = run_csv(&["--after", "2024-05-02"]);
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Alice Chen;歡迎"));
    }

    #[test]
    fn test_exclude_sender() {
        let content = run_csv(&["--exclude-sender", "Bob", "--exclude-sender", "Carol"]);
        assert!(!content.contains("Bob;"));
        assert!(content.contains("Alice Chen;早安"));
        assert!(content.contains("Carol已加入群組。"));
    }

    #[test]
    fn test_viewer_filters_drop_bots() {
        let fixtures = setup_fixtures();
        let input = fixture(&fixtures, "bots.txt");
        fs::write(
            &input,
            "2024/05/01（三）\n10:00 gpt-4o-mini from 'AI小幫手'\t今日摘要\n10:01 Alice Chen\t早安\n",
        )
        .unwrap();

        linepack_cmd()
            .args([arg(&input), "--viewer-filters"])
            .assert()
            .success();

        let content = fs::read_to_string(fixture(&fixtures, "bots.csv")).unwrap();
        assert!(!content.contains("今日摘要"));
        assert!(content.contains("Alice Chen;早安"));
    }

    #[test]
    fn test_max_lines() {
        let content = run_csv(&["--max-lines", "1"]);
        assert!(!content.contains("十點半"));
    }

    #[test]
    fn test_latest_first_with_limit() {
        let content = run_csv(&["--latest-first", "--limit", "2"]);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Alice Chen;歡迎");
        assert_eq!(lines[2], ";Carol已加入群組。");
    }

    #[test]
    fn test_limit_keeps_file_order() {
        let content = run_csv(&["--limit", "2"]);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], ";Carol已加入群組。");
        assert_eq!(lines[2], "Alice Chen;歡迎");
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_file() {
        linepack_cmd()
            .arg("definitely/missing.txt")
            .assert()
            .failure()
            .stdout(predicate::str::contains("❌"))
            .stderr(predicate::str::contains("1 file(s) failed"));
    }

    #[test]
    fn test_missing_file_does_not_stop_others() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "missing.txt"])
            .assert()
            .failure();

        assert!(fixture(&fixtures, "group.csv").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_does_not_stop_others() {
        use std::os::unix::fs::PermissionsExt;

        let fixtures = setup_fixtures();
        let locked = fixture(&fixtures, "locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let readable_anyway = fs::read_dir(&locked).is_ok();

        let assert = linepack_cmd()
            .args([arg(&locked), arg(&fixture(&fixtures, "group.txt"))])
            .assert();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(fixture(&fixtures, "group.csv").exists());
        // Privileged users can list the directory regardless of its mode
        if !readable_anyway {
            assert
                .failure()
                .stdout(predicate::str::contains("locked"))
                .stderr(predicate::str::contains("1 file(s) failed"));
        }
    }

    #[test]
    fn test_invalid_date() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "--after", "01/05/2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }

    #[test]
    fn test_missing_names_file() {
        let fixtures = setup_fixtures();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "--names", "no_such_names.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no_such_names.txt"));
    }

    #[test]
    fn test_invalid_config_file() {
        let fixtures = setup_fixtures();
        let config = fixture(&fixtures, "bad.json");
        fs::write(&config, r#"{"inference": {"binding_ratio": 3.0}}"#).unwrap();

        linepack_cmd()
            .args([arg(&fixture(&fixtures, "group.txt")), "--config", arg(&config)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("binding_ratio"));
    }

    #[test]
    fn test_warnings_go_to_stderr() {
        linepack_cmd()
            .arg("definitely/missing.txt")
            .env("RUST_LOG", "warn")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Skipping export"));
    }

    #[test]
    fn test_help() {
        linepack_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--shared-names"));
    }
}
