//! Command-line tests for the batch-print binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn batch_print() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_batch-print"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_exits_successfully() {
    let output = batch_print().arg("-h").output().expect("Failed to run batch-print");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Usage"));
    assert!(text.contains("-p <PRINTER>"));
    assert!(text.contains("-s <SIZE>"));
}

#[test]
fn test_missing_printer_is_usage_error() {
    let output = batch_print()
        .args(["-s", "A4", "a.pdf"])
        .output()
        .expect("Failed to run batch-print");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_missing_paper_size_is_usage_error() {
    let output = batch_print()
        .args(["-p", "Office", "a.pdf"])
        .output()
        .expect("Failed to run batch-print");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_empty_printer_is_usage_error() {
    let output = batch_print()
        .args(["-p", "", "-s", "A4", "a.pdf"])
        .output()
        .expect("Failed to run batch-print");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_option_is_usage_error() {
    let output = batch_print()
        .args(["-p", "Office", "-s", "A4", "-x", "a.pdf"])
        .output()
        .expect("Failed to run batch-print");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_missing_file_list() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let list = dir.path().join("missing.txt");

    let output = batch_print()
        .args(["-p", "Office", "-s", "A4", "-f"])
        .arg(&list)
        .output()
        .expect("Failed to run batch-print");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("File list not found"));
}

#[cfg(target_os = "linux")]
mod with_fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::process::Stdio;
    use std::thread;
    use std::time::{Duration, Instant};

    const FAKE_LPSTAT: &str = r#"#!/bin/sh
if [ "$#" -eq 1 ]; then
    printf 'printer P is idle.  enabled since Mon 19 Oct 2026\n\tReady\nprinter Q is idle.\n'
    exit 0
fi
[ "$2" = "P" ] || [ "$2" = "Q" ]
"#;

    const FAKE_GS: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo 10.02.1; exit 0; fi
if [ -n "$FAKE_GS_SLEEP" ]; then sleep "$FAKE_GS_SLEEP"; fi
if [ -n "$FAKE_GS_EXIT" ]; then echo boom >&2; exit "$FAKE_GS_EXIT"; fi
out=
for arg; do
    case "$arg" in -sOutputFile=*) out="${arg#-sOutputFile=}" ;; esac
done
: > "$out"
for arg; do
    case "$arg" in -*) ;; *) cat "$arg" >> "$out" ;; esac
done
"#;

    const FAKE_LP: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$FAKE_LP_DIR/args.txt"
for last; do :; done
cat "$last" > "$FAKE_LP_DIR/document.txt"
if [ -n "$FAKE_LP_EXIT" ]; then
    echo "lp: Unable to print" >&2
    exit "$FAKE_LP_EXIT"
fi
echo "request id is P-7 (1 file(s))"
"#;

    struct Tools {
        dir: TempDir,
    }

    impl Tools {
        fn new() -> Self {
            let dir = TempDir::new().expect("Failed to create temp directory");
            for (name, script) in [("lpstat", FAKE_LPSTAT), ("gs", FAKE_GS), ("lp", FAKE_LP)] {
                let path = dir.path().join(name);
                fs::write(&path, script).expect("Failed to write fake tool");
                fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                    .expect("Failed to make fake tool executable");
            }
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn file(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.path(name);
            fs::write(&path, contents).expect("Failed to write fixture");
            path
        }

        fn command(&self) -> Command {
            let mut cmd = batch_print();
            cmd.env("BATCH_PRINT_LP", self.path("lp"))
                .env("BATCH_PRINT_LPSTAT", self.path("lpstat"))
                .env("BATCH_PRINT_GS", self.path("gs"))
                .env("FAKE_LP_DIR", self.dir.path())
                .env_remove("FAKE_LP_EXIT")
                .env_remove("FAKE_GS_EXIT")
                .env_remove("FAKE_GS_SLEEP");
            cmd
        }

        fn lp_args(&self) -> Vec<String> {
            fs::read_to_string(self.path("args.txt"))
                .expect("lp was not invoked")
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    /// Names of the merged documents left in `dir`.
    fn temp_documents(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .expect("Failed to read temp directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("batch-print-"))
            .collect()
    }

    fn last_arg(args: &[String]) -> &Path {
        Path::new(args.last().expect("lp got no arguments"))
    }

    #[test]
    fn test_prints_merged_document() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "AAA\n");
        let b = tools.file("b.pdf", "BBB\n");

        let output = tools
            .command()
            .args(["-p", "P", "-s", "A4"])
            .arg(&a)
            .arg(&b)
            .output()
            .expect("Failed to run batch-print");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("Printing 2 file(s) to P on A4 paper"));
        assert!(stdout(&output).contains("Submitted request P-7"));

        let args = tools.lp_args();
        assert_eq!(&args[..4], &["-d", "P", "-o", "media=A4"]);
        assert_eq!(args.len(), 5);
        let merged = last_arg(&args);
        assert!(merged.file_name().unwrap().to_string_lossy().starts_with("batch-print-"));
        assert!(!merged.exists(), "Temp document should be removed");

        let document = fs::read_to_string(tools.path("document.txt")).unwrap();
        assert_eq!(document, "AAA\nBBB\n");
    }

    #[test]
    fn test_file_list_then_arguments() {
        let tools = Tools::new();
        let x = tools.file("x.pdf", "X");
        let y = tools.file("y.pdf", "Y");
        let list = tools.file("list.txt", &format!("# first\n\n{}\n", x.display()));

        let output = tools
            .command()
            .args(["-p", "P", "-s", "Letter", "-t", "Handouts", "-f"])
            .arg(&list)
            .arg(&y)
            .output()
            .expect("Failed to run batch-print");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let args = tools.lp_args();
        assert_eq!(&args[..6], &["-d", "P", "-t", "Handouts", "-o", "media=Letter"]);
        assert_eq!(fs::read_to_string(tools.path("document.txt")).unwrap(), "XY");
    }

    #[test]
    fn test_missing_files_warn_and_continue() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "A");
        let missing = tools.path("missing.pdf");

        // The warning is not subject to the log filter
        let output = tools
            .command()
            .env("RUST_LOG", "error")
            .args(["-p", "P", "-s", "A4"])
            .arg(&missing)
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stderr(&output).contains("Warning: file not found, skipping: "));
        assert!(stderr(&output).contains("missing.pdf"));
        assert!(!stdout(&output).contains("missing.pdf"));
        assert!(stdout(&output).contains("Printing 1 file(s)"));
    }

    #[test]
    fn test_no_valid_files_does_not_print() {
        let tools = Tools::new();

        let output = tools
            .command()
            .args(["-p", "P", "-s", "A4"])
            .arg(tools.path("gone.pdf"))
            .output()
            .expect("Failed to run batch-print");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("No valid files"));
        assert!(!tools.path("args.txt").exists());
    }

    #[test]
    fn test_unknown_printer_lists_printers() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "A");

        let output = tools
            .command()
            .args(["-p", "Nowhere", "-s", "A4"])
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("Printer not found: Nowhere"));
        assert!(err.contains("\n  P\n  Q"));
        assert!(!tools.path("args.txt").exists());
    }

    #[test]
    fn test_lp_failure_propagates_exit_code() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "A");

        let output = tools
            .command()
            .env("FAKE_LP_EXIT", "3")
            .args(["-p", "P", "-s", "A4"])
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert_eq!(output.status.code(), Some(3));
        assert!(stderr(&output).contains("Unable to print"));
        let args = tools.lp_args();
        assert!(!last_arg(&args).exists(), "Temp document should be removed");
    }

    #[test]
    fn test_dry_run_skips_submission() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "A");

        let output = tools
            .command()
            .args(["-n", "-p", "P", "-s", "A4"])
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("Dry run, not submitting"));
        assert!(stdout(&output).contains("-o media=A4"));
        assert!(!tools.path("args.txt").exists());
    }

    #[test]
    fn test_no_merge_tool() {
        let tools = Tools::new();
        let a = tools.file("a.pdf", "A");

        let output = tools
            .command()
            .env("BATCH_PRINT_GS", tools.path("no-such-gs"))
            .args(["-p", "P", "-s", "A4"])
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("No PDF merge tool available"));
    }

    #[test]
    fn test_merge_tool_failure_exits_one() {
        let tools = Tools::new();
        let tmp = tools.path("tmp");
        fs::create_dir(&tmp).unwrap();
        let a = tools.file("a.pdf", "A");

        let output = tools
            .command()
            .env("TMPDIR", &tmp)
            .env("FAKE_GS_EXIT", "3")
            .args(["-p", "P", "-s", "A4"])
            .arg(&a)
            .output()
            .expect("Failed to run batch-print");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("failed (exit code 3): boom"));
        assert!(temp_documents(&tmp).is_empty(), "Temp document should be removed");
        assert!(!tools.path("args.txt").exists());
    }

    #[test]
    fn test_sigterm_removes_temp_document() {
        let tools = Tools::new();
        let tmp = tools.path("tmp");
        fs::create_dir(&tmp).unwrap();
        let a = tools.file("a.pdf", "A");

        let mut child = tools
            .command()
            .env("TMPDIR", &tmp)
            .env("FAKE_GS_SLEEP", "30")
            .args(["-p", "P", "-s", "A4"])
            .arg(&a)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start batch-print");

        let deadline = Instant::now() + Duration::from_secs(10);
        while temp_documents(&tmp).is_empty() {
            assert!(Instant::now() < deadline, "Temp document was never created");
            thread::sleep(Duration::from_millis(20));
        }
        // Let the merge start so the document is registered
        thread::sleep(Duration::from_millis(200));
        assert_eq!(temp_documents(&tmp).len(), 1);

        let status = Command::new("kill")
            .args(["-TERM", &child.id().to_string()])
            .status()
            .expect("Failed to run kill");
        assert!(status.success());

        let status = child.wait().expect("Failed to wait for batch-print");
        assert_eq!(status.code(), Some(130));
        assert!(temp_documents(&tmp).is_empty(), "Temp document should be removed");
        assert!(!tools.path("args.txt").exists());
    }
}
