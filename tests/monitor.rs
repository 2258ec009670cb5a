//! Execution-monitor behavior against stand-in engines: outcome
//! classification, merged output relay, and the drain-then-reap ordering.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vidpress::Error;
use vidpress::engine::{Outcome, TranscodeJob, check_engine, run_with_program};

/// Write an executable shell script that answers `-version` like ffmpeg and
/// otherwise runs `body` with the job arguments.
fn write_stub_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("stub-ffmpeg");
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-version\" ]; then\n\
         \x20 echo \"stub ffmpeg 1.0\"\n\
         \x20 exit 0\n\
         fi\n\
         {body}\n"
    );
    fs::write(&path, script).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn job_in(dir: &Path) -> TranscodeJob {
    let input = dir.join("in.mp4");
    fs::write(&input, b"0123456789").unwrap();
    TranscodeJob::prepare(input, 28).unwrap()
}

#[test]
fn unreachable_engine_reports_tool_not_found() {
    let dir = TempDir::new().unwrap();
    let job = job_in(dir.path());

    let err = run_with_program("vidpress-no-such-engine", &job, None, |_| {}).unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(_)));
    assert_eq!(err.exit_code(), 2);

    // Nothing ran, so the output path must not have appeared.
    assert!(!job.output_path.exists());
}

#[test]
fn check_engine_returns_version_line() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub_engine(dir.path(), "exit 0");

    let version = check_engine(stub.to_str().unwrap()).unwrap();
    assert_eq!(version, "stub ffmpeg 1.0");
}

#[test]
fn successful_run_reports_sizes_and_merged_output() {
    let dir = TempDir::new().unwrap();
    let job = job_in(dir.path());
    let stub = write_stub_engine(
        dir.path(),
        "echo \"frame=1\"\n\
         echo \"to-stderr\" 1>&2\n\
         echo \"frame=2\"\n\
         for last in \"$@\"; do :; done\n\
         printf data > \"$last\"\n\
         exit 0",
    );

    let mut lines = Vec::new();
    let report = run_with_program(stub.to_str().unwrap(), &job, None, |line| {
        lines.push(line.to_string());
    })
    .unwrap();

    assert_eq!(report.outcome, Outcome::Success);
    assert!(report.elapsed.as_secs_f64() >= 0.0);

    let sizes = report.sizes.expect("both files exist after success");
    assert_eq!(sizes.input_bytes, 10);
    assert_eq!(sizes.output_bytes, 4);

    // Both streams are relayed, and each stream stays in production order.
    assert!(lines.contains(&"to-stderr".to_string()));
    let f1 = lines.iter().position(|l| l == "frame=1").unwrap();
    let f2 = lines.iter().position(|l| l == "frame=2").unwrap();
    assert!(f1 < f2);
}

#[test]
fn failing_run_classifies_exit_code_without_sizes() {
    let dir = TempDir::new().unwrap();
    let job = job_in(dir.path());
    let stub = write_stub_engine(dir.path(), "echo \"boom\" 1>&2\nexit 7");

    let mut lines = Vec::new();
    let report = run_with_program(stub.to_str().unwrap(), &job, None, |line| {
        lines.push(line.to_string());
    })
    .unwrap();

    assert_eq!(report.outcome, Outcome::Failure { code: 7 });
    assert!(report.sizes.is_none());
    assert!(lines.contains(&"boom".to_string()));
}

#[test]
fn trailing_output_is_not_lost_before_reap() {
    let dir = TempDir::new().unwrap();
    let job = job_in(dir.path());
    let stub = write_stub_engine(
        dir.path(),
        "i=0\n\
         while [ $i -lt 100 ]; do\n\
         \x20 echo \"line $i\"\n\
         \x20 i=$((i+1))\n\
         done\n\
         exit 0",
    );

    let mut lines = Vec::new();
    run_with_program(stub.to_str().unwrap(), &job, None, |line| {
        lines.push(line.to_string());
    })
    .unwrap();

    assert_eq!(lines.len(), 100);
    assert_eq!(lines.last().unwrap(), "line 99");
}

#[test]
fn missing_input_is_rejected_before_any_engine_contact() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.mp4");

    let err = TranscodeJob::prepare(missing, 28).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
    assert_eq!(err.exit_code(), 1);
}
