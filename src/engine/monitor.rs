use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::debug;

use super::command;
use super::job::TranscodeJob;
use crate::error::Error;
use crate::stats::SizeSummary;

/// How a finished child process classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { code: i32 },
}

/// Result of one engine invocation, consumed only for display.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: Outcome,
    pub elapsed: Duration,
    /// Present only after a successful run with both files on disk.
    pub sizes: Option<SizeSummary>,
}

/// Verify the engine binary is reachable on PATH and return its version line.
///
/// Runs `<program> -version`; a spawn failure of kind `NotFound` maps to
/// `ToolNotFound`, so nothing else happens (no process, no timer).
pub fn check_engine(program: &str) -> Result<String, Error> {
    let output = match Command::new(program).arg("-version").output() {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ToolNotFound(program.to_string()));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to run {program} -version"))
                .into());
        }
    };

    if !output.status.success() {
        return Err(anyhow::anyhow!("{program} -version exited with {}", output.status).into());
    }

    let version = String::from_utf8_lossy(&output.stdout);
    Ok(version.lines().next().unwrap_or("unknown version").to_string())
}

/// Run a job with the default engine, relaying output to stdout.
pub fn run(job: &TranscodeJob, extra_args: Option<&str>) -> Result<RunReport, Error> {
    run_with_program(command::FFMPEG_BIN, job, extra_args, |line| {
        println!("  {line}");
    })
}

/// Run a job with an explicit engine program, feeding every output line to
/// `on_line` as it is produced.
///
/// The child's stdout and stderr are drained by two reader threads into one
/// channel, so the relay sees a single merged stream in arrival order. The
/// exit status is reaped only after both streams hit end-of-file; reaping
/// first could deadlock on a full pipe and lose trailing output.
pub fn run_with_program<F>(
    program: &str,
    job: &TranscodeJob,
    extra_args: Option<&str>,
    mut on_line: F,
) -> Result<RunReport, Error>
where
    F: FnMut(&str),
{
    check_engine(program)?;

    let args = command::build_ffmpeg_args(job, extra_args);
    debug!(command = %command::render_command(program, &args), "spawning engine");

    let mut cmd = Command::new(program);
    cmd.args(&args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let start = Instant::now();
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ToolNotFound(program.to_string()));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context("failed to spawn engine")
                .into());
        }
    };
    debug!(pid = child.id(), "engine started");

    let stdout = child.stdout.take().context("failed to capture stdout")?;
    let stderr = child.stderr.take().context("failed to capture stderr")?;

    let (tx, rx) = mpsc::channel::<String>();
    let tx_err = tx.clone();
    let stdout_reader = thread::spawn(move || relay_lines(stdout, tx));
    let stderr_reader = thread::spawn(move || relay_lines(stderr, tx_err));

    // The iterator ends once both pipes hit EOF and the senders drop.
    for line in rx {
        on_line(&line);
    }
    let _ = stdout_reader.join();
    let _ = stderr_reader.join();

    let status = child.wait().context("failed to wait for engine exit")?;
    let elapsed = start.elapsed();
    debug!(%status, elapsed_s = elapsed.as_secs_f64(), "engine finished");

    let outcome = if status.success() {
        Outcome::Success
    } else {
        // code() is None for signal deaths; ffmpeg normally catches signals
        // and still exits with a code.
        Outcome::Failure {
            code: status.code().unwrap_or(-1),
        }
    };

    let sizes = match outcome {
        Outcome::Success => SizeSummary::collect(&job.input_path, &job.output_path),
        Outcome::Failure { .. } => None,
    };

    Ok(RunReport {
        outcome,
        elapsed,
        sizes,
    })
}

fn relay_lines<R: Read>(stream: R, tx: mpsc::Sender<String>) {
    let reader = BufReader::new(stream);
    for line in reader.lines().map_while(Result::ok) {
        if tx.send(line).is_err() {
            break;
        }
    }
}
