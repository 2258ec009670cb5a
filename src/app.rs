use crate::cli::{Cli, Commands};
use std::path::PathBuf;
use std::process;

use tracing::debug;
use vidpress::config::Config;
use vidpress::engine::{self, InputSource, TranscodeJob};
use vidpress::error::Error;
use vidpress::stats;

const INPUT_PROMPT: &str = "Enter the video file name (e.g. my_video.mp4) or full path: ";

pub fn run(cli: Cli) {
    if let Some(command) = cli.command {
        match command {
            Commands::CheckFfmpeg => handle_check_ffmpeg(),
            Commands::Probe { file } => handle_probe(file),
            Commands::DryRun => handle_dry_run(cli.input, cli.crf, cli.extra_args),
            Commands::InitConfig => handle_init_config(),
        }
        return;
    }

    let config = Config::load().unwrap_or_default();

    println!();
    println!("*** {} ***", config.banner);
    println!("---------------------------------------------------------");

    let input_path = resolve_input(cli.input);

    let crf = cli.crf.unwrap_or(config.defaults.crf);
    let job = match TranscodeJob::prepare(input_path, crf) {
        Ok(job) => job,
        Err(e) => exit_with(e),
    };

    println!();
    println!("Starting compression for: {}", job.input_path.display());
    println!("  Output file: {}", job.output_path.display());
    println!("  CRF value: {crf} (lower = higher quality / larger size)");
    if let Ok(duration) = engine::probe_duration(&job.input_path) {
        println!("  Duration: {duration:.2}s");
    }
    println!("---------------------------------------------------------");
    println!("--- Real-time progress ---");

    match engine::run(&job, cli.extra_args.as_deref()) {
        Ok(report) => report_outcome(&report),
        Err(e) => exit_with(e),
    }
}

/// Resolve the input source (flag or interactive prompt) into a path.
fn resolve_input(input: Option<PathBuf>) -> PathBuf {
    let source = match input {
        Some(path) => InputSource::Provided(path),
        None => InputSource::Interactive(INPUT_PROMPT.to_string()),
    };

    match source.resolve() {
        Ok(path) => path,
        Err(e) => exit_with(Error::from(e)),
    }
}

fn report_outcome(report: &engine::RunReport) -> ! {
    let elapsed_s = report.elapsed.as_secs_f64();

    match report.outcome {
        engine::Outcome::Success => {
            println!();
            println!("Compression completed successfully!");
            println!("Total time taken: {elapsed_s:.2} seconds");

            match &report.sizes {
                Some(sizes) => {
                    println!("Original size: {}", stats::format_mb(sizes.input_bytes));
                    println!("Compressed size: {}", stats::format_mb(sizes.output_bytes));
                    println!("{}", sizes.format_space_saved());
                }
                None => println!("File sizes unavailable."),
            }
            process::exit(0);
        }
        engine::Outcome::Failure { code } => {
            let err = Error::ProcessFailure { code };
            eprintln!();
            eprintln!("Compression failed: {err} after {elapsed_s:.2} seconds");
            process::exit(err.exit_code());
        }
    }
}

fn exit_with(err: Error) -> ! {
    eprintln!();
    eprintln!("Error: {err:#}");
    process::exit(err.exit_code());
}

fn handle_check_ffmpeg() {
    match engine::check_engine(engine::FFMPEG_BIN) {
        Ok(version) => {
            println!("ffmpeg found: {version}");
            match engine::ffprobe_version() {
                Ok(probe_version) => {
                    println!("ffprobe found: {probe_version}");
                    process::exit(0);
                }
                Err(e) => exit_with(e),
            }
        }
        Err(e) => exit_with(e),
    }
}

fn handle_probe(file: PathBuf) {
    match engine::probe_duration(&file) {
        Ok(duration) => {
            println!("Duration: {duration:.2} seconds");
        }
        Err(e) => exit_with(Error::from(e)),
    }
}

fn handle_dry_run(input: Option<PathBuf>, crf: Option<i32>, extra_args: Option<String>) {
    let config = Config::load().unwrap_or_default();
    let input_path = resolve_input(input);
    let crf = crf.unwrap_or(config.defaults.crf);

    let job = TranscodeJob::new(input_path, crf);
    debug!(output = %job.output_path.display(), "dry run");
    println!("{}", engine::format_ffmpeg_cmd(&job, extra_args.as_deref()));
}

fn handle_init_config() {
    match Config::load() {
        Ok(cfg) => {
            match Config::config_path() {
                Ok(path) => println!("Config loaded successfully from {}", path.display()),
                Err(e) => println!("Config loaded, but config path unknown: {e:#}"),
            }
            println!("{cfg:#?}");
        }
        Err(e) => {
            println!("Config missing or invalid: {e:#}");
            println!("Creating default config...");

            let cfg = Config::default();
            if let Err(err) = cfg.save() {
                eprintln!("Failed to save default config: {err:#}");
                process::exit(1);
            }
            match Config::config_path() {
                Ok(path) => println!("Default config saved to {}", path.display()),
                Err(e) => println!("Default config saved (path unknown): {e:#}"),
            }
        }
    }
}
