pub mod command;
pub mod job;
pub mod monitor;
pub mod probe;

pub use command::{FFMPEG_BIN, build_ffmpeg_args, format_ffmpeg_cmd, render_command};
pub use job::{InputSource, TranscodeJob, derive_output_path};
pub use monitor::{Outcome, RunReport, check_engine, run, run_with_program};
pub use probe::{ffprobe_version, parse_ffprobe_duration, probe_duration};
