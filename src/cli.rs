use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidpress")]
#[command(about = "HEVC (H.265) video compressor with real-time FFmpeg output", long_about = None)]
pub struct Cli {
    /// Path to the input video file (prompts on stdin if omitted)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Constant Rate Factor; lower = higher quality / larger output (default from config, 28)
    #[arg(short, long, value_name = "INT")]
    pub crf: Option<i32>,

    /// Additional ffmpeg arguments, inserted before the output path
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check if ffmpeg and ffprobe are installed
    CheckFfmpeg,

    /// Probe a video file to get its duration
    Probe {
        /// Path to the video file
        file: PathBuf,
    },

    /// Show the ffmpeg command without executing (dry run)
    DryRun,

    /// Show config status and location, or create default config if missing
    InitConfig,
}

pub fn parse() -> Cli {
    Cli::parse()
}
