use super::job::TranscodeJob;

pub const FFMPEG_BIN: &str = "ffmpeg";

const VIDEO_CODEC: &str = "libx265";
const AUDIO_CODEC: &str = "aac";
const AUDIO_BITRATE: &str = "128k";
const PRESET: &str = "medium";
const LOG_LEVEL: &str = "info";

/// Build the full ffmpeg argument list for a job.
///
/// The shape is fixed: overwrite, input, HEVC video at the requested CRF,
/// AAC audio at a fixed bitrate, the balanced preset, a log level chatty
/// enough to show progress, then the output path as the final argument.
/// Optional extra arguments are inserted just before the output path.
pub fn build_ffmpeg_args(job: &TranscodeJob, extra_args: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        job.input_path.to_string_lossy().into_owned(),
        "-c:v".to_string(),
        VIDEO_CODEC.to_string(),
        "-crf".to_string(),
        job.crf.to_string(),
        "-c:a".to_string(),
        AUDIO_CODEC.to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
        "-preset".to_string(),
        PRESET.to_string(),
        "-loglevel".to_string(),
        LOG_LEVEL.to_string(),
    ];

    if let Some(extra) = extra_args {
        apply_additional_args(&mut args, extra);
    }

    args.push(job.output_path.to_string_lossy().into_owned());
    args
}

/// Append user-provided ffmpeg arguments, shell-parsed so quoted strings
/// with spaces survive. Unbalanced quotes fall back to whitespace split.
fn apply_additional_args(args: &mut Vec<String>, additional: &str) {
    if additional.is_empty() {
        return;
    }

    if let Some(parsed) = shlex::split(additional) {
        args.extend(parsed);
    } else {
        args.extend(additional.split_whitespace().map(str::to_string));
    }
}

/// Render a command line as a copy-pasteable string, quoting arguments that
/// contain spaces.
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    for arg in args {
        if arg.contains(' ') {
            parts.push(format!("\"{arg}\""));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

/// The full ffmpeg invocation for a job as a display string (dry runs).
pub fn format_ffmpeg_cmd(job: &TranscodeJob, extra_args: Option<&str>) -> String {
    render_command(FFMPEG_BIN, &build_ffmpeg_args(job, extra_args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn job(input: &str, crf: i32) -> TranscodeJob {
        TranscodeJob::new(PathBuf::from(input), crf)
    }

    #[test]
    fn test_input_follows_input_flag_exactly_once() {
        let args = build_ffmpeg_args(&job("/tmp/in.mp4", 28), None);

        let i_pos = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[i_pos + 1], "/tmp/in.mp4");
        assert_eq!(args.iter().filter(|a| *a == "/tmp/in.mp4").count(), 1);
    }

    #[test]
    fn test_output_is_final_argument() {
        let args = build_ffmpeg_args(&job("/tmp/in.mp4", 28), None);
        assert_eq!(args.last().unwrap(), "/tmp/in_compressed.mp4");
    }

    #[test]
    fn test_crf_string_follows_flag() {
        for crf in [-12, 0, 28, 51] {
            let args = build_ffmpeg_args(&job("/tmp/in.mp4", crf), None);
            let pos = args.iter().position(|a| a == "-crf").unwrap();
            assert_eq!(args[pos + 1], crf.to_string());
        }
    }

    #[test]
    fn test_extra_args_inserted_before_output() {
        let args = build_ffmpeg_args(&job("/tmp/in.mp4", 28), Some("-movflags +faststart"));

        let flags_pos = args.iter().position(|a| a == "-movflags").unwrap();
        assert_eq!(args[flags_pos + 1], "+faststart");
        assert_eq!(args.last().unwrap(), "/tmp/in_compressed.mp4");
    }

    #[test]
    fn test_extra_args_respect_quotes() {
        let args = build_ffmpeg_args(
            &job("/tmp/in.mp4", 28),
            Some(r#"-metadata title="My Video""#),
        );
        assert!(args.contains(&"title=My Video".to_string()));
    }

    #[test]
    fn test_extra_args_unbalanced_quotes_fall_back_to_whitespace() {
        let args = build_ffmpeg_args(&job("/tmp/in.mp4", 28), Some(r#"-tag "unclosed"#));
        assert!(args.contains(&"-tag".to_string()));
        assert!(args.contains(&r#""unclosed"#.to_string()));
    }

    #[test]
    fn test_render_quotes_paths_with_spaces() {
        let rendered = format_ffmpeg_cmd(&job("/tmp/my video.mp4", 28), None);
        assert!(rendered.contains("\"/tmp/my video.mp4\""));
        assert!(rendered.ends_with("\"/tmp/my video_compressed.mp4\""));
    }
}
