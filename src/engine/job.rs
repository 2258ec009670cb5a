use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Error;

/// Where the input path comes from: the CLI flag, or a prompt on stdin.
///
/// Resolved into a concrete path once at startup so the rest of the flow
/// never touches interactive I/O.
#[derive(Debug, Clone)]
pub enum InputSource {
    Provided(PathBuf),
    Interactive(String),
}

impl InputSource {
    pub fn resolve(self) -> anyhow::Result<PathBuf> {
        match self {
            InputSource::Provided(path) => Ok(path),
            InputSource::Interactive(prompt) => {
                print!("{prompt}");
                io::stdout().flush().context("failed to flush prompt")?;

                let mut line = String::new();
                io::stdin()
                    .read_line(&mut line)
                    .context("failed to read input path from stdin")?;
                Ok(PathBuf::from(line.trim()))
            }
        }
    }
}

/// Immutable parameters for one compression run.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub crf: i32,
}

impl TranscodeJob {
    /// Build a job without touching the filesystem (dry runs, tests).
    pub fn new(input_path: PathBuf, crf: i32) -> Self {
        let output_path = derive_output_path(&input_path);
        Self {
            input_path,
            output_path,
            crf,
        }
    }

    /// Build a job, requiring the input file to exist at call time.
    pub fn prepare(input_path: PathBuf, crf: i32) -> Result<Self, Error> {
        if !input_path.exists() {
            return Err(Error::InputNotFound(input_path));
        }
        Ok(Self::new(input_path, crf))
    }
}

/// Derive the output path: `name.ext` becomes `name_compressed.ext`.
///
/// Splits only on the final extension separator; the directory component is
/// kept as given.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let file_name = match input.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}_compressed.{ext}"),
        None => format!("{stem}_compressed"),
    };

    input.with_file_name(file_name)
}
