use std::{collections::VecDeque, path::PathBuf, process::Stdio};

use tokio::io::{AsyncBufReadExt as _, BufReader};

use crate::{
    engine::fs::DirFs,
    engine::run::{EditorEvent, Engine, ProgressFn},
    foundation::error::{LayerfxError, LayerfxResult},
};

/// Stderr lines kept for the error message of a failed run.
const STDERR_TAIL_LINES: usize = 20;

/// Runs the system `ffmpeg` binary inside a [`DirFs`] staging directory.
#[derive(Clone, Debug)]
pub struct FfmpegEngine {
    fs: DirFs,
    binary: PathBuf,
    overwrite: bool,
}

impl FfmpegEngine {
    /// Engine staging into `fs`, invoking `ffmpeg` from PATH.
    pub fn new(fs: DirFs) -> Self {
        Self {
            fs,
            binary: PathBuf::from("ffmpeg"),
            overwrite: true,
        }
    }

    /// Use a specific `ffmpeg` binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Whether an existing output file may be replaced (`-y` vs `-n`).
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Whether `ffmpeg` can be spawned from PATH.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl Engine for FfmpegEngine {
    type Fs = DirFs;

    fn fs(&self) -> &DirFs {
        &self.fs
    }

    fn fs_mut(&mut self) -> &mut DirFs {
        &mut self.fs
    }

    async fn run(&mut self, args: &[String], progress: Option<&ProgressFn>) -> LayerfxResult<()> {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.current_dir(self.fs.root())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg("-hide_banner")
            .arg(if self.overwrite { "-y" } else { "-n" })
            .args(args);

        tracing::info!(binary = %self.binary.display(), args = args.len(), "spawning ffmpeg");
        let mut child = cmd.spawn().map_err(|e| {
            LayerfxError::engine(format!(
                "failed to spawn {} (is it installed and on PATH?): {e}",
                self.binary.display()
            ))
        })?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| LayerfxError::engine("failed to open ffmpeg stderr (unexpected)"))?;

        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
        let mut lines = BufReader::new(stderr).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| LayerfxError::engine(format!("failed to read ffmpeg stderr: {e}")))?
        {
            if let Some(cb) = progress {
                cb(&EditorEvent::EngineLog(line.clone()));
            }
            if tail.len() == STDERR_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }

        let status = child.wait().await.map_err(|e| {
            LayerfxError::engine(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        if !status.success() {
            let tail: Vec<String> = tail.into_iter().collect();
            return Err(LayerfxError::engine(format!(
                "ffmpeg exited with status {status}: {}",
                tail.join("\n").trim()
            )));
        }

        tracing::debug!("ffmpeg finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/ffmpeg.rs"]
mod tests;
