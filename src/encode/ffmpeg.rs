use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbImage;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AtelierError, AtelierResult};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Return `true` when a runnable `ffmpeg` is on PATH.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> AtelierResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to its
/// stdin, producing an H.264 MP4.
///
/// The system binary is used deliberately rather than linking FFmpeg, to
/// avoid native dev header/lib requirements.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> AtelierResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AtelierError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if cfg.fps == 0 {
            return Err(AtelierError::validation("ffmpeg sink fps must be non-zero"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(AtelierError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(AtelierError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(AtelierError::evaluation(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.opts.out_path);

        tracing::debug!(out = %self.opts.out_path.display(), fps = cfg.fps, "spawning ffmpeg");
        let mut child = cmd.spawn().map_err(|e| {
            AtelierError::evaluation(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AtelierError::evaluation("failed to open ffmpeg stdin (unexpected)"))?;

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> AtelierResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(AtelierError::evaluation("ffmpeg sink used before begin"));
        };
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(AtelierError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(AtelierError::validation(
                "ffmpeg sink frames must arrive in strictly increasing order",
            ));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(AtelierError::evaluation("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(frame.as_raw()).map_err(|e| {
            AtelierError::evaluation(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> AtelierResult<()> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Err(AtelierError::evaluation("ffmpeg sink was never started"));
        };

        let output = child.wait_with_output().map_err(|e| {
            AtelierError::evaluation(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AtelierError::evaluation(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(width: u32, height: u32, fps: u32) -> SinkConfig {
        SinkConfig { width, height, fps }
    }

    #[test]
    fn begin_validation_catches_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
        assert!(sink.begin(cfg(0, 10, 30)).is_err());

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
        assert!(sink.begin(cfg(11, 10, 30)).is_err());

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
        assert!(sink.begin(cfg(10, 10, 0)).is_err());
    }

    #[test]
    fn end_without_begin_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.path().join("out.mp4")));
        assert!(sink.end().is_err());
    }
}
