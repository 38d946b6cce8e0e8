use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbImage};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AtelierError, AtelierResult};

/// Options for [`GifSink`] animated-GIF output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Uniform per-frame delay in milliseconds.
    pub frame_delay_ms: u32,
}

impl GifSinkOpts {
    /// Create options for outputting a GIF to `out_path` with the studio
    /// default 100 ms per frame.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            frame_delay_ms: 100,
        }
    }
}

/// Sink writing an infinitely looping animated GIF.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    /// Create a new GIF sink.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> AtelierResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AtelierError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if self.opts.frame_delay_ms == 0 {
            return Err(AtelierError::validation(
                "gif sink frame delay must be non-zero",
            ));
        }
        ensure_parent_dir(&self.opts.out_path)?;

        let file = File::create(&self.opts.out_path).map_err(|e| {
            AtelierError::evaluation(format!(
                "failed to create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| AtelierError::evaluation(format!("failed to set gif looping: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> AtelierResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(AtelierError::evaluation("gif sink used before begin"));
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
                "gif sink frames must arrive in strictly increasing order",
            ));
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(AtelierError::evaluation("gif sink is already finalized"));
        };

        let rgba = image::DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
        let delay = Delay::from_numer_denom_ms(self.opts.frame_delay_ms, 1);
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| AtelierError::evaluation(format!("gif frame encode failed: {e}")))?;

        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> AtelierResult<()> {
        // Dropping the encoder flushes the trailer.
        self.encoder = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = GifSinkOpts::new(dir.path().join("out.gif"));
        opts.frame_delay_ms = 0;
        let mut sink = GifSink::new(opts);
        assert!(
            sink.begin(SinkConfig {
                width: 4,
                height: 4,
                fps: 30,
            })
            .is_err()
        );
    }

    #[test]
    fn push_before_begin_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = GifSink::new(GifSinkOpts::new(dir.path().join("out.gif")));
        let frame = RgbImage::new(2, 2);
        assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    }

    #[test]
    fn out_of_order_frames_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = GifSink::new(GifSinkOpts::new(dir.path().join("out.gif")));
        sink.begin(SinkConfig {
            width: 2,
            height: 2,
            fps: 30,
        })
        .unwrap();
        let frame = RgbImage::new(2, 2);
        sink.push_frame(FrameIndex(1), &frame).unwrap();
        assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
        assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    }
}
