use image::RgbImage;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::AtelierResult;

/// Configuration provided to a [`FrameSink`] before any frames are pushed.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate in frames per second (video sinks).
    pub fps: u32,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// `FrameIndex` order between `begin` and `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AtelierResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> AtelierResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> AtelierResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, RgbImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, RgbImage)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AtelierResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> AtelierResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> AtelierResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn in_memory_sink_captures_config_and_frames() {
        let mut sink = InMemorySink::new();
        sink.begin(SinkConfig {
            width: 4,
            height: 3,
            fps: 30,
        })
        .unwrap();

        let frame = RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]));
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        sink.push_frame(FrameIndex(1), &frame).unwrap();
        sink.end().unwrap();

        assert_eq!(sink.config().unwrap().fps, 30);
        assert_eq!(sink.frames().len(), 2);
        assert_eq!(sink.frames()[1].0, FrameIndex(1));
    }

    #[test]
    fn begin_resets_previously_captured_frames() {
        let mut sink = InMemorySink::new();
        let cfg = SinkConfig {
            width: 1,
            height: 1,
            fps: 30,
        };
        let frame = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));

        sink.begin(cfg.clone()).unwrap();
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        sink.end().unwrap();

        sink.begin(cfg).unwrap();
        assert!(sink.frames().is_empty());
    }
}
