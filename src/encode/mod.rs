//! Frame sinks: consumers of rendered animation frames.
//!
//! [`GifSink`](gif::GifSink) writes an infinitely looping animated GIF,
//! [`FfmpegSink`](ffmpeg::FfmpegSink) streams raw frames into the system
//! `ffmpeg` for MP4 output, and [`InMemorySink`](sink::InMemorySink)
//! captures frames for tests. Still-image export goes through
//! `image::RgbImage::save` directly.

pub mod ffmpeg;
pub mod gif;
pub mod sink;

use image::RgbImage;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AtelierError, AtelierResult};
use sink::{FrameSink, SinkConfig};

/// Drive `sink` over a rendered frame sequence end to end.
pub fn encode_frames(
    frames: &[RgbImage],
    sink: &mut dyn FrameSink,
    fps: u32,
) -> AtelierResult<()> {
    let Some(first) = frames.first() else {
        return Err(AtelierError::validation(
            "encode_frames needs at least one frame",
        ));
    };

    sink.begin(SinkConfig {
        width: first.width(),
        height: first.height(),
        fps,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()
}
