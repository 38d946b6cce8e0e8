//! Atelier is the deterministic core of an image-styling studio.
//!
//! The engine takes an original photo plus a pre-rendered "styled" variant
//! (produced upstream by an external style-transfer batch process) and
//! exposes:
//!
//! - the [`adjust`] pipeline — `render(base, styled, params)` — a pure,
//!   fixed-order chain of blend, color-filter, tone, texture and framing
//!   stages, recomputed from scratch on every parameter change
//! - the [`anim`] renderer producing transition or before/after frame
//!   sequences for export
//! - [`encode`] sinks consuming those frames (animated GIF, MP4 through the
//!   system `ffmpeg`)
//! - the [`style`] module resolving per-style images and driving the
//!   external style-transfer process
//!
//! Everything is parameterized by [`params::AdjustmentParams`]; the same
//! inputs and parameters always produce byte-identical output.
#![forbid(unsafe_code)]

pub mod adjust;
pub mod anim;
pub mod effects;
pub mod encode;
pub mod foundation;
pub mod params;
pub mod style;

pub use adjust::pipeline::render;
pub use anim::renderer::{AnimationMode, DEFAULT_FRAME_COUNT, render_frames};
pub use encode::encode_frames;
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use encode::gif::{GifSink, GifSinkOpts};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, FrameIndex};
pub use foundation::error::{AtelierError, AtelierResult};
pub use params::{AdjustmentParams, FrameStyle, TintColor, TintParams};
pub use style::{DirStyleSource, StyleKind, StyleSource};
