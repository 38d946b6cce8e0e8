//! Decorative solid-color frames around the final image.
//!
//! A framed image is always rendered on the fixed 800x800 canvas: the
//! source is center-cropped to the canvas minus twice the border width and
//! pasted inside. When the source is smaller than the inner region the
//! remainder stays black, matching an out-of-bounds center crop.

use image::{Rgb, RgbImage};

use crate::foundation::core::Canvas;
use crate::params::FrameStyle;

/// The fixed output canvas for framed images.
pub const FRAME_CANVAS: Canvas = Canvas {
    width: 800,
    height: 800,
};

/// Uniform border width in pixels.
pub const FRAME_WIDTH: u32 = 20;

/// Apply the selected frame. `FrameStyle::None` returns the image
/// unmodified.
pub fn apply_frame(img: &RgbImage, style: FrameStyle) -> RgbImage {
    let Some(border) = style.rgb() else {
        return img.clone();
    };

    let inner_w = FRAME_CANVAS.width - 2 * FRAME_WIDTH;
    let inner_h = FRAME_CANVAS.height - 2 * FRAME_WIDTH;
    let (src_w, src_h) = img.dimensions();

    // Top-left of the centered crop window in source coordinates; negative
    // when the source is smaller than the inner region.
    let left = (i64::from(src_w) - i64::from(inner_w)).div_euclid(2);
    let top = (i64::from(src_h) - i64::from(inner_h)).div_euclid(2);

    let mut out = RgbImage::from_pixel(FRAME_CANVAS.width, FRAME_CANVAS.height, Rgb(border));
    for y in 0..inner_h {
        for x in 0..inner_w {
            let sx = left + i64::from(x);
            let sy = top + i64::from(y);
            let px = if sx >= 0 && sy >= 0 && sx < i64::from(src_w) && sy < i64::from(src_h) {
                *img.get_pixel(sx as u32, sy as u32)
            } else {
                Rgb([0, 0, 0])
            };
            out.put_pixel(x + FRAME_WIDTH, y + FRAME_WIDTH, px);
        }
    }
    out
}
