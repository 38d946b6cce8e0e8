//! The optional color filters, applied between the blend and tone stages.
//!
//! Each filter is a pure image-in/image-out function reproducing the
//! studio's historical look: the exact sepia coefficient matrix, the
//! blue-to-yellow colorize ramp, byte-space solarize, seeded Gaussian
//! grain.

use image::RgbImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::effects::blur::blur_rgb8;
use crate::effects::composite::blend_solid_in_place;
use crate::foundation::error::{AtelierError, AtelierResult};
use crate::foundation::math::{clamp_u8, sample_gaussian};
use crate::params::TintParams;

/// ITU-R 601 luma, the weighting used across grayscale, colorize, contrast
/// and saturation.
pub(crate) fn luma601(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

fn map_pixels(img: &RgbImage, f: impl Fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    let mut out = img.clone();
    for p in out.pixels_mut() {
        p.0 = f(p.0);
    }
    out
}

pub fn invert(img: &RgbImage) -> RgbImage {
    map_pixels(img, |[r, g, b]| [255 - r, 255 - g, 255 - b])
}

pub fn grayscale(img: &RgbImage) -> RgbImage {
    map_pixels(img, |[r, g, b]| {
        let l = luma601(r, g, b);
        [l, l, l]
    })
}

/// Invert every channel value at or above `threshold`.
pub fn solarize(img: &RgbImage, threshold: u8) -> RgbImage {
    map_pixels(img, |px| px.map(|c| if c >= threshold { 255 - c } else { c }))
}

pub fn sepia(img: &RgbImage) -> RgbImage {
    map_pixels(img, |[r, g, b]| {
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let tr = (0.393 * r + 0.769 * g + 0.189 * b) as i32;
        let tg = (0.349 * r + 0.686 * g + 0.168 * b) as i32;
        let tb = (0.272 * r + 0.534 * g + 0.131 * b) as i32;
        [clamp_u8(tr), clamp_u8(tg), clamp_u8(tb)]
    })
}

/// Luma-indexed ramp from blue at black to yellow at white.
pub fn colorize(img: &RgbImage) -> RgbImage {
    map_pixels(img, |[r, g, b]| {
        let l = u32::from(luma601(r, g, b));
        // black = (0,0,255), white = (255,255,0), linear per channel
        [l as u8, l as u8, (255 - l) as u8]
    })
}

/// Keep the top `bits` significant bits of every channel.
pub fn posterize(img: &RgbImage, bits: u8) -> RgbImage {
    let bits = bits.clamp(1, 8);
    let mask = 0xFFu8 << (8 - bits);
    map_pixels(img, |px| px.map(|c| c & mask))
}

/// Seeded per-channel Gaussian grain; sigma is `intensity_pct`/100 of the
/// full channel range.
pub fn noise(img: &RgbImage, intensity_pct: u8, seed: u64) -> RgbImage {
    let sigma = f64::from(intensity_pct) / 100.0 * 255.0;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = img.clone();
    for p in out.pixels_mut() {
        for c in &mut p.0 {
            let n = (sample_gaussian(&mut rng) * sigma) as i32;
            *c = clamp_u8(i32::from(*c) + n);
        }
    }
    out
}

/// Blend a solid color layer over the image at the tint opacity.
pub fn tint(img: &RgbImage, params: TintParams) -> AtelierResult<RgbImage> {
    let (w, h) = img.dimensions();
    let mut data = img.as_raw().clone();
    blend_solid_in_place(&mut data, params.color.rgb(), f32::from(params.opacity) / 100.0)?;
    RgbImage::from_raw(w, h, data)
        .ok_or_else(|| AtelierError::evaluation("tint produced a mis-sized buffer"))
}

/// Gaussian blur with sigma = `slider` / 5. Slider 0 is the identity.
pub fn blur(img: &RgbImage, slider: u8) -> AtelierResult<RgbImage> {
    let sigma = f32::from(slider) / 5.0;
    if sigma <= 0.0 {
        return Ok(img.clone());
    }
    let (w, h) = img.dimensions();
    let radius = (2.0 * sigma).ceil() as u32;
    let data = blur_rgb8(img.as_raw(), w, h, radius, sigma)?;
    RgbImage::from_raw(w, h, data)
        .ok_or_else(|| AtelierError::evaluation("blur produced a mis-sized buffer"))
}
