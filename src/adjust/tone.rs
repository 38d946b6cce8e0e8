//! The always-applied tone chain: exposure, gamma, brightness, contrast,
//! saturation, hue, temperature, sharpness — in that fixed order.
//!
//! Every stage short-circuits to an exact identity at its neutral slider
//! value (50), which keeps the "all sliders neutral" round trip
//! byte-identical. The formulas are the studio's historical ones, not
//! colorimetric corrections: temperature shifts a single channel per sign
//! and hue rotates in byte space.

use image::RgbImage;

use crate::adjust::filters::luma601;
use crate::foundation::math::{clamp_round_u8, clamp_u8};
use crate::params::AdjustmentParams;

pub(crate) fn apply(img: RgbImage, p: &AdjustmentParams) -> RgbImage {
    let img = scale_linear(img, p.exposure);
    let img = gamma(img, p.gamma);
    let img = scale_linear(img, p.brightness);
    let img = contrast(img, p.contrast);
    let img = saturation(img, p.saturation);
    let img = hue_rotate(img, p.hue);
    let img = temperature(img, p.temperature);
    sharpness(img, p.sharpness)
}

fn apply_lut(mut img: RgbImage, lut: &[u8; 256]) -> RgbImage {
    for p in img.pixels_mut() {
        for c in &mut p.0 {
            *c = lut[usize::from(*c)];
        }
    }
    img
}

/// Linear channel scale by slider/50. Exposure and brightness share this.
fn scale_linear(img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let factor = f32::from(slider) / 50.0;
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = clamp_round_u8(i as f32 * factor);
    }
    apply_lut(img, &lut)
}

/// Power-law correction with exponent 1/gamma; the effective gamma is
/// clamped at 0.1 so slider 0 stays finite.
fn gamma(img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let g = (f32::from(slider) / 50.0).max(0.1);
    let inv = 1.0 / g;
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = (255.0 * (i as f32 / 255.0).powf(inv)).clamp(0.0, 255.0) as u8;
    }
    apply_lut(img, &lut)
}

/// Scale deviations from the image's mean luma by slider/50.
fn contrast(img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let factor = f32::from(slider) / 50.0;
    let count = img.pixels().len() as u64;
    if count == 0 {
        return img;
    }
    let sum: u64 = img
        .pixels()
        .map(|p| u64::from(luma601(p.0[0], p.0[1], p.0[2])))
        .sum();
    let mean = (sum as f64 / count as f64 + 0.5) as i32;

    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = clamp_round_u8(mean as f32 + (i as f32 - mean as f32) * factor);
    }
    apply_lut(img, &lut)
}

/// Interpolate between the luma-gray image and the original by slider/50.
fn saturation(mut img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let factor = f32::from(slider) / 50.0;
    for p in img.pixels_mut() {
        let l = f32::from(luma601(p.0[0], p.0[1], p.0[2]));
        for c in &mut p.0 {
            *c = clamp_round_u8(l + (f32::from(*c) - l) * factor);
        }
    }
    img
}

/// Rotate the HSV hue byte by (slider - 50) * 3.6, wrapping modulo 256.
fn hue_rotate(mut img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let shift = (f32::from(slider) - 50.0) * 3.6;
    for p in img.pixels_mut() {
        let (h, s, v) = rgb_to_hsv(p.0[0], p.0[1], p.0[2]);
        let h = (f32::from(h) + shift).rem_euclid(256.0).min(255.0) as u8;
        let (r, g, b) = hsv_to_rgb(h, s, v);
        p.0 = [r, g, b];
    }
    img
}

/// Warm shifts add to red, cool shifts add to blue; one channel per sign.
fn temperature(mut img: RgbImage, slider: u8) -> RgbImage {
    let shift = i32::from(slider) - 50;
    if shift == 0 {
        return img;
    }
    for p in img.pixels_mut() {
        if shift > 0 {
            p.0[0] = clamp_u8(i32::from(p.0[0]) + shift);
        } else {
            p.0[2] = clamp_u8(i32::from(p.0[2]) - shift);
        }
    }
    img
}

/// Unsharp enhancement against a 3x3 smooth kernel. Strength 1 (slider 50)
/// is the identity; the border row/column passes through unfiltered.
fn sharpness(img: RgbImage, slider: u8) -> RgbImage {
    if slider == 50 {
        return img;
    }
    let factor = (1.0 + (f32::from(slider) - 50.0) / 10.0).max(0.0);
    let smooth = smooth3x3(&img);

    let mut out = img.clone();
    for (p, (o, s)) in out
        .pixels_mut()
        .zip(img.pixels().zip(smooth.pixels()))
    {
        for c in 0..3 {
            let sv = f32::from(s.0[c]);
            p.0[c] = clamp_round_u8(sv + (f32::from(o.0[c]) - sv) * factor);
        }
    }
    out
}

// 1 1 1 / 1 5 1 / 1 1 1 over 13, interior only.
fn smooth3x3(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut out = img.clone();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = [0u32; 3];
            for dy in 0..3u32 {
                for dx in 0..3u32 {
                    let weight = if dx == 1 && dy == 1 { 5 } else { 1 };
                    let src = img.get_pixel(x + dx - 1, y + dy - 1);
                    for c in 0..3 {
                        acc[c] += weight * u32::from(src.0[c]);
                    }
                }
            }
            let dst = out.get_pixel_mut(x, y);
            for c in 0..3 {
                dst.0[c] = ((acc[c] as f32) / 13.0).round().min(255.0) as u8;
            }
        }
    }
    out
}

fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if maxc == minc {
        return (0, 0, v);
    }
    let cr = f32::from(maxc) - f32::from(minc);
    let s = (cr * 255.0 / f32::from(maxc)) as u8;
    let rc = (f32::from(maxc) - f32::from(r)) / cr;
    let gc = (f32::from(maxc) - f32::from(g)) / cr;
    let bc = (f32::from(maxc) - f32::from(b)) / cr;
    let h6 = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (h6 / 6.0).rem_euclid(1.0);
    ((h * 255.0).min(255.0) as u8, s, v)
}

fn hsv_to_rgb(h: u8, s: u8, v: u8) -> (u8, u8, u8) {
    if s == 0 {
        return (v, v, v);
    }
    let hf = f32::from(h) / 255.0 * 6.0;
    let i = (hf.floor() as i32).rem_euclid(6);
    let f = hf - hf.floor();
    let sf = f32::from(s) / 255.0;
    let vf = f32::from(v);
    let p = clamp_round_u8(vf * (1.0 - sf));
    let q = clamp_round_u8(vf * (1.0 - sf * f));
    let t = clamp_round_u8(vf * (1.0 - sf * (1.0 - f)));
    match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
