//! Paper-texture overlay: a seeded, softly blurred grain field blended
//! over the image at the texture intensity.

use image::RgbImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::effects::blur::blur_rgb8;
use crate::effects::composite::crossfade_in_place;
use crate::foundation::error::{AtelierError, AtelierResult};
use crate::foundation::math::{clamp_u8, sample_gaussian};

const TEXTURE_SIGMA: f32 = 1.0;

/// Generate the grain field: Normal(127, 127 * intensity) per channel,
/// blurred at sigma 1.
pub(crate) fn paper_texture(
    width: u32,
    height: u32,
    intensity: f32,
    seed: u64,
) -> AtelierResult<RgbImage> {
    let sigma = f64::from(127.0 * intensity);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; (width as usize) * (height as usize) * 3];
    for c in &mut data {
        *c = clamp_u8((127.0 + sample_gaussian(&mut rng) * sigma) as i32);
    }
    let radius = (2.0 * TEXTURE_SIGMA).ceil() as u32;
    let blurred = blur_rgb8(&data, width, height, radius, TEXTURE_SIGMA)?;
    RgbImage::from_raw(width, height, blurred)
        .ok_or_else(|| AtelierError::evaluation("paper texture produced a mis-sized buffer"))
}

/// Blend the generated texture over `img` at `intensity`.
pub(crate) fn overlay_paper(
    img: &RgbImage,
    intensity: f32,
    seed: u64,
) -> AtelierResult<RgbImage> {
    let (w, h) = img.dimensions();
    let texture = paper_texture(w, h, intensity, seed)?;
    let mut data = vec![0u8; img.as_raw().len()];
    crossfade_in_place(&mut data, img.as_raw(), texture.as_raw(), intensity)?;
    RgbImage::from_raw(w, h, data)
        .ok_or_else(|| AtelierError::evaluation("paper overlay produced a mis-sized buffer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn texture_is_deterministic_for_a_seed() {
        let a = paper_texture(16, 12, 0.3, 5).unwrap();
        let b = paper_texture(16, 12, 0.3, 5).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, paper_texture(16, 12, 0.3, 6).unwrap());
    }

    #[test]
    fn texture_matches_requested_dimensions() {
        let t = paper_texture(20, 10, 0.2, 1).unwrap();
        assert_eq!(t.dimensions(), (20, 10));
    }

    #[test]
    fn overlay_at_zero_intensity_is_identity() {
        let img = RgbImage::from_pixel(8, 8, Rgb([40, 90, 160]));
        assert_eq!(overlay_paper(&img, 0.0, 3).unwrap(), img);
    }

    #[test]
    fn overlay_preserves_dimensions() {
        let img = RgbImage::from_pixel(14, 9, Rgb([1, 2, 3]));
        let out = overlay_paper(&img, 0.4, 3).unwrap();
        assert_eq!(out.dimensions(), img.dimensions());
    }
}
