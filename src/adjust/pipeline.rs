//! The adjustment pipeline: one pure function from (base image, styled
//! image, parameters) to the final rendered image.
//!
//! Stage order is fixed: blend, then the enabled color filters (invert,
//! grayscale, solarize, sepia, colorize, posterize, noise, tint, blur),
//! then the tone chain, then the paper texture, then the frame. The
//! pipeline performs no I/O and holds no state; callers re-run it in full
//! on every parameter change.

use image::RgbImage;

use crate::adjust::{filters, framing, texture, tone};
use crate::effects::composite::crossfade_in_place;
use crate::foundation::error::{AtelierError, AtelierResult};
use crate::params::AdjustmentParams;

#[tracing::instrument(skip_all, fields(width = base.width(), height = base.height()))]
pub fn render(
    base: &RgbImage,
    styled: &RgbImage,
    params: &AdjustmentParams,
) -> AtelierResult<RgbImage> {
    if base.dimensions() != styled.dimensions() {
        return Err(AtelierError::validation(format!(
            "base and styled images must have equal dimensions: {:?} vs {:?}",
            base.dimensions(),
            styled.dimensions()
        )));
    }

    let mut img = blend(base, styled, params.transition)?;

    if params.invert {
        img = filters::invert(&img);
    }
    if params.grayscale {
        img = filters::grayscale(&img);
    }
    if let Some(threshold) = params.solarize {
        img = filters::solarize(&img, threshold);
    }
    if params.sepia {
        img = filters::sepia(&img);
    }
    if params.colorize {
        img = filters::colorize(&img);
    }
    if let Some(bits) = params.posterize {
        img = filters::posterize(&img, bits);
    }
    if let Some(intensity) = params.noise {
        img = filters::noise(&img, intensity, params.seed);
    }
    if let Some(tint) = params.tint {
        img = filters::tint(&img, tint)?;
    }
    if let Some(slider) = params.blur {
        img = filters::blur(&img, slider)?;
    }

    img = tone::apply(img, params);

    if let Some(slider) = params.paper_texture {
        let intensity = f32::from(slider) / 100.0;
        if intensity > 0.0 {
            img = texture::overlay_paper(&img, intensity, params.seed)?;
        }
    }

    Ok(framing::apply_frame(&img, params.frame))
}

fn blend(base: &RgbImage, styled: &RgbImage, transition: u8) -> AtelierResult<RgbImage> {
    let t = f32::from(transition) / 100.0;
    let (w, h) = base.dimensions();
    let mut data = vec![0u8; base.as_raw().len()];
    crossfade_in_place(&mut data, base.as_raw(), styled.as_raw(), t)?;
    RgbImage::from_raw(w, h, data)
        .ok_or_else(|| AtelierError::evaluation("blend produced a mis-sized buffer"))
}
