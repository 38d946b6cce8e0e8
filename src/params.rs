//! The flat parameter record driving the adjustment pipeline.
//!
//! Filters that pair a checkbox with a slider are modeled as `Option`
//! fields: `None` means the filter is off, `Some(value)` carries the slider
//! position. Tone controls are always applied and sit at their neutral
//! value (50) by default. [`AdjustmentParams::default`] is the documented
//! reset state the UI returns to whenever the style selection changes.

use crate::style::StyleKind;

/// The nine selectable tint overlay colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TintColor {
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Gray,
}

impl TintColor {
    /// All selectable colors, in UI order.
    pub const ALL: [TintColor; 9] = [
        TintColor::Pink,
        TintColor::Red,
        TintColor::Orange,
        TintColor::Yellow,
        TintColor::Green,
        TintColor::Cyan,
        TintColor::Blue,
        TintColor::Purple,
        TintColor::Gray,
    ];

    /// The overlay color as RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            TintColor::Pink => [0xFF, 0x69, 0xB4],
            TintColor::Red => [0xFF, 0x00, 0x00],
            TintColor::Orange => [0xFF, 0xA5, 0x00],
            TintColor::Yellow => [0xFF, 0xFF, 0x00],
            TintColor::Green => [0x00, 0x80, 0x00],
            TintColor::Cyan => [0x00, 0xFF, 0xFF],
            TintColor::Blue => [0x00, 0x00, 0xFF],
            TintColor::Purple => [0x80, 0x00, 0x80],
            TintColor::Gray => [0x80, 0x80, 0x80],
        }
    }
}

/// Tint overlay settings: color plus opacity in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TintParams {
    pub color: TintColor,
    /// Overlay opacity, 0-100 %.
    pub opacity: u8,
}

impl Default for TintParams {
    fn default() -> Self {
        Self {
            color: TintColor::Pink,
            opacity: 30,
        }
    }
}

/// Decorative frame composited around the final image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FrameStyle {
    #[default]
    None,
    Black,
    White,
    Gold,
    Metallic,
}

impl FrameStyle {
    /// The border color, or `None` when no frame is applied.
    pub fn rgb(self) -> Option<[u8; 3]> {
        match self {
            FrameStyle::None => None,
            FrameStyle::Black => Some([0x00, 0x00, 0x00]),
            FrameStyle::White => Some([0xFF, 0xFF, 0xFF]),
            FrameStyle::Gold => Some([0xFF, 0xD7, 0x00]),
            FrameStyle::Metallic => Some([0xC0, 0xC0, 0xC0]),
        }
    }
}

/// Full parameter set for one [`crate::adjust::pipeline::render`] call.
///
/// The record fully determines the output image for fixed inputs: there is
/// no hidden state, and stochastic stages (noise, paper texture) derive
/// from `seed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Blend fraction between base and styled input, 0-100 %. 0 keeps the
    /// base image, 100 the styled one.
    pub transition: u8,

    pub sepia: bool,
    pub grayscale: bool,
    pub colorize: bool,
    pub invert: bool,

    /// Gaussian blur slider, 0-100 (sigma is slider / 5).
    pub blur: Option<u8>,
    /// Posterize bit depth, 1-8.
    pub posterize: Option<u8>,
    /// Solarize threshold, 0-255.
    pub solarize: Option<u8>,
    /// Noise intensity, 0-50 %.
    pub noise: Option<u8>,
    pub tint: Option<TintParams>,
    /// Paper texture intensity, 0-50 %.
    pub paper_texture: Option<u8>,

    // Tone controls, each 0-100 with 50 as the neutral no-op value.
    pub exposure: u8,
    pub gamma: u8,
    pub brightness: u8,
    pub contrast: u8,
    pub saturation: u8,
    pub hue: u8,
    pub temperature: u8,
    pub sharpness: u8,

    pub frame: FrameStyle,
    /// Which pre-rendered styled image feeds the blend stage.
    pub style: StyleKind,
    /// Determinism seed for the noise and paper-texture stages.
    pub seed: u64,
}

impl AdjustmentParams {
    /// Slider position filters start at when first enabled.
    pub const DEFAULT_BLUR: u8 = 50;
    pub const DEFAULT_POSTERIZE_BITS: u8 = 1;
    pub const DEFAULT_SOLARIZE_THRESHOLD: u8 = 0;
    pub const DEFAULT_NOISE: u8 = 5;
    pub const DEFAULT_PAPER_TEXTURE: u8 = 0;
    pub const DEFAULT_SEED: u64 = 0xA7E1;

    const NEUTRAL_TONE: u8 = 50;
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            transition: 100,
            sepia: false,
            grayscale: false,
            colorize: false,
            invert: false,
            blur: None,
            posterize: None,
            solarize: None,
            noise: None,
            tint: None,
            paper_texture: None,
            exposure: Self::NEUTRAL_TONE,
            gamma: Self::NEUTRAL_TONE,
            brightness: Self::NEUTRAL_TONE,
            contrast: Self::NEUTRAL_TONE,
            saturation: Self::NEUTRAL_TONE,
            hue: Self::NEUTRAL_TONE,
            temperature: Self::NEUTRAL_TONE,
            sharpness: Self::NEUTRAL_TONE,
            frame: FrameStyle::None,
            style: StyleKind::Original,
            seed: Self::DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_reset_state() {
        let p = AdjustmentParams::default();
        assert_eq!(p.transition, 100);
        assert!(!p.sepia && !p.grayscale && !p.colorize && !p.invert);
        assert!(p.blur.is_none() && p.posterize.is_none() && p.solarize.is_none());
        assert!(p.noise.is_none() && p.tint.is_none() && p.paper_texture.is_none());
        for tone in [
            p.exposure,
            p.gamma,
            p.brightness,
            p.contrast,
            p.saturation,
            p.hue,
            p.temperature,
            p.sharpness,
        ] {
            assert_eq!(tone, 50);
        }
        assert_eq!(p.frame, FrameStyle::None);
        assert_eq!(p.style, StyleKind::Original);
    }

    #[test]
    fn enabled_tint_defaults_to_pink_at_30_percent() {
        let t = TintParams::default();
        assert_eq!(t.color, TintColor::Pink);
        assert_eq!(t.opacity, 30);
    }

    #[test]
    fn tint_palette_matches_the_ui_hex_codes() {
        assert_eq!(TintColor::Pink.rgb(), [0xFF, 0x69, 0xB4]);
        assert_eq!(TintColor::Purple.rgb(), [0x80, 0x00, 0x80]);
        assert_eq!(TintColor::ALL.len(), 9);
    }

    #[test]
    fn frame_styles_map_to_border_colors() {
        assert_eq!(FrameStyle::None.rgb(), None);
        assert_eq!(FrameStyle::Gold.rgb(), Some([0xFF, 0xD7, 0x00]));
        assert_eq!(FrameStyle::Metallic.rgb(), Some([0xC0, 0xC0, 0xC0]));
    }

    #[test]
    fn params_round_trip_as_json() {
        let p = AdjustmentParams {
            transition: 40,
            sepia: true,
            tint: Some(TintParams {
                color: TintColor::Cyan,
                opacity: 55,
            }),
            frame: FrameStyle::Gold,
            ..AdjustmentParams::default()
        };
        let s = serde_json::to_string_pretty(&p).unwrap();
        let de: AdjustmentParams = serde_json::from_str(&s).unwrap();
        assert_eq!(p, de);
    }

    #[test]
    fn partial_presets_fill_in_defaults() {
        let de: AdjustmentParams = serde_json::from_str(r#"{ "transition": 25 }"#).unwrap();
        assert_eq!(de.transition, 25);
        assert_eq!(de.exposure, 50);
        assert_eq!(de.frame, FrameStyle::None);
    }
}
