use atelier::{AdjustmentParams, FrameStyle, TintColor, TintParams, render};
use image::{Rgb, RgbImage};

fn photo(w: u32, h: u32, phase: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        Rgb([
            ((x * 3 + phase * 41) % 256) as u8,
            ((y * 5 + phase * 17) % 256) as u8,
            ((x + y * 2 + phase * 7) % 256) as u8,
        ])
    })
}

#[test]
fn the_blend_endpoints_reproduce_the_inputs() {
    let base = photo(64, 48, 0);
    let styled = photo(64, 48, 1);

    let at_zero = AdjustmentParams {
        transition: 0,
        ..AdjustmentParams::default()
    };
    assert_eq!(render(&base, &styled, &at_zero).unwrap(), base);

    let at_full = AdjustmentParams::default();
    assert_eq!(render(&base, &styled, &at_full).unwrap(), styled);
}

#[test]
fn default_params_are_a_pass_through_of_the_styled_image() {
    // Transition 100, every filter off, every tone slider neutral, no
    // frame: the pipeline must hand the styled input back untouched.
    let base = photo(40, 30, 0);
    let styled = photo(40, 30, 2);
    let out = render(&base, &styled, &AdjustmentParams::default()).unwrap();
    assert_eq!(out, styled);
}

#[test]
fn an_elaborate_edit_is_deterministic_end_to_end() {
    let base = photo(96, 64, 0);
    let styled = photo(96, 64, 3);
    let params = AdjustmentParams {
        transition: 70,
        grayscale: false,
        sepia: true,
        solarize: Some(190),
        posterize: Some(5),
        noise: Some(12),
        tint: Some(TintParams {
            color: TintColor::Cyan,
            opacity: 25,
        }),
        blur: Some(15),
        paper_texture: Some(18),
        exposure: 58,
        gamma: 44,
        brightness: 53,
        contrast: 62,
        saturation: 35,
        hue: 61,
        temperature: 64,
        sharpness: 70,
        frame: FrameStyle::Gold,
        ..AdjustmentParams::default()
    };

    let a = render(&base, &styled, &params).unwrap();
    let b = render(&base, &styled, &params).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.dimensions(), (800, 800));
    assert_eq!(a.get_pixel(0, 0).0, [0xFF, 0xD7, 0x00]);
}

#[test]
fn boundary_slider_values_do_not_crash() {
    let base = photo(32, 32, 0);
    let styled = photo(32, 32, 4);
    let params = AdjustmentParams {
        transition: 0,
        posterize: Some(1),
        solarize: Some(255),
        blur: Some(100),
        noise: Some(50),
        paper_texture: Some(50),
        exposure: 0,
        gamma: 0,
        brightness: 100,
        contrast: 0,
        saturation: 100,
        hue: 0,
        temperature: 100,
        sharpness: 0,
        ..AdjustmentParams::default()
    };
    let out = render(&base, &styled, &params).unwrap();
    assert_eq!(out.dimensions(), (32, 32));
}

#[test]
fn presets_loaded_from_json_drive_the_pipeline() {
    let preset = r#"{
        "transition": 55,
        "sepia": true,
        "tint": { "color": "Pink", "opacity": 30 },
        "frame": "Black"
    }"#;
    let params: AdjustmentParams = serde_json::from_str(preset).unwrap();

    let base = photo(50, 50, 0);
    let styled = photo(50, 50, 5);
    let out = render(&base, &styled, &params).unwrap();
    assert_eq!(out.dimensions(), (800, 800));
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
}
