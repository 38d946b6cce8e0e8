use rand::Rng;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

pub(crate) fn clamp_round_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// One standard-normal sample via the Box-Muller transform.
pub(crate) fn sample_gaussian(rng: &mut impl Rng) -> f64 {
    // 1 - U maps [0,1) to (0,1], keeping the log finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
