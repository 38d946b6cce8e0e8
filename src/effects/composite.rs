use crate::foundation::error::{AtelierError, AtelierResult};
use crate::foundation::math::mul_div255_u8;

pub type Rgb8 = [u8; 3];

/// Linear blend of two pixels. `t` = 0 returns `a` exactly, `t` = 1
/// returns `b` exactly.
pub fn crossfade(a: Rgb8, b: Rgb8, t: f32) -> Rgb8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 3];
    for i in 0..3 {
        let av = mul_div255_u8(u16::from(a[i]), it);
        let bv = mul_div255_u8(u16::from(b[i]), tt);
        out[i] = av.saturating_add(bv);
    }
    out
}

/// Blend buffer `a` into buffer `b` by `t`, writing into `dst`.
pub fn crossfade_in_place(dst: &mut [u8], a: &[u8], b: &[u8], t: f32) -> AtelierResult<()> {
    if dst.len() != a.len() || dst.len() != b.len() || !dst.len().is_multiple_of(3) {
        return Err(AtelierError::evaluation(
            "crossfade_in_place expects equal-length rgb8 buffers",
        ));
    }
    for ((d, a), b) in dst
        .chunks_exact_mut(3)
        .zip(a.chunks_exact(3))
        .zip(b.chunks_exact(3))
    {
        let out = crossfade([a[0], a[1], a[2]], [b[0], b[1], b[2]], t);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Blend a solid color over the buffer at opacity `t` (tint overlays,
/// texture-free case).
pub fn blend_solid_in_place(dst: &mut [u8], color: Rgb8, t: f32) -> AtelierResult<()> {
    if !dst.len().is_multiple_of(3) {
        return Err(AtelierError::evaluation(
            "blend_solid_in_place expects an rgb8 buffer",
        ));
    }
    for d in dst.chunks_exact_mut(3) {
        let out = crossfade([d[0], d[1], d[2]], color, t);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossfade_endpoints_are_exact() {
        let a = [13u8, 200, 7];
        let b = [240u8, 3, 99];
        assert_eq!(crossfade(a, b, 0.0), a);
        assert_eq!(crossfade(a, b, 1.0), b);
    }

    #[test]
    fn crossfade_midpoint_of_black_and_white_is_mid_gray() {
        let out = crossfade([0, 0, 0], [255, 255, 255], 0.5);
        for c in out {
            assert!((i32::from(c) - 127).abs() <= 1, "got {c}");
        }
    }

    #[test]
    fn crossfade_in_place_rejects_mismatched_buffers() {
        let mut dst = vec![0u8; 6];
        let a = vec![0u8; 6];
        let b = vec![0u8; 9];
        assert!(crossfade_in_place(&mut dst, &a, &b, 0.5).is_err());
    }

    #[test]
    fn blend_solid_full_opacity_paints_the_color() {
        let mut dst = vec![10u8, 20, 30, 40, 50, 60];
        blend_solid_in_place(&mut dst, [1, 2, 3], 1.0).unwrap();
        assert_eq!(dst, vec![1, 2, 3, 1, 2, 3]);
    }
}
