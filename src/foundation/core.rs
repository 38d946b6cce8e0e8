/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Absolute 0-based frame index in an animation sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_orders_naturally() {
        assert!(FrameIndex(0) < FrameIndex(1));
        assert_eq!(FrameIndex(7), FrameIndex(7));
    }

    #[test]
    fn canvas_round_trips_as_json() {
        let c = Canvas {
            width: 800,
            height: 800,
        };
        let s = serde_json::to_string(&c).unwrap();
        let de: Canvas = serde_json::from_str(&s).unwrap();
        assert_eq!(c, de);
    }
}
