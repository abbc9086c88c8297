/// Last observed cursor position in normalized device coordinates.
/// Both axes range over [-1, 1], +Y up. No history is kept.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Convert a raw cursor pixel position into NDC.
    /// A zero-sized viewport leaves the pointer at the origin.
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }

        Self {
            x: (px / width) * 2.0 - 1.0,
            y: -(py / height) * 2.0 + 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_unit_square() {
        let top_left = PointerState::from_pixels(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, PointerState { x: -1.0, y: 1.0 });

        let bottom_right = PointerState::from_pixels(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, PointerState { x: 1.0, y: -1.0 });
    }

    #[test]
    fn center_is_origin() {
        let p = PointerState::from_pixels(400.0, 300.0, 800.0, 600.0);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn zero_viewport_is_ignored() {
        assert_eq!(
            PointerState::from_pixels(10.0, 10.0, 0.0, 600.0),
            PointerState::default()
        );
    }
}
