use super::Vec2;

/// Viewport size in pixels.
///
/// Renderers treat this as the coordinate basis for converting pixel positions
/// to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Center point of the viewport.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_extent() {
        assert_eq!(Viewport::new(800.0, 450.0).center(), Vec2::new(400.0, 225.0));
    }

    #[test]
    fn odd_sizes_keep_fraction() {
        assert_eq!(Viewport::new(801.0, 451.0).center(), Vec2::new(400.5, 225.5));
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 450.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
