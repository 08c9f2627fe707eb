use spin_engine::coords::{Vec2, Viewport};
use spin_engine::paint::Color;
use spin_engine::render::Vertex;

/// Triangle corners relative to its center, in pixels (+Y down).
pub const BASE_TRIANGLE: [Vec2; 3] = [
    Vec2::new(0.0, -100.0),
    Vec2::new(-100.0, 100.0),
    Vec2::new(100.0, 100.0),
];

/// Rotation angle in radians after `elapsed` seconds: one radian per second.
///
/// Left unbounded; `sin`/`cos` wrap it.
#[inline]
pub fn rotation_angle(elapsed: f32) -> f32 {
    elapsed
}

/// Places `BASE_TRIANGLE` rotated by `angle` around `center`.
pub fn triangle_vertices(center: Vec2, angle: f32, color: Color) -> [Vertex; 3] {
    BASE_TRIANGLE.map(|p| Vertex::new(center + p.rotated(angle), color))
}

/// Full vertex set for one frame: centered in `viewport`, rotated for `elapsed`.
pub fn frame_vertices(viewport: Viewport, elapsed: f32, color: Color) -> [Vertex; 3] {
    triangle_vertices(viewport.center(), rotation_angle(elapsed), color)
}
