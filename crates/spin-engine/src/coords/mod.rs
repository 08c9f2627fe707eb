//! Coordinate types shared across the engine renderer and applications.
//!
//! Canonical CPU space:
//! - Physical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
