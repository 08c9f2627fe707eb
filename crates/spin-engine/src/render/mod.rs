//! GPU rendering subsystem.
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

pub mod geometry;

pub use geometry::{Canvas, GeometryRenderer, Vertex};
