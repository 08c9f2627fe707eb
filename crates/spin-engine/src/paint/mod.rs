//! Paint model shared between applications and the renderer.
//!
//! Colors are linear, premultiplied alpha.

pub mod color;

pub use color::Color;
