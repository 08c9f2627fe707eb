//! Spin engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the triangle demo: a winit
//! window and event loop, a wgpu device bound to it, input translation, frame
//! timing and an untextured triangle-list renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
