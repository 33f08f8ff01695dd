//! Rendering.
//!
//! Re-exports:
//! - `framebuffer`: CPU pixel buffer and block upscaling
//! - `occlusion`: per-column y-buffer
//! - `projector`: depth-slice ray march
//! - `compositor`: per-frame clear, project and scale

pub mod compositor;
pub mod framebuffer;
pub mod occlusion;
pub mod projector;
