//! Voxel-space terrain renderer.
//!
//! A height image and a color image describe a wrapping square terrain; each
//! frame is ray-marched front to back, one sample per screen column per depth
//! slice, with a per-column y-buffer for occlusion.

pub mod config;
pub mod core;
pub mod error;
pub mod platform;
pub mod render;
pub mod session;
