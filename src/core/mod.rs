//! World data and the camera moving over it.
//!
//! Re-exports:
//! - `terrain`: wraparound sampling over the elevation and color grids
//! - `assets`: level file naming and image decoding
//! - `camera`: camera state and per-frame movement

pub mod assets;
pub mod camera;
pub mod terrain;
