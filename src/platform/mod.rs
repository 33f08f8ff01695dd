//! Seams between the render core and whatever drives it.
//!
//! - `IntentSource`: per-frame input polling
//! - `FrameSink`: presentation of finished frames
//! - `pacing`: fixed frame-rate sleep
//! - `raylib_front`: window + keyboard implementation of both

pub mod pacing;
pub mod raylib_front;

use raylib::prelude::Color;

use crate::core::camera::{Camera, MovementIntents};
use crate::render::framebuffer::Framebuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub intents: MovementIntents,
    pub quit: bool,
}

pub trait IntentSource {
    fn poll(&mut self) -> FrameInput;
}

pub trait FrameSink {
    fn clear(&mut self, color: Color);
    fn present(&mut self, frame: &Framebuffer);

    /// Camera state after this tick's update, for overlays. Optional.
    fn status(&mut self, _camera: &Camera) {}
}
