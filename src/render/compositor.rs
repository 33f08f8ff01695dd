//! Work buffer at render resolution plus the optional upscaled display buffer.
use raylib::prelude::Color;

use crate::core::camera::Camera;
use crate::core::terrain::Terrain;
use crate::render::framebuffer::Framebuffer;
use crate::render::occlusion::OcclusionBuffer;
use crate::render::projector::ColumnProjector;

/// RGB565 `0x771F`, the handheld's sky, widened to 8 bits per channel.
pub const SKY: Color = Color::new(115, 226, 255, 255);

pub struct FrameCompositor {
    work: Framebuffer,
    display: Framebuffer,
    occlusion: OcclusionBuffer,
    projector: ColumnProjector,
    presentation_scale: u32,
}

impl FrameCompositor {
    pub fn new(render_width: u32, render_height: u32, presentation_scale: u32, projector: ColumnProjector, sky: Color) -> Self {
        let scale = presentation_scale.max(1);
        let mut work = Framebuffer::new(render_width, render_height);
        work.set_background_color(sky);
        work.clear();
        // the display buffer is only used when scaling
        let (dw, dh) = if scale > 1 { (render_width * scale, render_height * scale) } else { (0, 0) };
        let mut display = Framebuffer::new(dw, dh);
        display.set_background_color(sky);
        display.clear();
        Self {
            work,
            display,
            occlusion: OcclusionBuffer::new(render_width, render_height),
            projector,
            presentation_scale: scale,
        }
    }

    pub fn sky(&self) -> Color { self.work.background_color }
    pub fn occlusion(&self) -> &OcclusionBuffer { &self.occlusion }

    pub fn presentation_size(&self) -> (u32, u32) {
        (self.work.width * self.presentation_scale, self.work.height * self.presentation_scale)
    }

    /// Changes the render resolution or scale; buffers are reallocated only
    /// for the values that actually changed.
    pub fn reconfigure(&mut self, render_width: u32, render_height: u32, presentation_scale: u32) {
        let scale = presentation_scale.max(1);
        let resized = self.work.resize(render_width, render_height);
        let (dw, dh) = if scale > 1 { (render_width * scale, render_height * scale) } else { (0, 0) };
        let rescaled = self.display.resize(dw, dh);
        self.presentation_scale = scale;
        self.occlusion.reset(render_width, render_height);
        if resized || rescaled {
            log::debug!("compositor reconfigured: {render_width}x{render_height} x{scale}");
        }
    }

    /// Renders one complete frame and returns the buffer to present.
    pub fn render(&mut self, terrain: &Terrain, camera: &Camera) -> &Framebuffer {
        self.occlusion.reset(self.work.width, self.work.height);
        self.work.clear();
        self.projector.project(terrain, camera, &mut self.occlusion, &mut self.work);

        if self.presentation_scale > 1 {
            self.work.upscale_into(&mut self.display, self.presentation_scale);
            &self.display
        } else {
            &self.work
        }
    }

    /// The render-resolution buffer of the last frame.
    pub fn work_buffer(&self) -> &Framebuffer { &self.work }
}
