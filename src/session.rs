//! The renderer session: all per-run state, and the frame loop over it.
use std::time::Instant;

use crate::config::RenderProfile;
use crate::core::assets::{AssetPaths, load_terrain};
use crate::core::camera::{Camera, CameraTuning, MovementIntents};
use crate::core::terrain::Terrain;
use crate::error;
use crate::platform::pacing::FramePacer;
use crate::platform::{FrameSink, IntentSource};
use crate::render::compositor::FrameCompositor;
use crate::render::framebuffer::Framebuffer;

pub struct RendererSession {
    terrain: Terrain,
    camera: Camera,
    tuning: CameraTuning,
    compositor: FrameCompositor,
    frames: u64,
}

impl RendererSession {
    /// Applies the profile's texel density to `terrain` and sets up buffers
    /// at its render resolution.
    pub fn new(terrain: Terrain, profile: &RenderProfile) -> Self {
        let terrain = terrain.with_texel_density(profile.texel_density);
        let tuning = profile.tuning();
        let mut camera = profile.initial_camera();
        // start on or above the ground
        let floor = camera.ground_floor(&terrain, &tuning);
        camera.elevation = camera.elevation.max(floor);
        Self {
            terrain,
            camera,
            tuning,
            compositor: profile.compositor(),
            frames: 0,
        }
    }

    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn tuning(&self) -> &CameraTuning { &self.tuning }
    pub fn terrain(&self) -> &Terrain { &self.terrain }
    pub fn compositor(&self) -> &FrameCompositor { &self.compositor }
    pub fn compositor_mut(&mut self) -> &mut FrameCompositor { &mut self.compositor }
    pub fn frames(&self) -> u64 { self.frames }

    pub fn advance(&mut self, intents: &MovementIntents) {
        self.camera.update(intents, &self.tuning, &self.terrain);
    }

    pub fn render(&mut self) -> &Framebuffer {
        self.frames += 1;
        self.compositor.render(&self.terrain, &self.camera)
    }

    /// One camera update followed by one frame.
    pub fn tick(&mut self, intents: &MovementIntents) -> &Framebuffer {
        self.advance(intents);
        self.render()
    }
}

/// Checks the profile, loads the level and builds a session from both.
pub fn open_session(assets: &AssetPaths, profile: &RenderProfile) -> error::Result<RendererSession> {
    profile.validate()?;
    let terrain = load_terrain(assets)?;
    Ok(RendererSession::new(terrain, profile))
}

/// Runs until the platform asks to quit and returns the number of frames shown.
pub fn run<P>(session: &mut RendererSession, platform: &mut P, pacer: &mut FramePacer) -> u64
where
    P: IntentSource + FrameSink,
{
    let start_frames = session.frames();
    loop {
        let tick_start = Instant::now();
        let input = platform.poll();
        if input.quit {
            break;
        }

        session.advance(&input.intents);
        platform.status(session.camera());
        platform.clear(session.compositor().sky());
        platform.present(session.render());

        pacer.wait(tick_start);
    }

    let shown = session.frames() - start_frames;
    if pacer.overruns() > 0 {
        log::info!("{} of {} frames overran the frame budget", pacer.overruns(), shown);
    }
    shown
}
