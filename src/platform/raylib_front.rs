//! raylib window: keyboard in, texture out.
use raylib::prelude::*;

use crate::config::{ProfileKind, RenderProfile};
use crate::core::camera::{Camera, MovementIntents};
use crate::error::InitError;
use crate::platform::{FrameInput, FrameSink, IntentSource};
use crate::render::framebuffer::Framebuffer;

/// Keys that push an intent toward +1 and toward -1.
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub positive: &'static [KeyboardKey],
    pub negative: &'static [KeyboardKey],
}

#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    pub turn: Axis,
    pub look: Axis,
    pub advance: Axis,
    pub climb: Axis,
    pub reach: Option<Axis>,
}

use KeyboardKey::*;

// The view faces away from the advance vector, so "forward" keys sit on the
// negative side of `advance`.
const DESKTOP_KEYS: Keymap = Keymap {
    turn: Axis { positive: &[KEY_LEFT, KEY_A], negative: &[KEY_RIGHT, KEY_D] },
    look: Axis { positive: &[KEY_R], negative: &[KEY_F] },
    advance: Axis { positive: &[KEY_DOWN, KEY_S], negative: &[KEY_UP, KEY_W] },
    climb: Axis { positive: &[KEY_E, KEY_PAGE_UP], negative: &[KEY_Q, KEY_PAGE_DOWN] },
    reach: Some(Axis { positive: &[KEY_X], negative: &[KEY_Z] }),
};

const HANDHELD_KEYS: Keymap = Keymap {
    turn: Axis { positive: &[KEY_KP_4], negative: &[KEY_KP_6] },
    look: Axis { positive: &[KEY_KP_ADD], negative: &[KEY_KP_SUBTRACT] },
    advance: Axis { positive: &[KEY_KP_5], negative: &[KEY_KP_8] },
    climb: Axis { positive: &[KEY_KP_9], negative: &[KEY_KP_7] },
    reach: None,
};

impl Keymap {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Desktop => DESKTOP_KEYS,
            ProfileKind::Handheld => HANDHELD_KEYS,
        }
    }
}

fn axis_value(rl: &RaylibHandle, axis: &Axis) -> f32 {
    let down = |keys: &[KeyboardKey]| keys.iter().any(|&k| rl.is_key_down(k));
    down(axis.positive) as i32 as f32 - down(axis.negative) as i32 as f32
}

/// Runs `init` with the panic hook silenced and turns a panic into
/// `InitError::Window`, so startup failures reach the caller as one error.
fn contain_init_panic<T>(width: u32, height: u32, init: impl FnOnce() -> T) -> Result<T, InitError> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(init));
    std::panic::set_hook(hook);
    outcome.map_err(|_| InitError::Window { width, height })
}

pub struct RaylibPlatform {
    rl: RaylibHandle,
    thread: RaylibThread,
    texture: Texture2D,
    texture_size: (u32, u32),
    keymap: Keymap,
    background: Color,
    hud: bool,
    status: String,
}

impl RaylibPlatform {
    pub fn open(profile: &RenderProfile, hud: bool) -> Result<Self, InitError> {
        let (width, height) = profile.presentation_size();
        // raylib panics instead of returning when the window cannot be created
        let (mut rl, thread) = contain_init_panic(width, height, || {
            raylib::init()
                .size(width as i32, height as i32)
                .title("Voxel Space")
                .build()
        })?;

        let texture = Self::make_texture(&mut rl, &thread, width, height, profile.sky)?;
        log::info!("window opened: {}x{} ({} profile)", width, height, profile.kind.name());

        Ok(Self {
            rl,
            thread,
            texture,
            texture_size: (width, height),
            keymap: Keymap::for_kind(profile.kind),
            background: Color::BLACK,
            hud,
            status: String::new(),
        })
    }

    fn make_texture(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        width: u32,
        height: u32,
        fill: Color,
    ) -> Result<Texture2D, InitError> {
        let img = Image::gen_image_color(width as i32, height as i32, fill);
        rl.load_texture_from_image(thread, &img)
            .map_err(|e| InitError::Texture(format!("{e:?}")))
    }
}

impl IntentSource for RaylibPlatform {
    fn poll(&mut self) -> FrameInput {
        // window close and ESC both end up here
        let quit = self.rl.window_should_close();
        let km = &self.keymap;
        let intents = MovementIntents {
            turn: axis_value(&self.rl, &km.turn),
            look: axis_value(&self.rl, &km.look),
            advance: axis_value(&self.rl, &km.advance),
            climb: axis_value(&self.rl, &km.climb),
            reach: km.reach.as_ref().map_or(0.0, |a| axis_value(&self.rl, a)),
        };
        FrameInput { intents, quit }
    }
}

impl FrameSink for RaylibPlatform {
    fn clear(&mut self, color: Color) {
        self.background = color;
    }

    fn status(&mut self, camera: &Camera) {
        if self.hud {
            self.status = format!(
                "x {:.0} y {:.0} h {:.1} yaw {:.2} dist {}",
                camera.x, camera.y, camera.elevation, camera.yaw, camera.view_distance
            );
        }
    }

    fn present(&mut self, frame: &Framebuffer) {
        if self.texture_size != (frame.width, frame.height) {
            match Self::make_texture(&mut self.rl, &self.thread, frame.width, frame.height, self.background) {
                Ok(tex) => {
                    self.texture = tex;
                    self.texture_size = (frame.width, frame.height);
                }
                Err(e) => {
                    log::error!("{e}");
                    return;
                }
            }
        }
        frame.upload_to_texture(&mut self.texture);

        let fps = self.rl.get_fps();
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(self.background);
        d.draw_texture(&self.texture, 0, 0, Color::WHITE);
        if self.hud {
            d.draw_text(&format!("FPS: {}", fps), 10, 10, 20, Color::WHITE);
            d.draw_text(&self.status, 10, 34, 20, Color::WHITE);
        }
    }
}
