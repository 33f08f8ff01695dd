use raylib::prelude::*;
use raylib::core::texture::RaylibTexture2D; // for .update_texture()

/// Expands a packed `0xRRGGBB` terrain color into an opaque raylib color.
#[inline]
pub fn rgb_to_color(packed: u32) -> Color {
    Color::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8, 255)
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    /// Reallocates only when the dimensions actually change.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.color_buffer = vec![self.background_color; (width * height) as usize];
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Fills rows `[top, bottom)` of column `x`, clipped to the buffer.
    pub fn fill_column(&mut self, x: u32, top: u32, bottom: u32, color: Color) {
        if x >= self.width {
            return;
        }
        let bottom = bottom.min(self.height);
        for y in top..bottom {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    /// Nearest-neighbor expansion: every pixel becomes a `factor × factor`
    /// block of `dst`, which must be exactly `factor` times larger.
    pub fn upscale_into(&self, dst: &mut Framebuffer, factor: u32) {
        debug_assert_eq!(dst.width, self.width * factor);
        debug_assert_eq!(dst.height, self.height * factor);
        if self.width == 0 || factor == 0 {
            return;
        }
        let dw = dst.width as usize;
        let f = factor as usize;
        for (y, row) in self.color_buffer.chunks_exact(self.width as usize).enumerate() {
            let first = y * f * dw;
            {
                let out = &mut dst.color_buffer[first..first + dw];
                for (block, &c) in out.chunks_exact_mut(f).zip(row) {
                    block.fill(c);
                }
            }
            for yl in 1..f {
                dst.color_buffer.copy_within(first..first + dw, first + yl * dw);
            }
        }
    }

    /// Uploads the pixels to a persistent texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        // &[Color] → &[u8] (RGBA8) without copying
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        // only fails on a size mismatch, and the texture is created from this buffer's size
        let _ = tex.update_texture(bytes);
    }
}
