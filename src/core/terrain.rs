//! Wraparound nearest-sample lookup over the elevation and color grids.
use crate::error::ImageLoadError;

/// Raw pixels as handed over by the image decoder.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// Flat index of `(x, y)` in a square grid of side `side`, wrapped on both axes.
///
/// Negative coordinates are mirrored through their absolute value before the
/// remainder, so the result is always in `[0, side * side)`.
#[inline]
pub fn wrap_index(side: usize, x: i32, y: i32) -> usize {
    let wy = y.unsigned_abs() as usize % side;
    let wx = x.unsigned_abs() as usize % side;
    wy * side + wx
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Square single-channel elevation map.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    side: usize,
    cells: Vec<u8>,
}

impl HeightGrid {
    #[inline]
    pub fn sample(&self, x: i32, y: i32) -> u8 {
        self.cells[wrap_index(self.side, x, y)]
    }
}

/// Square grid of packed `0xRRGGBB` colors.
#[derive(Debug, Clone)]
pub struct ColorGrid {
    side: usize,
    cells: Vec<u32>,
}

impl ColorGrid {
    #[inline]
    pub fn sample(&self, x: i32, y: i32) -> u32 {
        self.cells[wrap_index(self.side, x, y)]
    }
}

/// Both grids plus the coordinate divisor applied before wrapping.
#[derive(Debug, Clone)]
pub struct Terrain {
    heights: HeightGrid,
    colors: ColorGrid,
    texel_density: u32,
}

fn check_square(what: &'static str, img: &DecodedImage, channels: u8) -> Result<(), ImageLoadError> {
    if img.width == 0 || img.height == 0 {
        return Err(ImageLoadError::Empty { what });
    }
    if img.width != img.height {
        return Err(ImageLoadError::NotSquare { what, width: img.width, height: img.height });
    }
    if img.channels != channels {
        return Err(ImageLoadError::ChannelCount { what, expected: channels, found: img.channels });
    }
    let expected = img.width as usize * img.height as usize * channels as usize;
    if img.pixels.len() != expected {
        return Err(ImageLoadError::Truncated { what, expected, found: img.pixels.len() });
    }
    Ok(())
}

impl Terrain {
    /// Validates the decoded elevation (1 channel) and color (3 channels)
    /// images and builds the sampler with a texel density of 1.
    pub fn from_decoded(height: DecodedImage, color: DecodedImage) -> Result<Self, ImageLoadError> {
        check_square("elevation", &height, 1)?;
        check_square("color", &color, 3)?;
        if height.width != color.width {
            return Err(ImageLoadError::SideMismatch { height: height.width, color: color.width });
        }

        let side = height.width as usize;
        let colors = color
            .pixels
            .chunks_exact(3)
            .map(|px| pack_rgb(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            heights: HeightGrid { side, cells: height.pixels },
            colors: ColorGrid { side, cells: colors },
            texel_density: 1,
        })
    }

    /// Builds a terrain of constant height and color. Handy for previews and tests.
    pub fn uniform(side: usize, height: u8, color: u32) -> Self {
        let side = side.max(1);
        Self {
            heights: HeightGrid { side, cells: vec![height; side * side] },
            colors: ColorGrid { side, cells: vec![color & 0x00FF_FFFF; side * side] },
            texel_density: 1,
        }
    }

    /// Coordinates are divided by `density` (truncating) before wrapping;
    /// 2 samples a virtual grid twice as coarse. Clamped into `1..=i32::MAX`.
    pub fn with_texel_density(mut self, density: u32) -> Self {
        self.texel_density = density.clamp(1, i32::MAX as u32);
        self
    }

    pub fn side(&self) -> usize { self.heights.side }

    #[inline]
    fn texel(&self, x: i32, y: i32) -> (i32, i32) {
        let d = self.texel_density as i32;
        (x / d, y / d)
    }

    #[inline]
    pub fn height(&self, x: i32, y: i32) -> u8 {
        let (tx, ty) = self.texel(x, y);
        self.heights.sample(tx, ty)
    }

    #[inline]
    pub fn color(&self, x: i32, y: i32) -> u32 {
        let (tx, ty) = self.texel(x, y);
        self.colors.sample(tx, ty)
    }

    /// Elevation under a world-space point; coordinates truncate toward zero.
    #[inline]
    pub fn height_at(&self, x: f32, y: f32) -> u8 {
        self.height(x as i32, y as i32)
    }
}
