//! Terrain asset naming and decoding.
use std::path::{Path, PathBuf};

use crate::core::terrain::{DecodedImage, Terrain};
use crate::error::ImageLoadError;

pub const ELEVATION_SUFFIX: &str = "_bw";
pub const COLOR_SUFFIX: &str = "_col";

/// Where a level's two images live: `{base}_bw.{ext}` and `{base}_col.{ext}`,
/// optionally followed by a platform suffix (`.tns` on the handheld).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub base: String,
    pub ext: String,
    pub platform_suffix: Option<String>,
}

impl AssetPaths {
    pub fn new(base: impl Into<String>, ext: impl Into<String>) -> Self {
        Self { base: base.into(), ext: ext.into(), platform_suffix: None }
    }

    pub fn with_platform_suffix(mut self, suffix: Option<&str>) -> Self {
        self.platform_suffix = suffix.map(str::to_owned);
        self
    }

    fn file(&self, kind: &str) -> PathBuf {
        let mut name = format!("{}{}.{}", self.base, kind, self.ext);
        if let Some(s) = &self.platform_suffix {
            name.push('.');
            name.push_str(s);
        }
        PathBuf::from(name)
    }

    pub fn elevation(&self) -> PathBuf { self.file(ELEVATION_SUFFIX) }
    pub fn color(&self) -> PathBuf { self.file(COLOR_SUFFIX) }
}

fn read_image(path: &Path) -> Result<image::DynamicImage, image::ImageError> {
    // sniff the container from its bytes: platform suffixes hide the real extension
    image::ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Decodes an image file, keeping its native channel count.
pub fn decode_image(path: &Path) -> Result<DecodedImage, ImageLoadError> {
    let img = read_image(path).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let channels = img.color().channel_count();
    let (width, height) = (img.width(), img.height());
    // collapse bit depth to 8 bits per channel, never change the channel count
    let pixels = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        _ => img.into_rgba8().into_raw(),
    };
    Ok(DecodedImage { width, height, channels, pixels })
}

pub fn load_terrain(paths: &AssetPaths) -> Result<Terrain, ImageLoadError> {
    let elevation_path = paths.elevation();
    let color_path = paths.color();
    log::info!("loading terrain from {} and {}", elevation_path.display(), color_path.display());

    let elevation = decode_image(&elevation_path)?;
    let color = decode_image(&color_path)?;
    let terrain = Terrain::from_decoded(elevation, color)?;

    log::info!("terrain loaded: {0}x{0}", terrain.side());
    Ok(terrain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_base_suffix_ext() {
        let p = AssetPaths::new("res/level01", "png");
        assert_eq!(p.elevation(), PathBuf::from("res/level01_bw.png"));
        assert_eq!(p.color(), PathBuf::from("res/level01_col.png"));

        let p = p.with_platform_suffix(Some("tns"));
        assert_eq!(p.elevation(), PathBuf::from("res/level01_bw.png.tns"));
        assert_eq!(p.color(), PathBuf::from("res/level01_col.png.tns"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let p = AssetPaths::new("definitely/not/here/level", "png");
        let err = load_terrain(&p).unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode { .. }));
        assert!(err.to_string().contains("level_bw.png"));
    }
}
