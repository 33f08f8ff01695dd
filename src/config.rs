//! Render profiles and command-line arguments.
use anyhow::{Result, anyhow, bail};
use raylib::prelude::Color;

use crate::core::assets::AssetPaths;
use crate::core::camera::{Camera, CameraTuning};
use crate::error::InitError;
use crate::render::compositor::{FrameCompositor, SKY};
use crate::render::projector::ColumnProjector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Small LCD: tiny work buffer blown up 4x, keypad input.
    Handheld,
    Desktop,
}

impl ProfileKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "handheld" | "nspire" => Some(Self::Handheld),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Handheld => "handheld",
            Self::Desktop => "desktop",
        }
    }
}

/// Everything that differs between front-ends. The render core only ever
/// sees these values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProfile {
    pub kind: ProfileKind,
    pub render_width: u32,
    pub render_height: u32,
    pub presentation_scale: u32,
    pub depth_step: f32,
    pub texel_density: u32,
    /// `K` at camera scale 1: rows per unit of height difference at depth 1.
    /// Both built-in profiles use four times the render height.
    pub projection_height: f32,
    pub horizon: f32,
    pub view_distance: u32,
    pub sky: Color,
    pub target_fps: u32,
    pub asset_suffix: Option<&'static str>,
}

impl RenderProfile {
    pub fn handheld() -> Self {
        Self {
            kind: ProfileKind::Handheld,
            render_width: 80,
            render_height: 60,
            presentation_scale: 4,
            depth_step: 4.0,
            texel_density: 2,
            projection_height: 240.0,
            horizon: 40.0,
            view_distance: 80,
            sky: SKY,
            target_fps: 30,
            asset_suffix: Some("tns"),
        }
    }

    pub fn desktop() -> Self {
        Self {
            kind: ProfileKind::Desktop,
            render_width: 320,
            render_height: 240,
            presentation_scale: 2,
            depth_step: 1.0,
            texel_density: 1,
            projection_height: 960.0,
            horizon: 160.0,
            view_distance: 320,
            sky: SKY,
            target_fps: 60,
            asset_suffix: None,
        }
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Handheld => Self::handheld(),
            ProfileKind::Desktop => Self::desktop(),
        }
    }

    pub fn presentation_size(&self) -> (u32, u32) {
        (self.render_width * self.presentation_scale, self.render_height * self.presentation_scale)
    }

    pub fn validate(&self) -> Result<(), InitError> {
        if self.render_width == 0 || self.render_height == 0 {
            return Err(InitError::Config(format!(
                "render size {}x{} must be non-zero",
                self.render_width, self.render_height
            )));
        }
        if self.presentation_scale == 0 {
            return Err(InitError::Config("presentation scale must be at least 1".into()));
        }
        if self.texel_density == 0 || self.texel_density > i32::MAX as u32 {
            return Err(InitError::Config(format!(
                "texel density {} must be between 1 and {}",
                self.texel_density,
                i32::MAX
            )));
        }
        if !(self.depth_step.is_finite() && self.depth_step > 0.0) {
            return Err(InitError::Config(format!("depth step {} must be positive", self.depth_step)));
        }
        if !(self.projection_height.is_finite() && self.projection_height > 0.0) {
            return Err(InitError::Config(format!(
                "projection height {} must be positive",
                self.projection_height
            )));
        }
        if self.target_fps == 0 {
            return Err(InitError::Config("target fps must be at least 1".into()));
        }
        if self.view_distance == 0 {
            return Err(InitError::Config("view distance must be at least one slice".into()));
        }
        let fits = |v: u32| v.checked_mul(self.presentation_scale).is_some_and(|p| p <= 16_384);
        if !fits(self.render_width) || !fits(self.render_height) {
            return Err(InitError::Config(format!(
                "presentation size {}x{} times {} is too large",
                self.render_width, self.render_height, self.presentation_scale
            )));
        }
        Ok(())
    }

    pub fn compositor(&self) -> FrameCompositor {
        FrameCompositor::new(
            self.render_width,
            self.render_height,
            self.presentation_scale,
            ColumnProjector::new(self.depth_step, self.projection_height),
            self.sky,
        )
    }

    pub fn initial_camera(&self) -> Camera {
        Camera { view_distance: self.view_distance, ..Camera::default() }.with_horizon(self.horizon)
    }

    pub fn tuning(&self) -> CameraTuning {
        let base = CameraTuning::default();
        CameraTuning {
            max_distance: base.max_distance.max(self.view_distance.saturating_mul(4)),
            ..base
        }
    }
}

pub const USAGE: &str = "\
usage: voxel_space [options]
  --profile <desktop|handheld>  platform profile (default: desktop)
  --level <base>                level base name (default: res/level01)
  --ext <ext>                   image extension (default: png)
  --render <W>x<H>              render resolution
  --scale <n>                   presentation scale factor
  --texel-density <n>           terrain coordinate divisor
  --depth-step <f>              distance between depth slices
  --fps <n>                     target frame rate
  --distance <n>                initial view distance in slices
  --hud                         draw frame rate and camera state
  --help                        show this text";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub profile: RenderProfile,
    pub assets: AssetPaths,
    pub hud: bool,
    pub help: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn number<T: std::str::FromStr>(s: &str, flag: &str) -> Result<T> {
    s.parse::<T>().map_err(|_| anyhow!("invalid {flag} value: {s}"))
}

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("invalid --render value: {s} (expected WxH)"))?;
    Ok((number(w, "--render")?, number(h, "--render")?))
}

impl CliArgs {
    /// Parses the arguments after the program name. Profile defaults are
    /// applied first, so explicit flags override them regardless of order.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut kind = ProfileKind::Desktop;
        let mut i = 0;
        while i < args.len() {
            if args[i] == "--profile" {
                let v = value(args, i + 1, "--profile")?;
                kind = ProfileKind::parse(v).ok_or_else(|| anyhow!("unknown profile: {v}"))?;
            }
            i += 1;
        }

        let mut profile = RenderProfile::for_kind(kind);
        let mut level = String::from("res/level01");
        let mut ext = String::from("png");
        let mut hud = false;
        let mut help = false;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--profile" => i += 1,
                "--level" => {
                    i += 1;
                    level = value(args, i, flag)?.to_owned();
                }
                "--ext" => {
                    i += 1;
                    ext = value(args, i, flag)?.trim_start_matches('.').to_owned();
                }
                "--render" => {
                    i += 1;
                    let (w, h) = parse_size(value(args, i, flag)?)?;
                    profile.render_width = w;
                    profile.render_height = h;
                }
                "--scale" => {
                    i += 1;
                    profile.presentation_scale = number(value(args, i, flag)?, flag)?;
                }
                "--texel-density" => {
                    i += 1;
                    profile.texel_density = number(value(args, i, flag)?, flag)?;
                }
                "--depth-step" => {
                    i += 1;
                    profile.depth_step = number(value(args, i, flag)?, flag)?;
                }
                "--fps" => {
                    i += 1;
                    profile.target_fps = number(value(args, i, flag)?, flag)?;
                }
                "--distance" => {
                    i += 1;
                    profile.view_distance = number(value(args, i, flag)?, flag)?;
                }
                "--hud" => hud = true,
                "--help" | "-h" => help = true,
                other => bail!("unknown argument: {other}"),
            }
            i += 1;
        }

        profile.validate()?;
        let assets = AssetPaths::new(level, ext).with_platform_suffix(profile.asset_suffix);
        Ok(Self { profile, assets, hud, help })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_desktop() {
        let cli = CliArgs::parse(&[]).unwrap();
        assert_eq!(cli.profile, RenderProfile::desktop());
        assert_eq!(cli.assets, AssetPaths::new("res/level01", "png"));
        assert!(!cli.hud);
    }

    #[test]
    fn handheld_profile_carries_its_suffix_and_density() {
        let cli = CliArgs::parse(&args(&["--level", "maps/d1", "--profile", "handheld"])).unwrap();
        assert_eq!(cli.profile.kind, ProfileKind::Handheld);
        assert_eq!(cli.profile.texel_density, 2);
        assert_eq!(cli.profile.presentation_size(), (320, 240));
        assert_eq!(cli.assets.elevation().to_str(), Some("maps/d1_bw.png.tns"));
    }

    #[test]
    fn flags_override_profile_defaults() {
        let cli = CliArgs::parse(&args(&[
            "--render", "160x120", "--scale", "2", "--texel-density", "3",
            "--depth-step", "0.5", "--fps", "24", "--ext", ".bmp", "--hud", "--distance", "120",
            "--profile", "handheld",
        ]))
        .unwrap();
        let p = &cli.profile;
        assert_eq!((p.render_width, p.render_height), (160, 120));
        assert_eq!(p.presentation_scale, 2);
        assert_eq!(p.texel_density, 3);
        assert_eq!(p.depth_step, 0.5);
        assert_eq!(p.target_fps, 24);
        assert_eq!(p.initial_camera().view_distance, 120);
        assert_eq!(cli.assets.ext, "bmp");
        assert!(cli.hud);
    }

    #[test]
    fn projection_height_is_four_rows_per_render_row() {
        for p in [RenderProfile::handheld(), RenderProfile::desktop()] {
            assert_eq!(p.projection_height, 4.0 * p.render_height as f32);
        }
    }

    #[test]
    fn rejects_bad_input() {
        let err = CliArgs::parse(&args(&["--bogus"])).unwrap_err();
        assert!(err.to_string().contains("unknown argument"));
        let err = CliArgs::parse(&args(&["--profile", "toaster"])).unwrap_err();
        assert!(err.to_string().contains("unknown profile"));
        let err = CliArgs::parse(&args(&["--render", "320"])).unwrap_err();
        assert!(err.to_string().contains("expected WxH"));
        assert!(CliArgs::parse(&args(&["--scale"])).is_err());
        assert!(CliArgs::parse(&args(&["--scale", "0"])).is_err());
        assert!(CliArgs::parse(&args(&["--depth-step", "-1"])).is_err());
        assert!(CliArgs::parse(&args(&["--texel-density", "0"])).is_err());
        let err = CliArgs::parse(&args(&["--texel-density", "4294967295"])).unwrap_err();
        assert!(err.to_string().contains("texel density"));
        assert!(CliArgs::parse(&args(&["--texel-density", "2147483647"])).is_ok());
        assert!(CliArgs::parse(&args(&["--render", "100000x10", "--scale", "100000"])).is_err());
    }
}
