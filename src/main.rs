// main.rs
use anyhow::{Context, Result};

use voxel_space::config::{CliArgs, USAGE};
use voxel_space::platform::pacing::FramePacer;
use voxel_space::platform::raylib_front::RaylibPlatform;
use voxel_space::session::{open_session, run as run_session};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args).context("bad command line (see --help)")?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let profile = &cli.profile;
    log::info!(
        "{} profile: render {}x{} x{}, depth step {}, texel density {}",
        profile.kind.name(),
        profile.render_width,
        profile.render_height,
        profile.presentation_scale,
        profile.depth_step,
        profile.texel_density,
    );

    let mut session = open_session(&cli.assets, profile).context("could not load terrain")?;
    let mut platform = RaylibPlatform::open(profile, cli.hud).context("could not start the display")?;
    let mut pacer = FramePacer::from_fps(profile.target_fps);

    let frames = run_session(&mut session, &mut platform, &mut pacer);
    log::info!("quit after {frames} frames");
    Ok(())
}
