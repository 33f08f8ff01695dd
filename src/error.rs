//! Fatal error kinds.
//!
//! Nothing in the per-frame path returns an error: every variant here is
//! raised before the render loop starts.

use std::path::PathBuf;

/// Terrain assets could not be turned into a usable sampler.
#[derive(thiserror::Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to load image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{what} image is empty")]
    Empty { what: &'static str },

    #[error("{what} image is not square ({width}x{height})")]
    NotSquare {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("color image side {color} does not match elevation image side {height}")]
    SideMismatch { height: u32, color: u32 },

    #[error("{what} image has {found} channel(s), expected {expected}")]
    ChannelCount {
        what: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("{what} image holds {found} bytes, expected {expected}")]
    Truncated {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// The display/input platform or its configuration could not be set up.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("window could not be opened ({width}x{height})")]
    Window { width: u32, height: u32 },

    #[error("presentation texture could not be created: {0}")]
    Texture(String),

    #[error("invalid render configuration: {0}")]
    Config(String),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),

    #[error(transparent)]
    Init(#[from] InitError),
}

pub type Result<T> = std::result::Result<T, Error>;
