//! # Upscaling Orchestration
//!
//! An [`ImageUpscaler`] reaches an arbitrary target scale using only a
//! [`TileUpscaler`] with a fixed integer factor and bounded input sizes.
//!
//! - [`MultiTileUpscaler`]: tiles the working image each pass, so any image
//!   size works
//! - [`SingleTileUpscaler`]: runs the model on the whole image, resampled to
//!   an admissible size first
//!
//! The target of `upscale(image, scale, ..)` is
//! `(floor(width * scale), floor(height * scale))`.

mod debug;
mod models;
mod multi_tile;
mod single_tile;
mod tile_upscaler;

pub use debug::{debug_slug, DebugWriter};
pub use models::{ModelId, ResamplingUpscaler};
pub use multi_tile::{plan_step, MultiTileUpscaler, Step};
pub use single_tile::SingleTileUpscaler;
pub use tile_upscaler::TileUpscaler;

use image::RgbImage;

use crate::error::{UpscaleError, UpscaleResult};

pub trait ImageUpscaler {
    /// Upscale `image` by `scale`; `scale <= 1.0` only resamples.
    fn upscale(&self, image: &RgbImage, scale: f64, prompt: &str) -> UpscaleResult<RgbImage>;
}

/// Orchestration strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UpscaleMode {
    #[default]
    Multi,
    Single,
}

/// Target size for `scale`, truncating towards zero.
pub fn target_size(width: u32, height: u32, scale: f64) -> UpscaleResult<(u32, u32)> {
    let invalid = || {
        UpscaleError::invalid_scale(scale, width, height)
            .with_recovery_suggestion("Use a finite scale > 0 that leaves both sides at least 1 pixel")
    };
    if !scale.is_finite() || scale <= 0.0 {
        return Err(invalid());
    }

    let tw = (f64::from(width) * scale).floor();
    let th = (f64::from(height) * scale).floor();
    if tw < 1.0 || th < 1.0 || tw > f64::from(u32::MAX) || th > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok((tw as u32, th as u32))
}
