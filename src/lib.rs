//! # Tiled Upscale
//!
//! Upscales images of any size to any scale with a tile upscaler that only
//! accepts bounded tile sizes and multiplies them by a fixed integer factor.
//!
//! ## Architecture
//!
//! - [`tile_geom`] (workspace crate): tile size rules, interval partitioning,
//!   2-D splitting, paste/stitch merging with pixel provenance, resampling
//! - [`upscaling`]: the [`TileUpscaler`] capability, the model registry, and
//!   the single-/multi-tile orchestrators
//! - [`progress`]: injectable progress reporting
//! - [`config`]: run configuration and validation
//! - [`error`]: the [`UpscaleError`] type
//!
//! ## Example
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use tiled_upscale::upscaling::{ImageUpscaler, ModelId, MultiTileUpscaler};
//!
//! # fn main() -> Result<(), tiled_upscale::UpscaleError> {
//! let model = ModelId::Lanczos4x.load()?;
//! let image = RgbImage::from_pixel(300, 200, Rgb([90, 120, 150]));
//!
//! let upscaler = MultiTileUpscaler::new(model.as_ref(), 0.1);
//! let out = upscaler.upscale(&image, 2.5, "")?;
//! assert_eq!(out.dimensions(), (750, 500));
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::info;

pub mod config;
pub mod error;
pub mod progress;
pub mod upscaling;

pub use tile_geom;

pub use config::UpscaleConfig;
pub use error::{HasRecoverySuggestion, HasSeverity, UpscaleError, UpscaleResult};
pub use progress::{NoProgress, PassInfo, ProgressReporter, TracingProgress};
pub use upscaling::{ImageUpscaler, ModelId, TileUpscaler, UpscaleMode};

use upscaling::{MultiTileUpscaler, SingleTileUpscaler};

/// Build the orchestrator selected by `config` around a loaded model.
pub fn build_upscaler<'a>(
    config: &UpscaleConfig,
    model: &'a dyn TileUpscaler,
    progress: &'a dyn ProgressReporter,
) -> Box<dyn ImageUpscaler + 'a> {
    match config.mode {
        UpscaleMode::Single => Box::new(
            SingleTileUpscaler::new(model)
                .with_filter(config.resample_filter)
                .with_progress(progress),
        ),
        UpscaleMode::Multi => {
            let mut upscaler = MultiTileUpscaler::new(model, config.stitch_overlap_fraction)
                .with_filter(config.resample_filter)
                .with_parallel(config.parallel_tiles)
                .with_progress(progress);
            if config.debug {
                upscaler = upscaler.with_debug_dir(config.debug_dir.clone());
            }
            Box::new(upscaler)
        }
    }
}

/// Load `config.input`, upscale it, and save the result.
///
/// Returns the path written.
pub fn upscale_file(config: &UpscaleConfig, progress: &dyn ProgressReporter) -> UpscaleResult<PathBuf> {
    config.validate().map_err(UpscaleError::config)?;

    let output = config.output_path();
    let input_str = config.input.display().to_string();
    info!("Upscaling {} by a factor of {} to {}", input_str, config.scale, output.display());

    let model = config.model.load()?;
    let image = image::open(&config.input)
        .map_err(|e| UpscaleError::image("loading input", Some(input_str.clone()), e))?
        .to_rgb8();

    let upscaler = build_upscaler(config, model.as_ref(), progress);
    let result = upscaler.upscale(&image, config.scale, &config.prompt)?;

    result
        .save(&output)
        .map_err(|e| UpscaleError::image("saving output", Some(output.display().to_string()), e))?;
    info!(width = result.width(), height = result.height(), path = %output.display(), "saved");
    Ok(output)
}
