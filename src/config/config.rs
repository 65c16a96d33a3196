//! # Run Configuration
//!
//! [`UpscaleConfig`] holds every knob of one upscale run. The CLI fills it from
//! arguments; library callers build it directly.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `input` | `PathBuf` | existing file | Image to upscale |
//! | `output` | `Option<PathBuf>` | any path | Result path; `<stem>_upscaled.png` next to the input when unset |
//! | `scale` | `f64` | finite, > 0 | Target scale; `<= 1.0` only resamples |
//! | `stitch_overlap_fraction` | `f64` | `[0, 1)` | Tile overlap; `0` pastes, anything else stitches |
//! | `model` | `ModelId` | registry | Tile upscaler |
//! | `prompt` | `String` | any | Passed to the model untouched |
//! | `debug` | `bool` | | Save provenance and seam overlays per merged pass |
//! | `debug_dir` | `PathBuf` | directory | Where debug images go |
//! | `mode` | `UpscaleMode` | multi/single | Orchestration strategy |
//! | `parallel_tiles` | `bool` | | Upscale the tiles of a pass in parallel |
//! | `resample_filter` | `ResampleFilter` | | Filter for non-model resizes |
//!
//! ## Examples
//!
//! ```rust
//! use tiled_upscale::config::UpscaleConfig;
//!
//! let mut config = UpscaleConfig::default();
//! config.input = "photo.jpg".into();
//! config.scale = 2.5;
//!
//! assert_eq!(config.output_path(), std::path::PathBuf::from("photo_upscaled.png"));
//! ```

use std::path::PathBuf;

use tile_geom::ResampleFilter;

use crate::upscaling::{ModelId, UpscaleMode};

#[derive(Clone, Debug)]
pub struct UpscaleConfig {
    /// Path of the image to upscale.
    pub input: PathBuf,

    /// Where the result is written. The extension picks the format.
    pub output: Option<PathBuf>,

    /// Requested scale. Must be finite and positive.
    pub scale: f64,

    /// Minimum tile overlap as a fraction of the tile size.
    ///
    /// `0.0` cuts tiles with no enforced overlap and pastes them back; any
    /// value in `(0, 1)` enforces overlap and stitches along optimised seams.
    pub stitch_overlap_fraction: f64,

    pub model: ModelId,

    pub prompt: String,

    /// Save `debug_*_pixel_sources.png` and `debug_*_stitches.png` for every merged pass.
    pub debug: bool,

    pub debug_dir: PathBuf,

    pub mode: UpscaleMode,

    /// Upscale tiles on the rayon pool. Ignored without the `parallel` feature.
    pub parallel_tiles: bool,

    pub resample_filter: ResampleFilter,
}

impl Default for UpscaleConfig {
    /// Defaults mirror the CLI: 4x, no overlap, `lanczos_4x`, multi-tile.
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            scale: 4.0,
            stitch_overlap_fraction: 0.0,
            model: ModelId::default(),
            prompt: String::new(),
            debug: false,
            debug_dir: PathBuf::from("."),
            mode: UpscaleMode::default(),
            parallel_tiles: true,
            resample_filter: ResampleFilter::default(),
        }
    }
}

impl UpscaleConfig {
    /// Defaults with the given input, scale and overlap.
    pub fn new(input: impl Into<PathBuf>, scale: f64, stitch_overlap_fraction: f64) -> Self {
        Self {
            input: input.into(),
            scale,
            stitch_overlap_fraction,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("Input file must be set".to_string());
        }
        if !self.input.is_file() {
            return Err(format!("Input file does not exist: {}", self.input.display()));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!("Scale must be a finite number greater than 0 (got {})", self.scale));
        }
        if !(0.0..1.0).contains(&self.stitch_overlap_fraction) {
            return Err(format!(
                "Stitch overlap fraction must be in [0, 1) (got {})",
                self.stitch_overlap_fraction
            ));
        }
        if self.debug && !self.debug_dir.is_dir() {
            return Err(format!("Debug directory does not exist: {}", self.debug_dir.display()));
        }
        Ok(())
    }

    /// Explicit output, or `<stem>_upscaled.png` beside the input.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        self.input.with_file_name(format!("{}_upscaled.png", stem))
    }
}
