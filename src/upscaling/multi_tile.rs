//! # Multi-Tile Upscaling
//!
//! Reaches the target size through a sequence of steps on a working image:
//!
//! 1. **Tile pass**: split into admissible tiles, upscale every tile by the
//!    model's atomic factor, merge back (paste without overlap, stitch with)
//! 2. **Pre-resample**: shrink to `ceil(target / atomic)` so the next tile pass
//!    lands close to the target instead of far above it
//! 3. **Final resample**: once the image is at least as large as the target in
//!    both sides, resample to the exact target
//!
//! The first step always upscales, so no input information is discarded before
//! the model has seen it. A pre-resample is always followed by a tile pass.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbImage;
use tile_geom::{resample, MergeStrategy, ResampleFilter, Tile, TileSplitter};
use tracing::{debug, info};

use super::debug::DebugWriter;
use super::tile_upscaler::TileUpscaler;
use super::{target_size, ImageUpscaler};
use crate::error::{UpscaleError, UpscaleResult};
use crate::progress::{NoProgress, PassInfo, ProgressReporter};

/// Fraction of the atomic factor above which a pass upscales without
/// pre-resampling.
const FULL_PASS_THRESHOLD: f64 = 0.9;

/// One orchestration step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Working image already has the target size
    Done,
    /// Split, upscale by the atomic factor, merge
    TilePass,
    /// Resample the working image to the given size
    Resample { width: u32, height: u32 },
}

/// Decide the next step for a working image of `size` heading to `target`.
///
/// `previous` is the step taken before, `None` on the first iteration.
pub fn plan_step(size: (u32, u32), target: (u32, u32), atomic: u32, previous: Option<Step>) -> Step {
    if size == target {
        return Step::Done;
    }

    let remaining = (f64::from(target.0) / f64::from(size.0)).max(f64::from(target.1) / f64::from(size.1));
    if remaining <= 1.0 {
        return Step::Resample { width: target.0, height: target.1 };
    }

    match previous {
        None | Some(Step::Resample { .. }) => Step::TilePass,
        _ if remaining > FULL_PASS_THRESHOLD * f64::from(atomic) => Step::TilePass,
        _ => Step::Resample {
            width: target.0.div_ceil(atomic),
            height: target.1.div_ceil(atomic),
        },
    }
}

/// Upscales images of any size by tiling the working image on every pass.
pub struct MultiTileUpscaler<'a> {
    model: &'a dyn TileUpscaler,
    stitch_overlap_fraction: f64,
    filter: ResampleFilter,
    parallel: bool,
    debug: Option<DebugWriter>,
    progress: &'a dyn ProgressReporter,
}

impl<'a> MultiTileUpscaler<'a> {
    /// `stitch_overlap_fraction == 0.0` pastes tiles; anything in `(0, 1)`
    /// enforces that much overlap and stitches along optimised seams.
    pub fn new(model: &'a dyn TileUpscaler, stitch_overlap_fraction: f64) -> Self {
        Self {
            model,
            stitch_overlap_fraction,
            filter: ResampleFilter::default(),
            parallel: true,
            debug: None,
            progress: &NoProgress,
        }
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Upscale the tiles of a pass on the rayon pool (needs the `parallel` feature).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Save provenance and overlay images of every merged pass into `dir`.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug = Some(DebugWriter::new(dir));
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    fn resample(&self, image: &RgbImage, width: u32, height: u32) -> UpscaleResult<RgbImage> {
        self.progress.resampled(image.dimensions(), (width, height));
        Ok(resample(image, width, height, self.filter)?)
    }

    /// Upscale the image once by the atomic factor, tiling as needed.
    fn tile_pass(&self, image: RgbImage, prompt: &str) -> UpscaleResult<RgbImage> {
        let (ws, hs) = (self.model.tile_width_spec(), self.model.tile_height_spec());
        let factor = self.model.scale_factor();

        // sides below the smallest tile admit no partition
        let (w, h) = image.dimensions();
        let (mw, mh) = (
            if w < ws.min_value() { ws.round_up(w) } else { w },
            if h < hs.min_value() { hs.round_up(h) } else { h },
        );
        let image = if (mw, mh) != (w, h) { self.resample(&image, mw, mh)? } else { image };

        let splitter = TileSplitter::new(ws, hs, self.stitch_overlap_fraction);
        let tiles = splitter
            .split_image(&image)
            .map_err(|e| UpscaleError::from(e).with_operation("splitting image"))?;
        let pass = PassInfo {
            from: image.dimensions(),
            to: (image.width() * factor, image.height() * factor),
            n_tiles: tiles.len(),
        };
        self.progress.pass_started(&pass);

        let mut upscaled = self.upscale_tiles(&tiles, prompt)?;

        let merged = if upscaled.len() == 1 {
            upscaled.swap_remove(0).image
        } else {
            let strategy = MergeStrategy::for_overlap(self.stitch_overlap_fraction);
            debug!(?strategy, n_tiles = upscaled.len(), "merging tiles");
            let solution = strategy
                .merger()
                .merge(&upscaled)
                .map_err(|e| UpscaleError::from(e).with_operation("merging tiles"))?;
            if let Some(writer) = &self.debug {
                writer
                    .write(&solution)
                    .map_err(|e| e.with_operation("writing debug images"))?;
            }
            solution.image
        };

        if merged.dimensions() != pass.to {
            return Err(UpscaleError::model(
                self.model.name(),
                format!(
                    "pass produced {}x{}, expected {}x{}",
                    merged.width(),
                    merged.height(),
                    pass.to.0,
                    pass.to.1
                ),
            ));
        }
        self.progress.pass_finished(&pass);
        Ok(merged)
    }

    fn upscale_tiles(&self, tiles: &[Tile], prompt: &str) -> UpscaleResult<Vec<Tile>> {
        let total = tiles.len();
        let done = AtomicUsize::new(0);
        let run = |tile: &Tile| -> UpscaleResult<Tile> {
            let out = self.model.upscale(tile, prompt).map_err(|e| {
                e.with_operation(format!("upscaling tile at ({}, {})", tile.left, tile.top))
            })?;
            self.progress.tile_finished(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            Ok(out)
        };
        map_tiles(tiles, self.parallel, run)
    }
}

#[cfg(feature = "parallel")]
fn map_tiles<F>(tiles: &[Tile], parallel: bool, f: F) -> UpscaleResult<Vec<Tile>>
where
    F: Fn(&Tile) -> UpscaleResult<Tile> + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        tiles.par_iter().map(f).collect()
    } else {
        tiles.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_tiles<F>(tiles: &[Tile], _parallel: bool, f: F) -> UpscaleResult<Vec<Tile>>
where
    F: Fn(&Tile) -> UpscaleResult<Tile>,
{
    tiles.iter().map(f).collect()
}

impl ImageUpscaler for MultiTileUpscaler<'_> {
    fn upscale(&self, image: &RgbImage, scale: f64, prompt: &str) -> UpscaleResult<RgbImage> {
        let target = target_size(image.width(), image.height(), scale)?;
        let atomic = self.model.scale_factor();
        if atomic < 2 {
            return Err(UpscaleError::model(
                self.model.name(),
                format!("scale factor {} cannot grow the image", atomic),
            ));
        }
        info!(
            from_w = image.width(),
            from_h = image.height(),
            to_w = target.0,
            to_h = target.1,
            model = self.model.name(),
            "multi-tile upscale"
        );

        let mut work = image.clone();
        let mut previous = None;
        loop {
            let step = plan_step(work.dimensions(), target, atomic, previous);
            debug!(?step, width = work.width(), height = work.height(), "next step");
            work = match step {
                Step::Done => return Ok(work),
                Step::TilePass => self.tile_pass(work, prompt)?,
                Step::Resample { width, height } => self.resample(&work, width, height)?,
            };
            previous = Some(step);
        }
    }
}
