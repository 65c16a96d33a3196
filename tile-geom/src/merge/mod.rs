// SPDX-License-Identifier: MIT
//! # Tile Merging
//!
//! Reassembles (upscaled) tiles into one image while recording which tile each
//! output pixel came from.
//!
//! - [`PasteMerger`]: opaque placement in tile order, later tiles win overlaps.
//! - [`StitchMerger`]: seam-optimised compositing driven by a [`SeamFinder`].
//!
//! [`MergeStrategy`] picks between the two: stitching only pays off when tiles
//! were cut with a non-zero overlap.

mod paste;
mod seam;
mod solution;
mod stitch;

pub use paste::PasteMerger;
pub use seam::{DpSeamFinder, SeamCost, SeamFinder};
pub use solution::{MergeSolution, PixelSources};
pub use stitch::StitchMerger;

use image::RgbImage;

use crate::error::{GeomError, GeomResult};
use crate::tile::Tile;

/// Merges tiles back into a single image.
pub trait TileMerger: Send + Sync {
    fn merge(&self, tiles: &[Tile]) -> GeomResult<MergeSolution>;
}

/// Closed set of merge strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeStrategy {
    Paste,
    Stitch,
}

impl MergeStrategy {
    /// `Paste` when there is no overlap to optimise seams in, `Stitch` otherwise.
    pub fn for_overlap(overlap_fraction: f64) -> Self {
        if overlap_fraction == 0.0 {
            MergeStrategy::Paste
        } else {
            MergeStrategy::Stitch
        }
    }

    pub fn merger(self) -> Box<dyn TileMerger> {
        match self {
            MergeStrategy::Paste => Box::new(PasteMerger),
            MergeStrategy::Stitch => Box::new(StitchMerger::new(DpSeamFinder::default())),
        }
    }
}

/// Black canvas covering all tiles plus a zeroed provenance grid.
pub(crate) fn init_solution(tiles: &[Tile]) -> GeomResult<MergeSolution> {
    if tiles.is_empty() {
        return Err(GeomError::NoTiles);
    }
    if tiles.len() > usize::from(u16::MAX) + 1 {
        return Err(GeomError::TooManyTiles(tiles.len()));
    }

    let width = tiles.iter().map(|t| t.right()).max().unwrap_or(0) + 1;
    let height = tiles.iter().map(|t| t.bottom()).max().unwrap_or(0) + 1;

    Ok(MergeSolution {
        image: RgbImage::new(width, height),
        tile_ranges: tiles.iter().map(Tile::range).collect(),
        pixel_sources: PixelSources::new(width, height),
    })
}
