// SPDX-License-Identifier: MIT

use image::{GrayImage, Luma};
use tracing::warn;

use super::seam::{DpSeamFinder, SeamFinder};
use super::{init_solution, MergeSolution, TileMerger};
use crate::error::GeomResult;
use crate::tile::Tile;

/// Merges tiles with seam optimisation in their overlaps.
///
/// Every tile starts with a fully opaque mask; the seam finder carves the
/// masks, and each tile is then composited only where its mask is positive.
/// Later tiles win where masks still coincide.
#[derive(Clone, Copy, Debug, Default)]
pub struct StitchMerger<S = DpSeamFinder> {
    pub seam_finder: S,
}

impl<S: SeamFinder> StitchMerger<S> {
    pub fn new(seam_finder: S) -> Self {
        Self { seam_finder }
    }
}

impl<S: SeamFinder> TileMerger for StitchMerger<S> {
    fn merge(&self, tiles: &[Tile]) -> GeomResult<MergeSolution> {
        let mut sol = init_solution(tiles)?;

        let mut masks: Vec<GrayImage> = tiles
            .iter()
            .map(|t| GrayImage::from_pixel(t.width(), t.height(), Luma([255])))
            .collect();
        self.seam_finder.find(tiles, &mut masks)?;
        restore_coverage(tiles, &mut masks, sol.image.width(), sol.image.height());

        for (i, (tile, mask)) in tiles.iter().zip(&masks).enumerate() {
            let source = Luma([i as u16]);
            for (x, y, m) in mask.enumerate_pixels() {
                if m.0[0] > 0 {
                    let (cx, cy) = (tile.left + x, tile.top + y);
                    sol.image.put_pixel(cx, cy, *tile.image.get_pixel(x, y));
                    sol.pixel_sources.put_pixel(cx, cy, source);
                }
            }
        }

        Ok(sol)
    }
}

/// Hand canvas pixels that no mask claims back to the last tile covering them.
fn restore_coverage(tiles: &[Tile], masks: &mut [GrayImage], width: u32, height: u32) {
    let mut covered = vec![false; width as usize * height as usize];
    let idx = |x: u32, y: u32| y as usize * width as usize + x as usize;

    for (tile, mask) in tiles.iter().zip(masks.iter()) {
        for (x, y, m) in mask.enumerate_pixels() {
            if m.0[0] > 0 {
                covered[idx(tile.left + x, tile.top + y)] = true;
            }
        }
    }

    let mut restored = 0usize;
    for (tile, mask) in tiles.iter().zip(masks.iter_mut()).rev() {
        for y in 0..tile.height() {
            for x in 0..tile.width() {
                let slot = &mut covered[idx(tile.left + x, tile.top + y)];
                if !*slot {
                    mask.put_pixel(x, y, Luma([255]));
                    *slot = true;
                    restored += 1;
                }
            }
        }
    }
    if restored > 0 {
        warn!(restored, "seam masks left pixels uncovered; fell back to last covering tile");
    }
}
