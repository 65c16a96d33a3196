// SPDX-License-Identifier: MIT

use image::{imageops, Luma};

use super::{init_solution, MergeSolution, TileMerger};
use crate::error::GeomResult;
use crate::tile::Tile;

/// Merges tiles by plain pasting; in overlaps the later tile wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasteMerger;

impl TileMerger for PasteMerger {
    fn merge(&self, tiles: &[Tile]) -> GeomResult<MergeSolution> {
        let mut sol = init_solution(tiles)?;

        for (i, tile) in tiles.iter().enumerate() {
            imageops::replace(&mut sol.image, &tile.image, i64::from(tile.left), i64::from(tile.top));

            let source = Luma([i as u16]);
            for y in tile.top..=tile.bottom() {
                for x in tile.left..=tile.right() {
                    sol.pixel_sources.put_pixel(x, y, source);
                }
            }
        }

        Ok(sol)
    }
}
