// SPDX-License-Identifier: MIT
//! # Seam Finding
//!
//! A seam finder receives the placed tiles plus one opaque mask per tile and
//! carves the masks so that, in every overlap, each pixel is taken from one
//! tile only and the boundary between tiles runs where the two tiles agree
//! best.
//!
//! [`DpSeamFinder`] handles overlaps pairwise: for each overlapping pair it
//! finds a minimum-cost 8-connected path across the shared rectangle with
//! dynamic programming, then removes each side of the path from the other
//! tile's mask.

use image::{GrayImage, Luma, Rgb, RgbImage};
use tracing::trace;

use crate::error::{GeomError, GeomResult};
use crate::tile::{Tile, TileRange};

/// Adjusts per-tile masks (same size as each tile) to minimise seam cost.
/// A mask value of 0 means "do not take this pixel from this tile".
pub trait SeamFinder: Send + Sync {
    fn find(&self, tiles: &[Tile], masks: &mut [GrayImage]) -> GeomResult<()>;
}

/// Pixel cost used along candidate seams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeamCost {
    /// L1 colour distance between the two tiles
    Color,
    /// Colour distance damped by local gradients, so seams follow edges
    #[default]
    ColorGrad,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DpSeamFinder {
    pub cost: SeamCost,
}

impl DpSeamFinder {
    pub fn new(cost: SeamCost) -> Self {
        Self { cost }
    }
}

impl SeamFinder for DpSeamFinder {
    fn find(&self, tiles: &[Tile], masks: &mut [GrayImage]) -> GeomResult<()> {
        if tiles.len() != masks.len() {
            return Err(GeomError::InvalidArgument {
                name: "masks",
                value: format!("{} masks for {} tiles", masks.len(), tiles.len()),
            });
        }

        for j in 1..tiles.len() {
            for i in 0..j {
                let Some(overlap) = tiles[i].range().intersection(&tiles[j].range()) else {
                    continue;
                };
                let (head, tail) = masks.split_at_mut(j);
                self.cut_pair(&tiles[i], &tiles[j], &mut head[i], &mut tail[0], overlap);
            }
        }
        Ok(())
    }
}

/// Overlap viewed along the seam: `len` steps, `span` positions across.
struct SeamFrame {
    overlap: TileRange,
    vertical: bool,
}

impl SeamFrame {
    fn len(&self) -> u32 {
        if self.vertical { self.overlap.height } else { self.overlap.width }
    }

    fn span(&self) -> u32 {
        if self.vertical { self.overlap.width } else { self.overlap.height }
    }

    /// Absolute canvas coordinates of `(step, pos)`.
    fn at(&self, step: u32, pos: u32) -> (u32, u32) {
        if self.vertical {
            (self.overlap.left + pos, self.overlap.top + step)
        } else {
            (self.overlap.left + step, self.overlap.top + pos)
        }
    }
}

impl DpSeamFinder {
    fn cut_pair(&self, a: &Tile, b: &Tile, mask_a: &mut GrayImage, mask_b: &mut GrayImage, overlap: TileRange) {
        let (ax, ay) = a.range().center2();
        let (bx, by) = b.range().center2();
        let frame = SeamFrame {
            overlap,
            vertical: (ax - bx).abs() >= (ay - by).abs(),
        };
        // tile on the low side of the seam (left of a vertical seam, above a horizontal one)
        let a_is_low = if frame.vertical { ax <= bx } else { ay <= by };

        let (len, span) = (frame.len(), frame.span());
        let cost: Vec<f32> = (0..len)
            .flat_map(|step| (0..span).map(move |pos| (step, pos)))
            .map(|(step, pos)| {
                let (x, y) = frame.at(step, pos);
                let next = (pos + 1 < span).then(|| frame.at(step, pos + 1));
                self.pixel_cost(a, b, (x, y), next)
            })
            .collect();

        let seam = min_cost_path(&cost, len as usize, span as usize);
        trace!(?overlap, vertical = frame.vertical, "seam cut");

        for step in 0..len {
            let cut = seam[step as usize] as u32;
            for pos in 0..span {
                let (x, y) = frame.at(step, pos);
                if local(mask_a, a, x, y) == 0 || local(mask_b, b, x, y) == 0 {
                    continue;
                }
                let low_side = pos < cut;
                if low_side == a_is_low {
                    mask_b.put_pixel(x - b.left, y - b.top, Luma([0]));
                } else {
                    mask_a.put_pixel(x - a.left, y - a.top, Luma([0]));
                }
            }
        }
    }

    fn pixel_cost(&self, a: &Tile, b: &Tile, p: (u32, u32), next: Option<(u32, u32)>) -> f32 {
        let pa = at(&a.image, a, p);
        let pb = at(&b.image, b, p);
        let diff = l1(pa, pb);
        match self.cost {
            SeamCost::Color => diff,
            SeamCost::ColorGrad => {
                let (ga, gb) = match next {
                    Some(q) => (l1(pa, at(&a.image, a, q)), l1(pb, at(&b.image, b, q))),
                    None => (0.0, 0.0),
                };
                diff / (1.0 + (ga + gb) / 255.0)
            }
        }
    }
}

fn at<'a>(image: &'a RgbImage, tile: &Tile, (x, y): (u32, u32)) -> &'a Rgb<u8> {
    image.get_pixel(x - tile.left, y - tile.top)
}

fn local(mask: &GrayImage, tile: &Tile, x: u32, y: u32) -> u8 {
    mask.get_pixel(x - tile.left, y - tile.top).0[0]
}

fn l1(p: &Rgb<u8>, q: &Rgb<u8>) -> f32 {
    p.0.iter()
        .zip(q.0.iter())
        .map(|(&u, &v)| (i16::from(u) - i16::from(v)).unsigned_abs() as f32)
        .sum()
}

/// Minimum-cost path through a `len x span` cost grid, moving one step at a
/// time and at most one position sideways. Returns the position per step.
/// Ties prefer staying put, then moving towards lower positions; the end point
/// prefers the middle of the span.
fn min_cost_path(cost: &[f32], len: usize, span: usize) -> Vec<usize> {
    if len == 0 || span == 0 {
        return Vec::new();
    }

    let mut acc = cost[..span].to_vec();
    let mut from = vec![0usize; len * span];
    for (pos, slot) in from[..span].iter_mut().enumerate() {
        *slot = pos;
    }

    for step in 1..len {
        let mut next = vec![0.0f32; span];
        for pos in 0..span {
            let mut best = pos;
            for cand in [pos.wrapping_sub(1), pos + 1] {
                if cand < span && acc[cand] < acc[best] {
                    best = cand;
                }
            }
            next[pos] = acc[best] + cost[step * span + pos];
            from[step * span + pos] = best;
        }
        acc = next;
    }

    let middle = span / 2;
    let mut end = middle;
    for pos in 0..span {
        let closer = pos.abs_diff(middle) < end.abs_diff(middle);
        if acc[pos] < acc[end] || (acc[pos] == acc[end] && closer) {
            end = pos;
        }
    }

    let mut path = vec![0usize; len];
    path[len - 1] = end;
    for step in (1..len).rev() {
        path[step - 1] = from[step * span + path[step]];
    }
    path
}
