// SPDX-License-Identifier: MIT
//! Positioned image fragments.

use image::RgbImage;

/// Position and size of a tile, without pixel data.
/// `right` and `bottom` are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRange {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRange {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    /// Right-most pixel column, inclusive.
    pub fn right(&self) -> u32 {
        self.left + self.width - 1
    }

    /// Bottom-most pixel row, inclusive.
    pub fn bottom(&self) -> u32 {
        self.top + self.height - 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.left..=self.right()).contains(&x) && (self.top..=self.bottom()).contains(&y)
    }

    /// Overlapping rectangle of two ranges, if any.
    pub fn intersection(&self, other: &TileRange) -> Option<TileRange> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left <= right && top <= bottom).then(|| TileRange::new(left, top, right - left + 1, bottom - top + 1))
    }

    /// Twice the centre coordinates, kept integral.
    pub(crate) fn center2(&self) -> (i64, i64) {
        (
            2 * i64::from(self.left) + i64::from(self.width),
            2 * i64::from(self.top) + i64::from(self.height),
        )
    }
}

/// A tile of an image: pixels plus the absolute position of its top-left corner.
/// The image defines width and height.
#[derive(Clone, Debug)]
pub struct Tile {
    pub image: RgbImage,
    pub left: u32,
    pub top: u32,
}

impl Tile {
    pub fn new(image: RgbImage, left: u32, top: u32) -> Self {
        Self { image, left, top }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn right(&self) -> u32 {
        self.left + self.width() - 1
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height() - 1
    }

    pub fn range(&self) -> TileRange {
        TileRange::new(self.left, self.top, self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_bounds_are_inclusive() {
        let tile = Tile::new(RgbImage::new(40, 30), 10, 5);
        assert_eq!(tile.right(), 49);
        assert_eq!(tile.bottom(), 34);
        assert_eq!(tile.range(), TileRange::new(10, 5, 40, 30));
    }

    #[test]
    fn test_intersection() {
        let a = TileRange::new(0, 0, 60, 60);
        let b = TileRange::new(40, 0, 60, 60);
        let c = TileRange::new(60, 60, 10, 10);
        assert_eq!(a.intersection(&b), Some(TileRange::new(40, 0, 20, 60)));
        assert_eq!(a.intersection(&c), None);
        assert!(a.contains(59, 59));
        assert!(!a.contains(60, 0));
    }
}
