// SPDX-License-Identifier: MIT
//! # Tile Dimension Specs
//!
//! A [`DimSpec`] describes which edge lengths a tile upscaler accepts along one
//! axis: every value in `min_value..=max_value` that is a multiple of
//! `multiplier`. Specs are built once per upscaler and never mutated.
//!
//! Rounding helpers saturate at the bounds instead of failing, so callers can
//! always ask for "the nearest size the model accepts".

use std::fmt;

use crate::error::{GeomError, GeomResult};

/// Admissible edge lengths for one tile dimension.
///
/// e.g. "at least 64, at most 256 and a multiple of 4" is
/// `DimSpec::new(64, 256, 4)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DimSpec {
    min_value: u32,
    max_value: u32,
    multiplier: u32,
}

impl DimSpec {
    /// Build a spec, rejecting bounds that are not themselves admissible.
    pub fn new(min_value: u32, max_value: u32, multiplier: u32) -> GeomResult<Self> {
        let invalid = |reason: String| GeomError::InvalidDimSpec {
            min_value,
            max_value,
            multiplier,
            reason,
        };
        if multiplier == 0 {
            return Err(invalid("multiplier must be greater than 0".to_string()));
        }
        if min_value > max_value {
            return Err(invalid(format!("min_value {} exceeds max_value {}", min_value, max_value)));
        }
        if min_value % multiplier != 0 {
            return Err(invalid(format!("min_value {} must be a multiple of {}", min_value, multiplier)));
        }
        if max_value % multiplier != 0 {
            return Err(invalid(format!("max_value {} must be a multiple of {}", max_value, multiplier)));
        }
        Ok(Self { min_value, max_value, multiplier })
    }

    pub fn min_value(&self) -> u32 {
        self.min_value
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn is_valid(&self, value: u32) -> bool {
        (self.min_value..=self.max_value).contains(&value) && value % self.multiplier == 0
    }

    /// All admissible values in ascending order.
    pub fn valid_values(&self) -> Vec<u32> {
        (self.min_value..=self.max_value)
            .step_by(self.multiplier as usize)
            .collect()
    }

    /// Largest admissible value `<= value`, or `min_value` if there is none.
    /// Values above the range clamp to `max_value`.
    pub fn round_down(&self, value: u32) -> u32 {
        if self.is_valid(value) {
            value
        } else if value < self.min_value {
            self.min_value
        } else if value > self.max_value {
            self.max_value
        } else {
            value - (value % self.multiplier)
        }
    }

    /// Smallest admissible value `>= value`, or `max_value` if there is none.
    /// Values below the range clamp to `min_value`.
    pub fn round_up(&self, value: u32) -> u32 {
        if self.is_valid(value) {
            value
        } else if value < self.min_value {
            self.min_value
        } else if value > self.max_value {
            self.max_value
        } else {
            value + self.multiplier - (value % self.multiplier)
        }
    }

    /// Next admissible value strictly above `value`; saturates at `max_value`.
    pub fn next(&self, value: u32) -> u32 {
        if self.is_valid(value) {
            self.round_up(value.saturating_add(1))
        } else {
            self.round_up(value)
        }
    }

    /// Previous admissible value strictly below `value`; saturates at `min_value`.
    pub fn prev(&self, value: u32) -> u32 {
        if self.is_valid(value) {
            self.round_down(value.saturating_sub(1))
        } else {
            self.round_down(value)
        }
    }
}

impl fmt::Display for DimSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DimSpec(min_value={}, max_value={}, multiplier={})",
            self.min_value, self.max_value, self.multiplier
        )
    }
}
