// SPDX-License-Identifier: MIT
// Errors raised by tile geometry, merging and resampling.

use fast_image_resize as fir;

use crate::dim_spec::DimSpec;

#[derive(Debug)]
pub enum GeomError {
    /// A `DimSpec` whose bounds are not admissible under its own rule.
    InvalidDimSpec {
        min_value: u32,
        max_value: u32,
        multiplier: u32,
        reason: String,
    },
    /// The interval search range was exhausted without a valid solution.
    InfeasiblePartition {
        length: u32,
        overlap_fraction: f64,
        spec: DimSpec,
    },
    InvalidArgument { name: &'static str, value: String },
    NoTiles,
    TooManyTiles(usize),
    Resample(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for GeomError { fn from(e: fir::ResizeError) -> Self { Self::Resample(e) } }
impl From<fir::ImageBufferError> for GeomError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for GeomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeomError::InvalidDimSpec { min_value, max_value, multiplier, reason } => write!(
                f,
                "Invalid tile dimension spec (min {}, max {}, multiplier {}): {}",
                min_value, max_value, multiplier, reason
            ),
            GeomError::InfeasiblePartition { length, overlap_fraction, spec } => write!(
                f,
                "Cannot split interval of size {} into intervals with {} overlap fraction and provided specs {}",
                length, overlap_fraction, spec
            ),
            GeomError::InvalidArgument { name, value } => write!(f, "Invalid value for '{}': {}", name, value),
            GeomError::NoTiles => write!(f, "Cannot merge an empty list of tiles"),
            GeomError::TooManyTiles(n) => write!(f, "Cannot track provenance of {} tiles (limit {})", n, u16::MAX as usize + 1),
            GeomError::Resample(e) => write!(f, "Fast image resize error: {}", e),
            GeomError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for GeomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeomError::Resample(e) => Some(e),
            GeomError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

pub type GeomResult<T> = Result<T, GeomError>;
