//! # Error Handling
//!
//! Every fallible operation of the upscaling pipeline returns an
//! [`UpscaleError`]. Variants carry structured fields for the failure itself
//! plus an [`ErrorContext`] with optional operation, free-form context, a
//! recovery suggestion, and a severity.
//!
//! ## Usage
//!
//! ```rust
//! use tiled_upscale::error::{HasRecoverySuggestion, UpscaleError};
//!
//! let error = UpscaleError::invalid_scale(0.0, 640, 480)
//!     .with_context("parsing --scale")
//!     .with_recovery_suggestion("Pass a positive, finite scale such as 2.0");
//!
//! assert_eq!(error.category(), "invalid_scale");
//! assert!(error.recovery_suggestion().is_some());
//! ```
//!
//! Errors abort the whole upscale call; nothing is retried.

use std::{error::Error as StdError, fmt};

use tile_geom::GeomError;

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Problems with user input that a different invocation fixes
    Warning,
    /// Failures during processing
    Error,
    /// Broken invariants (a model returning the wrong size, for instance)
    Fatal,
}

/// Metadata attached to every error variant
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Error severity level
    pub severity: ErrorSeverity,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            operation: None,
            context: None,
            recovery_suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Base error type for the upscaling pipeline
#[derive(Debug)]
pub enum UpscaleError {
    /// Tiling, merging or resampling failed
    Geometry {
        source: GeomError,
        context: ErrorContext,
    },
    /// A tile was handed to a model that does not accept its size
    UnsupportedTileSize {
        model: String,
        width: u32,
        height: u32,
        context: ErrorContext,
    },
    /// Unknown model name
    UnsupportedModel {
        name: String,
        supported: Vec<&'static str>,
        context: ErrorContext,
    },
    /// Scale that does not produce a usable target size
    InvalidScale {
        scale: f64,
        width: u32,
        height: u32,
        context: ErrorContext,
    },
    /// Configuration validation errors
    Config { reason: String, context: ErrorContext },
    /// A model violated its own contract
    Model {
        model: String,
        reason: String,
        context: ErrorContext,
    },
    /// Image decoding/encoding errors
    Image {
        operation: String,
        path: Option<String>,
        source: image::ImageError,
        context: ErrorContext,
    },
}

impl UpscaleError {
    /// Create a geometry error
    pub fn geometry(source: GeomError) -> Self {
        Self::Geometry {
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an unsupported tile size error
    pub fn unsupported_tile_size(model: impl Into<String>, width: u32, height: u32) -> Self {
        Self::UnsupportedTileSize {
            model: model.into(),
            width,
            height,
            context: ErrorContext::new().with_severity(ErrorSeverity::Fatal),
        }
    }

    /// Create an unsupported model error
    pub fn unsupported_model(name: impl Into<String>, supported: Vec<&'static str>) -> Self {
        Self::UnsupportedModel {
            name: name.into(),
            supported,
            context: ErrorContext::new().with_severity(ErrorSeverity::Warning),
        }
    }

    /// Create an invalid scale error
    pub fn invalid_scale(scale: f64, width: u32, height: u32) -> Self {
        Self::InvalidScale {
            scale,
            width,
            height,
            context: ErrorContext::new().with_severity(ErrorSeverity::Warning),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
            context: ErrorContext::new().with_severity(ErrorSeverity::Warning),
        }
    }

    /// Create a model contract error
    pub fn model(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Model {
            model: model.into(),
            reason: reason.into(),
            context: ErrorContext::new().with_severity(ErrorSeverity::Fatal),
        }
    }

    /// Create an image codec error
    pub fn image(operation: impl Into<String>, path: Option<String>, source: image::ImageError) -> Self {
        Self::Image {
            operation: operation.into(),
            path,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Set severity
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Geometry { context, .. } => context,
            Self::UnsupportedTileSize { context, .. } => context,
            Self::UnsupportedModel { context, .. } => context,
            Self::InvalidScale { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Model { context, .. } => context,
            Self::Image { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Geometry { context, .. } => context,
            Self::UnsupportedTileSize { context, .. } => context,
            Self::UnsupportedModel { context, .. } => context,
            Self::InvalidScale { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Model { context, .. } => context,
            Self::Image { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Geometry { .. } => "geometry",
            Self::UnsupportedTileSize { .. } => "unsupported_tile_size",
            Self::UnsupportedModel { .. } => "unsupported_model",
            Self::InvalidScale { .. } => "invalid_scale",
            Self::Config { .. } => "config",
            Self::Model { .. } => "model",
            Self::Image { .. } => "image",
        }
    }
}

impl fmt::Display for UpscaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.context().operation {
            write!(f, "{}: ", operation)?;
        }
        match self {
            UpscaleError::Geometry { source, .. } => write!(f, "Tile geometry error: {}", source),
            UpscaleError::UnsupportedTileSize { model, width, height, .. } => {
                write!(f, "Model {} does not support tiles of size {}x{}", model, width, height)
            }
            UpscaleError::UnsupportedModel { name, supported, .. } => write!(
                f,
                "Unsupported model '{}'. Supported models: {}",
                name,
                supported.join(", ")
            ),
            UpscaleError::InvalidScale { scale, width, height, .. } => {
                write!(f, "Invalid scale {} for a {}x{} image", scale, width, height)
            }
            UpscaleError::Config { reason, .. } => write!(f, "Configuration error: {}", reason),
            UpscaleError::Model { model, reason, .. } => write!(f, "Model {} failed: {}", model, reason),
            UpscaleError::Image { operation, path, source, .. } => match path {
                Some(path) => write!(f, "Image error during {} on '{}': {}", operation, path, source),
                None => write!(f, "Image error during {}: {}", operation, source),
            },
        }?;

        if let Some(context) = &self.context().context {
            write!(f, " ({})", context)?;
        }
        Ok(())
    }
}

impl StdError for UpscaleError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            UpscaleError::Geometry { source, .. } => Some(source),
            UpscaleError::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Trait for errors with severity levels
pub trait HasSeverity {
    fn severity(&self) -> ErrorSeverity;
}

impl HasSeverity for UpscaleError {
    fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }
}

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for UpscaleError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

/// Error classification utilities
pub mod classify {
    use super::*;

    /// Errors the user can fix by changing the invocation
    pub fn is_user_error(error: &UpscaleError) -> bool {
        matches!(
            error,
            UpscaleError::Config { .. } | UpscaleError::InvalidScale { .. } | UpscaleError::UnsupportedModel { .. }
        )
    }
}

impl From<GeomError> for UpscaleError {
    fn from(error: GeomError) -> Self {
        Self::geometry(error)
    }
}

pub type UpscaleResult<T> = Result<T, UpscaleError>;
