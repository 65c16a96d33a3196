//! # Configuration Module
//!
//! Run configuration shared by the CLI and library callers.

pub mod config;

pub use config::UpscaleConfig;
