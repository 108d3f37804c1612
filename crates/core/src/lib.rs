//! Core utilities shared by the arbor crates.
//!
//! This crate provides foundational types used across the workspace:
//! - Error types and result aliases
//! - Logging initialization
//! - Frame clock for delta-time driven loops
//! - Configuration management

mod config;
mod error;
mod logging;
mod timer;

pub use config::{CameraConfig, Config, Viewport};
pub use error::{Error, Result};
pub use logging::{DEFAULT_FILTER, init_logging};
pub use timer::FrameClock;
