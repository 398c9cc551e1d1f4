//! Errors relating to schedule rendering

use std::io;

use displaydoc::Display;
use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or emitting a schedule
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid schedule data: {0}
    InvalidInput(String),
    /// I/O error: {0}
    Io(#[from] io::Error),
    /// Failed to encode image: {0}
    Encode(#[from] image::ImageError),
    /// Failed to encode PNG: {0}
    Png(#[from] png::EncodingError),
}
