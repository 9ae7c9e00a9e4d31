//! Error types for the table rendering engine.

use thiserror::Error;

/// Errors that can occur while producing a table image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The background template was not available when the render ran.
    #[error("background template unavailable: {0}")]
    AssetLoad(String),

    /// No usable typeface, neither configured nor system fallback.
    #[error("no usable typeface: {0}")]
    FontLoad(String),

    /// PNG encoding of the finished surface failed.
    #[error("image encoding failed: {0}")]
    Encoding(String),

    /// The blocking render task could not be joined.
    #[error("render task failed: {0}")]
    Task(String),
}
