//! # Error Types
//!
//! Every fallible operation in the library returns [`StegoError`]. Capacity
//! and state errors are raised before any pixel is touched, so a failed
//! encode never leaves a half-written carrier behind.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Input a codec cannot represent (e.g. a symbol outside one byte).
    #[error("Format error: {0}")]
    Format(String),

    /// The encoded message does not fit into the carrier.
    #[error("Insufficient capacity: message needs {required} bits but the image holds {available}")]
    Capacity { required: usize, available: usize },

    /// Huffman decode requested without a code table from a prior encode.
    #[error("Huffman tree not set")]
    HuffmanTreeNotSet,

    #[error("Image I/O error for {}: {source}", path.display())]
    ImageIo {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
