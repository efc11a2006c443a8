//! # Image Processing and Steganography
//!
//! Pixel grids, the image file collaborator, and the LSB embed/extract
//! protocol that moves bitstrings in and out of pixel parity.

pub mod pixels;
pub mod steganography;

pub use pixels::{FileImageStore, ImageStore, PixelGrid, CHANNELS};
pub use steganography::{embed_bits, extract_bits, Capacity};
