//! # lsb-stego
//!
//! Hides text messages in the least-significant bits of RGB images.
//!
//! A message is turned into a bitstring by one of three codecs (plain binary,
//! a Caesar shift, or a per-message Huffman code), terminated by the encoded
//! delimiter `#`, and written into sample parity one bit per channel value.
//!
//! ```rust,ignore
//! use lsb_stego::{CodecKind, Steganography};
//!
//! let mut session = Steganography::default();
//! session.encode("cover.png".as_ref(), "stego.png".as_ref(), "hello", CodecKind::Huffman)?;
//! let message = session.decode("stego.png".as_ref(), CodecKind::Huffman)?;
//! assert_eq!(message.text, "hello");
//! ```

pub mod codec;
pub mod common;
pub mod error;
pub mod processing;
pub mod session;

pub use codec::{AnyCodec, Codec, CodeTable, CodecKind, DELIMITER};
pub use common::config::{CodecConfig, StegoConfig};
pub use error::{Result, StegoError};
pub use processing::{Capacity, FileImageStore, ImageStore, PixelGrid};
pub use session::{Message, Steganography};
