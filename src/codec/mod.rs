//! # Message Codecs
//!
//! A codec turns text into a `'0'`/`'1'` bitstring and back. The end of a
//! message is marked by the encoded form of a delimiter symbol (`#` unless
//! configured otherwise), so decoding can stop inside an arbitrarily long
//! stream of extracted bits.
//!
//! Three codecs are available, selected by [`CodecKind`]:
//! - [`IdentityCodec`] (`binary`): 8 bits per symbol
//! - [`ShiftCipher`] (`caesar`): 8 bits per shifted symbol
//! - [`HuffmanCodec`] (`huffman`): variable-length code built per message

pub mod bits;
pub mod huffman;
pub mod identity;
pub mod shift;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::config::CodecConfig;
use crate::error::{Result, StegoError};

pub use huffman::{CodeTable, FrequencyTable, HuffmanCodec, HuffmanNode, HuffmanTree};
pub use identity::IdentityCodec;
pub use shift::ShiftCipher;

/// Default end-of-message sentinel.
pub const DELIMITER: char = '#';

/// Text ⇄ bitstring conversion.
pub trait Codec {
    fn kind(&self) -> CodecKind;

    /// Sentinel whose encoding terminates [`Codec::decode`].
    fn delimiter(&self) -> char;

    /// Encodes `text` as-is. Callers append the delimiter themselves.
    fn encode(&self, text: &str) -> Result<String>;

    /// Decodes up to (not including) the encoded delimiter.
    ///
    /// Never fails: malformed or foreign bitstreams produce best-effort text,
    /// and a stream without a delimiter decodes in full.
    fn decode(&self, bits: &str) -> String;
}

/// Codec selector used on the command line and in message records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Binary,
    Caesar,
    Huffman,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "binary",
            Self::Caesar => "caesar",
            Self::Huffman => "huffman",
        };
        f.write_str(name)
    }
}

/// One concrete codec, dispatched by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyCodec {
    Identity(IdentityCodec),
    Shift(ShiftCipher),
    Huffman(HuffmanCodec),
}

impl AnyCodec {
    /// Codec for encoding `text`. For Huffman this builds a new tree from
    /// the symbol frequencies of `text`.
    pub fn for_message(kind: CodecKind, text: &str, config: &CodecConfig) -> Self {
        match kind {
            CodecKind::Huffman => Self::Huffman(HuffmanCodec::from_text(text, config.delimiter)),
            CodecKind::Binary => Self::Identity(IdentityCodec::new(config.delimiter)),
            CodecKind::Caesar => Self::Shift(ShiftCipher::new(config.shift, config.delimiter)),
        }
    }

    /// Codec for decoding with no prior encode to draw a table from.
    ///
    /// # Errors
    /// - [`StegoError::HuffmanTreeNotSet`] for [`CodecKind::Huffman`]
    pub fn fixed(kind: CodecKind, config: &CodecConfig) -> Result<Self> {
        match kind {
            CodecKind::Binary => Ok(Self::Identity(IdentityCodec::new(config.delimiter))),
            CodecKind::Caesar => Ok(Self::Shift(ShiftCipher::new(config.shift, config.delimiter))),
            CodecKind::Huffman => Err(StegoError::HuffmanTreeNotSet),
        }
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        match self {
            Self::Huffman(codec) => Some(codec.table()),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Codec {
        match self {
            Self::Identity(codec) => codec,
            Self::Shift(codec) => codec,
            Self::Huffman(codec) => codec,
        }
    }
}

impl Codec for AnyCodec {
    fn kind(&self) -> CodecKind {
        self.inner().kind()
    }

    fn delimiter(&self) -> char {
        self.inner().delimiter()
    }

    fn encode(&self, text: &str) -> Result<String> {
        self.inner().encode(text)
    }

    fn decode(&self, bits: &str) -> String {
        self.inner().decode(bits)
    }
}

/// Byte value of a symbol for the fixed-width codecs.
pub(crate) fn symbol_byte(symbol: char) -> Result<u8> {
    u8::try_from(symbol).map_err(|_| {
        StegoError::Format(format!(
            "symbol {symbol:?} (U+{:04X}) does not fit in 8 bits",
            u32::from(symbol)
        ))
    })
}
