//! # Identity Codec
//!
//! Plain 8-bit binary: every symbol becomes its byte value, most significant
//! bit first. Decoding stops at the first group equal to the encoded delimiter.

use super::bits::{byte_groups, parse_byte, push_byte};
use super::{symbol_byte, Codec, CodecKind, DELIMITER};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityCodec {
    delimiter: char,
}

impl IdentityCodec {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Default for IdentityCodec {
    fn default() -> Self {
        Self::new(DELIMITER)
    }
}

impl Codec for IdentityCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Binary
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    /// # Errors
    /// - [`StegoError::Format`](crate::StegoError::Format) if a symbol does not fit in one byte
    fn encode(&self, text: &str) -> Result<String> {
        let mut bits = String::with_capacity(text.len() * 8);
        for symbol in text.chars() {
            push_byte(&mut bits, symbol_byte(symbol)?);
        }
        Ok(bits)
    }

    fn decode(&self, bits: &str) -> String {
        let terminator = u8::try_from(self.delimiter).ok();
        let mut text = String::new();
        for group in byte_groups(bits) {
            let Some(byte) = parse_byte(group) else {
                break;
            };
            if Some(byte) == terminator {
                break;
            }
            text.push(char::from(byte));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StegoError;

    #[test]
    fn encodes_hello_with_delimiter() {
        let codec = IdentityCodec::default();
        let bits = codec.encode("hello#").unwrap();
        assert_eq!(bits, "011010000110010101101100011011000110111100100011");
    }

    #[test]
    fn decode_stops_at_delimiter() {
        let codec = IdentityCodec::default();
        let mut bits = codec.encode("hi#").unwrap();
        bits.push_str("0110000101100010");
        assert_eq!(codec.decode(&bits), "hi");
    }

    #[test]
    fn decode_without_delimiter_returns_everything() {
        let codec = IdentityCodec::default();
        let bits = codec.encode("abc").unwrap();
        assert_eq!(codec.decode(&bits), "abc");
        assert_eq!(codec.decode(&format!("{bits}0101")), "abc");
    }

    #[test]
    fn rejects_wide_symbols() {
        let codec = IdentityCodec::default();
        match codec.encode("snow ☃") {
            Err(StegoError::Format(_)) => {}
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn latin1_symbols_round_trip() {
        let codec = IdentityCodec::default();
        let bits = codec.encode("café ÿ#").unwrap();
        assert_eq!(codec.decode(&bits), "café ÿ");
    }
}
