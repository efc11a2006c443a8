//! # Shift Cipher
//!
//! Caesar-style obfuscation: each byte is shifted by a fixed amount modulo 256
//! before being written as 8 bits. This hides nothing from anyone who knows
//! the scheme.

use super::bits::{byte_groups, parse_byte, push_byte};
use super::{symbol_byte, Codec, CodecKind, DELIMITER};
use crate::error::Result;

/// Shift applied when no configuration overrides it.
pub const DEFAULT_SHIFT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCipher {
    shift: u8,
    delimiter: char,
}

impl ShiftCipher {
    pub fn new(shift: u8, delimiter: char) -> Self {
        Self { shift, delimiter }
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }
}

impl Default for ShiftCipher {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT, DELIMITER)
    }
}

impl Codec for ShiftCipher {
    fn kind(&self) -> CodecKind {
        CodecKind::Caesar
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn encode(&self, text: &str) -> Result<String> {
        let mut bits = String::with_capacity(text.len() * 8);
        for symbol in text.chars() {
            push_byte(&mut bits, symbol_byte(symbol)?.wrapping_add(self.shift));
        }
        Ok(bits)
    }

    /// Reverses the shift modulo 256, so symbols near the top of the byte
    /// range survive the wrap-around on encode.
    fn decode(&self, bits: &str) -> String {
        let terminator = u8::try_from(self.delimiter)
            .ok()
            .map(|d| d.wrapping_add(self.shift));
        let mut text = String::new();
        for group in byte_groups(bits) {
            let Some(byte) = parse_byte(group) else {
                break;
            };
            if Some(byte) == terminator {
                break;
            }
            text.push(char::from(byte.wrapping_sub(self.shift)));
        }
        text
    }
}
