//! # LSB Steganography Implementation
//!
//! Hides a bitstring in the parity of the image samples, one bit per sample.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! Samples are visited in raster order (row → column → R, G, B). For each
//! sample `v` and the next message bit `b`:
//! - `v` even and `b = 0`: `v - 1` (0 wraps to 255)
//! - `v` odd and `b = 1`: `v + 1` (255 wraps to 0)
//! - otherwise `v` is left alone
//!
//! Once the bitstring runs out, the remaining samples are untouched.
//!
//! ### Decoding Process
//! Every sample, in the same raster order, yields `1` if even and `0` if odd.
//! The extracted stream always covers the whole image; the codec's delimiter
//! decides where the message ends.
//!
//! ### Capacity
//! `height × width × 3` bits. The check happens before any sample is modified.

use log::info;

use super::pixels::PixelGrid;
use crate::codec::bits::is_bitstring;
use crate::error::{Result, StegoError};

/// Embedding capacity of a grid, in bits and whole bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Capacity {
    pub bits: usize,
    pub bytes: usize,
}

impl Capacity {
    pub fn of(grid: &PixelGrid) -> Self {
        let bits = grid.len();
        Self {
            bits,
            bytes: bits / 8,
        }
    }
}

/// Adjusts one sample so that its parity carries `bit` (even ↔ `1`).
pub fn embed_sample(value: u8, bit: bool) -> u8 {
    let even = value % 2 == 0;
    match (even, bit) {
        (true, false) => value.wrapping_sub(1),
        (false, true) => value.wrapping_add(1),
        _ => value,
    }
}

/// Reads the bit carried by one sample.
pub fn extract_sample(value: u8) -> bool {
    value % 2 == 0
}

/// Embeds `bits` into the grid in place.
///
/// # Arguments
/// - `grid`: Carrier samples, modified in place
/// - `bits`: Bitstring of `'0'`/`'1'` characters
///
/// # Returns
/// - `Ok(usize)`: Number of samples that actually changed
///
/// # Errors
/// - [`StegoError::Capacity`] if `bits` is longer than the grid has samples
/// - [`StegoError::Format`] if `bits` contains anything but `'0'`/`'1'`
///
/// Neither error modifies the grid.
pub fn embed_bits(grid: &mut PixelGrid, bits: &str) -> Result<usize> {
    let capacity = Capacity::of(grid);
    let required = bits.len();
    if required > capacity.bits {
        return Err(StegoError::Capacity {
            required,
            available: capacity.bits,
        });
    }
    if !is_bitstring(bits) {
        return Err(StegoError::Format(
            "bitstring may only contain '0' and '1'".to_string(),
        ));
    }

    let mut changed = 0;
    for (sample, bit) in grid.samples_mut().iter_mut().zip(bits.bytes()) {
        let adjusted = embed_sample(*sample, bit == b'1');
        if adjusted != *sample {
            *sample = adjusted;
            changed += 1;
        }
    }

    info!(
        "Embedded {} bits ({} of {} samples changed)",
        required, changed, capacity.bits
    );
    Ok(changed)
}

/// Extracts one bit from every sample of the grid, in raster order.
pub fn extract_bits(grid: &PixelGrid) -> String {
    grid.samples()
        .iter()
        .map(|&sample| if extract_sample(sample) { '1' } else { '0' })
        .collect()
}
