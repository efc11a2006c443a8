//! Helpers for the `'0'`/`'1'` text bitstrings passed between codecs and the embedder.

/// Appends the 8-bit, most-significant-bit-first representation of `byte`.
pub fn push_byte(bits: &mut String, byte: u8) {
    bits.push_str(&format!("{byte:08b}"));
}

/// Parses one 8-character group back into a byte.
///
/// Returns `None` if the group is not exactly eight `'0'`/`'1'` characters.
pub fn parse_byte(group: &[u8]) -> Option<u8> {
    if group.len() != 8 {
        return None;
    }
    group.iter().try_fold(0u8, |acc, bit| match bit {
        b'0' => Some(acc << 1),
        b'1' => Some((acc << 1) | 1),
        _ => None,
    })
}

/// Iterates over the complete 8-bit groups of `bits`. A trailing partial
/// group is ignored.
pub fn byte_groups(bits: &str) -> impl Iterator<Item = &[u8]> {
    bits.as_bytes().chunks_exact(8)
}

pub fn is_bitstring(bits: &str) -> bool {
    bits.bytes().all(|b| b == b'0' || b == b'1')
}
