//! # Steganography Session
//!
//! Ties the codecs, the LSB embedder, and the image collaborator together.
//!
//! ## State
//! A session starts idle. Every successful [`Steganography::encode`] or
//! [`Steganography::decode`] replaces the recorded [`Message`]. A Huffman
//! encode also leaves its [`CodeTable`] in the session; a later Huffman
//! decode uses that table and fails with
//! [`StegoError::HuffmanTreeNotSet`] when there is none. Encoding with
//! another codec drops the table.
//!
//! Codec choice is not stored in the image: encoder and decoder must agree
//! on it out of band.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lsb_stego::{CodecKind, Steganography};
//!
//! let mut session = Steganography::default();
//! session.encode("cover.png".as_ref(), "stego.png".as_ref(), "hello", CodecKind::Binary)?;
//! let message = session.decode("stego.png".as_ref(), CodecKind::Binary)?;
//! assert_eq!(message.text, "hello");
//! ```

use log::{info, warn};
use serde::Serialize;
use std::path::Path;

use crate::codec::{AnyCodec, Codec, CodeTable, CodecKind, HuffmanCodec};
use crate::common::config::CodecConfig;
use crate::error::{Result, StegoError};
use crate::processing::pixels::{FileImageStore, ImageStore};
use crate::processing::steganography::{embed_bits, extract_bits, Capacity};

/// The text of the last encoded or decoded message and its bitstring
/// (delimiter included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub bitstring: String,
    pub codec: CodecKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SessionState {
    #[default]
    Idle,
    MessageSet(Message),
}

pub struct Steganography<S: ImageStore = FileImageStore> {
    store: S,
    config: CodecConfig,
    state: SessionState,
    code_table: Option<CodeTable>,
}

impl Default for Steganography<FileImageStore> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Steganography<FileImageStore> {
    pub fn new(config: CodecConfig) -> Self {
        Self::with_store(FileImageStore, config)
    }
}

impl<S: ImageStore> Steganography<S> {
    pub fn with_store(store: S, config: CodecConfig) -> Self {
        Self {
            store,
            config,
            state: SessionState::Idle,
            code_table: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Embedding capacity of the image at `source`.
    pub fn capacity(&self, source: &Path) -> Result<Capacity> {
        let grid = self.store.read(source)?;
        let capacity = Capacity::of(&grid);
        info!(
            "Maximum bytes available in {}: {} ({} bits)",
            source.display(),
            capacity.bytes,
            capacity.bits
        );
        Ok(capacity)
    }

    /// Hides `message` in the image at `source` and writes the result to `dest`.
    ///
    /// The message is encoded with its delimiter appended. For Huffman a new
    /// tree is built from this message and kept for later decodes.
    ///
    /// # Returns
    /// - `Ok(Message)`: The embedded text and bitstring
    ///
    /// # Errors
    /// - [`StegoError::Format`] if the codec cannot represent the message
    /// - [`StegoError::Capacity`] if the bitstring does not fit; nothing is written
    /// - [`StegoError::ImageIo`] if `source` cannot be read or `dest` written
    pub fn encode(
        &mut self,
        source: &Path,
        dest: &Path,
        message: &str,
        kind: CodecKind,
    ) -> Result<Message> {
        if message.contains(self.config.delimiter) {
            warn!(
                "Message contains the delimiter {:?}; decoding will stop there",
                self.config.delimiter
            );
        }

        let text = format!("{message}{}", self.config.delimiter);
        let codec = AnyCodec::for_message(kind, &text, &self.config);
        let bitstring = codec.encode(&text)?;

        let mut grid = self.store.read(source)?;
        let capacity = Capacity::of(&grid);
        info!(
            "Maximum bytes available: {}, bytes to encode: {}",
            capacity.bytes,
            bitstring.len().div_ceil(8)
        );

        embed_bits(&mut grid, &bitstring)?;
        self.store.write(dest, &grid)?;

        let recorded = Message {
            text: message.to_string(),
            bitstring,
            codec: kind,
        };
        self.code_table = codec.code_table().cloned();
        self.state = SessionState::MessageSet(recorded.clone());
        info!(
            "✅ Encoded {} characters into {} with the {} codec",
            message.chars().count(),
            dest.display(),
            kind
        );
        Ok(recorded)
    }

    /// Recovers the message hidden in the image at `source`.
    ///
    /// The recorded bitstring is the re-encoding of the recovered text plus
    /// delimiter, or of the text alone when the codec cannot encode the
    /// delimiter. A mismatched codec, table, or image yields garbled text,
    /// not an error.
    ///
    /// # Errors
    /// - [`StegoError::HuffmanTreeNotSet`] for Huffman without a code table; checked before reading
    /// - [`StegoError::ImageIo`] if `source` cannot be read
    pub fn decode(&mut self, source: &Path, kind: CodecKind) -> Result<Message> {
        let codec = self.decoder(kind)?;

        let grid = self.store.read(source)?;
        let raw = extract_bits(&grid);
        let text = codec.decode(&raw);
        let bitstring = reencode(&codec, &text);

        let recorded = Message {
            text,
            bitstring,
            codec: kind,
        };
        self.state = SessionState::MessageSet(recorded.clone());
        info!(
            "✅ Decoded {} characters from {} with the {} codec",
            recorded.text.chars().count(),
            source.display(),
            kind
        );
        Ok(recorded)
    }

    fn decoder(&self, kind: CodecKind) -> Result<AnyCodec> {
        match kind {
            CodecKind::Huffman => {
                let table = self.code_table.clone().ok_or(StegoError::HuffmanTreeNotSet)?;
                Ok(AnyCodec::Huffman(HuffmanCodec::with_table(
                    table,
                    self.config.delimiter,
                )))
            }
            other => AnyCodec::fixed(other, &self.config),
        }
    }

    /// Last encoded or decoded message, if any.
    pub fn message(&self) -> Option<&Message> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::MessageSet(message) => Some(message),
        }
    }

    /// Huffman code table from the last Huffman encode.
    pub fn code_table(&self) -> Option<&CodeTable> {
        self.code_table.as_ref()
    }

    /// Installs a code table saved from an earlier Huffman encode.
    pub fn set_code_table(&mut self, table: CodeTable) {
        self.code_table = Some(table);
    }

    /// Human-readable summary of the recorded message.
    pub fn report(&self) -> String {
        match self.message() {
            None => "The message is not set.".to_string(),
            Some(message) => format!(
                "Text message: {}\nBinary message: {}",
                message.text, message.bitstring
            ),
        }
    }
}

/// Best-effort bitstring for decoded text.
fn reencode(codec: &AnyCodec, text: &str) -> String {
    codec
        .encode(&format!("{text}{}", codec.delimiter()))
        .or_else(|e| {
            warn!("Recorded bitstring omits the delimiter: {e}");
            codec.encode(text)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::pixels::PixelGrid;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MemoryStore {
        images: RefCell<HashMap<PathBuf, PixelGrid>>,
    }

    impl MemoryStore {
        fn with_carrier(path: &str, grid: PixelGrid) -> Self {
            let store = Self::default();
            store.images.borrow_mut().insert(PathBuf::from(path), grid);
            store
        }

        fn get(&self, path: &str) -> Option<PixelGrid> {
            self.images.borrow().get(Path::new(path)).cloned()
        }
    }

    impl ImageStore for MemoryStore {
        fn read(&self, path: &Path) -> Result<PixelGrid> {
            self.images
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| StegoError::ImageIo {
                    path: path.to_path_buf(),
                    source: image::ImageError::IoError(std::io::Error::from(
                        std::io::ErrorKind::NotFound,
                    )),
                })
        }

        fn write(&self, path: &Path, grid: &PixelGrid) -> Result<()> {
            self.images
                .borrow_mut()
                .insert(path.to_path_buf(), grid.clone());
            Ok(())
        }
    }

    fn carrier(height: usize, width: usize) -> PixelGrid {
        let samples = (0..height * width * 3)
            .map(|i| (i * 31 % 251) as u8)
            .collect();
        PixelGrid::from_samples(height, width, samples).unwrap()
    }

    fn session(height: usize, width: usize) -> Steganography<MemoryStore> {
        Steganography::with_store(
            MemoryStore::with_carrier("in.png", carrier(height, width)),
            CodecConfig::default(),
        )
    }

    #[test]
    fn hello_binary_scenario() {
        let mut s = session(10, 10);
        let encoded = s
            .encode(Path::new("in.png"), Path::new("out.png"), "hello", CodecKind::Binary)
            .unwrap();
        assert_eq!(encoded.text, "hello");
        assert_eq!(
            encoded.bitstring,
            "011010000110010101101100011011000110111100100011"
        );

        let decoded = s.decode(Path::new("out.png"), CodecKind::Binary).unwrap();
        assert_eq!(decoded.text, "hello");
        assert_eq!(decoded.bitstring, encoded.bitstring);
    }

    #[test]
    fn caesar_round_trip() {
        let mut s = session(8, 8);
        s.encode(Path::new("in.png"), Path::new("out.png"), "attack at dawn", CodecKind::Caesar)
            .unwrap();
        let decoded = s.decode(Path::new("out.png"), CodecKind::Caesar).unwrap();
        assert_eq!(decoded.text, "attack at dawn");
    }

    #[test]
    fn huffman_round_trip_uses_session_table() {
        let mut s = session(8, 8);
        let encoded = s
            .encode(Path::new("in.png"), Path::new("out.png"), "abracadabra", CodecKind::Huffman)
            .unwrap();
        assert!(encoded.bitstring.len() < "abracadabra#".len() * 8);
        assert!(s.code_table().is_some());

        let decoded = s.decode(Path::new("out.png"), CodecKind::Huffman).unwrap();
        assert_eq!(decoded.text, "abracadabra");
        assert_eq!(decoded.bitstring, encoded.bitstring);
    }

    #[test]
    fn huffman_decode_without_encode_fails_before_reading() {
        let mut s = session(4, 4);
        match s.decode(Path::new("missing.png"), CodecKind::Huffman) {
            Err(StegoError::HuffmanTreeNotSet) => {}
            other => panic!("expected HuffmanTreeNotSet, got {other:?}"),
        }
        assert!(s.message().is_none());
    }

    #[test]
    fn non_huffman_encode_drops_the_table() {
        let mut s = session(8, 8);
        s.encode(Path::new("in.png"), Path::new("a.png"), "tree", CodecKind::Huffman)
            .unwrap();
        s.encode(Path::new("in.png"), Path::new("b.png"), "flat", CodecKind::Binary)
            .unwrap();
        assert!(matches!(
            s.decode(Path::new("a.png"), CodecKind::Huffman),
            Err(StegoError::HuffmanTreeNotSet)
        ));
    }

    #[test]
    fn restored_table_decodes_in_a_new_session() {
        let mut first = session(8, 8);
        first
            .encode(Path::new("in.png"), Path::new("out.png"), "sidecar", CodecKind::Huffman)
            .unwrap();
        let table = first.code_table().cloned().unwrap();
        let stego = first.store().get("out.png").unwrap();

        let mut second = Steganography::with_store(
            MemoryStore::with_carrier("out.png", stego),
            CodecConfig::default(),
        );
        second.set_code_table(table);
        let decoded = second.decode(Path::new("out.png"), CodecKind::Huffman).unwrap();
        assert_eq!(decoded.text, "sidecar");
    }

    #[test]
    fn table_without_session_delimiter_still_decodes() {
        let mut first = session(8, 8);
        first
            .encode(Path::new("in.png"), Path::new("out.png"), "hello", CodecKind::Huffman)
            .unwrap();
        let table = first.code_table().cloned().unwrap();
        let stego = first.store().get("out.png").unwrap();

        let mut second = Steganography::with_store(
            MemoryStore::with_carrier("out.png", stego),
            CodecConfig {
                delimiter: '|',
                ..CodecConfig::default()
            },
        );
        second.set_code_table(table);
        let decoded = second.decode(Path::new("out.png"), CodecKind::Huffman).unwrap();
        // no code for '|': the whole stream decodes, '#' included
        assert!(decoded.text.starts_with("hello#"));
        assert!(!decoded.bitstring.is_empty());
    }

    #[test]
    fn wide_delimiter_decode_is_best_effort() {
        let mut s = Steganography::with_store(
            MemoryStore::with_carrier("in.png", carrier(4, 4)),
            CodecConfig {
                delimiter: '→',
                ..CodecConfig::default()
            },
        );
        for kind in [CodecKind::Binary, CodecKind::Caesar] {
            let decoded = s.decode(Path::new("in.png"), kind).unwrap();
            // 48 samples -> six full bytes, no terminator to stop at
            assert_eq!(decoded.text.chars().count(), 6);
            assert_eq!(decoded.bitstring.len(), 48);
        }
    }

    #[test]
    fn capacity_error_writes_nothing() {
        let mut s = session(2, 2);
        match s.encode(Path::new("in.png"), Path::new("out.png"), "too long", CodecKind::Binary) {
            Err(StegoError::Capacity {
                required: 72,
                available: 12,
            }) => {}
            other => panic!("expected Capacity error, got {other:?}"),
        }
        assert!(s.store().get("out.png").is_none());
        assert!(s.message().is_none());
        assert_eq!(s.store().get("in.png").unwrap(), carrier(2, 2));
    }

    #[test]
    fn format_error_for_wide_symbols() {
        let mut s = session(8, 8);
        assert!(matches!(
            s.encode(Path::new("in.png"), Path::new("out.png"), "π", CodecKind::Binary),
            Err(StegoError::Format(_))
        ));
        assert!(s.store().get("out.png").is_none());
    }

    #[test]
    fn huffman_accepts_any_character() {
        let mut s = session(8, 8);
        s.encode(Path::new("in.png"), Path::new("out.png"), "π ≈ 3.14", CodecKind::Huffman)
            .unwrap();
        let decoded = s.decode(Path::new("out.png"), CodecKind::Huffman).unwrap();
        assert_eq!(decoded.text, "π ≈ 3.14");
    }

    #[test]
    fn missing_source_is_image_io_error() {
        let mut s = session(4, 4);
        assert!(matches!(
            s.encode(Path::new("nope.png"), Path::new("out.png"), "hi", CodecKind::Binary),
            Err(StegoError::ImageIo { .. })
        ));
    }

    #[test]
    fn report_follows_state() {
        let mut s = session(10, 10);
        assert_eq!(s.report(), "The message is not set.");
        s.encode(Path::new("in.png"), Path::new("out.png"), "hi", CodecKind::Binary)
            .unwrap();
        assert_eq!(
            s.report(),
            "Text message: hi\nBinary message: 011010000110100100100011"
        );
    }

    #[test]
    fn capacity_reports_bits_and_bytes() {
        let s = session(5, 4);
        let capacity = s.capacity(Path::new("in.png")).unwrap();
        assert_eq!(capacity, Capacity { bits: 60, bytes: 7 });
    }
}
