//! Property tests for the codecs and the LSB embedder.

use proptest::prelude::*;

use lsb_stego::codec::{AnyCodec, Codec, CodecKind, FrequencyTable, HuffmanTree};
use lsb_stego::processing::{embed_bits, extract_bits, PixelGrid};
use lsb_stego::{CodecConfig, StegoError};

fn codec_kind() -> impl Strategy<Value = CodecKind> {
    prop_oneof![
        Just(CodecKind::Binary),
        Just(CodecKind::Caesar),
        Just(CodecKind::Huffman),
    ]
}

proptest! {
    #[test]
    fn printable_messages_round_trip(message in "[ -\"$-~]{0,64}", kind in codec_kind()) {
        let config = CodecConfig::default();
        let text = format!("{message}#");
        let codec = AnyCodec::for_message(kind, &text, &config);
        let bits = codec.encode(&text).unwrap();
        prop_assert_eq!(codec.decode(&bits), message);
    }

    #[test]
    fn huffman_codes_are_prefix_free(text in "\\PC{1,200}") {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(&text)).unwrap();
        let table = tree.code_table();
        let codes: Vec<&str> = table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn embedded_bits_read_back(
        samples in prop::collection::vec(any::<u8>(), 3..300),
        bits in "[01]{0,300}",
    ) {
        let len = samples.len() / 3 * 3;
        let mut grid = PixelGrid::from_samples(1, len / 3, samples[..len].to_vec()).unwrap();
        let original = grid.clone();

        match embed_bits(&mut grid, &bits) {
            Ok(_) => {
                let extracted = extract_bits(&grid);
                prop_assert!(extracted.starts_with(&bits));
                prop_assert_eq!(&grid.samples()[bits.len()..], &original.samples()[bits.len()..]);
            }
            Err(StegoError::Capacity { required, available }) => {
                prop_assert!(required > available);
                prop_assert_eq!(grid, original);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
