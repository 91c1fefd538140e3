//! Codec-level properties of the HF2 format.

use hf2::container::{Container, HEADER_LEN};
use hf2::frequency::{ALPHABET_SIZE, FrequencyTable};
use hf2::tree::HuffmanTree;
use hf2::{AutoSafe, Error, FormatError, StreamError, compress, decompress};
use proptest::prelude::*;

/// Text-like input: a small alphabet with a skewed distribution
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            6 => Just(b'e'),
            3 => Just(b' '),
            2 => prop::sample::select(b"tanois".to_vec()),
            1 => any::<u8>(),
        ],
        1..4096,
    )
}

proptest! {
    #[test]
    fn prop_round_trip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let container = compress(&data, AutoSafe::Emit).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), data);
    }

    #[test]
    fn prop_round_trip_skewed(data in skewed_bytes()) {
        let container = compress(&data, AutoSafe::Emit).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), data);
    }

    #[test]
    fn prop_deterministic(data in skewed_bytes()) {
        let first = compress(&data, AutoSafe::Emit).unwrap();
        let second = compress(&data, AutoSafe::Emit).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_reject_only_when_not_smaller(data in skewed_bytes()) {
        let emitted = compress(&data, AutoSafe::Emit).unwrap();
        match compress(&data, AutoSafe::Reject) {
            Ok(container) => {
                prop_assert!(container.len() < data.len());
                prop_assert_eq!(container, emitted);
            }
            Err(err) => {
                prop_assert!(err.is_not_reducible());
                prop_assert!(emitted.len() >= data.len());
            }
        }
    }

    #[test]
    fn prop_dropping_last_byte_is_truncation(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let mut container = compress(&data, AutoSafe::Emit).unwrap();
        container.pop();
        let err = decompress(&container).unwrap_err();
        prop_assert!(
            matches!(err, Error::Stream(StreamError::TruncatedStream { .. })),
            "unexpected error: {:?}", err
        );
    }
}

#[test]
fn high_entropy_input_is_rejected_but_emittable() {
    let data: Vec<u8> = (0..=255u8).collect();
    let err = compress(&data, AutoSafe::Reject).unwrap_err();
    assert!(err.is_not_reducible());

    let container = compress(&data, AutoSafe::Emit).unwrap();
    assert_eq!(container.len(), HEADER_LEN + 256);
    assert_eq!(decompress(&container).unwrap(), data);
}

#[test]
fn single_symbol_uses_one_bit_codes() {
    let data = vec![b'q'; 1000];
    let container = compress(&data, AutoSafe::Emit).unwrap();
    assert_eq!(container.len(), HEADER_LEN + 125);
    assert!(container[HEADER_LEN..].iter().all(|&b| b == 0));
    assert_eq!(decompress(&container).unwrap(), data);
}

#[test]
fn empty_input_is_exactly_a_header() {
    let container = compress(&[], AutoSafe::Emit).unwrap();
    assert_eq!(container.len(), 1036);
    assert_eq!(&container[..4], b"HF2\x01");
    assert!(container[4..].iter().all(|&b| b == 0));
    assert!(decompress(&container).unwrap().is_empty());
}

#[test]
fn corrupt_tag_and_method_are_rejected() {
    let data = "format checks ".repeat(20);
    let valid = compress(data.as_bytes(), AutoSafe::Emit).unwrap();

    let mut bad_tag = valid.clone();
    bad_tag[0] = b'X';
    assert_eq!(decompress(&bad_tag).unwrap_err().as_format(), Some(&FormatError::BadMagic));

    let mut bad_method = valid.clone();
    bad_method[3] = 2;
    assert_eq!(
        decompress(&bad_method).unwrap_err().as_format(),
        Some(&FormatError::UnsupportedMethod(2))
    );

    assert_eq!(
        decompress(&valid[..100]).unwrap_err().as_format(),
        Some(&FormatError::TruncatedHeader { len: 100 })
    );
}

#[test]
fn saturated_counts_decode_with_the_same_tree() {
    let mut frequencies = [0u32; ALPHABET_SIZE];
    frequencies[b'a' as usize] = u32::MAX;
    frequencies[b'b' as usize] = u32::MAX;
    frequencies[b'c' as usize] = 7;

    let weights = FrequencyTable::from_persisted(&frequencies).weights();
    let tree = HuffmanTree::build(&weights).unwrap();
    let message = b"abcabba";
    let bitstream = tree.code_table().unwrap().pack(message).unwrap();

    let container = Container::huffman(message.len() as u64, frequencies, bitstream).serialize();
    assert_eq!(decompress(&container).unwrap(), message);
}

#[test]
fn trailing_bytes_after_the_stream_are_ignored() {
    let data = "trailing garbage ".repeat(10);
    let mut container = compress(data.as_bytes(), AutoSafe::Emit).unwrap();
    container.extend_from_slice(&[0xFF; 4]);
    assert_eq!(decompress(&container).unwrap(), data.as_bytes());
}
