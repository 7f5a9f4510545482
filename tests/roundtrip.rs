//! Property tests for the compress/decompress pair.

use proptest::prelude::*;

use huffpack::container::{Container, BODY_OFFSET};
use huffpack::histogram::HEADER_LEN;
use huffpack::{compress, compress_with_report, decompress, HuffmanTree};

/// Bytes drawn from a small alphabet, so codes get skewed lengths.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => Just(b'a'),
            1 => any::<u8>(),
        ],
        0..4000,
    )
}

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let packed = compress(&data);
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes()) {
        let packed = compress(&data);
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_histogram_conserves_length(data in skewed_bytes()) {
        let packed = compress(&data);
        if data.is_empty() {
            prop_assert!(packed.is_empty());
        } else {
            let container = Container::parse(&packed).unwrap();
            prop_assert_eq!(container.histogram.total(), data.len() as u64);
            prop_assert_eq!(container.histogram.counts().iter().sum::<u64>(), data.len() as u64);
        }
    }

    #[test]
    fn prop_size_and_body_bits(data in prop::collection::vec(any::<u8>(), 1..2000)) {
        let (packed, report) = compress_with_report(&data);
        prop_assert!(packed.len() >= BODY_OFFSET + 1);
        prop_assert_eq!(report.output_len, packed.len());

        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = tree.generate_table();
        let expected_bits: u64 = data.iter().map(|&b| table.get(b).unwrap().len() as u64).sum();
        prop_assert_eq!(report.body_bits, expected_bits);

        let valid_bits = packed[HEADER_LEN] as u64;
        let body_len = (packed.len() - BODY_OFFSET) as u64;
        prop_assert_eq!((body_len - 1) * 8 + valid_bits, expected_bits);
    }

    #[test]
    fn prop_codes_prefix_free(data in skewed_bytes()) {
        if let Some(tree) = HuffmanTree::from_bytes(&data) {
            let table = tree.generate_table();
            for (x, cx) in table.iter() {
                prop_assert!(!cx.is_empty());
                for (y, cy) in table.iter() {
                    if x != y {
                        prop_assert!(!cx.is_prefix_of(cy));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_output_is_deterministic(data in skewed_bytes()) {
        prop_assert_eq!(compress(&data), compress(&data));
    }
}

#[test]
fn test_single_symbol_repetitions() {
    for n in [1usize, 7, 8, 9, 1000] {
        let data = vec![0xABu8; n];
        let packed = compress(&data);
        let container = Container::parse(&packed).unwrap();

        // every symbol is the one-bit code 0
        assert!(container.body.iter().all(|&b| b == 0));
        assert_eq!(container.bits().count(), n);
        assert_eq!(decompress(&packed).unwrap(), data);
    }
}

#[test]
fn test_aaab_scenario() {
    let packed = compress(b"AAAB");
    let container = Container::parse(&packed).unwrap();

    assert_eq!(container.histogram.count(b'A'), 3);
    assert_eq!(container.histogram.count(b'B'), 1);
    assert_eq!(container.histogram.distinct_symbols(), 2);
    assert_eq!(container.valid_bits, 4);
    assert_eq!(container.body.len(), 1);

    let tree = HuffmanTree::from_histogram(&container.histogram).unwrap();
    let table = tree.generate_table();
    let mut codes = vec![table.get(b'A').unwrap().to_string(), table.get(b'B').unwrap().to_string()];
    codes.sort();
    assert_eq!(codes, vec!["0", "1"]);

    assert_eq!(decompress(&packed).unwrap(), b"AAAB");
}

#[test]
fn test_text_shrinks() {
    let text = "It was the best of times, it was the worst of times. ".repeat(500);
    let packed = compress(text.as_bytes());
    assert!(packed.len() < text.len());
    assert_eq!(decompress(&packed).unwrap(), text.as_bytes());
}
