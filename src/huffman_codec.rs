use std::fmt;

use tracing::{debug, trace};

use crate::bit_vec::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::container::Container;
use crate::error::{HuffmanError, HuffmanResult};
use crate::histogram::Histogram;
use crate::hufftree::HuffmanTree;

/// A tree and its code table, both derived from one histogram.
///
/// Holds no state between calls; build a new codec for every histogram.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = tree.generate_table();
        HuffmanCodec { tree, encode_table }
    }

    /// Returns `None` when the histogram has no symbols.
    pub fn from_histogram(histogram: &Histogram) -> Option<Self> {
        HuffmanTree::from_histogram(histogram).map(Self::new)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.encode_table
    }

    /// Packs `data` into a body, failing if a byte has no code in this table.
    pub fn encode_body(&self, data: &[u8]) -> HuffmanResult<BitWriter> {
        if let Some(&byte) = data.iter().find(|&&byte| self.encode_table.get(byte).is_none()) {
            return Err(HuffmanError::UnknownSymbol(byte));
        }
        Ok(self.pack(data))
    }

    // Callers guarantee every byte of `data` has a code.
    fn pack(&self, data: &[u8]) -> BitWriter {
        let body_bits = data
            .iter()
            .filter_map(|&byte| self.encode_table.get(byte))
            .map(|code| code.len() as u64)
            .sum();

        let mut bit_vec = BitWriter::with_capacity_bits(body_bits);
        for code in data.iter().filter_map(|&byte| self.encode_table.get(byte)) {
            bit_vec.push_code(code);
        }
        bit_vec
    }

    /// Walks `bits` through the tree until `expected` symbols have been emitted.
    /// Any bits left after that are padding and are never read.
    pub fn decode_body(&self, bits: BitReader<'_>, expected: u64) -> HuffmanResult<Vec<u8>> {
        // each symbol takes at least one bit, so a corrupt header can't force a huge allocation
        let capacity = expected.min(bits.bit_len()) as usize;
        let mut result = Vec::with_capacity(capacity);
        let root = self.tree.root();
        let mut current = root;

        if expected == 0 {
            return Ok(result);
        }

        for bit in bits {
            current = self.tree.step(current, bit).ok_or_else(|| {
                HuffmanError::corrupt(
                    format!("no branch for bit {} below node {}", bit as u8, current),
                    result.len() as u64,
                    expected,
                )
            })?;

            if let Some(byte) = self.tree.symbol(current) {
                result.push(byte);
                if result.len() as u64 == expected {
                    return Ok(result);
                }
                current = root;
            }
        }

        Err(HuffmanError::corrupt(
            "body ended early",
            result.len() as u64,
            expected,
        ))
    }
}

/// Sizes observed while compressing one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub input_len: usize,
    pub output_len: usize,
    pub distinct_symbols: usize,
    pub body_bits: u64,
}

impl CompressionReport {
    /// Output size as a fraction of the input size; 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.output_len as f64 / self.input_len as f64
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} -> {} bytes ({} symbols, {:.1}%)",
            self.input_len,
            self.output_len,
            self.distinct_symbols,
            self.ratio() * 100.0
        )
    }
}

/// Compresses `input` into a self-describing container. Empty input gives empty output.
pub fn compress(input: &[u8]) -> Vec<u8> {
    compress_with_report(input).0
}

pub fn compress_with_report(input: &[u8]) -> (Vec<u8>, CompressionReport) {
    let histogram = Histogram::from_bytes(input);
    let empty_report = CompressionReport {
        input_len: input.len(),
        output_len: 0,
        distinct_symbols: 0,
        body_bits: 0,
    };

    let Some(codec) = HuffmanCodec::from_histogram(&histogram) else {
        debug!("empty input, nothing to encode");
        return (Vec::new(), empty_report);
    };
    trace!("tree:\n{}", codec.tree());

    // the table was built from this very input, so every byte has a code
    let body = codec.pack(input);

    let container = Container {
        histogram,
        valid_bits: body.valid_bits_in_last_byte(),
        body: body.as_bytes(),
    };
    let output = container.to_bytes();

    let report = CompressionReport {
        output_len: output.len(),
        distinct_symbols: codec.codes().len(),
        body_bits: body.bit_count(),
        ..empty_report
    };
    debug!(
        input_len = report.input_len,
        output_len = report.output_len,
        distinct_symbols = report.distinct_symbols,
        body_bits = report.body_bits,
        valid_bits = container.valid_bits,
        "compressed"
    );

    (output, report)
}

/// Restores the bytes stored in a container produced by [`compress`].
pub fn decompress(input: &[u8]) -> HuffmanResult<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let container = Container::parse(input)?;
    let expected = container.histogram.total();

    let Some(codec) = HuffmanCodec::from_histogram(&container.histogram) else {
        debug!("container holds no symbols");
        return Ok(Vec::new());
    };
    trace!("tree:\n{}", codec.tree());

    let output = codec.decode_body(container.bits(), expected)?;
    debug!(
        input_len = input.len(),
        output_len = output.len(),
        distinct_symbols = container.histogram.distinct_symbols(),
        valid_bits = container.valid_bits,
        "decompressed"
    );

    Ok(output)
}
