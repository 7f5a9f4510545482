//! Byte frequency analysis and the fixed-size histogram header.

use std::io::{self, Write};

use crate::error::{HuffmanError, HuffmanResult};

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Serialized size of a histogram: one little-endian `u64` per byte value.
pub const HEADER_LEN: usize = SYMBOL_COUNT * 8;

/// Occurrence count for every byte value of an input.
///
/// The sum of all counters always fits in a `u64`, so any sum of a subset of
/// counters (every internal tree weight) fits as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; SYMBOL_COUNT],
    total: u64,
}

impl Histogram {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        Histogram {
            counts,
            total: data.len() as u64,
        }
    }

    /// Builds a histogram from raw counters, rejecting sets whose total overflows.
    pub fn from_counts(counts: [u64; SYMBOL_COUNT]) -> HuffmanResult<Self> {
        let total = counts
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| HuffmanError::malformed("histogram counts overflow a 64-bit total"))?;

        Ok(Histogram { counts, total })
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn counts(&self) -> &[u64; SYMBOL_COUNT] {
        &self.counts
    }

    /// Number of symbols the histogram describes, i.e. the original input length.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Non-zero entries in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    pub fn write_header<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for count in &self.counts {
            writer.write_all(&count.to_le_bytes())?;
        }
        Ok(())
    }

    /// Parses the first [`HEADER_LEN`] bytes of `data`.
    pub fn read_header(data: &[u8]) -> HuffmanResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(HuffmanError::malformed(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                data.len()
            )));
        }

        let mut counts = [0u64; SYMBOL_COUNT];
        for (count, chunk) in counts.iter_mut().zip(data[..HEADER_LEN].chunks_exact(8)) {
            let mut count_bytes = [0u8; 8];
            count_bytes.copy_from_slice(chunk);
            *count = u64::from_le_bytes(count_bytes);
        }

        Self::from_counts(counts)
    }
}
