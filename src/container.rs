//! Compressed container layout.
//!
//! | Offset | Size      | Field                                              |
//! |--------|-----------|----------------------------------------------------|
//! | 0      | 2048      | histogram, 256 little-endian `u64` counters        |
//! | 2048   | 1         | valid bits in the final body byte (1..=8)          |
//! | 2049   | remaining | body, packed MSB-first                             |
//!
//! Empty input is stored as an empty container, without a header.

use std::io::{self, Write};

use crate::bit_vec::BitReader;
use crate::error::{HuffmanError, HuffmanResult};
use crate::histogram::{Histogram, HEADER_LEN};

/// Offset of the first body byte.
pub const BODY_OFFSET: usize = HEADER_LEN + 1;

#[derive(Debug, Clone)]
pub struct Container<'a> {
    pub histogram: Histogram,
    pub valid_bits: u8,
    pub body: &'a [u8],
}

impl<'a> Container<'a> {
    /// Splits a non-empty container into its fields. Only the layout is checked here;
    /// whether the body actually decodes is up to the decoder.
    pub fn parse(data: &'a [u8]) -> HuffmanResult<Self> {
        if data.len() < BODY_OFFSET {
            return Err(HuffmanError::malformed(format!(
                "container is {} bytes, at least {} required",
                data.len(),
                BODY_OFFSET
            )));
        }

        let histogram = Histogram::read_header(&data[..HEADER_LEN])?;
        let valid_bits = data[HEADER_LEN];
        if !(1..=8).contains(&valid_bits) {
            return Err(HuffmanError::malformed(format!(
                "valid bits in last byte must be 1..=8, got {}",
                valid_bits
            )));
        }

        Ok(Container {
            histogram,
            valid_bits,
            body: &data[BODY_OFFSET..],
        })
    }

    pub fn bits(&self) -> BitReader<'a> {
        BitReader::new(self.body, self.valid_bits)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.histogram.write_header(writer)?;
        writer.write_all(&[self.valid_bits])?;
        writer.write_all(self.body)?;
        Ok(())
    }

    pub fn serialized_len(&self) -> usize {
        BODY_OFFSET + self.body.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_len());
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut bytes);
        bytes
    }
}
