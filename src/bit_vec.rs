use crate::code::Code;

/// Packs bits MSB-first; a partial final byte keeps its bits at the high end.
#[derive(Default, Debug)]
pub struct BitWriter {
    bits: Vec<u8>,
    bit_count: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity_bits(bit_count: u64) -> Self {
        BitWriter {
            bits: Vec::with_capacity(bit_count.div_ceil(8) as usize),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Meaningful bits in the final byte: 1..=8, or 0 when nothing was written.
    pub fn valid_bits_in_last_byte(&self) -> u8 {
        match self.bit_count % 8 {
            0 if self.bit_count == 0 => 0,
            0 => 8,
            n => n as u8,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let bit_offset = self.bit_count % 8;

        if bit_offset == 0 {
            self.bits.push(0);
        }

        if bit {
            if let Some(last) = self.bits.last_mut() {
                *last |= 1 << (7 - bit_offset);
            }
        }

        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.push_bit(bit);
        }
    }
}

/// Reads bits MSB-first, stopping after the valid bits of the final byte.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: u64,
    bit_len: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], valid_bits_in_last_byte: u8) -> Self {
        debug_assert!((1..=8).contains(&valid_bits_in_last_byte) || bytes.is_empty());
        let bit_len = match bytes.len() {
            0 => 0,
            n => (n as u64 - 1) * 8 + u64::from(valid_bits_in_last_byte),
        };

        BitReader {
            bytes,
            position: 0,
            bit_len,
        }
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn remaining(&self) -> u64 {
        self.bit_len - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position >= self.bit_len {
            return None;
        }
        let byte = self.bytes[(self.position / 8) as usize];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}
