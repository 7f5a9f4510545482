use std::fmt;

use crate::histogram::SYMBOL_COUNT;

/// Longest code a 256-leaf tree can produce.
pub const MAX_CODE_LEN: usize = SYMBOL_COUNT - 1;

const WORD_BITS: usize = 64;

/// A root-to-leaf path, stored MSB-first: bit 0 of the code is the first
/// branch taken from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    words: [u64; 4],
    len: u8,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this code extended by one branch.
    pub fn with_bit(mut self, bit: bool) -> Self {
        let i = self.len as usize;
        assert!(i < MAX_CODE_LEN, "code longer than {} bits", MAX_CODE_LEN);
        if bit {
            self.words[i / WORD_BITS] |= 1u64 << (WORD_BITS - 1 - i % WORD_BITS);
        }
        self.len += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < self.len());
        (self.words[i / WORD_BITS] >> (WORD_BITS - 1 - i % WORD_BITS)) & 1 == 1
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && self.bits().zip(other.bits()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Byte value to code mapping derived from a single tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    pub(crate) fn empty() -> Self {
        CodeTable {
            codes: [None; SYMBOL_COUNT],
        }
    }

    pub(crate) fn insert(&mut self, byte: u8, code: Code) {
        self.codes[byte as usize] = Some(code);
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|code| (byte as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }
}
