use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The input cannot be parsed as a container; raised before any tree is rebuilt.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The body does not walk to the symbol count promised by the header.
    #[error("corrupt stream: {reason} (decoded {decoded} of {expected} symbols)")]
    CorruptStream {
        reason: String,
        decoded: u64,
        expected: u64,
    },

    /// The byte has no code in the table it is being encoded with.
    #[error("byte {0} has no code in this table")]
    UnknownSymbol(u8),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HuffmanError {
    pub fn malformed<T: fmt::Display>(msg: T) -> Self {
        HuffmanError::MalformedContainer(msg.to_string())
    }

    pub fn corrupt<T: fmt::Display>(msg: T, decoded: u64, expected: u64) -> Self {
        HuffmanError::CorruptStream {
            reason: msg.to_string(),
            decoded,
            expected,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, HuffmanError::MalformedContainer(_))
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, HuffmanError::CorruptStream { .. })
    }
}

pub type HuffmanResult<T> = Result<T, HuffmanError>;
