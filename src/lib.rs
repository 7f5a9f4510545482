//! # huffpack
//!
//! Lossless byte-stream compression with static Huffman coding.
//!
//! Each input gets its own tree, built from a histogram of its bytes. The
//! histogram is stored in front of the packed bits, so the decoder rebuilds
//! exactly the same tree without any side channel.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let input = b"abracadabra";
//! let packed = compress(input);
//! assert_eq!(decompress(&packed)?, input);
//!
//! assert!(compress(b"").is_empty());
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod code;
pub mod container;
pub mod error;
pub mod file_io;
pub mod histogram;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use code::{Code, CodeTable};
pub use error::{HuffmanError, HuffmanResult};
pub use histogram::Histogram;
pub use huffman_codec::{compress, compress_with_report, decompress, CompressionReport, HuffmanCodec};
pub use hufftree::HuffmanTree;
