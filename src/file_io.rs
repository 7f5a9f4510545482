//! Whole-file reads and writes for the command line front end.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{HuffmanError, HuffmanResult};

pub fn read_file<P: AsRef<Path>>(path: P) -> HuffmanResult<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| HuffmanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(data)
}

/// Creates or truncates `path` and writes all of `data` to it.
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> HuffmanResult<()> {
    let path = path.as_ref();
    fs::write(path, data).map_err(|source| HuffmanError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = data.len(), "wrote output");
    Ok(())
}
