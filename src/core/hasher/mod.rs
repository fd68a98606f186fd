//! # Hasher Module
//!
//! Computes the content fingerprint used as the catalog's lookup key.
//!
//! ## Contract
//! - SHA-256 over the entire byte stream, read start to end
//! - Rendered as lowercase hexadecimal
//! - Deterministic: identical bytes always yield the identical digest
//! - No side effects beyond reading the input once
//!
//! Files are streamed in fixed-size chunks, so arbitrarily large images
//! hash in constant memory.

use crate::error::HashError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Hash the bytes of the file at `path`
///
/// Any failure to open or fully read the file is an [`HashError::Io`]
/// carrying the offending path; the ingestion pipeline treats that as
/// fatal to the scan.
pub fn hash_file(path: &Path) -> Result<String, HashError> {
    let wrap = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(wrap)?;
    hash_reader(file).map_err(wrap)
}

/// Hash all bytes from an arbitrary reader
pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
