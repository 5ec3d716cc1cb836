//! Content fingerprinting for change detection.
//!
//! The cache is content-addressed rather than mtime-based: a record is only
//! re-processed when the bytes of its source cover actually changed. SHA-256
//! of the full file contents is the sole signal — it survives `git checkout`,
//! file copies, and backup restores, all of which reset modification times.
//!
//! Files are read in fixed-size chunks so memory use is independent of
//! source size (scanned covers can run to tens of megabytes).

use sha2::{Digest, Sha256};
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// SHA-256 of a file's contents, returned as a hex string.
///
/// An unreadable path yields the underlying I/O error; callers treat that
/// as "no fingerprint available", not as fatal.
pub fn fingerprint(path: &Path) -> io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
