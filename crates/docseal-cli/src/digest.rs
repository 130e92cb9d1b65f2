use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest as _, Sha256};

use docseal_types::Digest;

/// Buffer size for chunked file reads.
const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 hex digest of a file, reading it in chunks so large
/// documents never need to fit in memory.
pub fn file_digest(path: &Path) -> io::Result<Digest> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(Digest::new(hex::encode(hasher.finalize())))
}
