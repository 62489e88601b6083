//! Source fingerprints for change detection.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};

/// SHA-256 of a file, hex encoded.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(IngestError::io("read", path))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(IngestError::io("read", path))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Whether a file still has the fingerprint recorded earlier.
pub fn fingerprint_matches(path: &Path, expected: &str) -> Result<bool> {
    Ok(fingerprint_file(path)?.eq_ignore_ascii_case(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn fingerprint_is_sha256_hex() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let digest = fingerprint_file(file.path()).unwrap();
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(fingerprint_matches(file.path(), &digest.to_uppercase()).unwrap());
    }

    #[test]
    fn changed_content_changes_fingerprint() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a").unwrap();
        let before = fingerprint_file(file.path()).unwrap();
        file.write_all(b"b").unwrap();
        file.flush().unwrap();
        assert!(!fingerprint_matches(file.path(), &before).unwrap());
    }
}
