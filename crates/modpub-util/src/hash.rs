//! Hex digests for Maven checksum sidecars (`.md5`, `.sha1`, `.sha256`).

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Checksum algorithms Maven repositories expect next to each artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl ChecksumAlgorithm {
    /// All algorithms, in the order sidecars are written.
    pub const ALL: [ChecksumAlgorithm; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// File extension of the sidecar, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hex_md5(data),
            Self::Sha1 => hex_sha1(data),
            Self::Sha256 => sha256_bytes(data),
        }
    }
}

/// Compute the SHA-256 hash of a byte slice, returning a lowercase hex string.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn hex_sha1(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn hex_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
