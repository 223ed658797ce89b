//! Hex digests over whole files.
//!
//! Release tarballs are small, so files are read fully into memory and hashed
//! in one call rather than streamed.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{ForgeError, ForgeResult};
use crate::types::ChecksumAlgorithm;

/// Lower-case hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lower-case hex MD5 of `bytes`.
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// Compute the digest of `bytes` with `algorithm`.
pub fn digest_hex(algorithm: ChecksumAlgorithm, bytes: &[u8]) -> String {
    match algorithm {
        ChecksumAlgorithm::Sha256 => sha256_hex(bytes),
        ChecksumAlgorithm::Md5 => md5_hex(bytes),
    }
}

/// Read `path` and compute its digest with `algorithm`.
pub async fn file_digest(path: &Path, algorithm: ChecksumAlgorithm) -> ForgeResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ForgeError::io(path, e))?;
    Ok(digest_hex(algorithm, &bytes))
}
