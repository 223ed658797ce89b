//! Checksum verification of downloaded release tarballs.
//!
//! Algorithm selection:
//! 1. SHA-256 whenever the release metadata carries a non-empty digest
//! 2. MD5 only if SHA-256 is missing and the caller allows the fallback
//! 3. Otherwise `VerificationUnavailable`, without touching the file
//!
//! Digests are compared as exact strings. The Forge reports lower-case hex,
//! and a case difference counts as a mismatch.

use std::path::Path;

use tracing::{debug, warn};

use crate::digest::file_digest;
use crate::error::{ForgeError, ForgeResult};
use crate::types::{ChecksumAlgorithm, ChecksumResult, ReleaseMetadata};

/// Pick the algorithm and expected digest for `release`.
pub fn select_checksum(
    release: &ReleaseMetadata,
    allow_md5_fallback: bool,
) -> ForgeResult<(ChecksumAlgorithm, &str)> {
    if let Some(sha256) = release.sha256() {
        Ok((ChecksumAlgorithm::Sha256, sha256))
    } else if allow_md5_fallback {
        Ok((ChecksumAlgorithm::Md5, release.file_md5.as_str()))
    } else {
        Err(ForgeError::VerificationUnavailable {
            slug: release.slug.clone(),
        })
    }
}

/// Verify that the file at `path` matches the best checksum `release` offers.
pub async fn verify_release(
    path: &Path,
    release: &ReleaseMetadata,
    allow_md5_fallback: bool,
) -> ForgeResult<ChecksumResult> {
    let (algorithm, expected) = select_checksum(release, allow_md5_fallback)?;
    let actual = file_digest(path, algorithm).await?;

    if actual != expected {
        warn!(
            slug = %release.slug,
            path = %path.display(),
            algorithm = %algorithm,
            expected,
            actual = %actual,
            "checksum mismatch"
        );
        return Err(ForgeError::ChecksumMismatch {
            algorithm,
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }

    debug!(slug = %release.slug, algorithm = %algorithm, "checksum verified");

    Ok(ChecksumResult {
        algorithm,
        expected: expected.to_string(),
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{md5_hex, sha256_hex};

    const TARBALL: &[u8] = b"\x1f\x8b\x08\x00module tarball bytes";

    fn write_tarball(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("a-b-1.0.0.tar.gz");
        std::fs::write(&path, TARBALL).unwrap();
        path
    }

    fn release() -> ReleaseMetadata {
        ReleaseMetadata::new("a-b-1.0.0", "/v3/files/a-b-1.0.0.tar.gz", md5_hex(TARBALL))
    }

    #[tokio::test]
    async fn test_sha256_preferred_over_bad_md5() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());
        let mut release = release().with_sha256(sha256_hex(TARBALL));
        release.file_md5 = "00000000000000000000000000000000".to_string();

        let result = verify_release(&path, &release, true).await.unwrap();
        assert_eq!(result.algorithm, ChecksumAlgorithm::Sha256);
        assert_eq!(result.actual, sha256_hex(TARBALL));
    }

    #[tokio::test]
    async fn test_sha256_mismatch_does_not_fall_back_to_md5() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());
        let release = release().with_sha256(sha256_hex(b"something else"));

        let err = verify_release(&path, &release, true).await.unwrap_err();
        match err {
            ForgeError::ChecksumMismatch {
                algorithm,
                path: reported,
                ..
            } => {
                assert_eq!(algorithm, ChecksumAlgorithm::Sha256);
                assert_eq!(reported, path);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_md5_fallback_when_sha256_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());

        let result = verify_release(&path, &release(), true).await.unwrap();
        assert_eq!(result.algorithm, ChecksumAlgorithm::Md5);
    }

    #[tokio::test]
    async fn test_empty_sha256_behaves_like_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());
        let release = release().with_sha256("");

        let result = verify_release(&path, &release, true).await.unwrap();
        assert_eq!(result.algorithm, ChecksumAlgorithm::Md5);

        let err = verify_release(&path, &release, false).await.unwrap_err();
        assert!(matches!(err, ForgeError::VerificationUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unavailable_without_reading_file() {
        // The path does not exist; an Io error here would mean the file was read.
        let err = verify_release(Path::new("/nonexistent/a.tar.gz"), &release(), false)
            .await
            .unwrap_err();
        match err {
            ForgeError::VerificationUnavailable { slug } => assert_eq!(slug, "a-b-1.0.0"),
            other => panic!("expected VerificationUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_md5_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());
        let mut release = release();
        release.file_md5 = md5_hex(b"tampered");

        let err = verify_release(&path, &release, true).await.unwrap_err();
        assert!(err.to_string().contains("MD5"));
    }

    #[tokio::test]
    async fn test_comparison_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tarball(dir.path());
        let release = release().with_sha256(sha256_hex(TARBALL).to_uppercase());

        let err = verify_release(&path, &release, true).await.unwrap_err();
        assert!(matches!(err, ForgeError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_select_checksum() {
        let sha = release().with_sha256("abc");
        assert_eq!(
            select_checksum(&sha, false).unwrap(),
            (ChecksumAlgorithm::Sha256, "abc")
        );

        let plain = release();
        let (algorithm, expected) = select_checksum(&plain, true).unwrap();
        assert_eq!(algorithm, ChecksumAlgorithm::Md5);
        assert_eq!(expected, plain.file_md5);
    }
}
