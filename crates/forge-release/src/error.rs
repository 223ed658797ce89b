//! Error types for release transfer and verification.

use std::path::PathBuf;

use crate::types::ChecksumAlgorithm;

/// Forge client errors.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// Download location could not be parsed or joined onto the registry host.
    #[error("malformed download location {location:?}: {reason}")]
    MalformedLocation { location: String, reason: String },

    /// Release tarball does not exist on the registry (404).
    #[error("the module release {slug} does not exist on {registry}")]
    ReleaseNotFound { slug: String, registry: String },

    /// Registry refused the request (403). Body carries the denial reason.
    #[error("forbidden (HTTP {status}): {body}")]
    ReleaseForbidden { status: u16, body: String },

    /// Registry rejected the uploaded tarball (400).
    #[error("release rejected by registry: {body}")]
    ReleaseBadContent { body: String },

    /// Any other transport failure. `status` is `None` when no response arrived.
    /// `message` holds the full response body (or the status text if it was
    /// empty); `Display` shortens it.
    #[error("{}", transfer_message(.status, .message))]
    Transfer {
        status: Option<u16>,
        message: String,
    },

    /// Upload source is missing or not a regular file.
    #[error("the file '{}' does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    /// No SHA-256 in the release metadata and MD5 fallback is forbidden.
    #[error(
        "cannot verify module release {slug}: SHA-256 checksum is not available in API response and fallback to MD5 has been forbidden"
    )]
    VerificationUnavailable { slug: String },

    /// Local file does not match the digest reported by the registry.
    #[error(
        "unable to validate {algorithm} checksum for {}, download may be corrupt (expected {expected}, got {actual})",
        .path.display()
    )]
    ChecksumMismatch {
        algorithm: ChecksumAlgorithm,
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Registry returned a body that could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Local filesystem error.
    #[error("io error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Maximum characters of a response body shown by `Display`.
const DISPLAY_BODY_CHARS: usize = 200;

fn transfer_message(status: &Option<u16>, message: &str) -> String {
    let message = if message.chars().count() > DISPLAY_BODY_CHARS {
        let head: String = message.chars().take(DISPLAY_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    };

    match status {
        Some(code) => format!("transfer failed (HTTP {}): {}", code, message),
        None => format!("transfer failed: {}", message),
    }
}

impl ForgeError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Not found / caller configuration
            Self::MalformedLocation { .. } => 1,
            Self::ReleaseNotFound { .. } => 1,
            Self::FileNotFound { .. } => 1,
            Self::VerificationUnavailable { .. } => 1,
            Self::Config { .. } => 1,

            // Registry refused
            Self::ReleaseForbidden { .. } => 2,
            Self::ReleaseBadContent { .. } => 3,

            // Integrity
            Self::ChecksumMismatch { .. } => 4,

            // Network
            Self::Transfer { .. } => 5,

            // Other
            Self::InvalidResponse { .. } => 6,
            Self::Io { .. } => 6,
        }
    }

    /// HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ReleaseNotFound { .. } => Some(404),
            Self::ReleaseForbidden { status, .. } => Some(*status),
            Self::ReleaseBadContent { .. } => Some(400),
            Self::Transfer { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ForgeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transfer {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type for forge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_slug_and_registry() {
        let err = ForgeError::ReleaseNotFound {
            slug: "puppetlabs-stdlib-9.4.1".to_string(),
            registry: "https://forgeapi.puppet.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "the module release puppetlabs-stdlib-9.4.1 does not exist on https://forgeapi.puppet.com"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_mismatch_message_names_algorithm_and_path() {
        let err = ForgeError::ChecksumMismatch {
            algorithm: ChecksumAlgorithm::Sha256,
            path: PathBuf::from("/tmp/stdlib.tar.gz"),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SHA-256"));
        assert!(msg.contains("/tmp/stdlib.tar.gz"));
        assert!(msg.contains("may be corrupt"));
    }

    #[test]
    fn test_transfer_message_with_and_without_status() {
        let with = ForgeError::Transfer {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(with.to_string(), "transfer failed (HTTP 502): bad gateway");

        let without = ForgeError::Transfer {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(without.to_string(), "transfer failed: connection refused");
        assert_eq!(without.status(), None);
    }

    #[test]
    fn test_transfer_display_shortens_but_keeps_full_message() {
        let body = format!("{}END", "x".repeat(300));
        let err = ForgeError::Transfer {
            status: Some(500),
            message: body.clone(),
        };

        let shown = err.to_string();
        assert!(shown.ends_with("..."));
        assert!(!shown.contains("END"));

        match err {
            ForgeError::Transfer { message, .. } => assert_eq!(message, body),
            other => panic!("expected Transfer, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ForgeError::ReleaseForbidden {
                status: 403,
                body: String::new()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            ForgeError::VerificationUnavailable {
                slug: "x".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            ForgeError::ChecksumMismatch {
                algorithm: ChecksumAlgorithm::Md5,
                path: PathBuf::from("a"),
                expected: "a".to_string(),
                actual: "b".to_string(),
            }
            .exit_code(),
            4
        );
    }
}
