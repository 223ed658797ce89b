//! Exit codes for the `forge` binary.
//! Registry and verification failures reuse `ForgeError::exit_code` (1-6).
//! clap reports usage errors with 2 on its own.

use forge_release::ForgeError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 1;
/// Failures that are not a `ForgeError`; outside the range `ForgeError` uses.
pub const INTERNAL_ERROR: i32 = 8;

/// Exit code for an error that reached `main`.
pub fn from_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ForgeError>()
        .map(ForgeError::exit_code)
        .unwrap_or(INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forge_errors_keep_their_code() {
        let err = anyhow::Error::new(ForgeError::ReleaseBadContent {
            body: "bad".to_string(),
        })
        .context("upload failed");
        assert_eq!(from_error(&err), 3);
    }

    #[test]
    fn internal_error_is_distinct_from_forge_codes() {
        use std::path::PathBuf;

        use forge_release::ChecksumAlgorithm;

        let all = [
            ForgeError::MalformedLocation {
                location: String::new(),
                reason: String::new(),
            },
            ForgeError::ReleaseNotFound {
                slug: String::new(),
                registry: String::new(),
            },
            ForgeError::ReleaseForbidden {
                status: 403,
                body: String::new(),
            },
            ForgeError::ReleaseBadContent {
                body: String::new(),
            },
            ForgeError::Transfer {
                status: None,
                message: String::new(),
            },
            ForgeError::FileNotFound {
                path: PathBuf::new(),
            },
            ForgeError::VerificationUnavailable {
                slug: String::new(),
            },
            ForgeError::ChecksumMismatch {
                algorithm: ChecksumAlgorithm::Sha256,
                path: PathBuf::new(),
                expected: String::new(),
                actual: String::new(),
            },
            ForgeError::InvalidResponse {
                message: String::new(),
            },
            ForgeError::Io {
                path: PathBuf::new(),
                message: String::new(),
            },
            ForgeError::Config {
                message: String::new(),
            },
        ];

        for err in &all {
            assert_ne!(err.exit_code(), INTERNAL_ERROR, "{err:?}");
            assert_ne!(err.exit_code(), EXIT_SUCCESS, "{err:?}");
        }
        // clap usage errors
        assert_ne!(INTERNAL_ERROR, 2);
    }

    #[test]
    fn other_errors_are_internal() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(from_error(&err), INTERNAL_ERROR);
    }
}
