//! Release metadata and configuration types for the Forge v3 API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Download and checksum metadata of a single module release.
///
/// Deserializes from the Forge v3 release record; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    /// Release identifier (e.g., "puppetlabs-stdlib-9.4.1").
    pub slug: String,

    /// Absolute URL or host-relative path of the tarball.
    pub file_uri: String,

    /// SHA-256 hex digest. Older releases may omit it or report "".
    #[serde(default)]
    pub file_sha256: Option<String>,

    /// MD5 hex digest.
    pub file_md5: String,

    /// Semantic version.
    #[serde(default)]
    pub version: Option<String>,

    /// Tarball size in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl ReleaseMetadata {
    pub fn new(
        slug: impl Into<String>,
        file_uri: impl Into<String>,
        file_md5: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            file_uri: file_uri.into(),
            file_sha256: None,
            file_md5: file_md5.into(),
            version: None,
            file_size: None,
        }
    }

    /// Set the SHA-256 digest.
    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.file_sha256 = Some(sha256.into());
        self
    }

    /// SHA-256 digest if the registry provided a usable one.
    ///
    /// An empty string is treated the same as an absent field.
    pub fn sha256(&self) -> Option<&str> {
        self.file_sha256.as_deref().filter(|s| !s.is_empty())
    }
}

/// Digest algorithm used to check a downloaded tarball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "MD5")]
    Md5,
}

impl ChecksumAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Md5 => "MD5",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful checksum verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumResult {
    /// Algorithm that was applied.
    pub algorithm: ChecksumAlgorithm,

    /// Digest from the release metadata.
    pub expected: String,

    /// Digest computed from the local file.
    pub actual: String,
}

/// Registry response to a successful release upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// HTTP status code.
    pub status: u16,

    /// Decoded JSON body (`Null` when the registry sent none).
    pub body: serde_json::Value,
}

/// Forge client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Base URL of the Forge API.
    #[serde(default = "default_forge_url")]
    pub url: String,

    /// API key, required for publishing releases.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_forge_url() -> String {
    "https://forgeapi.puppet.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    crate::FORGE_USER_AGENT.to_string()
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            url: default_forge_url(),
            token: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ForgeConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `FORGE_URL` | Forge API base URL |
    /// | `FORGE_TOKEN` | API key |
    /// | `FORGE_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("FORGE_URL").unwrap_or_else(|_| default_forge_url()),
            token: std::env::var("FORGE_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("FORGE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            user_agent: default_user_agent(),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the API key.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
