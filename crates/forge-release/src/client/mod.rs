//! Forge client for transferring and verifying module releases.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};
use url::Url;

use crate::error::{ForgeError, ForgeResult};
use crate::location::resolve_download_url;
use crate::types::{ChecksumResult, ForgeConfig, ReleaseMetadata, UploadReceipt};
use crate::verify::verify_release;

mod helpers;
mod http;

use helpers::{partial_path, upload_payload};
use http::{HttpBackend, ReleaseOutcome};

/// Forge client for release download, upload and verification.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    http: HttpBackend,
}

impl ForgeClient {
    pub fn new(config: ForgeConfig) -> ForgeResult<Self> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| ForgeError::Config {
                message: format!("invalid user agent {:?}: {}", config.user_agent, e),
            })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ForgeError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                token: config.token,
            },
        })
    }

    pub fn from_env() -> ForgeResult<Self> {
        Self::new(ForgeConfig::from_env())
    }

    /// Absolute URL the tarball of `release` is downloaded from.
    pub fn download_url(&self, release: &ReleaseMetadata) -> ForgeResult<String> {
        resolve_download_url(&release.file_uri, &self.registry_host())
    }

    /// Download the tarball of `release` to `destination`.
    ///
    /// The body is written to `<destination>.part` and renamed into place
    /// once complete, so a failed download leaves `destination` untouched.
    pub async fn download(&self, release: &ReleaseMetadata, destination: &Path) -> ForgeResult<()> {
        let url = self.download_url(release)?;
        self.download_url_to(&url, &release.slug, destination).await
    }

    /// Download from an already resolved `url`; `slug` is used in diagnostics.
    pub async fn download_url_to(
        &self,
        url: &str,
        slug: &str,
        destination: &Path,
    ) -> ForgeResult<()> {
        debug!(url = %url, slug, "downloading release");

        let body = self.http.get_artifact(url, slug).await?;
        write_atomic(destination, &body).await?;

        info!(
            slug,
            path = %destination.display(),
            bytes = body.len(),
            "downloaded release"
        );
        Ok(())
    }

    /// Publish the tarball at `path` as a new release.
    ///
    /// Fails with `FileNotFound` before any request if `path` is not a
    /// regular file.
    pub async fn upload(&self, path: &Path) -> ForgeResult<UploadReceipt> {
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ForgeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let tarball = tokio::fs::read(path)
            .await
            .map_err(|e| ForgeError::io(path, e))?;
        let payload = upload_payload(&tarball);

        let url = self.releases_url();
        debug!(url = %url, path = %path.display(), bytes = tarball.len(), "uploading release");

        let (status, text) = self.http.post_json(&url, &payload).await?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            // The release exists once the Forge answers 2xx; a non-JSON body
            // is kept verbatim.
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        info!(path = %path.display(), status, "uploaded release");
        Ok(UploadReceipt { status, body })
    }

    /// Look up a release record by slug. `Ok(None)` if the Forge has no such release.
    pub async fn fetch_release(&self, slug: &str) -> ForgeResult<Option<ReleaseMetadata>> {
        let url = self.release_url(slug)?;
        debug!(url = %url, "fetching release metadata");

        match self.http.get_release(&url).await? {
            ReleaseOutcome::Missing => Ok(None),
            ReleaseOutcome::Present(text) => {
                let release: ReleaseMetadata =
                    serde_json::from_str(&text).map_err(|e| ForgeError::InvalidResponse {
                        message: format!("failed to parse release {}: {}", slug, e),
                    })?;
                Ok(Some(release))
            }
        }
    }

    /// Verify a downloaded tarball against `release`. See [`verify_release`].
    pub async fn verify(
        &self,
        path: &Path,
        release: &ReleaseMetadata,
        allow_md5_fallback: bool,
    ) -> ForgeResult<ChecksumResult> {
        verify_release(path, release, allow_md5_fallback).await
    }

    fn releases_url(&self) -> String {
        format!("{}/v3/releases", self.http.base_url)
    }

    /// `<base>/v3/releases/<slug>` with `slug` escaped as one path segment.
    fn release_url(&self, slug: &str) -> ForgeResult<String> {
        let mut url = Url::parse(&self.releases_url()).map_err(|e| ForgeError::Config {
            message: format!("invalid registry URL {:?}: {}", self.http.base_url, e),
        })?;
        url.path_segments_mut()
            .map_err(|()| ForgeError::Config {
                message: format!("registry URL {:?} cannot take a path", self.http.base_url),
            })?
            .push(slug);
        Ok(url.into())
    }

    fn registry_host(&self) -> String {
        format!("{}/", self.http.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token.is_some()
    }
}

async fn write_atomic(destination: &Path, content: &[u8]) -> ForgeResult<()> {
    let temp_path = partial_path(destination).ok_or_else(|| ForgeError::Io {
        path: destination.to_path_buf(),
        message: "destination has no file name".to_string(),
    })?;

    if let Err(e) = tokio::fs::write(&temp_path, content).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(ForgeError::io(&temp_path, e));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, destination).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(ForgeError::io(destination, e));
    }

    Ok(())
}
