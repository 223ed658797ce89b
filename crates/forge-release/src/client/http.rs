//! HTTP layer: request construction and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes. Every request is a single attempt.

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::{ForgeError, ForgeResult};

/// Outcome of a release record lookup.
#[derive(Debug)]
pub(crate) enum ReleaseOutcome {
    Missing,
    Present(String),
}

/// HTTP backend (holds reqwest client, base URL, API key).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl HttpBackend {
    /// GET a release tarball. 404 => ReleaseNotFound, 403 => ReleaseForbidden.
    pub(crate) async fn get_artifact(&self, url: &str, slug: &str) -> ForgeResult<Bytes> {
        let response = self.send(url, self.client.get(url)).await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            debug!(url, bytes = body.len(), "artifact received");
            return Ok(body);
        }

        match status {
            StatusCode::NOT_FOUND => Err(ForgeError::ReleaseNotFound {
                slug: slug.to_string(),
                registry: self.base_url.clone(),
            }),
            _ => Err(error_response(response).await),
        }
    }

    /// GET a release record; 404 => Missing, 2xx => Present(body).
    pub(crate) async fn get_release(&self, url: &str) -> ForgeResult<ReleaseOutcome> {
        let response = self.send(url, self.client.get(url)).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(ReleaseOutcome::Present(response.text().await?));
        }

        match status {
            StatusCode::NOT_FOUND => {
                debug!(url, "release record not found");
                Ok(ReleaseOutcome::Missing)
            }
            _ => Err(error_response(response).await),
        }
    }

    /// POST a JSON document. 400 => ReleaseBadContent, 403 => ReleaseForbidden.
    pub(crate) async fn post_json(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> ForgeResult<(u16, String)> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string());

        let response = self.send(url, request).await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return Ok((status.as_u16(), body));
        }

        match status {
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                Err(ForgeError::ReleaseBadContent { body })
            }
            _ => Err(error_response(response).await),
        }
    }

    async fn send(&self, url: &str, mut request: reqwest::RequestBuilder) -> ForgeResult<Response> {
        if let Some(token) = &self.token {
            if self.is_registry_origin(url) {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            } else {
                debug!(url, "not sending API key to foreign host");
            }
        }

        Ok(request.send().await?)
    }

    /// Whether `url` shares scheme, host and port with the registry.
    pub(crate) fn is_registry_origin(&self, url: &str) -> bool {
        match (Url::parse(url), Url::parse(&self.base_url)) {
            (Ok(target), Ok(base)) => target.origin() == base.origin(),
            _ => false,
        }
    }
}

/// Map a non-success response that no caller handles specially.
async fn error_response(response: Response) -> ForgeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::FORBIDDEN => ForgeError::ReleaseForbidden {
            status: status.as_u16(),
            body,
        },
        _ => {
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            ForgeError::Transfer {
                status: Some(status.as_u16()),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> HttpBackend {
        HttpBackend {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            token: Some("api-key".to_string()),
        }
    }

    #[test]
    fn test_registry_origin_matches_scheme_host_port() {
        let http = backend("https://forge.example");
        assert!(http.is_registry_origin("https://forge.example/v3/files/a.tar.gz"));
        assert!(http.is_registry_origin("https://forge.example:443/v3/releases"));

        assert!(!http.is_registry_origin("https://cdn.example/a.tar.gz"));
        assert!(!http.is_registry_origin("http://forge.example/v3/files/a.tar.gz"));
        assert!(!http.is_registry_origin("https://forge.example:8443/a.tar.gz"));
        assert!(!http.is_registry_origin("//forge.example/a.tar.gz"));
    }
}
