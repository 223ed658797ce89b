//! Download location resolution.
//!
//! The Forge reports `file_uri` either as an absolute URL (mirrors, CDNs) or
//! as a path relative to the API host (`/v3/files/<slug>.tar.gz`).

use url::{ParseError, Url};

use crate::error::{ForgeError, ForgeResult};

/// Resolve `file_uri` into an absolute download URL.
///
/// A `file_uri` that already names a host is returned unchanged. Otherwise one
/// leading `/` is stripped and the remainder is joined onto `registry_host`.
///
/// ```
/// use forge_release::resolve_download_url;
///
/// let url = resolve_download_url("/path/to/a.tar.gz", "https://forge.example/").unwrap();
/// assert_eq!(url, "https://forge.example/path/to/a.tar.gz");
///
/// let cdn = "https://cdn.example/a.tar.gz";
/// assert_eq!(resolve_download_url(cdn, "https://forge.example/").unwrap(), cdn);
/// ```
pub fn resolve_download_url(file_uri: &str, registry_host: &str) -> ForgeResult<String> {
    if file_uri.trim().is_empty() {
        return Err(ForgeError::MalformedLocation {
            location: file_uri.to_string(),
            reason: "empty file URI".to_string(),
        });
    }

    if has_host(file_uri)? {
        return Ok(file_uri.to_string());
    }

    let base = Url::parse(registry_host).map_err(|e| ForgeError::MalformedLocation {
        location: registry_host.to_string(),
        reason: format!("registry host is not an absolute URL: {}", e),
    })?;

    let relative = file_uri.strip_prefix('/').unwrap_or(file_uri);

    base.join(relative)
        .map(String::from)
        .map_err(|e| ForgeError::MalformedLocation {
            location: file_uri.to_string(),
            reason: e.to_string(),
        })
}

fn has_host(file_uri: &str) -> ForgeResult<bool> {
    // Scheme-relative ("//cdn.example/x") still names a host.
    if file_uri.starts_with("//") {
        return Ok(true);
    }

    match Url::parse(file_uri) {
        Ok(url) => Ok(url.host_str().is_some_and(|h| !h.is_empty())),
        Err(ParseError::RelativeUrlWithoutBase) => Ok(false),
        Err(e) => Err(ForgeError::MalformedLocation {
            location: file_uri.to_string(),
            reason: e.to_string(),
        }),
    }
}
