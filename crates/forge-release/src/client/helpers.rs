//! Pure helpers: upload encoding, temp paths (no HTTP, no status logic).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// JSON document for POST /v3/releases: `{"file": "<base64 tarball>"}`.
pub(crate) fn upload_payload(tarball: &[u8]) -> serde_json::Value {
    serde_json::json!({ "file": BASE64.encode(tarball) })
}

/// Sibling path a download is written to before being renamed into place.
///
/// `stdlib.tar.gz` => `stdlib.tar.gz.part`
pub(crate) fn partial_path(destination: &Path) -> Option<PathBuf> {
    let mut name: OsString = destination.file_name()?.to_os_string();
    name.push(".part");
    Some(destination.with_file_name(name))
}
