//! Release transfer and integrity verification for the Forge module registry.
//!
//! This crate provides:
//!
//! - Download URL resolution for absolute and host-relative `file_uri`s
//! - Tarball download (written atomically) and upload (`POST /v3/releases`)
//! - SHA-256 verification with opt-in MD5 fallback for older releases
//! - Release metadata lookup by slug
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use forge_release::{ForgeClient, ForgeConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ForgeClient::new(ForgeConfig::from_env())?;
//!
//! let release = client
//!     .fetch_release("puppetlabs-stdlib-9.4.1")
//!     .await?
//!     .ok_or_else(|| anyhow::anyhow!("no such release"))?;
//!
//! let dest = Path::new("puppetlabs-stdlib-9.4.1.tar.gz");
//! client.download(&release, dest).await?;
//! let checked = client.verify(dest, &release, false).await?;
//! println!("{} ok: {}", checked.algorithm, checked.actual);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `FORGE_URL` | Forge API base URL (default: `https://forgeapi.puppet.com`) |
//! | `FORGE_TOKEN` | API key, needed for uploads |
//! | `FORGE_TIMEOUT` | Request timeout in seconds (default: 30) |
//!
//! Nothing in this crate retries. A failed transfer or verification is
//! reported to the caller as-is.

pub mod client;
pub mod digest;
pub mod error;
pub mod location;
pub mod types;
pub mod verify;

/// User agent sent with every request.
pub const FORGE_USER_AGENT: &str = concat!("forge-release/", env!("CARGO_PKG_VERSION"));

pub use client::ForgeClient;
pub use digest::{md5_hex, sha256_hex};
pub use error::{ForgeError, ForgeResult};
pub use location::resolve_download_url;
pub use types::{ChecksumAlgorithm, ChecksumResult, ForgeConfig, ReleaseMetadata, UploadReceipt};
pub use verify::{select_checksum, verify_release};
