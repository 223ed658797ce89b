//! `forge download` - Fetch a release tarball and verify it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use forge_release::{ForgeClient, ForgeError};
use tracing::warn;

use super::{lookup_release, not_found};
use crate::cli::args::DownloadArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn run(client: &ForgeClient, args: DownloadArgs) -> Result<i32> {
    let Some(release) = lookup_release(client, &args.slug).await? else {
        return not_found();
    };

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.tar.gz", release.slug)));

    eprintln!("Downloading: {}", client.download_url(&release)?);
    client
        .download(&release, &out)
        .await
        .with_context(|| format!("failed to download {}", release.slug))?;

    if args.no_verify {
        eprintln!("⚠️  Skipped checksum verification");
        eprintln!("Saved to {}", out.display());
        return Ok(EXIT_SUCCESS);
    }

    match client.verify(&out, &release, !args.no_md5).await {
        Ok(checked) => {
            eprintln!("✅ {} checksum verified", checked.algorithm);
            eprintln!("Saved to {}", out.display());
            Ok(EXIT_SUCCESS)
        }
        Err(e @ ForgeError::ChecksumMismatch { .. }) if !args.keep_corrupt => {
            if let Err(remove_err) = std::fs::remove_file(&out) {
                warn!(path = %out.display(), error = %remove_err, "failed to remove corrupt download");
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
