//! `forge upload` - Publish a release tarball.

use anyhow::{Context, Result};
use forge_release::ForgeClient;

use crate::cli::args::UploadArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn run(client: &ForgeClient, args: UploadArgs) -> Result<i32> {
    if !client.is_authenticated() {
        eprintln!("⚠️  No API key configured (--token / FORGE_TOKEN); the Forge will likely refuse the upload");
    }

    let receipt = client
        .upload(&args.file)
        .await
        .with_context(|| format!("failed to publish {}", args.file.display()))?;

    match receipt.body.get("slug").and_then(|v| v.as_str()) {
        Some(slug) => println!("Published {}", slug),
        None => println!("Published {} (HTTP {})", args.file.display(), receipt.status),
    }
    Ok(EXIT_SUCCESS)
}
