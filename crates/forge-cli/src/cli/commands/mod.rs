use anyhow::Context;
use forge_release::{ForgeClient, ForgeError, ReleaseMetadata};

use super::args::*;
use crate::exit_codes::{EXIT_NOT_FOUND, EXIT_SUCCESS};

pub mod download;
pub mod show;
pub mod upload;
pub mod verify;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Download(args) => download::run(&client(&cli.registry)?, args).await,
        Command::Verify(args) => verify::run(&client(&cli.registry)?, args).await,
        Command::Upload(args) => upload::run(&client(&cli.registry)?, args).await,
        Command::Show(args) => show::run(&client(&cli.registry)?, args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

fn client(registry: &RegistryArgs) -> anyhow::Result<ForgeClient> {
    ForgeClient::new(registry.config()).context("failed to create Forge client")
}

/// Look up `slug`, printing a message when the Forge does not know it.
pub(crate) async fn lookup_release(
    client: &ForgeClient,
    slug: &str,
) -> Result<Option<ReleaseMetadata>, ForgeError> {
    let release = client.fetch_release(slug).await?;
    if release.is_none() {
        eprintln!("❌ Release not found: {} (on {})", slug, client.base_url());
    }
    Ok(release)
}

pub(crate) fn not_found() -> anyhow::Result<i32> {
    Ok(EXIT_NOT_FOUND)
}
