use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use forge_release::ForgeConfig;


#[derive(Parser)]
#[command(
    name = "forge",
    version,
    about = "Download, verify and publish module releases on the Forge"
)]
pub struct Cli {
    #[command(flatten)]
    pub registry: RegistryArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download a release tarball and verify its checksum
    Download(DownloadArgs),
    /// Verify a local tarball against the checksums the Forge reports
    Verify(VerifyArgs),
    /// Publish a release tarball (requires an API key)
    Upload(UploadArgs),
    /// Print release metadata and the resolved download URL
    Show(ShowArgs),
    Version,
}

#[derive(Args, Clone, Debug)]
pub struct RegistryArgs {
    /// Forge API base URL
    #[arg(long, global = true, env = "FORGE_URL", default_value = "https://forgeapi.puppet.com")]
    pub url: String,

    /// API key sent as a bearer token
    #[arg(long, global = true, env = "FORGE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "FORGE_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

impl RegistryArgs {
    pub fn config(&self) -> ForgeConfig {
        let config = ForgeConfig::default()
            .with_url(&self.url)
            .with_timeout_secs(self.timeout);
        match &self.token {
            Some(token) if !token.is_empty() => config.with_token(token),
            _ => config,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct DownloadArgs {
    /// Release slug (e.g. puppetlabs-stdlib-9.4.1)
    pub slug: String,

    /// Output file (default: <slug>.tar.gz in the current directory)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Skip checksum verification after download
    #[arg(long)]
    pub no_verify: bool,

    /// Fail instead of falling back to MD5 when no SHA-256 is published
    #[arg(long)]
    pub no_md5: bool,

    /// Keep the file even if verification fails
    #[arg(long)]
    pub keep_corrupt: bool,
}

#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Release slug
    pub slug: String,

    /// Local tarball to check
    pub file: PathBuf,

    /// Fail instead of falling back to MD5 when no SHA-256 is published
    #[arg(long)]
    pub no_md5: bool,
}

#[derive(Args, Clone, Debug)]
pub struct UploadArgs {
    /// Release tarball built by `pdk build`
    pub file: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    /// Release slug
    pub slug: String,

    /// Print the raw metadata as JSON
    #[arg(long)]
    pub json: bool,
}
