//! `forge verify` - Check a local tarball against the published checksums.

use anyhow::Result;
use forge_release::ForgeClient;

use super::{lookup_release, not_found};
use crate::cli::args::VerifyArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn run(client: &ForgeClient, args: VerifyArgs) -> Result<i32> {
    let Some(release) = lookup_release(client, &args.slug).await? else {
        return not_found();
    };

    let checked = client.verify(&args.file, &release, !args.no_md5).await?;
    println!(
        "{}  {} ({})",
        checked.actual,
        args.file.display(),
        checked.algorithm
    );
    Ok(EXIT_SUCCESS)
}
