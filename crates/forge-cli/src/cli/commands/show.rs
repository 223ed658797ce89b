//! `forge show` - Print release metadata.

use anyhow::Result;
use forge_release::{ForgeClient, ReleaseMetadata};

use super::{lookup_release, not_found};
use crate::cli::args::ShowArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub async fn run(client: &ForgeClient, args: ShowArgs) -> Result<i32> {
    let Some(release) = lookup_release(client, &args.slug).await? else {
        return not_found();
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&release)?);
    } else {
        print!("{}", render(&release, &client.download_url(&release)?));
    }
    Ok(EXIT_SUCCESS)
}

fn render(release: &ReleaseMetadata, download_url: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("slug:     {}\n", release.slug));
    if let Some(version) = &release.version {
        out.push_str(&format!("version:  {}\n", version));
    }
    out.push_str(&format!("download: {}\n", download_url));
    if let Some(size) = release.file_size {
        out.push_str(&format!("size:     {} bytes\n", size));
    }
    out.push_str(&format!("sha256:   {}\n", release.sha256().unwrap_or("(not published)")));
    out.push_str(&format!("md5:      {}\n", release.file_md5));
    out
}
