use crate::appcast::Platform;
use crate::appcast::Release;
use crate::appcast::Variant;
use anyhow::ensure;
use clap::Parser;

/// A CLI tool that writes a Sparkle/WinSparkle appcast feed for a single release
#[derive(Parser, Debug)]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// The version string of the release, e.g. 2.1.0.
    #[arg(short, long)]
    pub version: String,

    /// The URL of the release notes page.
    #[arg(short, long)]
    pub release_notes_url: String,

    /// The download URL of the Windows installer.
    #[arg(long)]
    pub win_url: Option<String>,

    /// The EdDSA signature of the Windows installer.
    #[arg(long)]
    pub win_signature: Option<String>,

    /// The size of the Windows installer in bytes.
    #[arg(long)]
    pub win_length: Option<u64>,

    /// The download URL of the macOS disk image.
    #[arg(long)]
    pub mac_url: Option<String>,

    /// The EdDSA signature of the macOS disk image.
    #[arg(long)]
    pub mac_signature: Option<String>,

    /// The size of the macOS disk image in bytes.
    #[arg(long)]
    pub mac_length: Option<u64>,

    /// The file to write the appcast to, or - for stdout.
    #[arg(short, long, default_value = "appcast.xml")]
    pub output: String,

    /// The title of the feed as a whole.
    #[arg(long, default_value = "OrcaSlicer Updates")]
    pub title: String,

    /// The project homepage.
    #[arg(long, default_value = "https://github.com/OrcaSlicer/OrcaSlicer")]
    pub link: String,

    /// The description of the feed as a whole.
    #[arg(long, default_value = "Most recent updates to OrcaSlicer")]
    pub description: String,
}

impl Args {
    /// Collects the release fields, failing when no platform has both a URL and a signature.
    pub fn release(&self) -> anyhow::Result<Release> {
        let windows = variant(
            Platform::Windows,
            &self.win_url,
            &self.win_signature,
            self.win_length,
        );
        let macos = variant(
            Platform::MacOs,
            &self.mac_url,
            &self.mac_signature,
            self.mac_length,
        );
        ensure!(
            windows.is_some() || macos.is_some(),
            "At least one platform (Windows or macOS) must have both URL and signature"
        );

        Ok(Release {
            version: self.version.clone(),
            release_notes_url: self.release_notes_url.clone(),
            windows,
            macos,
            title: self.title.clone(),
            link: self.link.clone(),
            description: self.description.clone(),
        })
    }
}

fn variant(
    platform: Platform,
    url: &Option<String>,
    signature: &Option<String>,
    length: Option<u64>,
) -> Option<Variant> {
    let url = url.as_deref().filter(|url| !url.is_empty());
    let signature = signature.as_deref().filter(|signature| !signature.is_empty());
    match (url, signature) {
        (Some(url), Some(signature)) => Some(Variant {
            url: url.to_owned(),
            signature: signature.to_owned(),
            length,
        }),
        (None, None) => None,
        _ => {
            eprintln!(
                "Warning: Skipping {} build, it needs both a URL and a signature.",
                platform.label()
            );
            None
        }
    }
}
