//! Result export: formatted text, clipboard, download file, native share
//!
//! None of these contact the generation service.

pub mod clipboard;
pub mod mock;

pub use clipboard::SystemClipboard;
pub use mock::{MockClipboard, MockShareTarget};

use crate::models::GeneratedAd;
use crate::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

const DOWNLOAD_PREFIX: &str = "shopping-ad-";
const DEFAULT_FILENAME_TOKEN: &str = "product";

pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Host share capability. Only offered when one is configured.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    pub fn for_ad(ad: &GeneratedAd) -> Self {
        Self {
            title: format!("Ad for: {}", ad.title),
            text: format!(
                "Check out the ad content generated for \"{}\":\n\n{}",
                ad.title, ad.description
            ),
        }
    }
}

pub fn ad_as_text(ad: &GeneratedAd) -> String {
    format!(
        "Title:\n{}\n\nDescription:\n{}\n\nCategory:\n{}",
        ad.title, ad.description, ad.category
    )
}

/// `shopping-ad-<name>.txt`, with each run of non-alphanumeric characters
/// replaced by `_` and the rest lower-cased.
pub fn download_filename(product_name: &str) -> String {
    let mut token = String::with_capacity(product_name.len());
    let mut last_was_sep = false;
    for c in product_name.chars() {
        if c.is_ascii_alphanumeric() {
            token.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            token.push('_');
            last_was_sep = true;
        }
    }

    if !token.chars().any(|c| c.is_ascii_alphanumeric()) {
        token = DEFAULT_FILENAME_TOKEN.to_string();
    }

    format!("{}{}.txt", DOWNLOAD_PREFIX, token)
}

/// Writes the export text into `dir` and returns the file path.
pub fn write_download(dir: &Path, product_name: &str, ad: &GeneratedAd) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(download_filename(product_name));
    fs::write(&path, ad_as_text(ad))?;
    tracing::info!("Saved ad text to {}", path.display());
    Ok(path)
}
