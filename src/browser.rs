//! Opening the token creation page in the user's browser

use color_eyre::eyre::{Context, Result};
use tracing::info;

/// Where GitHub lets the user create a personal access token with `repo` scope
pub const TOKEN_URL: &str =
    "https://github.com/settings/tokens/new?description=switch-branch-cli&scopes=repo";

/// Open `url` with the platform's default handler
pub fn open(url: &str) -> Result<()> {
    info!("Opening {}", url);
    open::that(url).wrap_err("Failed to launch a browser")
}
