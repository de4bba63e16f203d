//! `folio show` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

use crate::commands::site_builder;
use crate::error::CliError;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Post id (default: first post).
    id: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts JSON document (overrides config).
    #[arg(long, env = "FOLIO_POSTS")]
    posts: Option<PathBuf>,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the posts document cannot be
    /// loaded, or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            posts: self.posts,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let html = site_builder(&config)?.render_post(self.id.as_deref());

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
