//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

use crate::commands::site_builder;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts JSON document (overrides config).
    #[arg(long, env = "FOLIO_POSTS")]
    posts: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (per-page logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the posts document cannot be
    /// loaded, or the site cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            posts: self.posts,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Posts: {}",
            config.content_resolved.posts.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.build_resolved.output_dir.display()
        ));

        let summary = site_builder(&config)?.build(&config.build_resolved.output_dir)?;

        output.success(&format!(
            "Built {} post(s), {} file(s) written to {}",
            summary.posts,
            summary.files,
            summary.output_dir.display()
        ));
        Ok(())
    }
}
