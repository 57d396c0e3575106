//! `deptabs transform` command implementation.

use std::path::PathBuf;

use clap::Args;
use deptabs_config::{CliSettings, Config};
use deptabs_renderer::{DependencyTabsTransformer, TransformSummary};

use crate::error::CliError;
use crate::output::Output;
use crate::pages::{discover_pages, process_page};

/// Arguments for the transform command.
#[derive(Args)]
pub(crate) struct TransformArgs {
    /// Pages to transform (default: every page matching `site.include`).
    files: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover deptabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rendered site directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Write transformed pages here instead of in place (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output (per-page logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl TransformArgs {
    /// Execute the transform command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a page cannot be read or
    /// written, or an include pattern is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        let transformer = DependencyTabsTransformer::new()
            .with_id_prefix(&config.tabs.id_prefix)
            .with_default_scope(&config.tabs.default_scope);

        let pages = if self.files.is_empty() {
            discover_pages(site)?
        } else {
            // Absolute, so pages under source_dir map into output_dir.
            self.files
                .into_iter()
                .map(|file| std::path::absolute(&file).unwrap_or(file))
                .collect()
        };

        if pages.is_empty() {
            output.warning(&format!(
                "No pages found in {}",
                site.source_dir.display()
            ));
            return Ok(());
        }

        let mut total = TransformSummary::default();
        let mut changed_pages = 0;
        for page in &pages {
            let destination = site.destination(page);
            let summary = process_page(&transformer, page, &destination, self.dry_run)?;
            if summary.is_changed() {
                changed_pages += 1;
                output.page(page, summary.transformed);
            }
            total.transformed += summary.transformed;
            total.skipped += summary.skipped;
        }

        output.summary(self.dry_run, total.transformed, changed_pages, pages.len());

        Ok(())
    }
}
