// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application services — owns the loaded configuration and the scanner, and
// carries out each CLI command against the filesystem.

use std::path::{Path, PathBuf};

use docscan_core::{AppConfig, DocscanError, Result};
use docscan_document::{DocumentScanner, ImageProcessor, PdfWriter};
use tracing::{info, instrument, warn};

use super::config_dir::{default_config_path, load_config, persist_config};

/// A command failure, tagged with the photo that caused it when there is one.
#[derive(Debug)]
pub struct CommandError {
    pub input: Option<PathBuf>,
    pub error: DocscanError,
}

impl CommandError {
    fn for_input(input: &Path) -> impl FnOnce(DocscanError) -> Self + '_ {
        move |error| Self {
            input: Some(input.to_path_buf()),
            error,
        }
    }
}

impl From<DocscanError> for CommandError {
    fn from(error: DocscanError) -> Self {
        Self { input: None, error }
    }
}

/// Central service container used by `main`.
pub struct AppServices {
    config: AppConfig,
    config_path: PathBuf,
    scanner: DocumentScanner,
}

impl AppServices {
    /// Load the config from `config_path` (or the default location) and build
    /// a scanner from it.
    pub fn init(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(default_config_path);
        let config = load_config(&config_path)?;
        Self::with_config(config, config_path)
    }

    /// Build services around an explicit configuration.
    pub fn with_config(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        config.validate()?;
        let scanner = DocumentScanner::new(config.scan.clone())?;
        Ok(Self {
            config,
            config_path,
            scanner,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    // -- Commands -------------------------------------------------------------

    /// Rectify the photo at `input` and write the flattened page to `output`.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn scan_file(&self, input: &Path, output: &Path) -> std::result::Result<(), CommandError> {
        let page = self.rectify_path(input)?;
        ImageProcessor::from_dynamic(page).save(output, self.config.jpeg_quality)?;
        info!("Page written");
        Ok(())
    }

    /// Rectify every photo in `inputs`, in order, and write them as one PDF.
    ///
    /// The first photo that fails aborts the whole assembly; nothing is
    /// written in that case.
    #[instrument(skip_all, fields(pages = inputs.len(), output = %output.display()))]
    pub fn assemble(
        &self,
        inputs: &[PathBuf],
        output: &Path,
    ) -> std::result::Result<(), CommandError> {
        let mut pages = Vec::with_capacity(inputs.len());
        for input in inputs {
            match self.rectify_path(input) {
                Ok(page) => pages.push(page),
                Err(err) => {
                    warn!(input = %input.display(), "Page failed, aborting assembly");
                    return Err(err);
                }
            }
        }

        let mut writer = PdfWriter::new(self.config.paper_size);
        writer.set_title(self.config.pdf_title.clone());
        writer.write_pages_to_file(&pages, output)?;
        Ok(())
    }

    /// The effective configuration as pretty-printed JSON.
    pub fn config_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    /// Persist the effective configuration to the config path.
    pub fn save_config(&self) -> Result<()> {
        persist_config(&self.config_path, &self.config)?;
        info!(path = %self.config_path.display(), "Configuration written");
        Ok(())
    }

    fn rectify_path(&self, input: &Path) -> std::result::Result<image::DynamicImage, CommandError> {
        let photo = ImageProcessor::open(input).map_err(CommandError::for_input(input))?;
        self.scanner
            .rectify(photo.as_dynamic())
            .map_err(CommandError::for_input(input))
    }
}
