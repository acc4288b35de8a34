// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner and application configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DocscanError, Result};

/// Tuning parameters of the scan pipeline.
///
/// The defaults reproduce the classic "resize to 1300x800, blur 5x5, Canny
/// 30/50, approximate at 2% of the perimeter, warp to 800x800" recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Width of the working copy every photo is resized to.
    pub working_width: u32,
    /// Height of the working copy every photo is resized to.
    pub working_height: u32,
    /// Gaussian sigma applied to the luminance before edge detection.
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Side length of the square destination frame.
    pub output_side: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            working_width: 1300,
            working_height: 800,
            // sigma OpenCV derives for a 5x5 kernel
            blur_sigma: 1.1,
            canny_low: 30.0,
            canny_high: 50.0,
            approx_epsilon_ratio: 0.02,
            output_side: 800,
        }
    }
}

impl ScanConfig {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.working_width == 0 || self.working_height == 0 {
            return Err(DocscanError::InvalidConfig(format!(
                "working resolution must be non-zero, got {}x{}",
                self.working_width, self.working_height
            )));
        }
        if self.output_side == 0 {
            return Err(DocscanError::InvalidConfig(
                "output_side must be non-zero".into(),
            ));
        }
        if !(self.blur_sigma > 0.0) {
            return Err(DocscanError::InvalidConfig(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        if !(self.approx_epsilon_ratio > 0.0) {
            return Err(DocscanError::InvalidConfig(format!(
                "approx_epsilon_ratio must be positive, got {}",
                self.approx_epsilon_ratio
            )));
        }
        if !self.canny_high.is_finite() || !(0.0..=self.canny_high).contains(&self.canny_low) {
            return Err(DocscanError::InvalidConfig(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {}/{}",
                self.canny_low, self.canny_high
            )));
        }
        Ok(())
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scan pipeline parameters.
    pub scan: ScanConfig,
    /// Paper size for assembled PDF pages.
    pub paper_size: crate::PaperSize,
    /// JPEG quality (1-100) for single-page output.
    pub jpeg_quality: u8,
    /// Title embedded in assembled PDFs.
    pub pdf_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            paper_size: crate::PaperSize::A4,
            jpeg_quality: 90,
            pdf_title: "Scanned Document".into(),
        }
    }
}

impl AppConfig {
    /// Validate every nested section.
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DocscanError::InvalidConfig(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        let (w, h) = self.paper_size.dimensions_mm();
        if w == 0 || h == 0 {
            return Err(DocscanError::InvalidConfig(
                "paper size must have non-zero dimensions".into(),
            ));
        }
        Ok(())
    }
}
