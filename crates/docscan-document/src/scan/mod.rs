// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — page boundary detection, corner ordering and
// perspective rectification.
//
// Coordinate convention: every photo is first resized to the working
// resolution, and both detection and resampling operate on that working copy.
// Corners reported in a `ScanOutcome` are therefore in working-resolution
// pixels; a different output resolution is chosen through `output_side`.

pub mod boundary;
pub mod contour;
pub mod corners;
pub mod homography;
pub mod rectify;

use docscan_core::{DocscanError, Result, ScanConfig};
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::image::processor::ImageProcessor;

pub use boundary::detect_boundary;
pub use corners::{CornerRole, OrderedCorners, Quadrilateral, order_corners};
pub use homography::Homography;
pub use rectify::{DestinationFrame, rectify};

/// Result of a successful scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The flattened page, `output_side` pixels square.
    pub image: DynamicImage,
    /// Page corners in working-resolution coordinates.
    pub corners: OrderedCorners,
    /// Size of the working copy the corners refer to.
    pub working_size: (u32, u32),
}

/// Stateless document scanner.
///
/// Holds only the immutable configuration, so one instance can serve any
/// number of concurrent callers.
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    /// Create a scanner after validating `config`.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Bring `image` to the working resolution and pixel layout: grayscale
    /// inputs become `Luma8`, everything else `Rgb8`.
    pub fn normalize(&self, image: &DynamicImage) -> Result<DynamicImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DocscanError::ImageError("image has no pixels".into()));
        }

        let working = match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };

        let (w, h) = (self.config.working_width, self.config.working_height);
        if working.width() == w && working.height() == h {
            return Ok(working);
        }
        Ok(ImageProcessor::from_dynamic(working)
            .resize_exact(w, h)
            .into_dynamic())
    }

    /// Detect, order and rectify the page in `image`.
    ///
    /// Fails with [`DocscanError::NoDocumentBoundary`] or
    /// [`DocscanError::DegenerateQuadrilateral`]; neither is retried.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn scan(&self, image: &DynamicImage) -> Result<ScanOutcome> {
        let working = self.normalize(image)?;
        debug!(
            width = working.width(),
            height = working.height(),
            "Working copy prepared"
        );

        let quad = detect_boundary(&working, &self.config)?;
        let corners = order_corners(&quad)?;
        let frame = DestinationFrame::new(self.config.output_side);
        let rectified = rectify(&working, &corners, &frame)?;

        info!(side = frame.side(), "Document rectified");
        Ok(ScanOutcome {
            image: rectified,
            corners,
            working_size: (working.width(), working.height()),
        })
    }

    /// Like [`scan`](Self::scan), returning only the flattened page.
    pub fn rectify(&self, image: &DynamicImage) -> Result<DynamicImage> {
        self.scan(image).map(|outcome| outcome.image)
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }
}

/// Rectify the document in `image` with the default configuration.
pub fn rectify_document(image: &DynamicImage) -> Result<DynamicImage> {
    DocumentScanner::default().rectify(image)
}
