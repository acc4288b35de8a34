// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary detection — finds the four-sided outline of the page in a photo.

use docscan_core::{DocscanError, Result, ScanConfig};
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use nalgebra::Point2;
use tracing::{debug, info, instrument, warn};

use super::contour::{Contour, extract_contours};
use super::corners::Quadrilateral;

/// Locate the document outline in an image that has already been brought
/// to the working resolution.
///
/// ## Pipeline
///
/// 1. Convert to luminance
/// 2. Gaussian blur (`blur_sigma`) to suppress texture
/// 3. Canny edge detection (`canny_low` / `canny_high`)
/// 4. Trace all contours, largest enclosed area first
/// 5. Accept the first contour whose polygon approximation, at
///    `approx_epsilon_ratio` of its perimeter, has exactly four vertices
///
/// Returns [`DocscanError::NoDocumentBoundary`] when no contour qualifies,
/// or [`DocscanError::InvalidConfig`] when `config` does not validate.
#[instrument(skip_all, fields(width = working.width(), height = working.height()))]
pub fn detect_boundary(working: &DynamicImage, config: &ScanConfig) -> Result<Quadrilateral> {
    config.validate()?;
    let edges = edge_map(working, config);
    let contours = extract_contours(&edges);
    debug!(contours = contours.len(), "Contours traced");

    match select_quadrilateral(&contours, config.approx_epsilon_ratio) {
        Some(quad) => {
            info!(
                corners = ?quad.points.map(|p| (p.x, p.y)),
                "Document boundary found"
            );
            Ok(quad)
        }
        None => {
            warn!(
                candidates = contours.len(),
                "No contour reduces to four vertices"
            );
            Err(DocscanError::NoDocumentBoundary)
        }
    }
}

/// Binary edge map of `working`: luminance, blur, Canny.
fn edge_map(working: &DynamicImage, config: &ScanConfig) -> GrayImage {
    let gray = working.to_luma8();
    let blurred = gaussian_blur_f32(&gray, config.blur_sigma);
    debug!(sigma = config.blur_sigma, "Applied Gaussian blur");
    let edges = canny(&blurred, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        "Canny edge detection complete"
    );
    edges
}

/// Greedy search over area-sorted contours for the first four-vertex
/// approximation.
///
/// `contours` must already be sorted largest first; contours with zero
/// perimeter are skipped.
pub fn select_quadrilateral(contours: &[Contour], epsilon_ratio: f64) -> Option<Quadrilateral> {
    for (rank, contour) in contours.iter().enumerate() {
        let perimeter = contour.perimeter();
        if perimeter <= 0.0 {
            continue;
        }
        let approx = contour.approximate(epsilon_ratio * perimeter);
        if let [a, b, c, d] = approx[..] {
            debug!(rank, area = contour.area, perimeter, "Four-vertex contour accepted");
            return Some(Quadrilateral::new(
                [a, b, c, d].map(|p| Point2::new(p.x as f64, p.y as f64)),
            ));
        }
    }
    None
}
