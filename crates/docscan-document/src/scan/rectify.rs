// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification — warps the detected page onto a flat square frame.

use docscan_core::{DocscanError, Result};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use nalgebra::Point2;
use tracing::{debug, instrument};

use super::corners::OrderedCorners;
use super::homography::Homography;

/// Fixed square the page is flattened onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationFrame {
    side: u32,
}

impl DestinationFrame {
    pub fn new(side: u32) -> Self {
        Self { side }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// `[top_left, top_right, bottom_right, bottom_left]`, matching
    /// [`OrderedCorners::to_array`].
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let s = self.side as f64;
        [
            Point2::new(0.0, 0.0),
            Point2::new(s, 0.0),
            Point2::new(s, s),
            Point2::new(0.0, s),
        ]
    }
}

impl Default for DestinationFrame {
    fn default() -> Self {
        Self::new(800)
    }
}

/// Projective transform taking `corners` onto `frame`.
pub fn transform_for(corners: &OrderedCorners, frame: &DestinationFrame) -> Result<Homography> {
    Homography::from_correspondences(&corners.to_array(), &frame.corners())
}

/// Resample `source` so that the quadrilateral `corners` fills `frame`.
///
/// `corners` must be expressed in `source`'s pixel coordinates. Grayscale
/// sources produce a grayscale result; everything else is resampled as RGB.
/// Destination pixels whose pre-image falls outside `source` are black.
#[instrument(skip_all, fields(side = frame.side()))]
pub fn rectify(
    source: &DynamicImage,
    corners: &OrderedCorners,
    frame: &DestinationFrame,
) -> Result<DynamicImage> {
    if frame.side() == 0 {
        return Err(DocscanError::ImageError(
            "destination frame must be non-empty".into(),
        ));
    }

    let homography = transform_for(corners, frame)?;
    let projection = Projection::from_matrix(homography.to_row_major_f32()).ok_or_else(|| {
        DocscanError::DegenerateQuadrilateral("projection is not invertible".into())
    })?;
    debug!(matrix = ?homography.h, "Perspective transform computed");

    let side = frame.side();
    let rectified = match source {
        DynamicImage::ImageLuma8(gray) => {
            let mut out = GrayImage::new(side, side);
            warp_into(gray, &projection, Interpolation::Bilinear, Luma([0u8]), &mut out);
            DynamicImage::ImageLuma8(out)
        }
        other => {
            let rgb = other.to_rgb8();
            let mut out = RgbImage::new(side, side);
            warp_into(&rgb, &projection, Interpolation::Bilinear, Rgb([0u8, 0, 0]), &mut out);
            DynamicImage::ImageRgb8(out)
        }
    };

    debug!(side, "Image resampled into destination frame");
    Ok(rectified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn three_collinear_corners_are_rejected() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(900, 500));
        let corners = OrderedCorners::new(p(0.0, 0.0), p(400.0, 0.0), p(800.0, 0.0), p(400.0, 400.0));
        let result = rectify(&source, &corners, &DestinationFrame::default());
        assert!(matches!(
            result,
            Err(DocscanError::DegenerateQuadrilateral(_))
        ));
    }

    #[test]
    fn identity_quad_copies_the_source() {
        // Left half dark, right half bright.
        let source = GrayImage::from_fn(100, 100, |x, _| if x < 50 { Luma([20u8]) } else { Luma([230u8]) });
        let corners = OrderedCorners::new(p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.0, 100.0));
        let out = rectify(
            &DynamicImage::ImageLuma8(source),
            &corners,
            &DestinationFrame::new(100),
        )
        .unwrap();

        let gray = out.as_luma8().expect("grayscale stays grayscale");
        assert_eq!(gray.dimensions(), (100, 100));
        assert!(gray.get_pixel(10, 50)[0].abs_diff(20) <= 1);
        assert!(gray.get_pixel(90, 50)[0].abs_diff(230) <= 1);
    }

    #[test]
    fn corner_roles_decide_orientation() {
        // A bright block in the source's top-right quadrant.
        let source = RgbImage::from_fn(200, 200, |x, y| {
            if x >= 100 && y < 100 {
                Rgb([250, 250, 250])
            } else {
                Rgb([10, 10, 10])
            }
        });
        // Mirror horizontally by swapping left and right roles.
        let mirrored = OrderedCorners::new(p(200.0, 0.0), p(0.0, 0.0), p(0.0, 200.0), p(200.0, 200.0));
        let out = rectify(
            &DynamicImage::ImageRgb8(source),
            &mirrored,
            &DestinationFrame::new(200),
        )
        .unwrap()
        .to_rgb8();

        assert!(out.get_pixel(50, 50)[0] > 200, "block should now be top-left");
        assert!(out.get_pixel(150, 50)[0] < 50);
    }

    #[test]
    fn output_has_frame_size() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([90, 120, 150])));
        let corners = OrderedCorners::new(p(50.0, 40.0), p(600.0, 60.0), p(580.0, 450.0), p(30.0, 420.0));
        let out = rectify(&source, &corners, &DestinationFrame::new(321)).unwrap();
        assert_eq!((out.width(), out.height()), (321, 321));
        // interior samples come from the uniform source
        let centre = *out.to_rgb8().get_pixel(160, 160);
        for (got, want) in centre.0.iter().zip([90u8, 120, 150]) {
            assert!(got.abs_diff(want) <= 1, "got {centre:?}");
        }
    }

    #[test]
    fn empty_frame_is_rejected() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let corners = OrderedCorners::new(p(0.0, 0.0), p(9.0, 0.0), p(9.0, 9.0), p(0.0, 9.0));
        assert!(rectify(&source, &corners, &DestinationFrame::new(0)).is_err());
    }
}
