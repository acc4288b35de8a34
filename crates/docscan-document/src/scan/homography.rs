// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Planar homography from four point correspondences.

use docscan_core::{DocscanError, Result};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};

/// Fraction of the quad extent (squared for areas) treated as zero.
const COLLINEAR_TOLERANCE: f64 = 1e-6;

/// 3x3 projective transform, normalized so that `h[(2, 2)] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    /// Solve `dst ~ H * src` from exactly four correspondences.
    ///
    /// Both point sets are Hartley-normalized before the 8x8 system is solved.
    /// Coincident points, three collinear points on either side, non-finite
    /// coordinates or a singular system are all reported as
    /// [`DocscanError::DegenerateQuadrilateral`].
    pub fn from_correspondences(src: &[Point2<f64>; 4], dst: &[Point2<f64>; 4]) -> Result<Self> {
        check_quad(src, "source")?;
        check_quad(dst, "destination")?;

        let (src_n, t_src) = normalize_points(src);
        let (dst_n, t_dst) = normalize_points(dst);

        // Unknowns [h11 h12 h13 h21 h22 h23 h31 h32], h33 = 1.
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for k in 0..4 {
            let (x, y) = (src_n[k].x, src_n[k].y);
            let (u, v) = (dst_n[k].x, dst_n[k].y);

            let r0 = 2 * k;
            a[(r0, 0)] = x;
            a[(r0, 1)] = y;
            a[(r0, 2)] = 1.0;
            a[(r0, 6)] = -u * x;
            a[(r0, 7)] = -u * y;
            b[r0] = u;

            let r1 = r0 + 1;
            a[(r1, 3)] = x;
            a[(r1, 4)] = y;
            a[(r1, 5)] = 1.0;
            a[(r1, 6)] = -v * x;
            a[(r1, 7)] = -v * y;
            b[r1] = v;
        }

        let x = a
            .lu()
            .solve(&b)
            .ok_or_else(|| degenerate("corner correspondences give a singular system"))?;

        let hn = Matrix3::new(
            x[0], x[1], x[2], //
            x[3], x[4], x[5], //
            x[6], x[7], 1.0,
        );

        let t_dst_inv = t_dst
            .try_inverse()
            .ok_or_else(|| degenerate("destination normalization is singular"))?;
        let h = t_dst_inv * hn * t_src;

        let scale = h[(2, 2)];
        if scale.abs() < 1e-12 || !h.iter().all(|v| v.is_finite()) {
            return Err(degenerate("transform has no finite normalization"));
        }
        let h = h / scale;
        if h.try_inverse().is_none() {
            return Err(degenerate("resulting transform is not invertible"));
        }

        Ok(Self::new(h))
    }

    /// Map a point through the transform.
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.h * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0] / v[2], v[1] / v[2])
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }

    /// Row-major single-precision copy, the layout `imageproc` projections use.
    pub fn to_row_major_f32(&self) -> [f32; 9] {
        let h = &self.h;
        [
            h[(0, 0)] as f32,
            h[(0, 1)] as f32,
            h[(0, 2)] as f32,
            h[(1, 0)] as f32,
            h[(1, 1)] as f32,
            h[(1, 2)] as f32,
            h[(2, 0)] as f32,
            h[(2, 1)] as f32,
            h[(2, 2)] as f32,
        ]
    }
}

fn degenerate(reason: &str) -> DocscanError {
    DocscanError::DegenerateQuadrilateral(reason.into())
}

/// Reject quads for which no unique projective transform exists.
fn check_quad(points: &[Point2<f64>; 4], side: &str) -> Result<()> {
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(DocscanError::DegenerateQuadrilateral(format!(
            "{side} corners contain a non-finite coordinate"
        )));
    }

    // Scale the tolerance by the quad's extent so it is resolution independent.
    let extent = points
        .iter()
        .flat_map(|p| points.iter().map(move |q| (p - q).norm()))
        .fold(0.0_f64, f64::max);
    if extent == 0.0 {
        return Err(DocscanError::DegenerateQuadrilateral(format!(
            "{side} corners all coincide"
        )));
    }

    for i in 0..4 {
        for j in (i + 1)..4 {
            if (points[i] - points[j]).norm() <= extent * COLLINEAR_TOLERANCE {
                return Err(DocscanError::DegenerateQuadrilateral(format!(
                    "{side} corners {i} and {j} coincide"
                )));
            }
        }
    }

    for skip in 0..4 {
        let tri: Vec<&Point2<f64>> = points
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != skip)
            .map(|(_, p)| p)
            .collect();
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let cross = (b - a).perp(&(c - a));
        if cross.abs() <= extent * extent * COLLINEAR_TOLERANCE {
            return Err(DocscanError::DegenerateQuadrilateral(format!(
                "three {side} corners are collinear"
            )));
        }
    }

    Ok(())
}

/// Hartley normalization: move the centroid to the origin and scale so the
/// mean distance from it is sqrt(2).
fn normalize_points(pts: &[Point2<f64>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let cx = pts.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = pts.iter().map(|p| p.y).sum::<f64>() / 4.0;
    let mean_dist = pts
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;

    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let out = pts.map(|p| {
        let v = t * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0], v[1])
    });
    (out, t)
}
