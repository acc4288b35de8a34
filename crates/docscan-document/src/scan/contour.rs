// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction and polygon simplification on binary edge maps.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;

/// A closed border traced in an edge map, with its enclosed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub area: f64,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        let area = shoelace_area(&points);
        Self { points, area }
    }

    /// Length of the closed polyline through all points.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        arc_length(&self.points, true)
    }

    /// Douglas-Peucker simplification of the closed curve.
    pub fn approximate(&self, epsilon: f64) -> Vec<Point<i32>> {
        approximate_closed_polygon(&self.points, epsilon)
    }
}

/// Trace every border (outer and hole) of the non-zero regions in `edges`
/// and return them sorted by enclosed area, largest first.
///
/// The sort is stable, so contours of equal area keep tracing order.
pub fn extract_contours(edges: &GrayImage) -> Vec<Contour> {
    let mut contours: Vec<Contour> = find_contours::<i32>(edges)
        .into_iter()
        .map(|c| Contour::new(c.points))
        .collect();
    contours.sort_by(|a, b| b.area.total_cmp(&a.area));
    contours
}

/// Area enclosed by a closed polygon (shoelace formula).
pub fn shoelace_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x as i64 * points[j].y as i64;
        twice_area -= points[j].x as i64 * points[i].y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

/// Simplify a closed curve so that no dropped point lies farther than
/// `epsilon` from the resulting polygon.
///
/// The curve is cut at two mutually distant points into two open chains,
/// each simplified on its own; the returned polygon does not repeat its
/// first vertex.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || !(epsilon > 0.0) {
        return points.to_vec();
    }

    let (first, _) = farthest_from(points, 0);
    let (second, dist_sq) = farthest_from(points, first);
    if dist_sq == 0 {
        return vec![points[0]];
    }

    let (lo, hi) = (first.min(second), first.max(second));
    let forward = &points[lo..=hi];
    let backward: Vec<Point<i32>> = points[hi..]
        .iter()
        .chain(points[..=lo].iter())
        .copied()
        .collect();

    // forward runs lo -> hi, backward runs hi -> lo
    let mut polygon = approximate_polygon_dp(forward, epsilon, false);
    let mut rest = approximate_polygon_dp(&backward, epsilon, false);
    polygon.pop();
    rest.pop();
    polygon.extend(rest);
    polygon
}

/// Index of the point farthest from `points[origin]` and its squared distance.
fn farthest_from(points: &[Point<i32>], origin: usize) -> (usize, i64) {
    let o = points[origin];
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dx = (p.x - o.x) as i64;
            let dy = (p.y - o.y) as i64;
            (i, dx * dx + dy * dy)
        })
        .fold((origin, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
}
