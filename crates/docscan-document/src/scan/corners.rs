// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — assigns the four unordered vertices of a detected page
// boundary to their canonical roles (top-left, top-right, bottom-right,
// bottom-left) using the sum/difference heuristic.

use std::cmp::Ordering;

use docscan_core::{DocscanError, Result};
use nalgebra::Point2;
use tracing::debug;

/// Canonical position of a corner in the destination frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl CornerRole {
    /// All roles, in destination-frame order.
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomRight,
        CornerRole::BottomLeft,
    ];
}

/// Four boundary vertices whose roles are not yet known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrilateral {
    pub points: [Point2<f64>; 4],
}

impl Quadrilateral {
    pub fn new(points: [Point2<f64>; 4]) -> Self {
        Self { points }
    }

    /// Build from `(x, y)` pairs.
    pub fn from_tuples(points: [(f64, f64); 4]) -> Self {
        Self::new(points.map(|(x, y)| Point2::new(x, y)))
    }
}

/// The same four points tagged with their canonical roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedCorners {
    pub top_left: Point2<f64>,
    pub top_right: Point2<f64>,
    pub bottom_right: Point2<f64>,
    pub bottom_left: Point2<f64>,
}

impl OrderedCorners {
    pub fn new(
        top_left: Point2<f64>,
        top_right: Point2<f64>,
        bottom_right: Point2<f64>,
        bottom_left: Point2<f64>,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Point occupying `role`.
    pub fn get(&self, role: CornerRole) -> Point2<f64> {
        match role {
            CornerRole::TopLeft => self.top_left,
            CornerRole::TopRight => self.top_right,
            CornerRole::BottomRight => self.bottom_right,
            CornerRole::BottomLeft => self.bottom_left,
        }
    }

    /// Corners as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn to_array(&self) -> [Point2<f64>; 4] {
        CornerRole::ALL.map(|role| self.get(role))
    }
}

/// Assign canonical roles to four unordered points.
///
/// * top-left: smallest `x + y`
/// * bottom-right: largest `x + y`
/// * top-right: smallest `y - x`
/// * bottom-left: largest `y - x`
///
/// Ties are broken on a secondary coordinate chosen so that each role keeps
/// rotating clockwise (top-left prefers smaller x, top-right smaller y,
/// bottom-right larger x, bottom-left larger y). The result therefore does
/// not depend on the order of `quad.points`.
///
/// Fails with [`DocscanError::DegenerateQuadrilateral`] when one point wins
/// two roles, which would silently drop another input point.
pub fn order_corners(quad: &Quadrilateral) -> Result<OrderedCorners> {
    let pts = &quad.points;

    let tl = select_min(pts, |p| (p.x + p.y, p.x));
    let tr = select_min(pts, |p| (p.y - p.x, p.y));
    let br = select_min(pts, |p| (-(p.x + p.y), -p.x));
    let bl = select_min(pts, |p| (-(p.y - p.x), -p.y));

    let picked = [tl, tr, br, bl];
    for (i, a) in picked.iter().enumerate() {
        if picked[i + 1..].contains(a) {
            return Err(DocscanError::DegenerateQuadrilateral(format!(
                "corner ({:.1}, {:.1}) matches more than one role",
                pts[*a].x, pts[*a].y
            )));
        }
    }

    let ordered = OrderedCorners::new(pts[tl], pts[tr], pts[br], pts[bl]);
    debug!(
        top_left = ?(ordered.top_left.x, ordered.top_left.y),
        top_right = ?(ordered.top_right.x, ordered.top_right.y),
        bottom_right = ?(ordered.bottom_right.x, ordered.bottom_right.y),
        bottom_left = ?(ordered.bottom_left.x, ordered.bottom_left.y),
        "Corners ordered"
    );
    Ok(ordered)
}

/// Index of the point with the lexicographically smallest `(primary, secondary)` key.
fn select_min(points: &[Point2<f64>; 4], key: impl Fn(&Point2<f64>) -> (f64, f64)) -> usize {
    let mut best = 0;
    let mut best_key = key(&points[0]);
    for (i, p) in points.iter().enumerate().skip(1) {
        let k = key(p);
        if compare_keys(k, best_key) == Ordering::Less {
            best = i;
            best_key = k;
        }
    }
    best
}

fn compare_keys(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    /// Every ordering of four indices.
    fn permutations() -> Vec<[usize; 4]> {
        let mut out = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let perm = [a, b, c, d];
                        let distinct = (0..4).all(|i| perm[i + 1..].iter().all(|x| *x != perm[i]));
                        if distinct {
                            out.push(perm);
                        }
                    }
                }
            }
        }
        out
    }

    fn is_permutation_of(ordered: &OrderedCorners, input: &[Point2<f64>; 4]) -> bool {
        let out = ordered.to_array();
        input.iter().all(|q| out.iter().filter(|o| *o == q).count() == 1)
    }

    #[test]
    fn axis_aligned_rectangle_gets_canonical_roles() {
        let quad = Quadrilateral::from_tuples([
            (1200.0, 700.0),
            (100.0, 100.0),
            (100.0, 700.0),
            (1200.0, 100.0),
        ]);
        let ordered = order_corners(&quad).unwrap();
        assert_eq!(ordered.top_left, p(100.0, 100.0));
        assert_eq!(ordered.top_right, p(1200.0, 100.0));
        assert_eq!(ordered.bottom_right, p(1200.0, 700.0));
        assert_eq!(ordered.bottom_left, p(100.0, 700.0));
    }

    #[test]
    fn perspective_quad_gets_canonical_roles() {
        // Page photographed from below: top edge shorter than the bottom edge.
        let quad = Quadrilateral::from_tuples([
            (420.0, 90.0),
            (880.0, 110.0),
            (1180.0, 720.0),
            (130.0, 690.0),
        ]);
        let ordered = order_corners(&quad).unwrap();
        assert_eq!(ordered.get(CornerRole::TopLeft), p(420.0, 90.0));
        assert_eq!(ordered.get(CornerRole::TopRight), p(880.0, 110.0));
        assert_eq!(ordered.get(CornerRole::BottomRight), p(1180.0, 720.0));
        assert_eq!(ordered.get(CornerRole::BottomLeft), p(130.0, 690.0));
    }

    #[test]
    fn shuffled_input_yields_identical_assignment() {
        let base = [p(310.0, 160.0), p(1090.0, 245.0), p(1005.0, 700.0), p(215.0, 600.0)];
        let reference = order_corners(&Quadrilateral::new(base)).unwrap();

        for perm in permutations() {
            let shuffled = perm.map(|i| base[i]);
            let ordered = order_corners(&Quadrilateral::new(shuffled)).unwrap();
            assert_eq!(ordered, reference, "permutation {perm:?} changed the roles");
            assert!(is_permutation_of(&ordered, &base));
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let quad = Quadrilateral::from_tuples([(5.0, 3.0), (90.0, 12.0), (84.0, 77.0), (2.0, 70.0)]);
        let first = order_corners(&quad).unwrap();
        let second = order_corners(&quad).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn diamond_ties_still_form_a_permutation() {
        // Square rotated by 45 degrees: both sums and differences tie.
        let base = [p(0.0, 50.0), p(50.0, 0.0), p(100.0, 50.0), p(50.0, 100.0)];
        let reference = order_corners(&Quadrilateral::new(base)).unwrap();
        assert!(is_permutation_of(&reference, &base));
        assert_eq!(reference.top_left, p(0.0, 50.0));
        assert_eq!(reference.top_right, p(50.0, 0.0));
        assert_eq!(reference.bottom_right, p(100.0, 50.0));
        assert_eq!(reference.bottom_left, p(50.0, 100.0));

        for perm in permutations() {
            let ordered = order_corners(&Quadrilateral::new(perm.map(|i| base[i]))).unwrap();
            assert_eq!(ordered, reference);
        }
    }

    #[test]
    fn array_follows_destination_order() {
        let ordered = OrderedCorners::new(p(1.0, 2.0), p(9.0, 2.0), p(9.0, 8.0), p(1.0, 8.0));
        let array = ordered.to_array();
        for (role, point) in CornerRole::ALL.iter().zip(array) {
            assert_eq!(ordered.get(*role), point);
        }
        assert_eq!(array[0], ordered.top_left);
        assert_eq!(array[3], ordered.bottom_left);
    }

    #[test]
    fn convex_kite_with_shared_extreme_is_rejected() {
        // (200, 100) has both the largest sum and the smallest y - x, so it
        // would fill top-right and bottom-right at once.
        let quad = Quadrilateral::from_tuples([(0.0, 0.0), (10.0, 1.0), (200.0, 100.0), (1.0, 10.0)]);
        assert!(matches!(
            order_corners(&quad),
            Err(DocscanError::DegenerateQuadrilateral(_))
        ));
    }

    #[test]
    fn collinear_points_are_ambiguous() {
        let quad = Quadrilateral::from_tuples([(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]);
        assert!(matches!(
            order_corners(&quad),
            Err(DocscanError::DegenerateQuadrilateral(_))
        ));
    }

    #[test]
    fn three_collinear_corners_collide_on_a_role() {
        let quad = Quadrilateral::from_tuples([(0.0, 0.0), (400.0, 0.0), (800.0, 0.0), (400.0, 400.0)]);
        assert!(matches!(
            order_corners(&quad),
            Err(DocscanError::DegenerateQuadrilateral(_))
        ));
    }
}
