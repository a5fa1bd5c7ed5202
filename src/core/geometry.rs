//! Segment geometry used for line-of-sight tests against room walls.
//!
//! All predicates are exact on the f64 inputs (no epsilon). Touching
//! counts as intersecting: a sight line that grazes a wall endpoint or runs
//! along a wall is blocked.

use super::point::Point2D;

/// Orientation of an ordered point triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Points lie on one line.
    Collinear,
    /// p → q → r turns clockwise.
    Clockwise,
    /// p → q → r turns counter-clockwise.
    CounterClockwise,
}

/// Orientation of the triplet (p, q, r).
#[inline]
pub fn orientation(p: Point2D, q: Point2D, r: Point2D) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if val > 0.0 {
        Orientation::Clockwise
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Check if q lies within the bounding rectangle of segment p-r.
///
/// Only meaningful when (p, q, r) are collinear.
#[inline]
pub fn on_segment(p: Point2D, q: Point2D, r: Point2D) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Check if segment p1-q1 intersects segment p2-q2.
pub fn segments_intersect(p1: Point2D, q1: Point2D, p2: Point2D, q2: Point2D) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Iterate the closed polygon's edges as (start, end) pairs.
#[inline]
pub fn polygon_edges(polygon: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// Check if segment a-b crosses none of the polygon's edges.
///
/// A polygon with `k` corners contributes `k` edges, the last one closing
/// back to the first corner.
pub fn line_of_sight(a: Point2D, b: Point2D, polygon: &[Point2D]) -> bool {
    !polygon_edges(polygon).any(|(c1, c2)| segments_intersect(a, b, c1, c2))
}

/// Even-odd point-in-polygon test.
///
/// Points exactly on an edge may report either side.
pub fn point_in_polygon(point: Point2D, polygon: &[Point2D]) -> bool {
    let mut inside = false;
    for (a, b) in polygon_edges(polygon) {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Sign that maps exact zero to zero (unlike `f64::signum`).
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Probe nudge for corner `index` of a polygon.
///
/// Per axis the nudge is `eps` in the direction pointing away from both
/// neighbouring corners. Convex corners end up just outside the polygon,
/// reflex corners just inside, so a probe never grazes its own walls.
pub fn corner_nudge(polygon: &[Point2D], index: usize, eps: f64) -> Point2D {
    let n = polygon.len();
    if n < 3 {
        return Point2D::ZERO;
    }

    let prev = polygon[(index + n - 1) % n];
    let here = polygon[index];
    let next = polygon[(index + 1) % n];

    let mx = sign(((here.x - prev.x) + (here.x - next.x)) / 2.0);
    let my = sign(((here.y - prev.y) + (here.y - next.y)) / 2.0);

    Point2D::new(mx * eps, my * eps)
}
