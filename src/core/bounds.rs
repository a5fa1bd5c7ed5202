//! Extent of a floor plan.
//!
//! The sampling grid spans the corner extrema, widened to whole layout
//! units:
//!
//! ```rust
//! use vastu_heat::core::{Bounds, Point2D};
//!
//! let bounds: Bounds = [Point2D::new(0.4, -1.2), Point2D::new(7.5, 3.0)]
//!     .into_iter()
//!     .collect();
//!
//! let grid_box = bounds.rounded_outward();
//! assert_eq!(grid_box.min, Point2D::new(0.0, -2.0));
//! assert_eq!(grid_box.max, Point2D::new(8.0, 3.0));
//! ```

use super::point::Point2D;

/// Axis-aligned box spanned by `min` and `max`.
///
/// A box with `min > max` on either axis holds no points; that is the
/// starting value for accumulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Point2D,
    /// Upper-right corner.
    pub max: Point2D,
}

impl Bounds {
    /// Box spanned by two corners.
    #[inline]
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Box holding no points.
    pub fn empty() -> Self {
        let inf = f64::INFINITY;
        Self::new(Point2D::new(inf, inf), Point2D::new(-inf, -inf))
    }

    /// True until a point has been included.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the box so it covers `p`.
    #[inline]
    pub fn include(&mut self, p: Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Floor of `min`, ceiling of `max`. An empty box becomes the
    /// zero-sized box at the origin.
    pub fn rounded_outward(&self) -> Self {
        if self.is_empty() {
            return Self::default();
        }
        Self::new(
            Point2D::new(self.min.x.floor(), self.min.y.floor()),
            Point2D::new(self.max.x.ceil(), self.max.y.ceil()),
        )
    }
}

impl FromIterator<Point2D> for Bounds {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for p in iter {
            bounds.include(p);
        }
        bounds
    }
}
