//! Floor-plan coordinates.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Position (or offset) in layout units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2D {
    /// The origin.
    pub const ZERO: Point2D = Point2D::new(0.0, 0.0);

    /// Point at `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (*self - *other).norm()
    }

    /// Euclidean norm, treating the point as an offset.
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Same direction, unit norm. The zero offset is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Point2D {
        match self.norm() {
            n if n > 0.0 => *self * n.recip(),
            _ => *self,
        }
    }

    /// Offset turned a quarter counter-clockwise.
    #[inline]
    pub fn perpendicular(&self) -> Point2D {
        Point2D::new(-self.y, self.x)
    }

    /// Halfway point between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        (*self + *other) * 0.5
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}
