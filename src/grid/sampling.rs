//! Regular sampling grid over the floor plan's bounding box.

use log::info;

use crate::core::{Bounds, Point2D};
use crate::layout::Topology;

/// Evenly spaced samples over `[start, end]`, both ends included.
///
/// A single sample sits at `start`; zero samples give an empty axis.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Sampling grid of shape `(rows, cols)`.
///
/// Row `r` samples `y = ys[r]`, column `c` samples `x = xs[c]`. Cells are
/// stored row-major: `index = r * cols + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    bounds: Bounds,
    resolution: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleGrid {
    /// Create a grid over `bounds` (rounded outward to whole units) with
    /// `resolution` samples per unit.
    pub fn new(bounds: Bounds, resolution: f64) -> Self {
        let bounds = bounds.rounded_outward();
        let nx = samples_along(bounds.width(), resolution);
        let ny = samples_along(bounds.height(), resolution);

        Self {
            xs: linspace(bounds.min.x, bounds.max.x, nx),
            ys: linspace(bounds.min.y, bounds.max.y, ny),
            bounds,
            resolution,
        }
    }

    /// Grid over the extrema of all room corners.
    pub fn from_topology(topology: &Topology, resolution: f64) -> Self {
        let grid = Self::new(topology.bounds(), resolution);
        info!(
            "Grid: x [{}, {}], y [{}, {}], {} rows x {} cols",
            grid.bounds.min.x,
            grid.bounds.max.x,
            grid.bounds.min.y,
            grid.bounds.max.y,
            grid.rows(),
            grid.cols()
        );
        grid
    }

    /// Rounded bounding box.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Samples per unit length.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Sample x coordinates (one per column).
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Sample y coordinates (one per row).
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    /// Shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major cell index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// Sample position of a cell.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Point2D {
        Point2D::new(self.xs[col], self.ys[row])
    }

    /// Iterate `(index, position)` over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Point2D)> + '_ {
        self.ys.iter().enumerate().flat_map(move |(row, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(col, &x)| (row * self.xs.len() + col, Point2D::new(x, y)))
        })
    }

    /// Mesh coordinates `(X, Y)`, each row-major with shape `(rows, cols)`.
    pub fn mesh(&self) -> (Vec<f64>, Vec<f64>) {
        let mut mx = Vec::with_capacity(self.len());
        let mut my = Vec::with_capacity(self.len());
        for (_, p) in self.cells() {
            mx.push(p.x);
            my.push(p.y);
        }
        (mx, my)
    }
}

/// Sample count along an axis of the given length.
#[inline]
fn samples_along(length: f64, resolution: f64) -> usize {
    let n = resolution * length + 0.5;
    if n > 0.0 { n as usize } else { 0 }
}
