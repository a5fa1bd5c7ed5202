//! Per-sensor distance, door-count and door-list grids.

use crate::layout::DoorId;

/// Shortest line-of-sight travel distances from one sensor.
///
/// `distance == 0.0` marks an unreached cell. For reached cells,
/// `door_count` and `doors` describe the door sequence on the path that
/// produced the stored distance.
///
/// A sample that coincides with the sensor itself gets `d = 0` and so also
/// reads as unreached. Aggregation leaves that cell to other sensors, or
/// empty when there are none.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    rows: usize,
    cols: usize,
    distance: Vec<f64>,
    door_count: Vec<u32>,
    doors: Vec<Vec<DoorId>>,
}

impl DistanceField {
    /// Create an unreached field of shape `(rows, cols)`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let n = rows * cols;
        Self {
            rows,
            cols,
            distance: vec![0.0; n],
            door_count: vec![0; n],
            doors: vec![Vec::new(); n],
        }
    }

    /// Assemble a field from raw parts; `None` if the lengths disagree with the shape.
    pub fn from_parts(
        rows: usize,
        cols: usize,
        distance: Vec<f64>,
        door_count: Vec<u32>,
        doors: Vec<Vec<DoorId>>,
    ) -> Option<Self> {
        let n = rows * cols;
        if distance.len() != n || door_count.len() != n || doors.len() != n {
            return None;
        }
        Some(Self {
            rows,
            cols,
            distance,
            door_count,
            doors,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Distance grid, row-major.
    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distance
    }

    /// Door-count grid, row-major.
    #[inline]
    pub fn door_counts(&self) -> &[u32] {
        &self.door_count
    }

    /// Door-list grid, row-major.
    #[inline]
    pub fn door_lists(&self) -> &[Vec<DoorId>] {
        &self.doors
    }

    /// Distance at a cell index (0 = unreached).
    #[inline]
    pub fn distance(&self, index: usize) -> f64 {
        self.distance[index]
    }

    /// Door count at a cell index.
    #[inline]
    pub fn door_count(&self, index: usize) -> u32 {
        self.door_count[index]
    }

    /// Doors crossed on the path to a cell.
    #[inline]
    pub fn doors(&self, index: usize) -> &[DoorId] {
        &self.doors[index]
    }

    /// Whether a cell has a valid path.
    #[inline]
    pub fn is_reached(&self, index: usize) -> bool {
        self.distance[index] > 0.0
    }

    /// Number of reached cells.
    pub fn reached_count(&self) -> usize {
        self.distance.iter().filter(|&&d| d > 0.0).count()
    }

    /// Store `d` at a cell if it is unset or strictly shorter.
    ///
    /// Returns whether the cell was overwritten.
    #[inline]
    pub fn offer(&mut self, index: usize, d: f64, doors: &[DoorId]) -> bool {
        let current = self.distance[index];
        if current == 0.0 || d < current {
            self.distance[index] = d;
            self.door_count[index] = doors.len() as u32;
            self.doors[index] = doors.to_vec();
            true
        } else {
            false
        }
    }
}
