//! Combine per-sensor fields into one temperature field.
//!
//! For every cell the qualifying sensors are those that reached it
//! (`D > 0`), have a reading, and whose path to the cell crosses no closed
//! door. Zero qualifying sensors leave the cell without a value, one gives
//! its reading unchanged, and more are combined by inverse-square distance
//! weighting:
//!
//! ```text
//! T = sum(t_i / d_i^2) / sum(1 / d_i^2)
//! ```

use log::warn;
use serde::Serialize;

use crate::grid::DistanceField;

/// Interpolated temperature per grid cell (`None` = no qualifying sensor).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatField {
    rows: usize,
    cols: usize,
    values: Vec<Option<f64>>,
}

impl HeatField {
    /// Field of shape `(rows, cols)` with no values.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![None; rows * cols],
        }
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

    /// Values, row-major.
    #[inline]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values[row * self.cols + col]
    }

    /// Number of cells with a value.
    pub fn covered(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Minimum, maximum and mean over cells with a value.
    pub fn stats(&self) -> Option<(f64, f64, f64)> {
        let mut it = self.values.iter().flatten();
        let first = *it.next()?;
        let (mut min, mut max, mut sum, mut n) = (first, first, first, 1usize);
        for &v in it {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        Some((min, max, sum / n as f64))
    }

    /// Rows of values, for consumers that want nested arrays.
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.values.chunks(self.cols).map(<[_]>::to_vec).collect()
    }
}

/// Aggregate sensor fields into a temperature field.
///
/// `readings[i]` is sensor `i`'s current temperature and `closed[d]` the
/// current state of door `d`. Fields, readings and door states are read
/// only; closing a door never touches the distance fields.
///
/// All fields must share one shape. If they do not, the result is an
/// all-empty field shaped like the first one.
pub fn aggregate(fields: &[DistanceField], readings: &[Option<f64>], closed: &[bool]) -> HeatField {
    let Some(first) = fields.first() else {
        return HeatField::empty(0, 0);
    };
    let (rows, cols) = first.shape();
    let mut out = HeatField::empty(rows, cols);
    if let Some((i, other)) = fields.iter().enumerate().find(|(_, f)| f.shape() != (rows, cols)) {
        warn!(
            "Aggregate: field {} has shape {:?}, expected {:?}",
            i,
            other.shape(),
            (rows, cols)
        );
        return out;
    }

    for (index, value) in out.values.iter_mut().enumerate() {
        let mut qualifying = 0usize;
        let mut single = 0.0;
        let mut num = 0.0;
        let mut den = 0.0;

        for (field, reading) in fields.iter().zip(readings) {
            let Some(t) = *reading else {
                continue;
            };
            let d = field.distance(index);
            if d <= 0.0 {
                continue;
            }
            if field
                .doors(index)
                .iter()
                .any(|door| closed.get(door.index()).copied().unwrap_or(false))
            {
                continue;
            }

            qualifying += 1;
            single = t;
            let w = 1.0 / (d * d);
            num += t * w;
            den += w;
        }

        *value = match qualifying {
            0 => None,
            1 => Some(single),
            _ => Some(num / den),
        };
    }

    out
}
