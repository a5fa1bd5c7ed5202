//! Floor heatmap: per-sensor fields plus live readings and door states.
//!
//! Distance fields are computed once (or loaded from the cache) when the
//! heatmap is created. Temperature updates and door changes only feed the
//! aggregation step, so [`FloorHeatmap::recompute_field`] is cheap.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::{HeatField, aggregate};
use crate::config::HeatConfig;
use crate::core::Point2D;
use crate::error::{HeatmapError, Result};
use crate::grid::{DistanceField, SampleGrid};
use crate::io::FieldCache;
use crate::layout::{LayoutFile, Topology};
use crate::raster::compute_sensor_field;

/// Compute every sensor's field, on the rayon pool when `parallel` is set.
///
/// Each worker owns its search state and, when a cache is given, writes only
/// its own sensor's artifact.
pub fn compute_fields(
    topology: &Topology,
    grid: &SampleGrid,
    parallel: bool,
    cache: Option<&FieldCache>,
) -> Result<Vec<DistanceField>> {
    let build = |index: usize| -> Result<DistanceField> {
        let field = compute_sensor_field(topology, grid, index);
        if let Some(cache) = cache {
            cache.save(index, &field)?;
        }
        Ok(field)
    };

    let count = topology.sensors.len();
    if parallel {
        (0..count).into_par_iter().map(build).collect()
    } else {
        (0..count).map(build).collect()
    }
}

/// Sensor or object of interest as shown by a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensorMarker {
    /// Identifier.
    pub id: String,
    /// Position.
    pub position: Point2D,
    /// Latest reading.
    pub temperature: Option<f64>,
}

/// Door as shown by a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoorMarker {
    /// Door name.
    pub name: String,
    /// Contact sensor, if any.
    pub sensor_id: Option<String>,
    /// First endpoint.
    pub p1: Point2D,
    /// Second endpoint.
    pub p2: Point2D,
    /// Current state.
    pub closed: bool,
}

/// Everything a renderer needs to draw the current field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSnapshot {
    /// Sample x coordinates (columns).
    pub xs: Vec<f64>,
    /// Sample y coordinates (rows).
    pub ys: Vec<f64>,
    /// Temperatures by row, `null` where no sensor qualifies.
    pub field: Vec<Vec<Option<f64>>>,
    /// Temperature sensors.
    pub sensors: Vec<SensorMarker>,
    /// Doors with their current state.
    pub doors: Vec<DoorMarker>,
    /// Objects of interest.
    pub oofs: Vec<SensorMarker>,
    /// Colour scale range.
    pub t_range: [f64; 2],
}

/// Temperature field over one floor plan.
#[derive(Clone, Debug)]
pub struct FloorHeatmap {
    topology: Topology,
    grid: SampleGrid,
    fields: Vec<DistanceField>,
    readings: Vec<Option<f64>>,
    oof_readings: Vec<Option<f64>>,
    closed: Vec<bool>,
    heat: HeatField,
    t_range: [f64; 2],
}

impl FloorHeatmap {
    /// Build the heatmap for a topology.
    ///
    /// 1. Derive the sampling grid from the corner bounding box
    /// 2. Load every field from the cache (read-from-cache mode), or compute
    ///    them and write the cache when enabled
    /// 3. Aggregate once with the initial readings and door states
    pub fn new(topology: Topology, config: &HeatConfig) -> Result<Self> {
        let grid = SampleGrid::from_topology(&topology, config.grid.resolution);
        let cache = FieldCache::from_config(&config.cache);

        let fields = if config.cache.read_from_cache {
            cache.load_all(topology.sensors.len(), grid.shape())?
        } else {
            let start = Instant::now();
            let writer = config.cache.write.then_some(&cache);
            let fields = compute_fields(&topology, &grid, config.search.use_parallel, writer)?;
            info!(
                "Computed {} distance fields in {:.2}s ({})",
                fields.len(),
                start.elapsed().as_secs_f64(),
                if config.search.use_parallel { "parallel" } else { "serial" }
            );
            fields
        };

        let readings = topology.sensors.iter().map(|s| s.initial_reading).collect();
        let oof_readings = topology.oofs.iter().map(|o| o.initial_reading).collect();
        let closed = topology.doors.iter().map(|d| d.initially_closed).collect();

        let mut heatmap = Self {
            heat: HeatField::empty(grid.rows(), grid.cols()),
            topology,
            grid,
            fields,
            readings,
            oof_readings,
            closed,
            t_range: config.display.t_range,
        };
        heatmap.recompute_field();
        Ok(heatmap)
    }

    /// Build the topology from a parsed layout, then the heatmap.
    pub fn from_layout(layout: &LayoutFile, config: &HeatConfig) -> Result<Self> {
        let topology = config.build_topology(layout)?;
        Self::new(topology, config)
    }

    /// Static topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Sampling grid.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Per-sensor distance fields, by global sensor index.
    pub fn fields(&self) -> &[DistanceField] {
        &self.fields
    }

    /// Current reading of a sensor or object of interest.
    pub fn reading(&self, sensor_id: &str) -> Option<f64> {
        if let Some(i) = self.topology.sensor_index(sensor_id) {
            return self.readings[i];
        }
        self.topology
            .oofs
            .iter()
            .position(|o| o.id == sensor_id)
            .and_then(|i| self.oof_readings[i])
    }

    /// Store a new temperature for a sensor or object of interest.
    ///
    /// Takes effect on the next [`recompute_field`](Self::recompute_field).
    pub fn update_temperature(&mut self, sensor_id: &str, temperature: f64) -> Result<()> {
        if let Some(i) = self.topology.sensor_index(sensor_id) {
            self.readings[i] = Some(temperature);
        } else if let Some(i) = self.topology.oofs.iter().position(|o| o.id == sensor_id) {
            self.oof_readings[i] = Some(temperature);
        } else {
            return Err(HeatmapError::UnknownSensor {
                sensor_id: sensor_id.to_string(),
            });
        }
        debug!("Sensor [{}] = {:.2}", sensor_id, temperature);
        Ok(())
    }

    /// Open or close a door, by name or contact sensor id.
    ///
    /// Only the next aggregation is affected; distance fields are untouched.
    pub fn set_door_closed(&mut self, door: &str, closed: bool) -> Result<()> {
        let id = self
            .topology
            .find_door(door)
            .ok_or_else(|| HeatmapError::UnknownDoor {
                door: door.to_string(),
            })?;
        self.closed[id.index()] = closed;
        debug!(
            "Door [{}] {}",
            self.topology.door(id).name,
            if closed { "closed" } else { "open" }
        );
        Ok(())
    }

    /// Whether a door is currently closed.
    pub fn is_door_closed(&self, door: &str) -> Option<bool> {
        self.topology.find_door(door).map(|id| self.closed[id.index()])
    }

    /// Re-aggregate with the current readings and door states.
    pub fn recompute_field(&mut self) -> &HeatField {
        self.heat = if self.fields.is_empty() {
            HeatField::empty(self.grid.rows(), self.grid.cols())
        } else {
            aggregate(&self.fields, &self.readings, &self.closed)
        };
        &self.heat
    }

    /// Field from the last aggregation.
    pub fn heat_field(&self) -> &HeatField {
        &self.heat
    }

    /// Snapshot of the last aggregation with display metadata.
    pub fn snapshot(&self) -> FieldSnapshot {
        let sensors = self
            .topology
            .sensors
            .iter()
            .zip(&self.readings)
            .map(|(s, &t)| SensorMarker {
                id: s.id.clone(),
                position: s.position,
                temperature: t,
            })
            .collect();
        let oofs = self
            .topology
            .oofs
            .iter()
            .zip(&self.oof_readings)
            .map(|(o, &t)| SensorMarker {
                id: o.id.clone(),
                position: o.position,
                temperature: t,
            })
            .collect();
        let doors = self
            .topology
            .doors
            .iter()
            .zip(&self.closed)
            .map(|(d, &closed)| DoorMarker {
                name: d.name.clone(),
                sensor_id: d.sensor_id.clone(),
                p1: d.p1,
                p2: d.p2,
                closed,
            })
            .collect();

        FieldSnapshot {
            xs: self.grid.xs().to_vec(),
            ys: self.grid.ys().to_vec(),
            field: self.heat.to_rows(),
            sensors,
            doors,
            oofs,
            t_range: self.t_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TopologyBuilder;

    fn config() -> HeatConfig {
        let mut config = HeatConfig::default();
        config.grid.resolution = 2.0;
        config.cache.write = false;
        config
    }

    fn topology() -> Topology {
        TopologyBuilder::new()
            .room("a", &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
            .room("b", &[(4.0, 0.0), (8.0, 0.0), (8.0, 4.0), (4.0, 4.0)])
            .sensor("a", "s1", (1.0, 2.0), Some(20.0))
            .sensor("b", "s2", (6.0, 2.0), Some(30.0))
            .door("ab", "a", "b", (4.0, 1.5), (4.0, 2.5))
            .oof("lamp", (2.0, 2.0), None)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let topology = topology();
        let grid = SampleGrid::from_topology(&topology, 2.0);
        let parallel = compute_fields(&topology, &grid, true, None).unwrap();
        let serial = compute_fields(&topology, &grid, false, None).unwrap();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_unknown_sensor_and_door() {
        let mut heatmap = FloorHeatmap::new(topology(), &config()).unwrap();
        let err = heatmap.update_temperature("nope", 1.0).unwrap_err();
        assert!(matches!(err, HeatmapError::UnknownSensor { .. }));
        assert!(!err.is_fatal());
        assert!(matches!(
            heatmap.set_door_closed("nope", true),
            Err(HeatmapError::UnknownDoor { .. })
        ));
    }

    #[test]
    fn test_oof_reading_is_display_only() {
        let mut heatmap = FloorHeatmap::new(topology(), &config()).unwrap();
        let before = heatmap.heat_field().clone();
        heatmap.update_temperature("lamp", 50.0).unwrap();
        assert_eq!(heatmap.reading("lamp"), Some(50.0));
        assert_eq!(heatmap.recompute_field(), &before);
        assert_eq!(heatmap.snapshot().oofs[0].temperature, Some(50.0));
    }

    #[test]
    fn test_closing_door_keeps_fields() {
        let mut heatmap = FloorHeatmap::new(topology(), &config()).unwrap();
        let fields = heatmap.fields().to_vec();
        heatmap.set_door_closed("ab", true).unwrap();
        heatmap.recompute_field();
        assert_eq!(heatmap.fields(), &fields[..]);
        assert_eq!(heatmap.is_door_closed("ab"), Some(true));
    }

    #[test]
    fn test_snapshot_shape() {
        let heatmap = FloorHeatmap::new(topology(), &config()).unwrap();
        let snapshot = heatmap.snapshot();
        assert_eq!(snapshot.field.len(), snapshot.ys.len());
        assert_eq!(snapshot.field[0].len(), snapshot.xs.len());
        assert_eq!(snapshot.sensors.len(), 2);
        assert_eq!(snapshot.doors[0].name, "ab");
        assert_eq!(snapshot.t_range, HeatConfig::default().display.t_range);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["field"].is_array());
    }
}
