//! Per-sensor distance field cache.
//!
//! One artifact per sensor index, `{prefix}{index}.field` in the cache
//! directory. Workers write disjoint files, so no locking is needed.
//!
//! Format:
//! - Header (16 bytes):
//!   - Magic: "HFLD" (4 bytes)
//!   - Version: u8 (1 byte)
//!   - Reserved: 3 bytes
//!   - Rows: u32 (4 bytes, little-endian)
//!   - Cols: u32 (4 bytes, little-endian)
//! - Distances: rows * cols f64 (little-endian)
//! - Door counts: rows * cols u32 (little-endian)
//! - Door lists: per cell a u32 length followed by that many u32 door ids

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::CacheSection;
use crate::error::{HeatmapError, Result};
use crate::grid::DistanceField;
use crate::layout::DoorId;

/// Magic bytes for field artifacts
const MAGIC: &[u8; 4] = b"HFLD";

/// Current format version
const VERSION: u8 = 1;

/// Header size in bytes
const HEADER_SIZE: usize = 16;

/// Upper bound on cells reserved before any cell data is read
const MAX_PREALLOC_CELLS: usize = 1 << 20;

/// Directory of per-sensor field artifacts.
#[derive(Clone, Debug)]
pub struct FieldCache {
    dir: PathBuf,
    prefix: String,
}

impl FieldCache {
    /// Cache rooted at `dir`, naming files `{prefix}{index}.field`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Cache described by a config section.
    pub fn from_config(section: &CacheSection) -> Self {
        Self::new(section.dir_path(), section.file_prefix.clone())
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact path for a sensor index.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}{}.field", self.prefix, index))
    }

    /// Whether an artifact exists for a sensor index.
    pub fn contains(&self, index: usize) -> bool {
        self.path_for(index).is_file()
    }

    /// Persist a sensor's field, creating the directory if needed.
    pub fn save(&self, index: usize, field: &DistanceField) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(index);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_field(field, &mut writer)?;
        writer.flush()?;
        debug!("Field cache: wrote sensor {} to {}", index, path.display());
        Ok(())
    }

    /// Load a sensor's field.
    ///
    /// A missing artifact is a [`HeatmapError::CacheMiss`]. When `expected`
    /// is given, a field of a different shape is a [`HeatmapError::CacheShape`].
    pub fn load(&self, index: usize, expected: Option<(usize, usize)>) -> Result<DistanceField> {
        let path = self.path_for(index);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(HeatmapError::CacheMiss { index, path });
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = BufReader::new(file);
        let shape = read_header(&mut reader)?;
        if let Some(expected) = expected
            && shape != expected
        {
            return Err(HeatmapError::CacheShape {
                index,
                expected,
                found: shape,
            });
        }
        read_payload(&mut reader, shape)
    }

    /// Load the fields of sensors `0..count`, failing on the first miss.
    pub fn load_all(&self, count: usize, shape: (usize, usize)) -> Result<Vec<DistanceField>> {
        let fields = (0..count)
            .map(|i| self.load(i, Some(shape)))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Field cache: loaded {} fields from {}",
            fields.len(),
            self.dir.display()
        );
        Ok(fields)
    }
}

/// Write a field to a writer in the artifact format.
pub fn write_field<W: Write>(field: &DistanceField, writer: &mut W) -> Result<()> {
    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = VERSION;
    // Reserved bytes 5..8 stay zero
    header[8..12].copy_from_slice(&(field.rows() as u32).to_le_bytes());
    header[12..16].copy_from_slice(&(field.cols() as u32).to_le_bytes());
    writer.write_all(&header)?;

    for &d in field.distances() {
        writer.write_all(&d.to_le_bytes())?;
    }
    for &n in field.door_counts() {
        writer.write_all(&n.to_le_bytes())?;
    }
    for doors in field.door_lists() {
        writer.write_all(&(doors.len() as u32).to_le_bytes())?;
        for door in doors {
            writer.write_all(&(door.index() as u32).to_le_bytes())?;
        }
    }
    Ok(())
}

/// Read a field from a reader in the artifact format.
pub fn read_field<R: Read>(reader: &mut R) -> Result<DistanceField> {
    let shape = read_header(reader)?;
    read_payload(reader, shape)
}

/// Read and check the header, returning the field shape.
fn read_header<R: Read>(reader: &mut R) -> Result<(usize, usize)> {
    let header: [u8; HEADER_SIZE] = read_array(reader)?;

    if &header[0..4] != MAGIC {
        return Err(HeatmapError::CacheFormat("invalid magic bytes".to_string()));
    }
    if header[4] != VERSION {
        return Err(HeatmapError::CacheFormat(format!(
            "version mismatch: expected {}, found {}",
            VERSION, header[4]
        )));
    }

    let rows = u32::from_le_bytes([header[8], header[9], header[10], header[11]]) as usize;
    let cols = u32::from_le_bytes([header[12], header[13], header[14], header[15]]) as usize;
    Ok((rows, cols))
}

/// Read the cell data of a field with a known shape.
///
/// Lengths come from the artifact, so buffers grow as data arrives instead
/// of being sized up front; a bogus length ends in a truncation error.
fn read_payload<R: Read>(reader: &mut R, (rows, cols): (usize, usize)) -> Result<DistanceField> {
    let n = rows
        .checked_mul(cols)
        .ok_or_else(|| HeatmapError::CacheFormat(format!("shape {}x{} overflows", rows, cols)))?;
    let reserve = n.min(MAX_PREALLOC_CELLS);

    let mut distance = Vec::with_capacity(reserve);
    for _ in 0..n {
        distance.push(f64::from_le_bytes(read_array(reader)?));
    }
    let mut door_count = Vec::with_capacity(reserve);
    for _ in 0..n {
        door_count.push(read_u32(reader)?);
    }
    let mut doors = Vec::with_capacity(reserve);
    for _ in 0..n {
        let len = read_u32(reader)? as usize;
        let mut list = Vec::new();
        for _ in 0..len {
            list.push(DoorId(read_u32(reader)? as usize));
        }
        doors.push(list);
    }

    DistanceField::from_parts(rows, cols, distance, door_count, doors)
        .ok_or_else(|| HeatmapError::CacheFormat("field length mismatch".to_string()))
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => HeatmapError::CacheFormat("truncated field data".to_string()),
        _ => e.into(),
    })?;
    Ok(buf)
}

#[inline]
fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    Ok(u32::from_le_bytes(read_array(reader)?))
}
