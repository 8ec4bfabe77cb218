//! JSON map persistence.
//!
//! The JSON form is the record shape from [`crate::map::records`]: rooms of
//! polygons of vertices, each vertex carrying its edge classification.

use crate::Map25;
use crate::map::records::MapRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes a map to a JSON file.
pub fn write_map(path: &Path, map: &Map25) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let record = MapRecord::new(map.to_records());
    serde_json::to_writer_pretty(writer, &record)
        .with_context(|| format!("Failed to serialize map to: {}", path.display()))?;

    Ok(())
}

/// Reads a map from a JSON file. The returned map is compiled.
pub fn read_map(path: &Path) -> Result<Map25> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let record: MapRecord = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize map from: {}", path.display()))?;

    let map = Map25::from_records(record.rooms)
        .with_context(|| format!("Failed to build map from: {}", path.display()))?;
    Ok(map)
}

/// Serializes a map to a JSON string.
///
/// Useful for in-memory operations or network transfer.
pub fn to_json_string(map: &Map25) -> Result<String> {
    let record = MapRecord::new(map.to_records());
    serde_json::to_string_pretty(&record).context("Failed to serialize map to string")
}

/// Deserializes a compiled map from a JSON string.
pub fn from_json_string(json: &str) -> Result<Map25> {
    let record: MapRecord =
        serde_json::from_str(json).context("Failed to deserialize map from string")?;
    let map = Map25::from_records(record.rooms).context("Failed to build map from string")?;
    Ok(map)
}
