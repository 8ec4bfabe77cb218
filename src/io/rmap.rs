//! Legacy tab-separated room files.
//!
//! A line-oriented format with ROOM/END_ROOM and POLY/END_POLY blocks; each
//! vertex line carries its coordinates and the classification of the edge it
//! starts:
//!
//! ```text
//! ROOM
//!   Uid	1
//!   Room name	west
//!   Access level	0
//!   Poly count	1
//!   POLY
//!     Uid	10
//!     Vertex count	4
//!     0	0	0	Connector	20
//!     0	5	0	Wall
//!     10	5	0	Wall
//!     10	0	0	Wall
//!   END_POLY
//! END_ROOM
//! ```

use crate::Map25;
use crate::map::records::{EdgeKind, PolyRecord, RoomRecord, VertexRecord};
use anyhow::{Context, Result, anyhow};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Writes a map to a tab-separated room file.
pub fn write_rmap(path: &Path, map: &Map25) -> Result<()> {
    let mut out = String::new();
    for room in map.to_records() {
        writeln!(out, "ROOM")?;
        writeln!(out, "  Uid\t{}", room.uid)?;
        writeln!(out, "  Room name\t{}", room.name)?;
        writeln!(out, "  Access level\t{}", room.access_level)?;
        writeln!(out, "  Poly count\t{}", room.polys.len())?;
        for poly in &room.polys {
            writeln!(out, "  POLY")?;
            writeln!(out, "    Uid\t{}", poly.uid)?;
            writeln!(out, "    Vertex count\t{}", poly.vertices.len())?;
            for v in &poly.vertices {
                match v.edge {
                    EdgeKind::Connector { target } => {
                        writeln!(out, "    {}\t{}\t{}\tConnector\t{}", v.x, v.y, v.z, target)?
                    }
                    EdgeKind::Wall => writeln!(out, "    {}\t{}\t{}\tWall", v.x, v.y, v.z)?,
                }
            }
            writeln!(out, "  END_POLY")?;
        }
        writeln!(out, "END_ROOM")?;
    }
    fs::write(path, out).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Reads a map from a tab-separated room file. The returned map is compiled.
pub fn read_rmap(path: &Path) -> Result<Map25> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let records =
        parse_rooms(&text).with_context(|| format!("Failed to parse room file: {}", path.display()))?;
    let map = Map25::from_records(records)
        .with_context(|| format!("Failed to build map from: {}", path.display()))?;
    Ok(map)
}

fn parse_rooms(text: &str) -> Result<Vec<RoomRecord>> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut rooms = Vec::new();
    while let Some(line) = lines.next() {
        if line != "ROOM" {
            return Err(anyhow!("expected ROOM, found: {line}"));
        }
        rooms.push(parse_room(&mut lines)?);
    }
    Ok(rooms)
}

fn parse_room<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<RoomRecord> {
    let uid = field(lines, "Uid")?.parse().context("room uid")?;
    let name = field(lines, "Room name")?.to_string();
    let access_level = field(lines, "Access level")?.parse().context("access level")?;
    let poly_count: usize = field(lines, "Poly count")?.parse().context("poly count")?;

    let mut polys = Vec::with_capacity(poly_count);
    for _ in 0..poly_count {
        expect(lines, "POLY")?;
        polys.push(parse_poly(lines)?);
        expect(lines, "END_POLY")?;
    }
    expect(lines, "END_ROOM")?;

    Ok(RoomRecord {
        uid,
        name,
        access_level,
        polys,
    })
}

fn parse_poly<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<PolyRecord> {
    let uid = field(lines, "Uid")?.parse().context("poly uid")?;
    let vertex_count: usize = field(lines, "Vertex count")?.parse().context("vertex count")?;

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let line = lines.next().ok_or_else(|| anyhow!("unexpected end of vertex list"))?;
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 4 {
            return Err(anyhow!("malformed vertex line: {line}"));
        }
        let edge = match cols[3].to_lowercase().as_str() {
            "connector" => {
                let target = cols
                    .get(4)
                    .ok_or_else(|| anyhow!("connector without target: {line}"))?
                    .parse()
                    .context("connector target")?;
                EdgeKind::Connector { target }
            }
            "wall" => EdgeKind::Wall,
            other => return Err(anyhow!("unknown edge type: {other}")),
        };
        vertices.push(VertexRecord {
            x: cols[0].parse().context("vertex x")?,
            y: cols[1].parse().context("vertex y")?,
            z: cols[2].parse().context("vertex z")?,
            edge,
        });
    }

    Ok(PolyRecord {
        uid,
        vertices,
        furniture: Vec::new(),
    })
}

/// Reads the next line and returns the value after the first tab, checking
/// the label before it.
fn field<'a>(lines: &mut impl Iterator<Item = &'a str>, label: &str) -> Result<&'a str> {
    let line = lines.next().ok_or_else(|| anyhow!("unexpected end of file, expected {label}"))?;
    let (key, value) = line
        .split_once('\t')
        .ok_or_else(|| anyhow!("expected '{label}<tab>value', found: {line}"))?;
    if key != label {
        return Err(anyhow!("expected field {label}, found: {key}"));
    }
    Ok(value)
}

fn expect<'a>(lines: &mut impl Iterator<Item = &'a str>, token: &str) -> Result<()> {
    let line = lines.next().ok_or_else(|| anyhow!("unexpected end of file, expected {token}"))?;
    if line != token {
        return Err(anyhow!("expected {token}, found: {line}"));
    }
    Ok(())
}
