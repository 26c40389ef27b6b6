//! Serialization for `placements.json`, `routing.json`, and
//! `extraction.json` (§6 of SPEC_FULL.md).
//!
//! `placements.json` and `routing.json` are each two JSON documents on
//! separate lines rather than one JSON document, per §6's literal format:
//! the primary payload, then a `dimensions` array. `extraction.json` is a
//! single JSON 3D integer array — the final painted layout's block IDs.
//! None of these formats carry derived fields (`wire`/`violation` grids,
//! `route_coord`s): those are cheap to recompute and §4.2.1 explicitly
//! calls them out as re-derived on load rather than persisted.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use pnr_core::placement::Placement;
use pnr_core::router::types::{Coord, ExtendedPin, NetRouting, Segment};
use pnr_core::router::{compute_violation, Routing};
use pnr_library::{Dims, Grid3};
use serde::{Deserialize, Serialize};

fn dims_to_json(dims: Dims) -> serde_json::Value {
    serde_json::json!([dims.height, dims.width, dims.length])
}

fn dims_from_json(value: serde_json::Value) -> io::Result<Dims> {
    let arr: [u32; 3] = serde_json::from_value(value).map_err(to_io_err)?;
    Ok(Dims::new(arr[0], arr[1], arr[2]))
}

fn to_io_err(e: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn write_two_lines(path: &Path, first: &serde_json::Value, second: &serde_json::Value) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{first}")?;
    writeln!(file, "{second}")?;
    Ok(())
}

fn read_two_lines(path: &Path) -> io::Result<(serde_json::Value, serde_json::Value)> {
    let file = std::fs::File::open(path)?;
    let mut lines = io::BufReader::new(file).lines();
    let first = lines
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "missing first document"))??;
    let second = lines
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "missing dimensions document"))??;
    Ok((
        serde_json::from_str(&first).map_err(to_io_err)?,
        serde_json::from_str(&second).map_err(to_io_err)?,
    ))
}

#[derive(Serialize, Deserialize)]
struct PersistedPlacement {
    name: String,
    anchor: [i64; 3],
    turns: u32,
    pins: HashMap<String, String>,
}

impl From<&Placement> for PersistedPlacement {
    fn from(p: &Placement) -> Self {
        Self {
            name: p.name.clone(),
            anchor: [p.anchor.0, p.anchor.1, p.anchor.2],
            turns: p.turns,
            pins: p.pins.clone(),
        }
    }
}

impl From<PersistedPlacement> for Placement {
    fn from(p: PersistedPlacement) -> Self {
        Placement::new(p.name, (p.anchor[0], p.anchor[1], p.anchor[2]), p.turns, p.pins)
    }
}

/// Writes `placements` and `dims` to `path` as the two-line
/// `placements.json` document.
pub fn write_placements(path: &Path, placements: &[Placement], dims: Dims) -> io::Result<()> {
    let persisted: Vec<PersistedPlacement> = placements.iter().map(PersistedPlacement::from).collect();
    let first = serde_json::to_value(&persisted).map_err(to_io_err)?;
    write_two_lines(path, &first, &dims_to_json(dims))
}

/// Reads a two-line `placements.json` document back into placements and
/// their dimensions.
pub fn read_placements(path: &Path) -> io::Result<(Vec<Placement>, Dims)> {
    let (first, second) = read_two_lines(path)?;
    let persisted: Vec<PersistedPlacement> = serde_json::from_value(first).map_err(to_io_err)?;
    let placements = persisted.into_iter().map(Placement::from).collect();
    Ok((placements, dims_from_json(second)?))
}

#[derive(Serialize, Deserialize)]
struct PersistedPin {
    cell_index: usize,
    port: String,
    pin_coord: [i64; 3],
    route_coord: [i64; 3],
    is_output: bool,
}

impl From<&ExtendedPin> for PersistedPin {
    fn from(p: &ExtendedPin) -> Self {
        Self {
            cell_index: p.cell_index,
            port: p.port.clone(),
            pin_coord: [p.pin_coord.0, p.pin_coord.1, p.pin_coord.2],
            route_coord: [p.route_coord.0, p.route_coord.1, p.route_coord.2],
            is_output: p.is_output,
        }
    }
}

impl From<PersistedPin> for ExtendedPin {
    fn from(p: PersistedPin) -> Self {
        Self {
            cell_index: p.cell_index,
            port: p.port,
            pin_coord: (p.pin_coord[0], p.pin_coord[1], p.pin_coord[2]),
            route_coord: (p.route_coord[0], p.route_coord[1], p.route_coord[2]),
            is_output: p.is_output,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedSegment {
    pins: [PersistedPin; 2],
    net: Vec<[i64; 3]>,
}

fn coord_to_triple(c: Coord) -> [i64; 3] {
    [c.0, c.1, c.2]
}

fn triple_to_coord(t: [i64; 3]) -> Coord {
    (t[0], t[1], t[2])
}

impl From<&Segment> for PersistedSegment {
    fn from(s: &Segment) -> Self {
        Self {
            pins: [PersistedPin::from(&s.pins[0]), PersistedPin::from(&s.pins[1])],
            net: s.net.iter().copied().map(coord_to_triple).collect(),
        }
    }
}

impl From<PersistedSegment> for Segment {
    fn from(s: PersistedSegment) -> Self {
        let net: Vec<Coord> = s.net.into_iter().map(triple_to_coord).collect();
        let wire = net.iter().copied().collect();
        let violation = compute_violation(&net);
        let [a, b] = s.pins;
        Segment {
            pins: [ExtendedPin::from(a), ExtendedPin::from(b)],
            net,
            wire,
            violation,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedNetRouting {
    pins: Vec<PersistedPin>,
    segments: Vec<PersistedSegment>,
}

impl From<&NetRouting> for PersistedNetRouting {
    fn from(n: &NetRouting) -> Self {
        Self {
            pins: n.pins.iter().map(PersistedPin::from).collect(),
            segments: n.segments.iter().map(PersistedSegment::from).collect(),
        }
    }
}

impl From<PersistedNetRouting> for NetRouting {
    fn from(n: PersistedNetRouting) -> Self {
        NetRouting {
            pins: n.pins.into_iter().map(ExtendedPin::from).collect(),
            segments: n.segments.into_iter().map(Segment::from).collect(),
        }
    }
}

/// Writes `routing` and `dims` to `path` as the two-line `routing.json`
/// document.
pub fn write_routing(path: &Path, routing: &Routing, dims: Dims) -> io::Result<()> {
    let persisted: HashMap<String, PersistedNetRouting> =
        routing.iter().map(|(k, v)| (k.clone(), PersistedNetRouting::from(v))).collect();
    let first = serde_json::to_value(&persisted).map_err(to_io_err)?;
    write_two_lines(path, &first, &dims_to_json(dims))
}

/// Reads a two-line `routing.json` document back into a routing and its
/// dimensions. `wire`/`violation` grids are re-derived from each segment's
/// `net`, not read from the file.
pub fn read_routing(path: &Path) -> io::Result<(Routing, Dims)> {
    let (first, second) = read_two_lines(path)?;
    let persisted: HashMap<String, PersistedNetRouting> = serde_json::from_value(first).map_err(to_io_err)?;
    let routing = persisted.into_iter().map(|(k, v)| (k, NetRouting::from(v))).collect();
    Ok((routing, dims_from_json(second)?))
}

/// Writes a painted [`Grid3<u8>`] of block IDs to `path` as a single JSON
/// `[y][z][x]` 3D integer array (§6's `extraction.json`).
pub fn write_extraction(path: &Path, blocks: &Grid3<u8>) -> io::Result<()> {
    let dims = blocks.dims;
    let mut nested: Vec<Vec<Vec<u8>>> = Vec::with_capacity(dims.height as usize);
    for y in 0..dims.height {
        let mut plane = Vec::with_capacity(dims.width as usize);
        for z in 0..dims.width {
            let mut row = Vec::with_capacity(dims.length as usize);
            for x in 0..dims.length {
                row.push(*blocks.get(y, z, x));
            }
            plane.push(row);
        }
        nested.push(plane);
    }
    let json = serde_json::to_string(&nested).map_err(to_io_err)?;
    std::fs::write(path, json)
}
