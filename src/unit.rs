//! Output units: the persisted form of one batch, one file per batch.
//! A unit is an explicit tagged structure `{record_type, records}` rather
//! than a single-key map, so readers never have to guess the type from
//! "the only key present".

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One exported row: field name -> scalar value, in row-source column order.
pub type Record = Map<String, Value>;

/// An ordered group of same-type records produced by one extraction page.
pub type Batch = Vec<Record>;

/// A persisted batch, tagged with its record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputUnit {
    pub record_type: String,
    pub records: Vec<Record>,
}

/// Deterministic unit name: `<record_type>_<seq>.json` with the sequence
/// index zero-padded to at least 4 digits, so lexicographic and numeric
/// order coincide up to 9999 batches.
pub fn unit_file_name(record_type: &str, seq: u32) -> String {
    format!("{}_{:04}.json", record_type, seq)
}

/// Serialize a unit to an explicit path, silently overwriting any existing
/// file of the same name. Pretty-printed so dumps stay human-diffable.
pub fn write_unit_to(path: &Path, unit: &OutputUnit) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, unit)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Write a unit under `dir` using the deterministic name for its type and
/// sequence index. Returns the path written.
pub fn write_unit(dir: &Path, unit: &OutputUnit, seq: u32) -> Result<PathBuf> {
    let path = dir.join(unit_file_name(&unit.record_type, seq));
    write_unit_to(&path, unit)?;
    Ok(path)
}

pub fn read_unit(path: &Path) -> Result<OutputUnit> {
    let file = File::open(path)?;
    let r = BufReader::new(file);
    Ok(serde_json::from_reader(r)?)
}
