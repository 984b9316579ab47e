//! Discovery of output units in a dump directory. Top level only: user
//! partition subdirectories hold units with the same names and must not be
//! swept into their parent's analysis.

use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct UnitFile {
    pub record_type: String,
    pub seq: u32,
    pub path: PathBuf,
}

/// List unit files directly under `dir`, sorted by file name so iteration
/// order is deterministic regardless of what the directory listing returns.
pub fn discover_units(dir: &Path) -> Result<Vec<UnitFile>> {
    let re = Regex::new(r"^(.+)_(\d{4,})\.json$").unwrap();
    let mut units = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let ent = entry.map_err(std::io::Error::from)?;
        if !ent.file_type().is_file() {
            continue;
        }
        let name = match ent.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };
        if let Some(caps) = re.captures(name) {
            let seq = match caps[2].parse::<u32>() {
                Ok(n) => n,
                Err(_) => continue,
            };
            units.push(UnitFile {
                record_type: caps[1].to_string(),
                seq,
                path: ent.path().to_path_buf(),
            });
        }
    }
    units.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(units)
}
