//! The user partitioner: materialize one user's subset of a dump directory
//! into `<dir>/<user_id>/`, full overwrite on every invocation.

use crate::counting::user_key;
use crate::error::Result;
use crate::scan::discover_units;
use crate::unit::{read_unit, write_unit_to};
use std::fs;
use std::path::{Path, PathBuf};

/// Filter every unit in `dir` down to records owned by `user_id` and write
/// the survivors into `dir/<user_id>/`, keeping the original unit names so
/// table/sequence references still resolve inside the partition. Units left
/// empty by the filter are not written. Any pre-existing partition for this
/// user is destroyed first; repeated invocations over an unchanged source
/// produce identical output.
pub fn partition(dir: &Path, user_id: i64) -> Result<PathBuf> {
    let user_dir = dir.join(user_id.to_string());
    if user_dir.exists() {
        fs::remove_dir_all(&user_dir)?;
    }
    fs::create_dir_all(&user_dir)?;

    for uf in discover_units(dir)? {
        tracing::debug!(path = %uf.path.display(), user_id, "partitioning unit");
        let mut unit = read_unit(&uf.path)?;
        unit.records
            .retain(|record| user_key(record).ok() == Some(user_id));
        if unit.records.is_empty() {
            continue;
        }
        let name = uf
            .path
            .file_name()
            .expect("discovered unit path always has a file name");
        write_unit_to(&user_dir.join(name), &unit)?;
    }

    Ok(user_dir)
}
