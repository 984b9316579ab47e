//! Count aggregation over a directory of output units, by record type and by
//! (user, record type), plus the report renderers the CLI prints.

use crate::error::{DumpError, Result};
use crate::scan::discover_units;
use crate::unit::{read_unit, Record};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// The field identifying which user a record belongs to.
pub const USER_ID_FIELD: &str = "user_id";

/// Integer user key for a record. `MissingField` when the field is absent or
/// not an integer; callers that aggregate treat that as "does not match".
pub fn user_key(record: &Record) -> Result<i64> {
    record
        .get(USER_ID_FIELD)
        .and_then(Value::as_i64)
        .ok_or_else(|| DumpError::MissingField(USER_ID_FIELD.to_string()))
}

/// Total records per record type across every unit in `dir`. Units are
/// independent, so the reduction is commutative and order never matters.
pub fn count_by_type(dir: &Path) -> Result<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();
    for uf in discover_units(dir)? {
        tracing::debug!(path = %uf.path.display(), "counting unit");
        let unit = read_unit(&uf.path)?;
        *counts.entry(unit.record_type).or_insert(0) += unit.records.len() as u64;
    }
    Ok(counts)
}

/// Records per (user, record type), in two explicit phases:
///
/// 1. Seed the user roster from units of `roster_type`, so every user id that
///    appears there gets an entry even if no other type contributes for it.
/// 2. Scan all units and count each record against its user's entry.
///
/// Records referencing a user id outside the roster are silently dropped;
/// the roster units define the universe of users, by design.
pub fn count_by_user_and_type(
    dir: &Path,
    roster_type: &str,
) -> Result<BTreeMap<i64, BTreeMap<String, u64>>> {
    let units = discover_units(dir)?;
    let mut per_user: BTreeMap<i64, BTreeMap<String, u64>> = BTreeMap::new();

    for uf in units.iter().filter(|u| u.record_type == roster_type) {
        let unit = read_unit(&uf.path)?;
        for record in &unit.records {
            if let Ok(id) = user_key(record) {
                per_user.entry(id).or_default();
            }
        }
    }

    for uf in &units {
        tracing::debug!(path = %uf.path.display(), "counting unit per user");
        let unit = read_unit(&uf.path)?;
        for record in &unit.records {
            if let Ok(id) = user_key(record) {
                if let Some(counts) = per_user.get_mut(&id) {
                    *counts.entry(unit.record_type.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    Ok(per_user)
}

pub fn render_type_counts(counts: &BTreeMap<String, u64>) -> String {
    let mut out = String::new();
    for (record_type, n) in counts {
        let _ = writeln!(out, "  {:6} {}", n, record_type);
    }
    out
}

pub fn render_user_counts(per_user: &BTreeMap<i64, BTreeMap<String, u64>>) -> String {
    let mut out = String::new();
    for (user_id, counts) in per_user {
        let _ = writeln!(out, "user_id: {}", user_id);
        out.push_str(&render_type_counts(counts));
    }
    out
}
