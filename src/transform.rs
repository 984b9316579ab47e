//! The transform pipeline: apply one record type's redaction policy to one
//! record, including the blob-relocation side effect for rewritten paths.

use crate::error::{DumpError, Result};
use crate::policy::PolicySet;
use crate::unit::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Copies a referenced blob from its source location to a destination under
/// the export tree. There is no rollback: a failed copy aborts the table's
/// export before the dangling reference can be written.
pub trait BlobRelocator {
    fn relocate(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// Plain filesystem copy, creating destination parents as needed.
pub struct FsRelocator;

impl BlobRelocator for FsRelocator {
    fn relocate(&self, src: &Path, dest: &Path) -> Result<()> {
        let copy = || -> std::io::Result<()> {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, dest)?;
            Ok(())
        };
        copy().map_err(|e| DumpError::Relocation {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source: e,
        })
    }
}

/// Per-dump context the pipeline needs for rewrites.
pub struct TransformCtx<'a> {
    pub dump_dir: &'a Path,
    pub relocator: &'a dyn BlobRelocator,
}

/// Apply the policy for `record_type` to one record.
///
/// No policy entry means pass-through. Dropped fields that are absent are
/// not an error. Returns `None` when the policy's keep-predicate excludes
/// the record entirely.
pub fn apply_policy(
    policies: &PolicySet,
    record_type: &str,
    mut record: Record,
    ctx: &TransformCtx<'_>,
) -> Result<Option<Record>> {
    let policy = match policies.get(record_type) {
        Some(p) => p,
        None => return Ok(Some(record)),
    };

    if let Some(keep) = &policy.keep {
        if !keep(&record) {
            return Ok(None);
        }
    }

    for field in &policy.drop_fields {
        // shift_remove keeps the remaining fields in column order.
        record.shift_remove(field);
    }

    if let Some(rw) = &policy.rewrite {
        let stored = match record.get(&rw.field) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };
        if let Some(stored) = stored {
            if let Some(rest) = stored.strip_prefix(&rw.match_prefix) {
                let relative = format!("{}{}", rw.store_prefix, rest);
                let src = Path::new(&rw.fetch_prefix).join(rest);
                let dest = ctx.dump_dir.join(&relative);
                ctx.relocator.relocate(&src, &dest)?;
                record.insert(rw.field.clone(), Value::String(relative));
            }
        }
    }

    Ok(Some(record))
}
