mod config;
mod error;
mod source;
mod unit;

mod extract;
mod policy;
mod transform;

mod scan;
mod counting;
mod partition;

mod export;
mod progress;
mod util;

pub use crate::config::{DumpConfig, DumpPlan, ExportOptions};
pub use crate::error::{DumpError, Result};
pub use crate::source::{MemorySource, Row, RowSource, TableData};
pub use crate::unit::{read_unit, unit_file_name, write_unit, write_unit_to, Batch, OutputUnit, Record};

pub use crate::extract::{extract, Pages};
pub use crate::policy::{BlobRewrite, KeepFn, PolicySet, TypePolicy};
pub use crate::transform::{apply_policy, BlobRelocator, FsRelocator, TransformCtx};

pub use crate::scan::{discover_units, UnitFile};
pub use crate::counting::{
    count_by_type, count_by_user_and_type, render_type_counts, render_user_counts, user_key,
    USER_ID_FIELD,
};
pub use crate::partition::partition;

pub use crate::export::{ExportSummary, Exporter};

// Expose tracing init so binaries can share the one-shot subscriber setup.
pub use crate::util::init_tracing_once;
