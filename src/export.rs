//! The export orchestrator: Extract -> Transform -> Write for each dump
//! configuration, with per-configuration failure isolation.

use crate::config::{DumpConfig, ExportOptions};
use crate::error::{DumpError, Result};
use crate::extract::extract;
use crate::policy::PolicySet;
use crate::progress::make_unit_spinner;
use crate::source::RowSource;
use crate::transform::{apply_policy, BlobRelocator, FsRelocator, TransformCtx};
use crate::unit::{write_unit, OutputUnit};
use crate::util::init_tracing_once;
use std::fs;
use std::path::Path;

/// Outcome of one export run: units written per completed configuration,
/// and the error for each configuration that aborted. A failed configuration
/// never stops the remaining ones.
#[derive(Default)]
pub struct ExportSummary {
    pub completed: Vec<(String, u32)>,
    pub failed: Vec<(String, DumpError)>,
}

impl ExportSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn units_written(&self, name: &str) -> Option<u32> {
        self.completed
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, units)| *units)
    }
}

#[derive(Clone, Default)]
pub struct Exporter {
    opts: ExportOptions,
    policies: PolicySet,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    // -------- Builder methods --------
    pub fn export_root(mut self, root: impl AsRef<Path>) -> Self {
        self.opts = self.opts.with_export_root(root);
        self
    }
    pub fn clean(mut self, yes: bool) -> Self {
        self.opts = self.opts.with_clean(yes);
        self
    }
    pub fn progress(mut self, yes: bool) -> Self {
        self.opts = self.opts.with_progress(yes);
        self
    }
    pub fn policies(mut self, policies: PolicySet) -> Self {
        self.policies = policies;
        self
    }

    /// Run every dump configuration against `source`. Each configuration is
    /// one attempt: an error aborts that configuration's dump only, and the
    /// summary reports it alongside the ones that completed.
    pub fn export(&self, source: &dyn RowSource, configs: &[DumpConfig]) -> Result<ExportSummary> {
        init_tracing_once();

        let root = &self.opts.export_root;
        if self.opts.clean && root.exists() {
            fs::remove_dir_all(root)?;
        }
        fs::create_dir_all(root)?;

        let relocator = FsRelocator;
        let mut summary = ExportSummary::default();
        for cfg in configs {
            match self.export_config(source, cfg, &relocator) {
                Ok(units) => {
                    tracing::info!(name = %cfg.name, units, "dump complete");
                    summary.completed.push((cfg.name.clone(), units));
                }
                Err(e) => {
                    tracing::error!(name = %cfg.name, error = %e, "dump failed");
                    summary.failed.push((cfg.name.clone(), e));
                }
            }
        }
        Ok(summary)
    }

    fn export_config(
        &self,
        source: &dyn RowSource,
        cfg: &DumpConfig,
        relocator: &dyn BlobRelocator,
    ) -> Result<u32> {
        let dump_dir = self.opts.export_root.join(&cfg.dir);
        fs::create_dir_all(&dump_dir)?;

        let ctx = TransformCtx {
            dump_dir: &dump_dir,
            relocator,
        };
        let pb = if self.opts.progress {
            Some(make_unit_spinner(&format!("Dumping {}", cfg.name)))
        } else {
            None
        };

        // Sequence indices are assigned at write time, so written units are
        // always gapless 0..N-1 even when a policy filters a batch empty.
        let mut written = 0u32;
        for batch in extract(source, &cfg.table, cfg.page_size, cfg.max_rows) {
            let batch = batch?;
            let mut records = Vec::with_capacity(batch.len());
            for record in batch {
                if let Some(out) = apply_policy(&self.policies, &cfg.name, record, &ctx)? {
                    records.push(out);
                }
            }
            if records.is_empty() {
                continue;
            }
            let unit = OutputUnit {
                record_type: cfg.name.clone(),
                records,
            };
            let path = write_unit(&dump_dir, &unit, written)?;
            tracing::info!(path = %path.display(), "wrote unit");
            written += 1;
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message(format!("Dumped {}", cfg.name));
        }
        Ok(written)
    }
}
