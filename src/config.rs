use crate::error::Result;
use crate::policy::PolicySet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One named dump configuration: export `table` under the record type `name`
/// into subdirectory `dir` of the export root, `page_size` rows per unit
/// (0 = one unbounded unit), capped at `max_rows` total (0 = no cap).
///
/// The same table may appear more than once under different record type
/// names, e.g. a raw pass-through dump next to a redacted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    pub name: String,
    pub table: String,
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub max_rows: u64,
}

fn default_dir() -> String {
    ".".to_string()
}

/// Options for an export run, with builder chaining. All paths are explicit;
/// nothing is resolved against an implicit working-directory convention.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub export_root: PathBuf,
    pub clean: bool,    // erase and recreate the export root first
    pub progress: bool, // show a per-config progress spinner
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_root: PathBuf::from("./dump_results"),
            clean: true,
            progress: true,
        }
    }
}

impl ExportOptions {
    pub fn with_export_root(mut self, root: impl AsRef<Path>) -> Self {
        self.export_root = root.as_ref().to_path_buf();
        self
    }
    pub fn with_clean(mut self, yes: bool) -> Self {
        self.clean = yes;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}

/// A whole export run as data: where the fixture tables live, where output
/// goes, the redaction policies, and the dump configurations to run.
#[derive(Clone, Serialize, Deserialize)]
pub struct DumpPlan {
    /// JSON fixture file for the in-memory row source.
    pub tables: PathBuf,
    #[serde(default = "default_export_root")]
    pub export_root: PathBuf,
    #[serde(default = "default_true")]
    pub clean: bool,
    #[serde(default)]
    pub policies: PolicySet,
    pub configs: Vec<DumpConfig>,
}

fn default_export_root() -> PathBuf {
    PathBuf::from("./dump_results")
}

fn default_true() -> bool {
    true
}

impl DumpPlan {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let r = BufReader::new(file);
        Ok(serde_json::from_reader(r)?)
    }
}
