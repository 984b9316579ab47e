//! The row-source collaborator: anything that can enumerate a table's
//! columns once and serve windowed reads over its rows.

use crate::error::{DumpError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One raw row, positionally aligned with the table's column list.
pub type Row = Vec<Value>;

/// Windowed access to a named table.
///
/// Implementations MUST return rows in a stable total order for repeated
/// windowed reads (e.g. ordered by a primary key): pagination is
/// offset-based, so an unstable order loses or duplicates rows across
/// windows. Column enumeration happens once per table, before paging begins.
pub trait RowSource {
    /// Column names for `table`, in the order row values are laid out.
    fn columns(&self, table: &str) -> Result<Vec<String>>;

    /// Fetch up to `limit` rows starting at `offset`. `limit == 0` means
    /// unbounded (the whole remainder of the table).
    fn fetch_page(&self, table: &str, limit: u64, offset: u64) -> Result<Vec<Row>>;
}

/// Column list plus positional rows for one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// In-memory row source. Row order is the insertion order of `rows`, which
/// trivially satisfies the stable-order contract. Loadable from a JSON
/// fixture file mapping table name to `{columns, rows}`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: BTreeMap<String, TableData>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table<S, I, C>(&mut self, name: S, columns: I, rows: Vec<Row>)
    where
        S: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.tables.insert(name.into(), TableData { columns, rows });
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let r = BufReader::new(file);
        let tables: BTreeMap<String, TableData> = serde_json::from_reader(r)?;
        Ok(Self { tables })
    }

    fn table(&self, name: &str) -> Result<&TableData> {
        self.tables
            .get(name)
            .ok_or_else(|| DumpError::Query(format!("unknown table `{}`", name)))
    }
}

impl RowSource for MemorySource {
    fn columns(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.table(table)?.columns.clone())
    }

    fn fetch_page(&self, table: &str, limit: u64, offset: u64) -> Result<Vec<Row>> {
        let rows = &self.table(table)?.rows;
        let start = (offset as usize).min(rows.len());
        let end = if limit == 0 {
            rows.len()
        } else {
            (offset.saturating_add(limit) as usize).min(rows.len())
        };
        Ok(rows[start..end].to_vec())
    }
}
