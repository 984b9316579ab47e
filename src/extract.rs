//! The paginated extractor: windowed reads against one table, yielded lazily
//! as batches so peak memory is bounded by one page, never the whole table.

use crate::error::{DumpError, Result};
use crate::source::{Row, RowSource};
use crate::unit::{Batch, Record};

/// Lazy sequence of batches for one table.
///
/// Semantics:
/// - `page_size == 0 && max_rows == 0`: one unbounded batch (the whole table).
/// - `page_size == 0 && max_rows > 0`: one batch capped at `max_rows`.
/// - `page_size > 0`: successive windows of `page_size` rows; the last
///   partial page is still emitted if non-empty.
///
/// Extraction stops when `max_rows` is reached, a page comes back short, or a
/// page comes back empty. The first error ends the iteration; no retries.
pub fn extract<'a>(
    source: &'a dyn RowSource,
    table: &str,
    page_size: u64,
    max_rows: u64,
) -> Pages<'a> {
    Pages {
        source,
        table: table.to_string(),
        page_size,
        max_rows,
        columns: None,
        fetched: 0,
        done: false,
    }
}

pub struct Pages<'a> {
    source: &'a dyn RowSource,
    table: String,
    page_size: u64,
    max_rows: u64,
    columns: Option<Vec<String>>,
    fetched: u64,
    done: bool,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Columns are discovered once, before the first window.
        if self.columns.is_none() {
            match self.source.columns(&self.table) {
                Ok(c) => self.columns = Some(c),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        // Window size for this fetch; 0 means unbounded.
        let mut limit = self.page_size;
        if self.max_rows > 0 {
            let remaining = self.max_rows - self.fetched;
            if remaining == 0 {
                self.done = true;
                return None;
            }
            if limit == 0 || limit > remaining {
                limit = remaining;
            }
        }

        let rows = match self.source.fetch_page(&self.table, limit, self.fetched) {
            Ok(rows) => rows,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if rows.is_empty() {
            self.done = true;
            return None;
        }

        let got = rows.len() as u64;
        self.fetched += got;

        // Unpaged reads are single-shot; a short page signals end of table.
        if self.page_size == 0
            || (limit > 0 && got < limit)
            || (self.max_rows > 0 && self.fetched >= self.max_rows)
        {
            self.done = true;
        }

        let cols = self.columns.as_deref().unwrap_or(&[]);
        match rows_to_records(&self.table, cols, rows) {
            Ok(batch) => Some(Ok(batch)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn rows_to_records(table: &str, columns: &[String], rows: Vec<Row>) -> Result<Batch> {
    let mut batch = Vec::with_capacity(rows.len());
    for row in rows {
        if row.len() != columns.len() {
            return Err(DumpError::Query(format!(
                "table `{}`: row has {} values for {} columns",
                table,
                row.len(),
                columns.len()
            )));
        }
        let mut rec = Record::new();
        for (col, value) in columns.iter().zip(row) {
            rec.insert(col.clone(), value);
        }
        batch.push(rec);
    }
    Ok(batch)
}
