//! The opportunity record store.
//!
//! Rows are held in memory in append order and every mutation is flushed to
//! the CSV file before it returns, so the file always reflects the last
//! completed interaction.

use std::fs;
use std::path::{Path, PathBuf};

use intake_core::opportunity::{Field, Opportunity};
use intake_core::status::Status;
use intake_core::types::{Date, OpportunityId};

use crate::csv::{build_csv, parse_csv};
use crate::error::StoreError;
use crate::xlsx::write_workbook;

/// In-memory opportunity table backed by a CSV file.
#[derive(Debug)]
pub struct OpportunityStore {
    path: PathBuf,
    id_prefix: String,
    rows: Vec<Opportunity>,
    /// Highest id sequence ever issued. Never decreases, so deleted ids are
    /// not handed out again.
    last_seq: u32,
}

impl OpportunityStore {
    /// Load the table from `path`, or start empty if the file does not exist.
    ///
    /// Columns are matched by header; unknown columns are ignored and missing
    /// ones load as empty text.
    pub fn load(path: impl Into<PathBuf>, id_prefix: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let id_prefix = id_prefix.into();

        let rows = if path.exists() {
            read_rows(&path)?
        } else {
            tracing::info!(path = %path.display(), "No table file yet, starting empty");
            Vec::new()
        };

        let stored_seq = read_counter(&counter_path(&path))?;
        let max_seq = rows
            .iter()
            .filter_map(|op| parse_seq(&id_prefix, &op.id))
            .max()
            .unwrap_or(0);

        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            last_seq = stored_seq.max(max_seq),
            "Opportunity table loaded",
        );

        Ok(Self {
            path,
            id_prefix,
            rows,
            last_seq: stored_seq.max(max_seq),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in append order.
    pub fn list(&self) -> &[Opportunity] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Opportunity> {
        self.rows.iter().find(|op| op.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Append a new draft record and persist. Returns the new id.
    pub fn create(&mut self, today: Date) -> Result<OpportunityId, StoreError> {
        let before = self.snapshot();
        self.last_seq += 1;
        let id = format_id(&self.id_prefix, self.last_seq);
        self.rows.push(Opportunity::draft(id.clone(), today));
        self.persist_or_restore(before)?;

        tracing::info!(opportunity_id = %id, "Opportunity created");
        Ok(id)
    }

    /// Set a single field. Returns `false` if no row has `id`.
    pub fn update(&mut self, id: &str, field: Field, value: String) -> Result<bool, StoreError> {
        self.update_fields(id, vec![(field, value)])
    }

    /// Apply the edits of one interaction and persist once.
    ///
    /// Read-only fields are refused before anything is applied. Returns
    /// `false` if no row has `id`. Nothing is written when no value changed.
    pub fn update_fields(
        &mut self,
        id: &str,
        edits: Vec<(Field, String)>,
    ) -> Result<bool, StoreError> {
        if let Some((field, _)) = edits.iter().find(|(f, _)| !f.is_editable()) {
            return Err(StoreError::ReadOnlyField(field.label()));
        }

        let before = self.snapshot();
        let Some(row) = self.rows.iter_mut().find(|op| op.id == id) else {
            return Ok(false);
        };

        let mut changed = Vec::new();
        for (field, value) in edits {
            if row.get(field) != value {
                row.set(field, value);
                changed.push(field.key());
            }
        }

        if !changed.is_empty() {
            self.persist_or_restore(before)?;
            tracing::debug!(opportunity_id = %id, fields = ?changed, "Opportunity updated");
        }
        Ok(true)
    }

    /// Write a status chosen by the decision workflow and persist.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<bool, StoreError> {
        let before = self.snapshot();
        let Some(row) = self.rows.iter_mut().find(|op| op.id == id) else {
            return Ok(false);
        };
        row.status = status.as_str().to_string();
        self.persist_or_restore(before)?;

        tracing::info!(opportunity_id = %id, status = %status, "Opportunity status changed");
        Ok(true)
    }

    /// Remove the row with `id` and persist. Returns `false` if absent.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let before = self.snapshot();
        self.rows.retain(|op| op.id != id);
        self.persist_or_restore(before)?;

        tracing::info!(opportunity_id = %id, "Opportunity deleted");
        Ok(true)
    }

    /// Rewrite the table file and the id counter.
    ///
    /// The table is written to a sibling temporary file and renamed over the
    /// old one so a crash never leaves a half-written table.
    pub fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Counter first: a table write that fails after it only skips an id.
        fs::write(counter_path(&self.path), self.last_seq.to_string())?;

        let csv = build_csv(&headers(), self.rows.iter().map(row_values));
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, csv)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), rows = self.rows.len(), "Table persisted");
        Ok(())
    }

    fn snapshot(&self) -> (Vec<Opportunity>, u32) {
        (self.rows.clone(), self.last_seq)
    }

    /// Persist, or put `before` back if the write fails. Memory never holds
    /// a change the file does not.
    fn persist_or_restore(&mut self, before: (Vec<Opportunity>, u32)) -> Result<(), StoreError> {
        if let Err(err) = self.persist() {
            tracing::error!(path = %self.path.display(), error = %err, "Persist failed, change rolled back");
            (self.rows, self.last_seq) = before;
            return Err(err);
        }
        Ok(())
    }

    /// The whole table as an XLSX workbook. Does not touch the store.
    pub fn export_spreadsheet(&self) -> Result<Vec<u8>, StoreError> {
        write_workbook(&headers(), self.rows.iter().map(row_values))
    }
}

fn headers() -> Vec<&'static str> {
    Field::ALL.into_iter().map(Field::header).collect()
}

fn row_values(op: &Opportunity) -> Vec<&str> {
    Field::ALL.into_iter().map(|f| op.get(f)).collect()
}

fn format_id(prefix: &str, seq: u32) -> OpportunityId {
    format!("{prefix}-{seq:03}")
}

/// Sequence number of an id issued under `prefix`, if it is one.
fn parse_seq(prefix: &str, id: &str) -> Option<u32> {
    id.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}

/// Sidecar file holding the id high-water mark.
fn counter_path(path: &Path) -> PathBuf {
    path.with_extension("seq")
}

fn read_counter(path: &Path) -> Result<u32, StoreError> {
    if !path.exists() {
        return Ok(0);
    }
    let raw = fs::read_to_string(path)?;
    raw.trim().parse().map_err(|_| StoreError::Counter {
        path: path.to_path_buf(),
        value: raw.trim().to_string(),
    })
}

fn read_rows(path: &Path) -> Result<Vec<Opportunity>, StoreError> {
    let text = fs::read_to_string(path)?;
    let mut records = parse_csv(&text)?.into_iter();

    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    let columns: Vec<Option<Field>> = header
        .iter()
        .map(|h| Field::from_header(h.trim_start_matches('\u{feff}').trim()))
        .collect();

    let rows = records
        .map(|record| {
            let mut op = Opportunity::default();
            for (column, value) in columns.iter().zip(record) {
                if let Some(field) = column {
                    op.set(*field, value);
                }
            }
            op.id = op.id.trim().to_string();
            op
        })
        .collect();

    Ok(rows)
}
