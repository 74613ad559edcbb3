//! Lookup of ALLOPS roster records by normalized first and last name

use std::collections::HashMap;

use serde::Serialize;

use super::error::RosterError;
use super::grid::{Row, cell};
use super::header::{HeaderMap, assert_allops_layout, labels};
use super::normalize::normalize;

/// One person from the authoritative roster (raw, trimmed values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverRecord {
    pub first_name: String,
    pub last_name: String,
    pub colleague_id: String,
    pub manager_name: String,
}

/// Resolved ALLOPS column positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterColumns {
    pub first_name: usize,
    pub last_name: usize,
    pub colleague_id: usize,
    pub manager_name: usize,
    pub business_area: usize,
}

impl RosterColumns {
    /// Resolve positions from a detected header, enforcing the ALLOPS layout
    pub fn resolve(headers: &HeaderMap) -> Result<Self, RosterError> {
        assert_allops_layout(headers)?;

        Ok(Self {
            first_name: headers.require(labels::PREFERRED_FIRST_NAME)?,
            last_name: headers.require(labels::LEGAL_LAST_NAME)?,
            colleague_id: headers.require(labels::COLLEAGUE_ID)?,
            manager_name: headers.require(labels::MANAGER_NAME)?,
            business_area: headers.require(labels::BUSINESS_AREA)?,
        })
    }
}

/// Composite lookup key shared by the index and the reconciler
pub fn name_key(first: &str, last: &str) -> String {
    format!("{}|{}", normalize(first), normalize(last))
}

/// Two roster rows that normalize to the same name key.
/// The later row replaced the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub key: String,
    pub row_index: usize,
    pub replaced_id: String,
    pub winning_id: String,
}

/// Name key -> roster record. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    records: HashMap<String, DriverRecord>,
    collisions: Vec<KeyCollision>,
    skipped_rows: usize,
}

impl RosterIndex {
    /// Index every row below the header.
    ///
    /// Rows with a blank first name, last name or colleague id are skipped.
    /// On a key collision the later row wins.
    pub fn build(grid: &[Row], columns: &RosterColumns, header_row: usize) -> Self {
        let mut index = Self::default();

        for (row_index, row) in grid.iter().enumerate().skip(header_row + 1) {
            let first_name = cell(row, columns.first_name);
            let last_name = cell(row, columns.last_name);
            let colleague_id = cell(row, columns.colleague_id);

            if first_name.is_empty() || last_name.is_empty() || colleague_id.is_empty() {
                index.skipped_rows += 1;
                continue;
            }

            let key = name_key(&first_name, &last_name);
            let record = DriverRecord {
                first_name,
                last_name,
                colleague_id,
                manager_name: cell(row, columns.manager_name),
            };

            if let Some(previous) = index.records.insert(key.clone(), record.clone()) {
                log::debug!(
                    "Roster row {} replaces {} under key {:?}",
                    row_index + 1,
                    previous.colleague_id,
                    key
                );
                index.collisions.push(KeyCollision {
                    key,
                    row_index,
                    replaced_id: previous.colleague_id,
                    winning_id: record.colleague_id,
                });
            }
        }

        index
    }

    pub fn lookup(&self, first: &str, last: &str) -> Option<&DriverRecord> {
        self.records.get(&name_key(first, last))
    }

    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }

    /// Rows below the header that were not indexed
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
