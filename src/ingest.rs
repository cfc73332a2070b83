//! CSV ingestion and per-row validation.
//!
//! Input columns are looked up through a logical-to-source name mapping so
//! exports from different order systems can be consumed without editing
//! the file. Bad rows are excluded and reported, never fatal; the run
//! proceeds with whatever validated cleanly.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Stop;

/// Maps each logical input field to the source CSV column name.
///
/// Defaults match the plain column names below; a configuration file can
/// remap any of them, e.g. `{"id": "Name", "load": "Lineitem quantity"}`
/// for a storefront export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub load: String,
    pub comments: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            name: "Name".to_string(),
            street: "Address".to_string(),
            city: "Town".to_string(),
            state: "State".to_string(),
            zip: "Zip".to_string(),
            load: "Bags".to_string(),
            comments: "Comments".to_string(),
        }
    }
}

/// Why a row was excluded or flagged during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Recipient name is blank; the row is excluded.
    MissingName,
    /// Street address is blank; the row is excluded.
    MissingAddress,
    /// The bag count did not parse; the row is excluded.
    BadLoad(String),
    /// The id was already seen; the later row is rejected.
    DuplicateId,
    /// The row is kept but delivers zero bags.
    ZeroLoad,
}

/// A per-row validation finding with enough context to locate the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based row number in the source file (header is row 1).
    pub row: usize,
    /// The row's id column, possibly blank.
    pub id: String,
    /// What went wrong.
    pub kind: IssueKind,
}

impl RowIssue {
    /// Returns `true` if the row was excluded from the routed set.
    pub fn excluded(&self) -> bool {
        !matches!(self.kind, IssueKind::ZeroLoad)
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = if self.id.is_empty() {
            "<no id>"
        } else {
            &self.id
        };
        match &self.kind {
            IssueKind::MissingName => write!(f, "row {} ({id}): missing name", self.row),
            IssueKind::MissingAddress => write!(f, "row {} ({id}): missing address", self.row),
            IssueKind::BadLoad(value) => {
                write!(f, "row {} ({id}): bad bag count {value:?}", self.row)
            }
            IssueKind::DuplicateId => write!(f, "row {} ({id}): duplicate id", self.row),
            IssueKind::ZeroLoad => write!(f, "row {} ({id}): order has 0 bags", self.row),
        }
    }
}

/// Reads and validates delivery stops from a CSV file.
///
/// Returns the valid stops in input order plus every validation finding.
/// Rows missing a name or street address, with an unparseable bag count,
/// or reusing an earlier row's id are excluded and reported. Zero-bag
/// rows are kept but reported as anomalies.
pub fn read_stops(path: &Path, columns: &ColumnMap) -> Result<(Vec<Stop>, Vec<RowIssue>)> {
    let file = File::open(path)?;
    parse_stops(file, columns)
}

/// Parses stops from any CSV reader; see [`read_stops`].
pub fn parse_stops<R: Read>(reader: R, columns: &ColumnMap) -> Result<(Vec<Stop>, Vec<RowIssue>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let fields = FieldIndices::resolve(&headers, columns)?;

    let mut stops: Vec<Stop> = Vec::new();
    let mut issues = Vec::new();

    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 2; // header is row 1

        let id = fields.get(&record, fields.id);
        let name = fields.get(&record, fields.name);
        let street = fields.get(&record, fields.street);

        if name.is_empty() {
            issues.push(RowIssue {
                row,
                id,
                kind: IssueKind::MissingName,
            });
            continue;
        }
        if street.is_empty() {
            issues.push(RowIssue {
                row,
                id,
                kind: IssueKind::MissingAddress,
            });
            continue;
        }

        let load_text = fields.get(&record, fields.load);
        let load: u32 = match load_text.parse() {
            Ok(load) => load,
            Err(_) => {
                issues.push(RowIssue {
                    row,
                    id,
                    kind: IssueKind::BadLoad(load_text),
                });
                continue;
            }
        };

        if stops.iter().any(|s| s.id == id) {
            issues.push(RowIssue {
                row,
                id,
                kind: IssueKind::DuplicateId,
            });
            continue;
        }

        if load == 0 {
            issues.push(RowIssue {
                row,
                id: id.clone(),
                kind: IssueKind::ZeroLoad,
            });
        }

        let city = fields.get(&record, fields.city);
        let state = fields.get(&record, fields.state);
        let zip = fields.get(&record, fields.zip);
        let address = format!("{street}, {city}, {state} {zip}");
        let comments = fields.get_opt(&record, fields.comments);

        stops.push(Stop::new(id, name, address, load).with_comments(comments));
    }

    Ok((stops, issues))
}

struct FieldIndices {
    id: usize,
    name: usize,
    street: usize,
    city: usize,
    state: usize,
    zip: usize,
    load: usize,
    comments: Option<usize>,
}

impl FieldIndices {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMap) -> Result<Self> {
        let find = |column: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| Error::MissingColumn(column.to_string()))
        };
        Ok(Self {
            id: find(&columns.id)?,
            name: find(&columns.name)?,
            street: find(&columns.street)?,
            city: find(&columns.city)?,
            state: find(&columns.state)?,
            zip: find(&columns.zip)?,
            load: find(&columns.load)?,
            // Comments are optional in the source file.
            comments: headers.iter().position(|h| h == columns.comments),
        })
    }

    fn get(&self, record: &csv::StringRecord, index: usize) -> String {
        record.get(index).unwrap_or("").trim().to_string()
    }

    fn get_opt(&self, record: &csv::StringRecord, index: Option<usize>) -> String {
        index.map(|i| self.get(record, i)).unwrap_or_default()
    }
}
