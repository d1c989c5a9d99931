use csv::StringRecord;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ConvertError;

/// Column names taken from the first row of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn from_row(row: &StringRecord) -> Self {
        Header {
            names: row.iter().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// One data row keyed by column name.
///
/// Keys are kept sorted so the serialized object is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Zips a data row with the header. Rows whose field count differs from
    /// the header produce `RowShapeMismatch` and no record.
    pub fn from_row(header: &Header, row: &StringRecord) -> Result<Self, ConvertError> {
        if row.len() != header.len() {
            return Err(ConvertError::RowShapeMismatch {
                expected: header.len(),
                found: row.len(),
            });
        }

        // Later duplicate column names overwrite earlier ones
        let fields = header
            .names()
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        Ok(Record(fields))
    }
}
