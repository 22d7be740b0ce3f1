//! Parsing of the extraction tool's diagnostic text.

use crate::{LoaderError, LoaderResult};

/// The four columns of an extraction, in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedColumns {
    pub z: Vec<f64>,
    pub r: Vec<f64>,
    pub temperature: Vec<f64>,
    pub aux: Vec<f64>,
}

impl ParsedColumns {
    /// Number of parsed rows.
    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }
}

/// Parse whitespace-separated `z r T aux` rows.
///
/// Blank lines are skipped. Extra columns after the fourth are ignored.
pub fn parse_rows(text: &str) -> LoaderResult<ParsedColumns> {
    let mut columns = ParsedColumns::default();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let invalid = || LoaderError::InvalidRow {
            line: idx + 1,
            content: trimmed.to_string(),
        };

        let mut values = [0.0f64; 4];
        let mut parts = trimmed.split_whitespace();
        for value in values.iter_mut() {
            let token = parts.next().ok_or_else(invalid)?;
            *value = token.parse().map_err(|_| invalid())?;
        }

        columns.z.push(values[0]);
        columns.r.push(values[1]);
        columns.temperature.push(values[2]);
        columns.aux.push(values[3]);
    }

    Ok(columns)
}
