//! Row parser
//!
//! Turns raw delimited text into an ordered sequence of typed records,
//! one per sample tick in the source file.

use std::collections::BTreeMap;

use super::{FieldValue, ParseError, Record};

/// Name of the mandatory timestamp column.
pub const TIME_COLUMN: &str = "time";

const DELIMITER: char = ',';

/// Parse delimited log text into records.
///
/// The first non-empty line is the header and must contain a `time`
/// column. Every other cell is typed per [`FieldValue`]. A row is dropped
/// (not fatal) when its time cell is missing or non-numeric, or when fewer
/// than two cells are populated. Rows keep file order; timestamps are not
/// sorted here.
pub fn parse_log(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

    let header_line = lines
        .by_ref()
        .find(|l| !l.trim().is_empty())
        .ok_or(ParseError::Empty)?;

    let headers: Vec<&str> = header_line.split(DELIMITER).map(str::trim).collect();
    let time_idx = headers
        .iter()
        .position(|h| *h == TIME_COLUMN)
        .ok_or(ParseError::MissingTimeColumn)?;

    let mut records = Vec::new();
    let mut rejected = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(DELIMITER).collect();
        let mut time = None;
        let mut populated = 0usize;
        let mut values = BTreeMap::new();

        // Cells beyond the header width are ignored; missing trailing
        // cells read as empty.
        for (idx, name) in headers.iter().enumerate() {
            let cell = cells.get(idx).map_or("", |c| c.trim());
            if cell.is_empty() {
                continue;
            }
            populated += 1;

            if idx == time_idx {
                time = cell.parse::<f64>().ok().filter(|t| !t.is_nan());
            } else {
                let value = match cell.parse::<f64>() {
                    Ok(n) => FieldValue::Number(n),
                    Err(_) => FieldValue::Text(cell.to_string()),
                };
                values.insert(name.to_string(), value);
            }
        }

        match time {
            Some(time) if populated >= 2 => records.push(Record { time, values }),
            _ => rejected += 1,
        }
    }

    if rejected > 0 {
        tracing::debug!(rejected, kept = records.len(), "dropped malformed log rows");
    }

    Ok(records)
}
