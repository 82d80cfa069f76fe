//! Plain-text tables for query results.
//!
//! Rows are serialized through `serde_json`, so any `Serialize` struct can be shown and its
//! columns come out in field order.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    text: String,
    numeric: bool,
}

impl Table {
    /// Build a table from a list of records.  Columns are taken from the first record; records
    /// that do not serialize to a map are shown in a single `value` column.
    pub fn from_rows<T: Serialize>(rows: &[T]) -> serde_json::Result<Self> {
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<Value>>>()?;

        let headers: Vec<String> = match values.first() {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(_) => vec![String::from("value")],
            None => Vec::new(),
        };

        let rows = values
            .iter()
            .map(|value| match value {
                Value::Object(map) => headers
                    .iter()
                    .map(|key| Cell::from_value(map.get(key).unwrap_or(&Value::Null)))
                    .collect(),
                other => vec![Cell::from_value(other)],
            })
            .collect();

        Ok(Table { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .map(|row| row[column].text.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl Cell {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Cell {
                text: String::new(),
                numeric: false,
            },
            Value::Number(number) => Cell {
                text: format_number(number),
                numeric: true,
            },
            Value::String(text) => Cell {
                text: text.clone(),
                numeric: false,
            },
            other => Cell {
                text: other.to_string(),
                numeric: false,
            },
        }
    }
}

/// Whole floats print without a trailing `.0`.
fn format_number(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            return format!("{}", float);
        }
    }
    number.to_string()
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.headers.is_empty() {
            return writeln!(f, "(0 rows)");
        }

        let widths = self.widths();

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(name, width)| format!(" {:<width$} ", name, width = width))
            .collect();
        writeln!(f, "{}", header.join("|").trim_end())?;

        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
        writeln!(f, "{}", rule.join("+"))?;

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    if cell.numeric {
                        format!(" {:>width$} ", cell.text, width = width)
                    } else {
                        format!(" {:<width$} ", cell.text, width = width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|").trim_end())?;
        }

        let count = self.rows.len();
        writeln!(f, "({} {})", count, if count == 1 { "row" } else { "rows" })
    }
}
