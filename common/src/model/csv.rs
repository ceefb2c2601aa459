//! Contact list preview.
//!
//! The parser is intentionally minimal: lines are split on `\n`, blank lines
//! are dropped, cells are split on `,` and trimmed. There is no quoting, no
//! delimiter sniffing, and rows with a different cell count than the header
//! are kept as they are. The recipient estimate shown in the review step is
//! derived from the kept rows, so smarter parsing would change that number.
//!
//! [`CsvPreview::inspect`] reports the shapes the parser tolerates but the
//! messaging platform will not, without altering the preview itself.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::place_holder::PlaceholderType;

/// Rows kept for display, header included.
pub const PREVIEW_ROWS: usize = 5;

/// First column every contact list must start with.
pub const PHONE_COLUMN: &str = "phone";

static HEADER_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}\s\-_]+$").expect("header cell regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex"));

/// Inferred shape of one column, shown in the review step.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ColumnCheck {
    /// Header cell as written in the file.
    pub title: String,
    /// Type guessed from the first data row.
    pub placeholder_type: PlaceholderType,
    /// Value of the first data row for this column, if the row has one.
    pub first_row: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvIssue {
    #[error("The file has no rows")]
    MissingHeader,

    #[error("The first column must be named \"phone\" (found \"{found}\")")]
    FirstColumnNotPhone { found: String },

    #[error("Header cell {} (\"{value}\") must contain only letters, numbers, spaces, '-' or '_'", .column + 1)]
    InvalidHeaderCell { column: usize, value: String },

    #[error("Row {} has {found} cells but the header has {expected}", .row + 1)]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvPreview {
    rows: Vec<Vec<String>>,
}

impl CsvPreview {
    pub fn parse(text: &str) -> Self {
        Self::parse_with_limit(text, PREVIEW_ROWS)
    }

    pub fn parse_with_limit(text: &str, limit: usize) -> Self {
        let rows = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
            .take(limit)
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Every previewed row but the header.
    pub fn estimated_recipients(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn inspect(&self) -> Vec<CsvIssue> {
        let Some(header) = self.header() else {
            return vec![CsvIssue::MissingHeader];
        };

        let mut issues = Vec::new();
        match header.first() {
            Some(first) if first.eq_ignore_ascii_case(PHONE_COLUMN) => {}
            first => issues.push(CsvIssue::FirstColumnNotPhone {
                found: first.cloned().unwrap_or_default(),
            }),
        }

        for (column, value) in header.iter().enumerate() {
            if !HEADER_CELL_RE.is_match(value) {
                issues.push(CsvIssue::InvalidHeaderCell {
                    column,
                    value: value.clone(),
                });
            }
        }

        for (offset, row) in self.data_rows().iter().enumerate() {
            if row.len() != header.len() {
                issues.push(CsvIssue::RaggedRow {
                    row: offset + 1,
                    expected: header.len(),
                    found: row.len(),
                });
            }
        }

        issues
    }

    /// Guesses each header column's type from the first data row.
    pub fn infer_columns(&self) -> Vec<ColumnCheck> {
        let Some(header) = self.header() else {
            return Vec::new();
        };
        let first_row = self.data_rows().first();

        header
            .iter()
            .enumerate()
            .map(|(idx, title)| {
                let value = first_row.and_then(|row| row.get(idx)).cloned();
                let placeholder_type = match &value {
                    Some(v) => infer_type(title, v),
                    None => PlaceholderType::Text,
                };
                ColumnCheck {
                    title: title.clone(),
                    placeholder_type,
                    first_row: value,
                }
            })
            .collect()
    }
}

fn infer_type(title: &str, value: &str) -> PlaceholderType {
    let currency_symbols = ['$', '€', '£', '¥', '₹'];
    let compact: String = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

    if value.contains('@') && value.contains('.') {
        PlaceholderType::Email
    } else if value.chars().any(|ch| currency_symbols.contains(&ch)) {
        PlaceholderType::Currency
    } else if PHONE_RE.is_match(&compact)
        && (title.eq_ignore_ascii_case(PHONE_COLUMN) || compact.starts_with('+'))
    {
        PlaceholderType::Phone
    } else if value.parse::<f64>().is_ok() {
        PlaceholderType::Number
    } else {
        PlaceholderType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(preview: &CsvPreview) -> Vec<Vec<&str>> {
        preview
            .rows()
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn parses_simple_contact_list() {
        let preview = CsvPreview::parse("phone,var1\n123,John\n456,Jane");
        assert_eq!(
            rows(&preview),
            vec![vec!["phone", "var1"], vec!["123", "John"], vec!["456", "Jane"]]
        );
        assert_eq!(preview.estimated_recipients(), 2);
    }

    #[test]
    fn drops_blank_and_whitespace_lines() {
        let preview = CsvPreview::parse("phone,name\n\n  \n123,John\n\n");
        assert_eq!(rows(&preview), vec![vec!["phone", "name"], vec!["123", "John"]]);
    }

    #[test]
    fn trims_cells_and_carriage_returns() {
        let preview = CsvPreview::parse("phone , name\r\n 123 ,  John \r\n");
        assert_eq!(rows(&preview), vec![vec!["phone", "name"], vec!["123", "John"]]);
    }

    #[test]
    fn keeps_first_five_rows_only() {
        let text = (0..20).map(|i| format!("{i},x")).collect::<Vec<_>>().join("\n");
        let preview = CsvPreview::parse(&text);
        assert_eq!(preview.row_count(), PREVIEW_ROWS);
        assert_eq!(preview.estimated_recipients(), 4);
        assert_eq!(preview.rows()[4][0], "4");
    }

    #[test]
    fn no_quoting_support() {
        let preview = CsvPreview::parse("phone,name\n123,\"Smith, John\"");
        assert_eq!(preview.rows()[1], vec!["123", "\"Smith", "John\""]);
    }

    #[test]
    fn ragged_rows_pass_through_but_are_reported() {
        let preview = CsvPreview::parse("phone,name,city\n123,John\n456,Jane,Lima,extra");
        assert_eq!(preview.rows()[1].len(), 2);
        assert_eq!(preview.rows()[2].len(), 4);
        assert_eq!(
            preview.inspect(),
            vec![
                CsvIssue::RaggedRow {
                    row: 1,
                    expected: 3,
                    found: 2
                },
                CsvIssue::RaggedRow {
                    row: 2,
                    expected: 3,
                    found: 4
                },
            ]
        );
    }

    #[test]
    fn empty_input() {
        let preview = CsvPreview::parse("\n\n");
        assert!(preview.is_empty());
        assert_eq!(preview.header(), None);
        assert!(preview.data_rows().is_empty());
        assert_eq!(preview.estimated_recipients(), 0);
        assert_eq!(preview.inspect(), vec![CsvIssue::MissingHeader]);
    }

    #[test]
    fn header_only_estimates_zero() {
        let preview = CsvPreview::parse("phone,var1\n");
        assert_eq!(preview.estimated_recipients(), 0);
    }

    #[test]
    fn header_rules() {
        let preview = CsvPreview::parse("mobile,first name,order#\n1,2,3");
        assert_eq!(
            preview.inspect(),
            vec![
                CsvIssue::FirstColumnNotPhone {
                    found: "mobile".into()
                },
                CsvIssue::InvalidHeaderCell {
                    column: 2,
                    value: "order#".into()
                },
            ]
        );
    }

    #[test]
    fn infers_column_types_from_first_row() {
        let preview = CsvPreview::parse(
            "phone,name,email,total,qty,alt\n1234567890,John,j@x.io,$12.50,3,+44 7700 900123",
        );
        let types: Vec<PlaceholderType> = preview
            .infer_columns()
            .into_iter()
            .map(|c| c.placeholder_type)
            .collect();
        assert_eq!(
            types,
            vec![
                PlaceholderType::Phone,
                PlaceholderType::Text,
                PlaceholderType::Email,
                PlaceholderType::Currency,
                PlaceholderType::Number,
                PlaceholderType::Phone,
            ]
        );
    }

    #[test]
    fn columns_without_data_default_to_text() {
        let columns = CsvPreview::parse("phone,name").infer_columns();
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.placeholder_type == PlaceholderType::Text));
        assert!(columns.iter().all(|c| c.first_row.is_none()));
    }
}
