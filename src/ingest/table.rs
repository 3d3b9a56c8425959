use std::{fs, path::Path};

use calamine::{Data, Reader, open_workbook_auto};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::prelude::*;

/// Raw rows of a downloaded file before any typing, with normalised header names.
#[must_use]
pub struct Table {
    headers: StringRecord,
    rows: Vec<Row>,
}

pub struct Row {
    /// 1-based line (or spreadsheet row) number, for error messages.
    pub line: u64,

    fields: StringRecord,
}

impl Row {
    /// Trimmed field value, or `None` if the cell is missing or blank.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(str::trim).filter(|value| !value.is_empty())
    }
}

impl Table {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let table = match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::read_workbook(path)?,
            _ => {
                let content = fs::read(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                ensure!(!content.is_empty(), "`{}` is empty", path.display());
                Self::from_delimited(&content)
                    .with_context(|| format!("failed to parse `{}`", path.display()))?
            }
        };
        info!(n_rows = table.rows.len(), "read");
        Ok(table)
    }

    /// Parse delimiter-separated text, picking `;` if the header line has one and `,` otherwise.
    pub fn from_delimited(content: &[u8]) -> Result<Self> {
        let header_line = content.split(|byte| *byte == b'\n').next().unwrap_or_default();
        let delimiter = if header_line.contains(&b';') { b';' } else { b',' };
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content);
        let headers = normalize_headers(reader.headers().context("failed to read the header")?);
        let mut rows = Vec::new();
        for result in reader.records() {
            let fields = result.context("failed to read a row")?;
            if fields.iter().all(str::is_empty) {
                continue;
            }
            let line = fields.position().map_or(0, csv::Position::line);
            rows.push(Row { line, fields });
        }
        Ok(Self { headers, rows })
    }

    fn read_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        let range = workbook
            .worksheet_range_at(0)
            .with_context(|| format!("`{}` has no worksheets", path.display()))?
            .with_context(|| format!("failed to read the first worksheet of `{}`", path.display()))?;
        let mut cells = range.rows();
        let headers = cells
            .next()
            .with_context(|| format!("`{}` is empty", path.display()))?
            .iter()
            .map(cell_to_string)
            .collect::<StringRecord>();
        let rows = cells
            .zip(2..)
            .map(|(cells, line)| Row { line, fields: cells.iter().map(cell_to_string).collect() })
            .filter(|row| !row.fields.iter().all(|field| field.trim().is_empty()))
            .collect();
        Ok(Self { headers: normalize_headers(&headers), rows })
    }

    /// Build a table from already split cells, mostly for tests.
    #[cfg(test)]
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: normalize_headers(&StringRecord::from(headers.to_vec())),
            rows: rows
                .iter()
                .zip(2..)
                .map(|(fields, line)| Row { line, fields: StringRecord::from(fields.to_vec()) })
                .collect(),
        }
    }

    /// Index of the column bound to a field, or a schema error naming the missing column.
    pub fn column(&self, name: &str) -> Result<usize> {
        let name = normalize_header(name);
        self.headers.iter().position(|header| header == name).with_context(|| {
            format!(
                "missing column `{name}`, available columns: {}",
                self.headers.iter().map(|header| format!("`{header}`")).collect::<Vec<_>>().join(", "),
            )
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

/// Strip the byte-order mark and the surrounding whitespace, so that
/// `\u{feff}Zeit von [CET/CEST]` binds to `Zeit von [CET/CEST]`.
fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(normalize_header).collect()
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_with_bom() -> Result {
        let content = "\u{feff}Zeit von [CET/CEST];Zeit bis [CET/CEST];Preis MC Auktion [EUR/MWh]\n\
                       01.01.2025 00:00:00;01.01.2025 00:15:00;101,5\n";
        let table = Table::from_delimited(content.as_bytes())?;
        assert_eq!(table.column("Zeit von [CET/CEST]")?, 0);
        assert_eq!(table.column("\u{feff}Zeit von [CET/CEST]")?, 0);
        assert_eq!(table.column("Preis MC Auktion [EUR/MWh]")?, 2);
        assert_eq!(table.len(), 1);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get(2), Some("101,5"));
        assert_eq!(row.line, 2);
        Ok(())
    }

    #[test]
    fn test_comma_delimited() -> Result {
        let table = Table::from_delimited(b"Timestamp,Verbrauch\n1704067200,\"0,25\"\n")?;
        assert_eq!(table.column("Verbrauch")?, 1);
        assert_eq!(table.rows().next().unwrap().get(1), Some("0,25"));
        Ok(())
    }

    #[test]
    fn test_blank_rows_are_skipped() -> Result {
        let table = Table::from_delimited(b"a;b\n1;2\n;\n3;4\n")?;
        assert_eq!(table.len(), 2);
        Ok(())
    }

    #[test]
    fn test_blank_and_missing_cells() -> Result {
        let table = Table::from_delimited(b"a;b;c\n1; ;\n2\n")?;
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get(1), None);
        assert_eq!(rows[0].get(2), None);
        assert_eq!(rows[1].get(2), None);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_named() {
        let table = Table::from_rows(&["Timestamp", "Value"], &[]);
        let error = table.column("Verbrauch").unwrap_err();
        assert!(error.to_string().contains("`Verbrauch`"), "{error:#}");
        assert!(error.to_string().contains("`Value`"), "{error:#}");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(1_704_067_200.0)), "1704067200");
        assert_eq!(cell_to_string(&Data::Float(0.25)), "0.25");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::String("0,5".to_owned())), "0,5");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
