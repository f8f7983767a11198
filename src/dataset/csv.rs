//! Comma-separated table codec.
//!
//! Reads UTF-8 text with an optional BOM, LF or CRLF line endings and quoted
//! fields that may contain commas, doubled quotes and line breaks. Writes LF
//! line endings and quotes a field only when it has to.

use crate::error::{CatalogError, Result};

const BOM: char = '\u{feff}';

/// A parsed table: the first record is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Line the record starts on, 1-based.
    pub line: usize,
    pub fields: Vec<String>,
}

impl TableRow {
    fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

/// Parse CSV text into a header and rows. Blank lines are skipped.
pub fn parse(text: &str) -> Result<Table> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut records = Reader::new(text).records()?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| CatalogError::Dataset("missing header row".to_string()))?
        .fields
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();

    Ok(Table {
        header,
        rows: records.filter(|row| !row.is_blank()).collect(),
    })
}

struct Reader<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn records(mut self) -> Result<Vec<TableRow>> {
        let mut records = Vec::new();
        while self.chars.peek().is_some() {
            records.push(self.record()?);
        }
        Ok(records)
    }

    fn record(&mut self) -> Result<TableRow> {
        let start = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut closed = false;

        while let Some(c) = self.chars.next() {
            match c {
                '"' if quoted => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        quoted = false;
                        closed = true;
                    }
                }
                c if closed && !matches!(c, ',' | '\n' | '\r') => {
                    return Err(CatalogError::Dataset(format!(
                        "unexpected '{c}' after closing quote on line {}",
                        self.line
                    )));
                }
                '"' if field.is_empty() => quoted = true,
                '\n' if quoted => {
                    self.line += 1;
                    field.push('\n');
                }
                ',' if !quoted => {
                    closed = false;
                    fields.push(std::mem::take(&mut field));
                }
                '\r' if !quoted && self.chars.peek() == Some(&'\n') => {}
                '\n' | '\r' if !quoted => {
                    self.line += 1;
                    fields.push(field);
                    return Ok(TableRow {
                        line: start,
                        fields,
                    });
                }
                other => field.push(other),
            }
        }

        if quoted {
            return Err(CatalogError::Dataset(format!(
                "unterminated quoted field in record starting on line {start}"
            )));
        }
        fields.push(field);
        Ok(TableRow {
            line: start,
            fields,
        })
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

/// Append one record, terminated by a newline.
pub fn write_record<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let field = field.as_ref();
        if needs_quotes(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
