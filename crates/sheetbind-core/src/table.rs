//! CSV table model.

/// An immutable 2-D table of raw string cells parsed from CSV text.
///
/// Rows keep their source order and may have differing lengths; no
/// padding or truncation is performed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text into a table.
    ///
    /// Accepts mixed `\r\n`, `\n` and `\r` line endings. Zero-length
    /// lines are dropped entirely rather than becoming empty rows.
    /// Parsing is best-effort and never fails: a doubled quote inside
    /// a quoted field is a literal quote, an unmatched quote leaves
    /// the rest of the line in quoted state, and fields are never
    /// multi-line. Fields are not trimmed.
    pub fn parse(text: &str) -> Table {
        let rows = text
            .split(['\r', '\n'])
            .filter(|line| !line.is_empty())
            .map(parse_line)
            .collect();
        Table { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a single cell. Out-of-range coordinates yield `None`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// All values of one column, top to bottom, one entry per table
    /// row; `None` where a row is too short.
    pub fn column(&self, col: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|row| row.get(col).map(String::as_str))
            .collect()
    }
}

/// Split one line on commas outside quotes.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
