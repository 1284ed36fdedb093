//! Delimited-text tables: read a header + records, index rows by a key column,
//! and write rows back out.

use crate::error::{GdpError, Result};
use crate::models::dialect_byte;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// One record of a table, addressable by column name.
///
/// Rows read from the same file share a single copy of the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    headers: Arc<StringRecord>,
    record: StringRecord,
}

impl Row {
    /// Value of column `name`. With repeated header names the rightmost column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = last_index(&self.headers, name)?;
        self.record.get(idx)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().zip(self.record.iter())
    }
}

/// Index of the rightmost header equal to `name`.
fn last_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == name)
        .map(|(i, _)| i)
        .last()
}

/// Key-column value -> row. Last row wins on duplicate keys.
pub type RawTable = HashMap<String, Row>;

/// Anything that can hand out a cell by column name; used by [`write_rows`].
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for Row {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

fn open_reader(path: &Path, separator: char, quote: char) -> Result<csv::Reader<File>> {
    let delimiter = dialect_byte("separator", separator)?;
    let quote = dialect_byte("quote", quote)?;
    let file = File::open(path).map_err(|source| GdpError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .quote(quote)
        .from_reader(file))
}

/// Column names from the header line.
pub fn read_fieldnames<P: AsRef<Path>>(path: P, separator: char, quote: char) -> Result<Vec<String>> {
    let mut rdr = open_reader(path.as_ref(), separator, quote)?;
    Ok(rdr.headers()?.iter().map(str::to_string).collect())
}

/// Every record in file order.
pub fn read_rows<P: AsRef<Path>>(path: P, separator: char, quote: char) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let mut rdr = open_reader(path, separator, quote)?;
    let headers = Arc::new(rdr.headers()?.clone());
    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(Row {
            headers: Arc::clone(&headers),
            record: result?,
        });
    }
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse the table at `path` and index its rows by the `key_field` column.
///
/// A record whose field count differs from the header is a [`GdpError::Csv`].
/// A header lacking `key_field` is only an error once there is a row to index.
pub fn index_rows<P: AsRef<Path>>(
    path: P,
    key_field: &str,
    separator: char,
    quote: char,
) -> Result<RawTable> {
    let path = path.as_ref();
    let mut rdr = open_reader(path, separator, quote)?;
    let headers = Arc::new(rdr.headers()?.clone());
    let key_idx = last_index(&headers, key_field);
    debug!(
        "{}: {} columns, key field {:?} at {:?}",
        path.display(),
        headers.len(),
        key_field,
        key_idx
    );

    let mut table = RawTable::new();
    let mut records = 0usize;
    for result in rdr.records() {
        let record = result?;
        let idx = key_idx.ok_or_else(|| GdpError::MissingKeyField {
            field: key_field.to_string(),
            path: path.to_path_buf(),
        })?;
        let key = record.get(idx).unwrap_or_default().to_string();
        table.insert(
            key,
            Row {
                headers: Arc::clone(&headers),
                record,
            },
        );
        records += 1;
    }
    debug!(
        "indexed {} records into {} keys from {}",
        records,
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Write `rows` under a header of `fieldnames`, in that column order.
///
/// Non-numeric cells are quoted; a column missing from a row is written empty.
pub fn write_rows<P, R, S>(
    path: P,
    rows: &[R],
    fieldnames: &[S],
    separator: char,
    quote: char,
) -> Result<()>
where
    P: AsRef<Path>,
    R: FieldSource,
    S: AsRef<str>,
{
    let mut wtr = WriterBuilder::new()
        .delimiter(dialect_byte("separator", separator)?)
        .quote(dialect_byte("quote", quote)?)
        .quote_style(QuoteStyle::NonNumeric)
        .from_path(path.as_ref())?;
    wtr.write_record(fieldnames.iter().map(|f| f.as_ref()))?;
    for row in rows {
        wtr.write_record(
            fieldnames
                .iter()
                .map(|f| row.field(f.as_ref()).unwrap_or_default()),
        )?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn row_lookup_prefers_rightmost_duplicate_header() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("dup.csv");
        fs::write(&p, "name,1960,1960\nFoo,1,2\n").unwrap();
        let rows = read_rows(&p, ',', '"').unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("1960"), Some("2"));
        assert_eq!(rows[0].iter().count(), 3);
    }

    #[test]
    fn custom_separator_and_quote() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("semi.csv");
        fs::write(&p, "'Country Name';'2000'\n'Korea; Rep.';'5'\n").unwrap();
        let table = index_rows(&p, "Country Name", ';', '\'').unwrap();
        let row = table.get("Korea; Rep.").expect("quoted key parsed");
        assert_eq!(row.get("2000"), Some("5"));
    }

    #[test]
    fn missing_key_field_only_matters_with_rows() {
        let dir = tempdir().unwrap();
        let header_only = dir.path().join("h.csv");
        fs::write(&header_only, "a,b\n").unwrap();
        assert!(index_rows(&header_only, "Country", ',', '"').unwrap().is_empty());

        let with_rows = dir.path().join("r.csv");
        fs::write(&with_rows, "a,b\n1,2\n").unwrap();
        let err = index_rows(&with_rows, "Country", ',', '"').unwrap_err();
        assert!(matches!(err, GdpError::MissingKeyField { .. }));
    }

    #[test]
    fn write_rows_quotes_non_numeric_and_blanks_missing() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("out.csv");
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), "Foo".to_string());
        row.insert("1960".to_string(), "1.5".to_string());
        write_rows(&p, &[row], &["name", "1960", "1961"], ',', '"').unwrap();
        let txt = fs::read_to_string(&p).unwrap();
        let mut lines = txt.lines();
        assert_eq!(lines.next(), Some(r#""name",1960,1961"#));
        let body = lines.next().unwrap();
        assert!(body.starts_with(r#""Foo",1.5,"#), "unexpected row: {body}");
        let back = read_rows(&p, ',', '"').unwrap();
        assert_eq!(back[0].get("1961"), Some(""));
    }

    #[test]
    fn rows_written_back_in_new_column_order() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in.csv");
        fs::write(&src, "Country Name,1960,1960,1961
Foo,1,2,3
").unwrap();
        let rows = read_rows(&src, ',', '"').unwrap();

        let dst = dir.path().join("re.csv");
        write_rows(&dst, &rows, &["1961", "1960", "Country Name"], ';', '"').unwrap();
        let txt = fs::read_to_string(&dst).unwrap();
        assert_eq!(txt.lines().nth(1), Some(r#"3;2;"Foo""#));
    }
}
