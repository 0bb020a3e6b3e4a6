//! Filesystem-backed reader for delimited tables.
//!
//! Lines starting with `#` are comments, the first remaining line is the
//! header, and every data line must have as many fields as the header.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::common::error::{BenchError, BenchResult};

use super::domain::{Delimiter, RawRow, RawTable, TableSource};

/// Reads tables straight from local files.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTableRepo;

impl FsTableRepo {
    pub fn new() -> Self {
        Self
    }
}

impl TableSource for FsTableRepo {
    fn read_table(&self, path: &Path, delimiter: Delimiter) -> BenchResult<RawTable> {
        let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
        parse_table(file, path, delimiter)
    }
}

/// Parse delimited text from any reader. `origin` only labels errors.
pub fn parse_table<R: Read>(reader: R, origin: &Path, delimiter: Delimiter) -> BenchResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let to_bench = |err: csv::Error| {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => BenchError::io(origin, source),
            _ => BenchError::table(origin, message),
        }
    };

    let header: Vec<String> = rdr
        .headers()
        .map_err(to_bench)?
        .iter()
        .map(str::to_string)
        .collect();
    if header.iter().all(|h| h.is_empty()) {
        return Err(BenchError::table(origin, "no header line found"));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(to_bench)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(RawRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    log::debug!(
        "read {} rows x {} columns from {}",
        rows.len(),
        header.len(),
        origin.display()
    );
    Ok(RawTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::BenchCode;

    fn parse(text: &str, delimiter: Delimiter) -> BenchResult<RawTable> {
        parse_table(text.as_bytes(), Path::new("inline.csv"), delimiter)
    }

    #[test]
    fn skips_comments_and_reads_header() {
        let table = parse(
            "# produced by model v2\n# second comment\nID,output\np1,Yes\n\np2, No \n",
            Delimiter::Comma,
        )
        .unwrap();
        assert_eq!(table.header, vec!["ID", "output"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells, vec!["p2", " No "]);
    }

    #[test]
    fn rows_carry_source_lines() {
        let table = parse("ID,output\np1,Yes\np2,No\n", Delimiter::Comma).unwrap();
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn tab_delimited() {
        let table = parse("patient_id\tdiagnosis\na\tYes\n", Delimiter::Tab).unwrap();
        assert_eq!(table.header, vec!["patient_id", "diagnosis"]);
        assert_eq!(table.rows[0].cells, vec!["a", "Yes"]);
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = parse("ID,output\np1,Yes,extra\n", Delimiter::Comma).unwrap_err();
        assert_eq!(err.code(), BenchCode::InvalidInput);
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = parse("# only a comment\n", Delimiter::Comma).unwrap_err();
        assert_eq!(err.code(), BenchCode::InvalidInput);
    }

    #[test]
    fn missing_file_is_io() {
        let err = FsTableRepo::new()
            .read_table(Path::new("/definitely/not/here.csv"), Delimiter::Comma)
            .unwrap_err();
        assert_eq!(err.code(), BenchCode::Io);
    }
}
