use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{MtxError, Result};

/// Read access to the cells of one matrix row.
///
/// Cells stay as text; the extractor parses only the ones it scans.
pub trait RowCells {
    fn cell_count(&self) -> usize;
    fn cell(&self, j: usize) -> Option<&str>;
}

impl RowCells for csv::StringRecord {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, j: usize) -> Option<&str> {
        self.get(j)
    }
}

impl<S: AsRef<str>> RowCells for Vec<S> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, j: usize) -> Option<&str> {
        self.get(j).map(|s| s.as_ref())
    }
}

/// Streaming reader over the rows of a similarity matrix CSV.
///
/// Every physical line is one row, so a blank line is an empty row and row indices
/// stay aligned with line numbers. `\n` and `\r\n` endings are both accepted. No header
/// row is expected and rows may have any length.
pub struct SimilarityRows {
    path: PathBuf,
    reader: BufReader<File>,
    line: String,
    delimiter: u8,
}

pub fn open_similarity_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<SimilarityRows> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MtxError::io(path, e))?;
    Ok(SimilarityRows {
        path: path.to_path_buf(),
        reader: BufReader::new(file),
        line: String::new(),
        delimiter,
    })
}

impl SimilarityRows {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn split_line(&self) -> Result<csv::StringRecord> {
        let text = self.line.strip_suffix('\n').unwrap_or(&self.line);
        let text = text.strip_suffix('\r').unwrap_or(text);

        let mut record = csv::StringRecord::new();
        if text.is_empty() {
            return Ok(record);
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());
        rdr.read_record(&mut record)
            .map_err(|source| MtxError::Csv { path: self.path.clone(), source })?;
        Ok(record)
    }
}

impl Iterator for SimilarityRows {
    type Item = Result<csv::StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => None,
            Ok(_) => Some(self.split_line()),
            Err(e) => Some(Err(MtxError::io(&self.path, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_ragged_rows_without_header() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "x\n0.1,0.5\n\n0.2,0.9,0.3\n").unwrap();

        let rows: Vec<csv::StringRecord> = open_similarity_csv(f.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].cell_count(), 1);
        assert_eq!(rows[0].cell(0), Some("x"));
        assert_eq!(rows[2].cell_count(), 0);
        assert_eq!(rows[3].cell(1), Some("0.9"));
        assert_eq!(rows[3].cell(3), None);
    }

    #[test]
    fn crlf_endings_and_trailing_blank_line() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "1\r\n0.5,1\r\n\n").unwrap();

        let rows: Vec<csv::StringRecord> = open_similarity_csv(f.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].cell(1), Some("1"));
        assert_eq!(rows[2].cell_count(), 0);
    }

    #[test]
    fn last_line_without_newline() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "1\n\"0.5\",1").unwrap();

        let rows: Vec<csv::StringRecord> = open_similarity_csv(f.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cell(0), Some("0.5"));
    }

    #[test]
    fn honours_delimiter() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "1;2;3\n").unwrap();

        let mut rows = open_similarity_csv(f.path(), b';').unwrap();
        let first = rows.next().unwrap().unwrap();
        assert_eq!(first.cell_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_similarity_csv(dir.path().join("nope.csv"), b',').err().unwrap();
        assert!(matches!(err, MtxError::Io { .. }));
    }
}
