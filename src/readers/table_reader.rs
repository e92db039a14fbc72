use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::{ReaderBuilder, StringRecord, Trim};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// A CSV table held fully in memory: header plus untyped rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header, matched exactly after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub struct TableReader {
    use_mmap: bool,
}

impl TableReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a whole CSV file. The file is closed before this returns.
    pub fn read(&self, path: &Path) -> Result<RawTable> {
        let table = if self.use_mmap {
            self.read_mmap(path)?
        } else {
            self.read_buffered(path)?
        };

        debug!(
            path = %path.display(),
            rows = table.len(),
            mmap = self.use_mmap,
            "read raw table"
        );
        Ok(table)
    }

    fn read_buffered(&self, path: &Path) -> Result<RawTable> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        Self::parse(reader)
    }

    /// Read using memory-mapped I/O for large files
    fn read_mmap(&self, path: &Path) -> Result<RawTable> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse(&mmap[..])
    }

    /// Parse CSV content from any reader
    pub fn parse<R: Read>(input: R) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ProcessingError::InvalidFormat(
                "CSV input has no header row".to_string(),
            ));
        }

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(RawTable { headers, rows })
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "instant,dteday,season,cnt\n\
                          1,2011-01-01,1,985\n\
                          2,2011-01-02,1,801\n";

    #[test]
    fn test_parse_headers_and_rows() {
        let table = TableReader::parse(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("dteday"), Some(1));
        assert_eq!(table.column_index("hr"), None);
        assert_eq!(&table.rows[1][3], "801");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let table = TableReader::parse(" dteday , cnt \n 2011-01-01 , 985 \n".as_bytes()).unwrap();

        assert_eq!(table.column_index("cnt"), Some(1));
        assert_eq!(&table.rows[0][0], "2011-01-01");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(TableReader::parse("".as_bytes()).is_err());
    }

    #[test]
    fn test_buffered_and_mmap_agree() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", SAMPLE)?;

        let buffered = TableReader::new().read(file.path())?;
        let mapped = TableReader::with_mmap(true).read(file.path())?;

        assert_eq!(buffered.rows, mapped.rows);
        assert_eq!(buffered.headers, mapped.headers);
        Ok(())
    }
}
