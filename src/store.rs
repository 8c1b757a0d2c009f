use crate::employees::{format_line, parse_line, Employee, FormatError, LINE_ENDING};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File name used when no other path is configured
pub const DEFAULT_FILE_NAME: &str = "employees.txt";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot store record: {0}")]
    Format(#[from] FormatError),
}

/// Append-only flat file of employee lines
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line to the backing file, creating it when absent.
    ///
    /// The line is formatted before the file is touched and written with a
    /// single call. The file is synced and closed before returning, so a
    /// following `read_all` sees the new record.
    pub fn append(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut line = format_line(employee)?;
        line.push_str(LINE_ENDING);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        log::info!("Appended employee {} to {}", employee.id, self.path.display());
        Ok(())
    }

    /// Starts a fresh scan of the backing file.
    ///
    /// A missing file is an empty store. Malformed lines are skipped by the
    /// returned iterator; only I/O failures surface as errors.
    pub fn read_all(&self) -> Result<Records, StoreError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Records {
                lines: Some(BufReader::new(file).split(b'\n')),
                line_number: 0,
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} does not exist yet", self.path.display());
                Ok(Records {
                    lines: None,
                    line_number: 0,
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Collects a full scan, stopping at the first I/O failure.
    pub fn load_all(&self) -> Result<Vec<Employee>, StoreError> {
        self.read_all()?.collect()
    }
}

/// One-shot iterator over the records of a single scan
pub struct Records {
    lines: Option<io::Split<BufReader<File>>>,
    line_number: u64,
}

impl Iterator for Records {
    type Item = Result<Employee, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.as_mut()?.next()? {
                Ok(line) => line,
                Err(error) => {
                    self.lines = None;
                    return Some(Err(error.into()));
                }
            };
            self.line_number += 1;

            match std::str::from_utf8(&line).ok().and_then(parse_line) {
                Some(employee) => return Some(Ok(employee)),
                None => log::debug!(
                    "Skipping malformed line {}: {:?}",
                    self.line_number,
                    String::from_utf8_lossy(&line)
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> RecordStore {
        let path = std::env::temp_dir().join(format!(
            "employee_records_store_{}_{}.txt",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_file(&path);
        RecordStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert_eq!(store.read_all().unwrap().count(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_then_read() {
        let store = temp_store("append");
        store
            .append(&Employee::new(7, "Bob", "Clerk", 50000.0))
            .unwrap();
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.trim_end(), "7,Bob,Clerk,50000.0");
        assert!(contents.ends_with('\n'));

        let records = store.load_all().unwrap();
        assert_eq!(records, vec![Employee::new(7, "Bob", "Clerk", 50000.0)]);
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_skips_malformed_lines() {
        let store = temp_store("malformed");
        std::fs::write(
            store.path(),
            "1,Ann,Engineer,100.0\n5,Alice,Engineer\nx,Bad,Id,1.0\n\n2,Ben,Tester,200.5\n3,Cy,Ops,abc\n",
        )
        .unwrap();
        let records = store.load_all().unwrap();
        assert_eq!(
            records,
            vec![
                Employee::new(1, "Ann", "Engineer", 100.0),
                Employee::new(2, "Ben", "Tester", 200.5),
            ]
        );
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_skips_invalid_utf8() {
        let store = temp_store("utf8");
        std::fs::write(store.path(), b"1,\xff\xfe,Clerk,1.0\n2,Ben,Tester,2.0\n").unwrap();
        let records = store.load_all().unwrap();
        assert_eq!(records, vec![Employee::new(2, "Ben", "Tester", 2.0)]);
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_unbalanced_quote_spoils_only_its_line() {
        let store = temp_store("quote");
        std::fs::write(
            store.path(),
            "1,\"Ann,Clerk,1.0\n2,Ben,Tester,2.0\n3,Cy,Ops,3.0\n",
        )
        .unwrap();
        let records = store.load_all().unwrap();
        assert_eq!(
            records,
            vec![
                Employee::new(2, "Ben", "Tester", 2.0),
                Employee::new(3, "Cy", "Ops", 3.0),
            ]
        );
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_append_rejects_line_break() {
        let store = temp_store("line_break");
        let result = store.append(&Employee::new(1, "A\nB", "Clerk", 1.0));
        assert!(matches!(
            result,
            Err(StoreError::Format(FormatError::LineBreak("name")))
        ));
        assert!(!store.path().exists());

        store.append(&Employee::new(2, " Ben ", "Clerk", 2.0)).unwrap();
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(
            store.load_all().unwrap(),
            vec![Employee::new(2, " Ben ", "Clerk", 2.0)]
        );
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_read_all_is_a_fresh_scan() {
        let store = temp_store("rescan");
        store.append(&Employee::new(1, "Ann", "Clerk", 1.0)).unwrap();
        assert_eq!(store.read_all().unwrap().count(), 1);
        store.append(&Employee::new(2, "Ben", "Clerk", 2.0)).unwrap();
        let ids: Vec<_> = store.read_all().unwrap().map(|e| e.unwrap().id).collect();
        assert_eq!(ids, vec![1, 2]);
        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn test_default_path() {
        assert_eq!(RecordStore::default().path(), Path::new("employees.txt"));
    }

    #[test]
    fn test_append_to_directory_fails() {
        let store = RecordStore::new(std::env::temp_dir());
        let result = store.append(&Employee::new(1, "Ann", "Clerk", 1.0));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
