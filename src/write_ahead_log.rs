//! Append-only text log holding every `SET` ever acknowledged.
//!
//! One record per line, `SET <key> <value>\n`. Records are only ever appended;
//! existing bytes are never rewritten. Every append is flushed and fsynced
//! before it returns.
//!
//! Replay has no corruption detection beyond the line shape: a record that was
//! cut short by a crash but still looks like `SET k v` is read back as-is.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    record::Record,
};

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "data.db";

pub(crate) struct WriteAheadLog {
    path: PathBuf,
    /// Opened on the first append and kept for the rest of the session.
    file: Option<File>,
}

impl WriteAheadLog {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn with_handle(path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            path: path.into(),
            file: Some(file),
        }
    }

    /// Appends one record and forces it to stable storage.
    ///
    /// When this returns `Ok` the record survives a crash. On `Err` the caller
    /// must treat the write as not having happened.
    pub(crate) fn append(&mut self, record: &Record) -> Result<()> {
        let line = record.encode();

        let file = match self.file.take() {
            Some(file) => file,
            None => open_for_append(&self.path).map_err(|e| Error::storage(&self.path, e))?,
        };
        let file = self.file.insert(file);

        if let Err(e) = write_durable(file, line.as_bytes()) {
            // The write may have stopped partway. Reopen next time so the torn
            // tail gets terminated before another record lands on it.
            self.file = None;
            return Err(Error::storage(&self.path, e));
        }

        debug!(key = record.key(), bytes = line.len(), "appended record");
        Ok(())
    }
}

fn write_durable(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

/// Opens (creating if needed) the log for appending.
///
/// If the file ends in a torn line, a newline is written first so the next
/// record starts on a line of its own.
fn open_for_append(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)?;

    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;

        if last[0] != b'\n' {
            debug!(path = %path.display(), "terminating torn trailing line");
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
    }

    Ok(file)
}

/// Opens the log at `path` for replay.
///
/// A missing file is an empty log, not an error.
pub(crate) fn replay(path: &Path) -> Result<Replay> {
    let reader = match File::open(path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no log file, starting empty");
            None
        }
        Err(e) => return Err(Error::storage(path, e)),
    };

    Ok(Replay {
        path: path.to_owned(),
        reader,
        line: Vec::new(),
        line_number: 0,
        skipped: 0,
    })
}

/// Iterator over the well-formed records of a log, in write order.
///
/// Lines that are blank, not UTF-8, or not shaped like a record are skipped.
/// Consumed once; it cannot be rewound.
pub(crate) struct Replay {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    line: Vec<u8>,
    line_number: u64,
    skipped: u64,
}

impl Replay {
    /// Number of lines skipped so far.
    pub(crate) fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for Replay {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        loop {
            self.line.clear();
            match reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.reader = None;
                    return Some(Err(Error::storage(&self.path, e)));
                }
            }
            self.line_number += 1;

            if self.line.last() == Some(&b'\n') {
                self.line.pop();
            }

            match std::str::from_utf8(&self.line).ok().and_then(Record::decode) {
                Some(record) => return Some(Ok(record)),
                None => {
                    self.skipped += 1;
                    debug!(line = self.line_number, "skipping malformed log line");
                }
            }
        }
    }
}
