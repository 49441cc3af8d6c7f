//! Streaming line reader for log and CSV files.
//!
//! Files are read one line at a time and never loaded whole. Bytes that are
//! not valid UTF-8 are replaced rather than rejected, since log files mix
//! encodings freely.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{DateChopError, Result};

/// Iterator over the lines of a reader, without line terminators.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
    path: PathBuf,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    /// Wrap a reader; `path` is only used in error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            buf: Vec::with_capacity(4096),
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(source) => Some(Err(DateChopError::Io {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

/// Open `path` for line-by-line reading.
pub fn read_lines(path: &Path) -> Result<Lines<BufReader<File>>> {
    let file = File::open(path).map_err(|source| DateChopError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Lines::new(BufReader::new(file), path))
}
