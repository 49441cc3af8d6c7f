//! The line scanner.
//!
//! Every non-blank line is attributed to a bucket. A line that starts with
//! a timestamp in the file's format opens a new bucket; any other line
//! inherits the bucket of the last timestamped line before it, so multi-line
//! records are counted where they began.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use datechop_core::lines::read_lines;
use datechop_core::{DateChopError, FormatEngine, FormatSpec, Resolution, date_chop};
use tracing::{debug, trace};

use crate::error::Result;
use crate::options::ScanOptions;
use crate::predicate::Predicate;
use crate::report::ScanReport;

/// Scans files or lines and counts predicate matches per bucket.
#[derive(Debug)]
pub struct Scanner<'e> {
    engine: &'e FormatEngine,
    options: ScanOptions,
    predicates: Vec<Predicate>,
    format: Option<FormatSpec>,
}

/// What happened to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Blank,
    Stamped,
    CarriedForward,
}

/// Running state for one input: the bucket subsequent lines fall into.
struct Cursor {
    current: NaiveDateTime,
}

impl Cursor {
    /// Lines before the first timestamp land in the epoch-zero bucket.
    fn new() -> Self {
        Self {
            current: NaiveDateTime::default(),
        }
    }
}

type Tally = BTreeMap<NaiveDateTime, Vec<u64>>;

impl<'e> Scanner<'e> {
    /// Compile `predicates` according to `options.match_mode` and, when
    /// `options.format` is set, the fixed template.
    pub fn new<I, S>(engine: &'e FormatEngine, options: ScanOptions, predicates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let predicates = predicates
            .into_iter()
            .map(|p| Predicate::compile(p.as_ref(), options.match_mode))
            .collect::<Result<Vec<_>>>()?;
        let format = options
            .format
            .as_deref()
            .map(FormatSpec::new)
            .transpose()?;

        Ok(Self {
            engine,
            options,
            predicates,
            format,
        })
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Scan `files` in order and merge their buckets into one report.
    ///
    /// Each file gets its own format (guessed from its first dated line
    /// unless a fixed format is configured) and its own carry-forward state.
    /// A file in which no format can be guessed fails the scan.
    pub fn scan<I, P>(&self, files: I) -> Result<ScanReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut tally = Tally::new();
        for path in files {
            self.scan_file(path.as_ref(), &mut tally)?;
        }
        Ok(self.report(tally))
    }

    /// Scan in-memory lines that share a caller-resolved `format`.
    pub fn scan_lines<I, S>(&self, format: &FormatSpec, lines: I) -> Result<ScanReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Tally::new();
        let mut cursor = Cursor::new();
        for line in lines {
            self.record(format, &mut cursor, line.as_ref(), &mut tally)?;
        }
        Ok(self.report(tally))
    }

    fn scan_file(&self, path: &Path, tally: &mut Tally) -> Result<()> {
        let format = match &self.format {
            Some(format) => format,
            None => self.engine.guess_from_file(path)?,
        };
        debug!(path = %path.display(), template = format.template(), "Scanning file");

        let mut cursor = Cursor::new();
        let (mut stamped, mut carried) = (0usize, 0usize);
        for line in read_lines(path)? {
            match self.record(format, &mut cursor, &line?, tally)? {
                LineOutcome::Stamped => stamped += 1,
                LineOutcome::CarriedForward => carried += 1,
                LineOutcome::Blank => {}
            }
        }

        debug!(path = %path.display(), stamped, carried, "Finished file");
        Ok(())
    }

    fn record(
        &self,
        format: &FormatSpec,
        cursor: &mut Cursor,
        line: &str,
        tally: &mut Tally,
    ) -> Result<LineOutcome> {
        if line.trim().is_empty() {
            return Ok(LineOutcome::Blank);
        }

        let outcome = match date_chop(line, format, &self.options.shift, self.options.resolution) {
            Ok(key) => {
                cursor.current = key;
                LineOutcome::Stamped
            }
            Err(DateChopError::DateParseFailure { .. }) => {
                trace!(bucket = %cursor.current, line, "Carrying timestamp forward");
                LineOutcome::CarriedForward
            }
            Err(err) => return Err(err.into()),
        };

        let counts = tally
            .entry(cursor.current)
            .or_insert_with(|| vec![0; self.predicates.len()]);
        for (count, predicate) in counts.iter_mut().zip(&self.predicates) {
            if predicate.matches(line) {
                *count += 1;
            }
        }
        Ok(outcome)
    }

    fn report(&self, tally: Tally) -> ScanReport {
        let labels = self
            .predicates
            .iter()
            .map(|p| p.label().to_string())
            .collect();
        ScanReport::new(labels, tally)
    }
}

/// Scan `files` for literal `predicates` at `resolution`, guessing each
/// file's format.
pub fn scan<P, S>(files: &[P], predicates: &[S], resolution: Resolution) -> Result<ScanReport>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let engine = FormatEngine::new()?;
    let options = ScanOptions::default().with_resolution(resolution);
    Scanner::new(&engine, options, predicates)?.scan(files)
}
