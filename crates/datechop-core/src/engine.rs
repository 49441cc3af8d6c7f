//! The format engine: guessing, parsing and bucketing behind one value.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::bucket::bucket;
use crate::candidates::CandidateFormats;
use crate::error::{DateChopError, Result, Unrecognized};
use crate::lines::read_lines;
use crate::models::Resolution;
use crate::parse::FormatSpec;

/// Owns the compiled candidate list and answers format questions against it.
///
/// Construction compiles every candidate pattern, so build one engine and
/// share it by reference.
#[derive(Debug, Clone)]
pub struct FormatEngine {
    candidates: CandidateFormats,
}

impl FormatEngine {
    /// Build an engine over the standard candidate list.
    pub fn new() -> Result<Self> {
        Ok(Self::with_candidates(CandidateFormats::build()?))
    }

    /// Build an engine over a caller-supplied candidate list.
    pub fn with_candidates(candidates: CandidateFormats) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &CandidateFormats {
        &self.candidates
    }

    /// Guess the format of a date/time found anywhere in `text`.
    ///
    /// Candidates are tried in their fixed order and the first one whose
    /// pattern occurs in `text` wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use datechop_core::FormatEngine;
    ///
    /// let engine = FormatEngine::new().unwrap();
    /// let spec = engine.guess("01/28/10 1:25:49 PM").unwrap();
    /// assert_eq!(spec.template(), "%m/%d/%y %I:%M:%S %p");
    /// ```
    pub fn guess(&self, text: &str) -> Result<&FormatSpec> {
        self.candidates
            .first_match(text)
            .ok_or_else(|| DateChopError::DateFormatUnknown(Unrecognized::Text(text.to_string())))
    }

    /// Guess the format from the first line of `path` that contains a
    /// recognizable date/time. Lines without one are skipped.
    pub fn guess_from_file(&self, path: &Path) -> Result<&FormatSpec> {
        for (index, line) in read_lines(path)?.enumerate() {
            let line = line?;
            if let Some(spec) = self.candidates.first_match(&line) {
                debug!(
                    path = %path.display(),
                    line = index + 1,
                    template = spec.template(),
                    "Guessed date format"
                );
                return Ok(spec);
            }
        }

        Err(DateChopError::DateFormatUnknown(Unrecognized::File(
            path.to_path_buf(),
        )))
    }

    /// Guess the format from the first of `values` that contains a
    /// recognizable date/time, e.g. the cells of one CSV column.
    pub fn guess_from_values<I, S>(&self, values: I) -> Option<&FormatSpec>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .find_map(|value| self.candidates.first_match(value.as_ref()))
    }

    /// Parse `text` with `template`, tolerating trailing data.
    ///
    /// Templates from the candidate list reuse their compiled form.
    ///
    /// # Arguments
    ///
    /// * `text` - Text starting with a timestamp, e.g. a log line
    /// * `template` - A strftime template, typically one returned by [`Self::guess`]
    ///
    /// # Returns
    ///
    /// The parsed timestamp, `DateParseFailure` if `text` does not conform,
    /// or `InvalidTemplate` if `template` cannot be compiled.
    pub fn parse(&self, text: &str, template: &str) -> Result<NaiveDateTime> {
        match self.candidates.iter().find(|spec| spec.template() == template) {
            Some(spec) => spec.parse(text),
            None => FormatSpec::new(template)?.parse(text),
        }
    }

    /// Truncate `timestamp` to `resolution`. See [`crate::bucket::bucket`].
    pub fn bucket(&self, timestamp: NaiveDateTime, resolution: Resolution) -> Result<NaiveDateTime> {
        bucket(timestamp, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn engine() -> FormatEngine {
        FormatEngine::new().unwrap()
    }

    fn write_tempfile(data: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in data.lines() {
            writeln!(file, "{}", line.trim_start()).unwrap();
        }
        file
    }

    #[test]
    fn guess_known_formats() {
        let cases = [
            ("2010/01/28 12:34:56 PM", "%Y/%m/%d %I:%M:%S %p"),
            ("01/28/10 1:25:49 PM", "%m/%d/%y %I:%M:%S %p"),
            ("01/28/2010 13:25:49.123", "%m/%d/%Y %H:%M:%S%.f"),
            ("2010/01/28 13:25:49", "%Y/%m/%d %H:%M:%S"),
            ("Aug 15 2009 15:24", "%b %d %Y %H:%M"),
            ("3-14-15 9:26:53.589", "%m-%d-%y %H:%M:%S%.f"),
            ("Sep 21 18:10:38 mailhost", "%b %d %H:%M:%S"),
            ("August 15 2009 15:24", "%B %d %Y %H:%M"),
            ("2010-08-28", "%Y-%m-%d"),
            ("elapsed 13:25:49", "%H:%M:%S"),
        ];
        let engine = engine();
        for (text, expected) in cases {
            assert_eq!(engine.guess(text).unwrap().template(), expected, "{}", text);
        }
    }

    #[test]
    fn guess_tolerates_leading_labels() {
        let engine = engine();
        let spec = engine.guess("[INFO] (worker-3) 2010/08/30 13:57:14 ok").unwrap();
        assert_eq!(spec.template(), "%Y/%m/%d %H:%M:%S");
    }

    #[test]
    fn guess_priority_is_deterministic() {
        let engine = engine();
        for _ in 0..3 {
            assert_eq!(engine.guess("01/02/03").unwrap().template(), "%m/%d/%y");
        }
    }

    #[test]
    fn guess_without_date_fails() {
        let engine = engine();
        let result = engine.guess("no date anywhere in this text");
        match result {
            Err(DateChopError::DateFormatUnknown(Unrecognized::Text(text))) => {
                assert_eq!(text, "no date anywhere in this text");
            }
            other => panic!("Expected DateFormatUnknown, got {:?}", other),
        }
    }

    #[test]
    fn guess_from_file_formats() {
        let cases = [
            ("2010/01/28 12:34:56 PM", "%Y/%m/%d %I:%M:%S %p"),
            ("01/28/10 1:25:49 PM", "%m/%d/%y %I:%M:%S %p"),
            ("01/28/2010 13:25:49.123", "%m/%d/%Y %H:%M:%S%.f"),
            ("2010/08/30 13:57:14 blah", "%Y/%m/%d %H:%M:%S"),
            ("8/30/2010 13:57 blah", "%m/%d/%Y %H:%M"),
            ("8/30/2010 1:57:00 PM blah", "%m/%d/%Y %I:%M:%S %p"),
        ];
        let engine = engine();
        for (data, expected) in cases {
            let file = write_tempfile(data);
            let spec = engine.guess_from_file(file.path()).unwrap();
            assert_eq!(spec.template(), expected, "{}", data);
        }
    }

    #[test]
    fn guess_from_file_skips_lines_without_dates() {
        let file = write_tempfile(
            "Log opened by worker 3
             --------------------
             2010/08/30 13:57:14 Pushing up the daisies",
        );
        let engine = engine();
        let spec = engine.guess_from_file(file.path()).unwrap();
        assert_eq!(spec.template(), "%Y/%m/%d %H:%M:%S");
    }

    #[test]
    fn guess_from_file_without_dates_fails() {
        let file = write_tempfile("Data file without a date");
        let engine = engine();
        let result = engine.guess_from_file(file.path());
        match result {
            Err(DateChopError::DateFormatUnknown(Unrecognized::File(path))) => {
                assert_eq!(path, file.path());
            }
            other => panic!("Expected DateFormatUnknown, got {:?}", other),
        }
    }

    #[test]
    fn guess_from_values_skips_headers() {
        let column = ["Eastern Standard Time", "2010/05/19 13:45:50", "2010/05/19 13:45:55"];
        let engine = engine();
        let spec = engine.guess_from_values(column).unwrap();
        assert_eq!(spec.template(), "%Y/%m/%d %H:%M:%S");
        assert!(engine.guess_from_values(["419", "315"]).is_none());
    }

    #[test]
    fn parse_with_candidate_and_custom_template() {
        let engine = engine();
        let expected = NaiveDate::from_ymd_opt(2010, 8, 30)
            .unwrap()
            .and_hms_opt(13, 57, 14)
            .unwrap();
        assert_eq!(
            engine.parse("2010/08/30 13:57:14", "%Y/%m/%d %H:%M:%S").unwrap(),
            expected
        );
        assert_eq!(
            engine.parse("30.08.2010 13:57:14", "%d.%m.%Y %H:%M:%S").unwrap(),
            expected
        );
        assert!(engine.parse("30.08.2010", "%d.%m.%Q").is_err());
    }

    #[test]
    fn guessed_format_round_trips() {
        let ts = NaiveDate::from_ymd_opt(2010, 8, 30)
            .unwrap()
            .and_hms_milli_opt(13, 57, 14, 250)
            .unwrap();
        let engine = engine();

        for spec in engine.candidates() {
            let text = ts.format(spec.template()).to_string();
            let parsed = spec.parse(&text).unwrap_or_else(|e| panic!("{}: {}", text, e));
            assert_eq!(parsed, expected_precision(ts, spec), "{}", spec.template());
        }
    }

    /// `ts` reduced to the fields `spec` carries; missing fields take the
    /// parse defaults.
    fn expected_precision(ts: NaiveDateTime, spec: &FormatSpec) -> NaiveDateTime {
        use crate::directive::Field;
        use crate::parse::DEFAULT_YEAR;
        use chrono::{Datelike, Timelike};

        let has = |field| spec.has_field(field);
        let date = NaiveDate::from_ymd_opt(
            if has(Field::Year) { ts.year() } else { DEFAULT_YEAR },
            if has(Field::Month) { ts.month() } else { 1 },
            if has(Field::Day) { ts.day() } else { 1 },
        )
        .unwrap();
        date.and_hms_nano_opt(
            if has(Field::Hour) { ts.hour() } else { 0 },
            if has(Field::Minute) { ts.minute() } else { 0 },
            if has(Field::Second) { ts.second() } else { 0 },
            if has(Field::Fraction) { ts.nanosecond() } else { 0 },
        )
        .unwrap()
    }
}
