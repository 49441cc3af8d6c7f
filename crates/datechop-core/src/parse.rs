//! Tolerant parsing against a known format template.
//!
//! Parsing is strict except for one allowance: when the text matches the
//! template but has unconverted data left over, exactly that many trailing
//! characters are dropped and the parse is retried once.

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, ParseError};
use regex::Regex;

use crate::directive::{Directive, Field, translate};
use crate::error::{DateChopError, Result};

/// Year used when a template carries no year, as strptime does.
pub const DEFAULT_YEAR: i32 = 1900;

/// Smallest two-digit year read as 19xx. `69` is 1969, `68` is 2068.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// A format template paired with the compiled pattern that finds text of
/// that shape.
///
/// The pattern is derived from the template by [`translate`], never written
/// by hand.
#[derive(Debug, Clone)]
pub struct FormatSpec {
    template: String,
    directives: Vec<Directive>,
    pattern: Regex,
}

impl FormatSpec {
    /// Compile a template.
    ///
    /// # Examples
    ///
    /// ```
    /// use datechop_core::FormatSpec;
    ///
    /// let spec = FormatSpec::new("%Y/%m/%d %H:%M:%S").unwrap();
    /// assert!(spec.is_match("[INFO] 2010/08/30 13:57:14 started"));
    /// ```
    pub fn new(template: &str) -> Result<Self> {
        let translation = translate(template)?;
        let pattern = Regex::new(&translation.pattern).map_err(|e| {
            DateChopError::InvalidTemplate {
                template: template.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            template: template.to_string(),
            directives: translation.directives,
            pattern,
        })
    }

    /// The strftime-compatible template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Whether text of this shape occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Whether the template populates `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.directives.iter().any(|d| d.field() == field)
    }

    /// Parse `text`, which must start with a timestamp in this format.
    ///
    /// Trailing characters after the timestamp are tolerated: if the strict
    /// parse fails only because data remains unconverted, that many
    /// characters are retracted and the parse is retried once. Leading
    /// whitespace is not tolerated unless the template itself starts with
    /// whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use datechop_core::FormatSpec;
    ///
    /// let spec = FormatSpec::new("%Y/%m/%d").unwrap();
    /// let clean = spec.parse("2010/08/28").unwrap();
    /// let noisy = spec.parse("2010/08/28 extra stuff").unwrap();
    /// assert_eq!(clean, noisy);
    /// ```
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime> {
        if text.starts_with(char::is_whitespace) && !self.template.starts_with(char::is_whitespace)
        {
            return Err(self.failure(text, "leading whitespace before timestamp"));
        }

        match self.parse_strict(text) {
            Ok(timestamp) => Ok(timestamp),
            Err(err) if err.kind() == ParseErrorKind::TooLong => {
                let unconverted = self.unconverted_len(text)?;
                let clean = &text[..text.len() - unconverted];
                self.parse_strict(clean)
                    .map_err(|retry_err| self.failure(text, retry_err))
            }
            Err(err) => Err(self.failure(text, err)),
        }
    }

    fn parse_strict(&self, text: &str) -> std::result::Result<NaiveDateTime, ParseError> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.template))?;
        self.resolve(parsed)
    }

    /// Length in bytes of the data left over after the template matched.
    fn unconverted_len(&self, text: &str) -> Result<usize> {
        let mut parsed = Parsed::new();
        format::parse_and_remainder(&mut parsed, text, StrftimeItems::new(&self.template))
            .map(str::len)
            .map_err(|err| self.failure(text, err))
    }

    /// Fill in fields the template does not carry and build the timestamp.
    fn resolve(&self, mut parsed: Parsed) -> std::result::Result<NaiveDateTime, ParseError> {
        if !self.has_field(Field::Year) {
            parsed.set_year(i64::from(DEFAULT_YEAR))?;
        } else if let Some(short) = parsed.year_mod_100() {
            let century = if short >= TWO_DIGIT_YEAR_PIVOT { 19 } else { 20 };
            parsed.set_year_div_100(century)?;
        }
        if !self.has_field(Field::Month) {
            parsed.set_month(1)?;
        }
        if !self.has_field(Field::Day) {
            parsed.set_day(1)?;
        }
        if !self.has_field(Field::Hour) {
            parsed.set_hour(0)?;
        } else if !self.has_field(Field::Meridiem) && self.directives.contains(&Directive::Hour12)
        {
            parsed.set_ampm(false)?;
        }
        if !self.has_field(Field::Minute) {
            parsed.set_minute(0)?;
        }

        let date = parsed.to_naive_date()?;
        let time = parsed.to_naive_time()?;
        Ok(NaiveDateTime::new(date, time))
    }

    fn failure(&self, text: &str, reason: impl std::fmt::Display) -> DateChopError {
        DateChopError::DateParseFailure {
            text: text.to_string(),
            template: self.template.clone(),
            reason: reason.to_string(),
        }
    }
}

impl PartialEq for FormatSpec {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for FormatSpec {}

impl std::fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

/// Parse `text` with `template`, tolerating trailing data.
///
/// Compiles the template on every call; hold a [`FormatSpec`] to parse many
/// lines with the same format.
pub fn parse(text: &str, template: &str) -> Result<NaiveDateTime> {
    FormatSpec::new(template)?.parse(text)
}
