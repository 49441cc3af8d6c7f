//! Format directive vocabulary.
//!
//! A format template is a chrono strftime string restricted to the
//! directives in [`RULES`]. Each directive maps to a named capture class and
//! a fixed regular-expression fragment; [`translate`] is the only place where
//! a template is turned into a pattern.

use crate::error::{DateChopError, Result};

/// One date/time field placeholder inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `%B`, e.g. "January"
    FullMonthName,
    /// `%b`, e.g. "Jan"
    AbbrevMonthName,
    /// `%m`, 1-12
    Month,
    /// `%d`, 1-31
    Day,
    /// `%Y`, e.g. 2024
    Year4,
    /// `%y`, e.g. 24
    Year2,
    /// `%I`, 1-12
    Hour12,
    /// `%H`, 0-23
    Hour24,
    /// `%M`, 00-59
    Minute,
    /// `%S`, 00-59
    Second,
    /// `%.f`, a dot followed by digits
    Fraction,
    /// `%p`, am/pm
    Meridiem,
}

/// The calendar field a directive populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
    Meridiem,
}

/// A row of the directive table.
#[derive(Debug)]
pub struct Rule {
    pub directive: Directive,
    pub code: &'static str,
    pub field: Field,
    pub capture: &'static str,
    pub pattern: &'static str,
}

/// The directive table, indexed by `Directive as usize`.
pub const RULES: [Rule; 12] = [
    Rule {
        directive: Directive::FullMonthName,
        code: "%B",
        field: Field::Month,
        capture: "month_name",
        pattern: "january|february|march|april|may|june|july|august|september|october|november|december",
    },
    Rule {
        directive: Directive::AbbrevMonthName,
        code: "%b",
        field: Field::Month,
        capture: "month_name",
        pattern: "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec",
    },
    Rule {
        directive: Directive::Month,
        code: "%m",
        field: Field::Month,
        capture: "month",
        pattern: r"\d\d?",
    },
    Rule {
        directive: Directive::Day,
        code: "%d",
        field: Field::Day,
        capture: "day",
        pattern: r"\d\d?",
    },
    Rule {
        directive: Directive::Year4,
        code: "%Y",
        field: Field::Year,
        capture: "year",
        pattern: r"\d{4}",
    },
    Rule {
        directive: Directive::Year2,
        code: "%y",
        field: Field::Year,
        capture: "year",
        pattern: r"\d{2}",
    },
    Rule {
        directive: Directive::Hour12,
        code: "%I",
        field: Field::Hour,
        capture: "hour",
        pattern: "0?[1-9]|1[012]",
    },
    Rule {
        directive: Directive::Hour24,
        code: "%H",
        field: Field::Hour,
        capture: "hour",
        pattern: r"[01]?\d|2[0-3]",
    },
    Rule {
        directive: Directive::Minute,
        code: "%M",
        field: Field::Minute,
        capture: "minute",
        pattern: r"[0-5]\d",
    },
    Rule {
        directive: Directive::Second,
        code: "%S",
        field: Field::Second,
        capture: "second",
        pattern: r"[0-5]\d",
    },
    Rule {
        directive: Directive::Fraction,
        code: "%.f",
        field: Field::Fraction,
        capture: "fraction",
        pattern: r"\.\d+",
    },
    Rule {
        directive: Directive::Meridiem,
        code: "%p",
        field: Field::Meridiem,
        capture: "meridiem",
        pattern: "am|pm",
    },
];

impl Directive {
    /// The table row for this directive.
    pub fn rule(self) -> &'static Rule {
        &RULES[self as usize]
    }

    /// The strftime code, e.g. `%Y`.
    pub fn code(self) -> &'static str {
        self.rule().code
    }

    pub fn field(self) -> Field {
        self.rule().field
    }
}

/// A template broken into its directives, with the equivalent pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub directives: Vec<Directive>,
    pub pattern: String,
}

/// Translate a format template into its directive list and a
/// case-insensitive regular expression that finds text of that shape.
///
/// Directives become `(?P<capture>fragment)`; a capture name already used
/// earlier in the same template becomes a non-capturing group instead.
/// Every other character is a literal and is escaped. `%%` is a literal `%`.
///
/// # Examples
///
/// ```
/// use datechop_core::directive::{translate, Directive};
///
/// let t = translate("%Y/%m/%d").unwrap();
/// assert_eq!(t.directives, vec![Directive::Year4, Directive::Month, Directive::Day]);
/// assert_eq!(t.pattern, r"(?i)(?P<year>\d{4})/(?P<month>\d\d?)/(?P<day>\d\d?)");
/// ```
pub fn translate(template: &str) -> Result<Translation> {
    let invalid = |reason: String| DateChopError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };

    let mut directives = Vec::new();
    let mut captures: Vec<&'static str> = Vec::new();
    let mut pattern = String::from("(?i)");
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("%%") {
            pattern.push_str(&regex::escape("%"));
            rest = after;
            continue;
        }

        if c == '%' {
            let rule = RULES
                .iter()
                .find(|rule| rest.starts_with(rule.code))
                .ok_or_else(|| invalid(format!("unsupported directive at '{}'", rest)))?;

            let group = if captures.contains(&rule.capture) {
                format!("(?:{})", rule.pattern)
            } else {
                captures.push(rule.capture);
                format!("(?P<{}>{})", rule.capture, rule.pattern)
            };
            pattern.push_str(&group);

            directives.push(rule.directive);
            rest = &rest[rule.code.len()..];
        } else {
            let mut buf = [0u8; 4];
            pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            rest = &rest[c.len_utf8()..];
        }
    }

    if directives.is_empty() {
        return Err(invalid("template contains no date/time directives".to_string()));
    }

    Ok(Translation {
        directives,
        pattern,
    })
}
