//! The fixed, ordered list of templates tried during format guessing.
//!
//! Guessing returns the first template whose pattern matches, so order is
//! the whole disambiguation policy: `01/02/03` always resolves to
//! `%m/%d/%y` because it is listed before `%y/%m/%d`.

use crate::error::Result;
use crate::parse::FormatSpec;

/// Date-only templates, most specific first.
pub const DATE_TEMPLATES: &[&str] = &[
    "%b %d %Y", // Aug 15 2009
    "%b %d",    // Sep 21 (syslog)
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%y/%m/%d",
    "%y-%m-%d",
    "%B %d %Y", // August 15 2009
    "%B %d",
];

/// Time-only templates, most specific first.
pub const TIME_TEMPLATES: &[&str] = &[
    "%I:%M:%S%.f %p",
    "%H:%M:%S%.f",
    "%I:%M:%S %p",
    "%H:%M:%S",
    "%I:%M %p",
    "%H:%M",
];

/// Every candidate template in priority order: each date joined with each
/// time (date-major), then dates alone, then times alone.
pub fn candidate_templates() -> Vec<String> {
    let combined = DATE_TEMPLATES
        .iter()
        .flat_map(|date| TIME_TEMPLATES.iter().map(move |time| format!("{date} {time}")));

    combined
        .chain(DATE_TEMPLATES.iter().map(|date| date.to_string()))
        .chain(TIME_TEMPLATES.iter().map(|time| time.to_string()))
        .collect()
}

/// The compiled candidate list.
///
/// Built once, explicitly, and never mutated; a [`crate::FormatEngine`] owns
/// one.
#[derive(Debug, Clone)]
pub struct CandidateFormats {
    specs: Vec<FormatSpec>,
}

impl CandidateFormats {
    /// Compile every candidate template in priority order.
    pub fn build() -> Result<Self> {
        let specs = candidate_templates()
            .iter()
            .map(|template| FormatSpec::new(template))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { specs })
    }

    /// Compile a custom ordered list.
    pub fn from_templates<I, S>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specs = templates
            .into_iter()
            .map(|template| FormatSpec::new(template.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { specs })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatSpec> {
        self.specs.iter()
    }

    /// Templates in priority order.
    pub fn templates(&self) -> Vec<&str> {
        self.specs.iter().map(FormatSpec::template).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The first candidate whose pattern occurs anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<&FormatSpec> {
        self.specs.iter().find(|spec| spec.is_match(text))
    }
}

impl<'a> IntoIterator for &'a CandidateFormats {
    type Item = &'a FormatSpec;
    type IntoIter = std::slice::Iter<'a, FormatSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
