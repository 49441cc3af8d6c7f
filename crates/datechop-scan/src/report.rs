//! Scan results: per-bucket counts for every predicate.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Counts for one bucket, in predicate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub timestamp: NaiveDateTime,
    pub counts: Vec<u64>,
}

/// The outcome of a scan.
///
/// Buckets are sorted by timestamp ascending. A bucket is present when at
/// least one non-blank line fell into it, even if no predicate matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    predicates: Vec<String>,
    buckets: Vec<BucketCounts>,
}

impl ScanReport {
    pub(crate) fn new(predicates: Vec<String>, tally: BTreeMap<NaiveDateTime, Vec<u64>>) -> Self {
        let buckets = tally
            .into_iter()
            .map(|(timestamp, counts)| BucketCounts { timestamp, counts })
            .collect();
        Self {
            predicates,
            buckets,
        }
    }

    /// Predicate labels, in the order their counts appear.
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn buckets(&self) -> &[BucketCounts] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Counts for the bucket starting at `key`, if any line fell into it.
    pub fn get(&self, key: NaiveDateTime) -> Option<&[u64]> {
        self.buckets
            .binary_search_by_key(&key, |bucket| bucket.timestamp)
            .ok()
            .map(|index| self.buckets[index].counts.as_slice())
    }

    /// Each bucket paired with `(predicate, count)` for every predicate.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDateTime, Vec<(&str, u64)>)> + '_ {
        self.buckets.iter().map(|bucket| {
            let counts = self
                .predicates
                .iter()
                .map(String::as_str)
                .zip(bucket.counts.iter().copied())
                .collect();
            (bucket.timestamp, counts)
        })
    }
}
