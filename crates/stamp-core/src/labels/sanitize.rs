use stamp_model::LabelTier;
use tracing::{debug, warn};

use crate::{
    labels::{LabelEntry, LabelPolicy, LabelSet},
    metrics::{Adjustment, MetricsBackend},
};

/// Returns `true` for characters allowed in a sanitized key or value.
#[inline]
pub fn is_label_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-')
}

/// Counters of everything the sanitizer changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub rewritten: u64,
    pub truncated: u64,
    pub collided: u64,
    pub dropped: u64,
    /// Entries skipped because their key was empty.
    pub empty_keys: u64,
}

impl SanitizeReport {
    /// Returns `true` if the input already satisfied the policy.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// Forward non-zero counters to a metrics backend.
    pub fn record(&self, metrics: &dyn MetricsBackend) {
        for (kind, count) in [
            (Adjustment::Rewritten, self.rewritten),
            (Adjustment::Truncated, self.truncated),
            (Adjustment::Collided, self.collided),
            (Adjustment::Dropped, self.dropped),
            (Adjustment::EmptyKey, self.empty_keys),
        ] {
            if count > 0 {
                metrics.record_label_adjustments(kind, count);
            }
        }
    }
}

/// Normalizes a [`LabelSet`] against the remote label constraints.
///
/// Per entry, in ascending precedence:
/// 0. skip entries with an empty key;
/// 1. lower-case key and value;
/// 2. replace anything outside `[a-z0-9_-]` with `_`;
/// 3. truncate key and value to `max_len`;
/// 4. on a sanitized-key collision the higher-precedence entry wins;
/// 5. evict lowest-precedence entries beyond `max_entries`, never the invocation entry.
///
/// Sanitizing twice yields the same set as sanitizing once.
#[derive(Debug, Clone)]
pub struct LabelSanitizer {
    max_len: usize,
    max_entries: usize,
}

impl LabelSanitizer {
    pub fn new(policy: &LabelPolicy) -> Self {
        Self {
            max_len: policy.max_len,
            max_entries: policy.max_entries,
        }
    }

    pub fn sanitize(&self, set: &LabelSet) -> LabelSet {
        self.sanitize_with_report(set).0
    }

    pub fn sanitize_with_report(&self, set: &LabelSet) -> (LabelSet, SanitizeReport) {
        let mut report = SanitizeReport::default();
        let mut out = LabelSet::new();

        for entry in set.entries() {
            if entry.key().is_empty() {
                report.empty_keys += 1;
                debug!(tier = %entry.tier(), value = entry.value(), "label with empty key skipped");
                continue;
            }
            let key = self.normalize(entry.key(), &mut report);
            let value = self.normalize(entry.value(), &mut report);

            if key != entry.key() || value != entry.value() {
                debug!(
                    tier = %entry.tier(),
                    key = entry.key(),
                    sanitized = %key,
                    "label normalized",
                );
            }
            if let Some(prev) = out.upsert(LabelEntry::new(entry.tier(), key, value)) {
                report.collided += 1;
                debug!(
                    tier = %prev.tier(),
                    key = prev.key(),
                    "label shadowed by higher-precedence entry after sanitization",
                );
            }
        }

        let out = self.evict(out, &mut report);
        (out, report)
    }

    fn normalize(&self, raw: &str, report: &mut SanitizeReport) -> String {
        let mut out: String = raw
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if is_label_char(c) { c } else { '_' })
            .collect();
        if out != raw {
            report.rewritten += 1;
        }
        // `out` is ASCII here, byte length equals char count.
        if out.len() > self.max_len {
            out.truncate(self.max_len);
            report.truncated += 1;
        }
        out
    }

    fn evict(&self, set: LabelSet, report: &mut SanitizeReport) -> LabelSet {
        let excess = set.len().saturating_sub(self.max_entries);
        if excess == 0 {
            return set;
        }

        let mut to_drop = excess;
        let kept: Vec<LabelEntry> = set
            .into_entries()
            .into_iter()
            .filter(|e| {
                if to_drop > 0 && e.tier() != LabelTier::Invocation {
                    to_drop -= 1;
                    debug!(tier = %e.tier(), key = e.key(), "label dropped by entry budget");
                    false
                } else {
                    true
                }
            })
            .collect();

        let dropped = (excess - to_drop) as u64;
        report.dropped += dropped;
        warn!(
            dropped,
            max_entries = self.max_entries,
            "label budget exceeded; lowest-precedence labels dropped",
        );
        LabelSet::from_entries(kept)
    }
}

impl Default for LabelSanitizer {
    fn default() -> Self {
        Self::new(&LabelPolicy::default())
    }
}
