use stamp_model::{InvocationId, LabelTier, Labels};

/// One label together with the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    tier: LabelTier,
    key: String,
    value: String,
}

impl LabelEntry {
    pub fn new(tier: LabelTier, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tier,
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn tier(&self) -> LabelTier {
        self.tier
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Labels ordered by ascending precedence, with unique keys.
///
/// The first entry is the one evicted first when a budget has to be met.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    entries: Vec<LabelEntry>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending precedence order.
    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Plain key → value map.
    pub fn to_labels(&self) -> Labels {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }

    /// Append `entry` as the highest-precedence entry, replacing any entry with the same key.
    ///
    /// Returns the replaced entry.
    pub(crate) fn upsert(&mut self, entry: LabelEntry) -> Option<LabelEntry> {
        let replaced = self
            .entries
            .iter()
            .position(|e| e.key == entry.key)
            .map(|idx| self.entries.remove(idx));
        self.entries.push(entry);
        replaced
    }

    pub(crate) fn into_entries(self) -> Vec<LabelEntry> {
        self.entries
    }

    pub(crate) fn from_entries(entries: Vec<LabelEntry>) -> Self {
        Self { entries }
    }
}

/// Combine tiers of labels into one [`LabelSet`].
///
/// Tiers are applied in ascending precedence order (stable for equal tiers), each
/// key overwriting any earlier entry with the same name. Inside one tier the
/// entries are applied in iteration order, so later keys rank higher.
/// The result only depends on the input.
pub fn merge<'a, I>(tiers: I) -> LabelSet
where
    I: IntoIterator<Item = (LabelTier, &'a Labels)>,
{
    let mut tiers: Vec<_> = tiers.into_iter().collect();
    tiers.sort_by_key(|(tier, _)| *tier);

    let mut set = LabelSet::new();
    for (tier, labels) in tiers {
        for (k, v) in labels.iter() {
            set.upsert(LabelEntry::new(tier, k, v));
        }
    }
    set
}

/// Merge declared and caller labels with the invocation identifier on top.
///
/// The invocation label is applied last under `invocation_key`, so no lower tier
/// can suppress or alter it.
pub fn merge_with_invocation(
    declared: &Labels,
    caller: &Labels,
    invocation_key: &str,
    invocation: &InvocationId,
) -> LabelSet {
    let mut invocation_tier = Labels::new();
    invocation_tier.insert(invocation_key, invocation.as_str());

    merge([
        (LabelTier::Declared, declared),
        (LabelTier::Caller, caller),
        (LabelTier::Invocation, &invocation_tier),
    ])
}
