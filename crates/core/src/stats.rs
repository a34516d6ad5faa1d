use crate::model::SkipReason;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Counters of the index-build phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub files_seen: usize,
    pub files_indexed: usize,
    pub files_skipped: BTreeMap<SkipReason, usize>,
}

impl IndexStats {
    pub fn skip(&mut self, reason: SkipReason) {
        *self.files_skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn merge(mut self, other: IndexStats) -> Self {
        self.files_seen += other.files_seen;
        self.files_indexed += other.files_indexed;
        merge_skips(&mut self.files_skipped, other.files_skipped);
        self
    }
}

/// Counters of the extraction phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub files_seen: usize,
    pub files_emitted: usize,
    pub files_skipped: BTreeMap<SkipReason, usize>,
    /// Methods seen inside classes whose name could be resolved.
    pub methods_total: usize,
    /// Methods with at least one non-empty piece of documentation text.
    pub methods_with_docs: usize,
    pub methods_emitted: usize,
    /// Return or parameter types that could not be resolved.
    pub unresolved_types: usize,
}

impl ExtractStats {
    pub fn skip(&mut self, reason: SkipReason) {
        *self.files_skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skipped(&self) -> usize {
        self.files_skipped.values().sum()
    }

    pub fn merge(mut self, other: ExtractStats) -> Self {
        self.files_seen += other.files_seen;
        self.files_emitted += other.files_emitted;
        merge_skips(&mut self.files_skipped, other.files_skipped);
        self.methods_total += other.methods_total;
        self.methods_with_docs += other.methods_with_docs;
        self.methods_emitted += other.methods_emitted;
        self.unresolved_types += other.unresolved_types;
        self
    }
}

fn merge_skips(into: &mut BTreeMap<SkipReason, usize>, from: BTreeMap<SkipReason, usize>) {
    for (reason, count) in from {
        *into.entry(reason).or_insert(0) += count;
    }
}

impl fmt::Display for ExtractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files: {} seen, {} emitted, {} skipped; methods: {} seen, {} documented, {} emitted; {} unresolved types",
            self.files_seen,
            self.files_emitted,
            self.skipped(),
            self.methods_total,
            self.methods_with_docs,
            self.methods_emitted,
            self.unresolved_types
        )
    }
}
