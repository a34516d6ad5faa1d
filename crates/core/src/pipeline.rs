//! The two corpus passes.
//!
//! Phase 1 builds one partial [`ClassIndex`] per shard in parallel and reduces them
//! with [`ClassIndex::merge`]. Phase 2 only starts from a [`CorpusSnapshot`], the
//! immutable index plus its derived views, and resolves every file independently.

use crate::config::PipelineConfig;
use crate::corpus::{self, Shard};
use crate::error::Result;
use crate::extract::MethodExtractor;
use crate::index::{ClassIndex, IndexSnapshot};
use crate::model::{CorpusRecord, FileDeclarations, FileRecord, SkipReason};
use crate::parser::DeclarationParser;
use crate::resolver::FileResolver;
use crate::stats::{ExtractStats, IndexStats};
use rayon::prelude::*;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only state shared by every phase-2 task.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    inner: Arc<IndexSnapshot>,
}

impl CorpusSnapshot {
    /// Computes the derived views once; the index is frozen from here on.
    pub fn new(index: ClassIndex) -> Self {
        Self::from_snapshot(IndexSnapshot::from_index(index))
    }

    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        Self {
            inner: Arc::new(snapshot),
        }
    }
}

impl Deref for CorpusSnapshot {
    type Target = IndexSnapshot;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Runs `op` on a dedicated pool when a thread count is configured.
fn run_in_pool<T, F>(threads: usize, op: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if threads == 0 {
        return Ok(op());
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(pool.install(op))
}

/// Parses a record, or says why it contributes nothing.
pub fn parse_record(
    record: &CorpusRecord,
    parser: &dyn DeclarationParser,
) -> std::result::Result<FileDeclarations, SkipReason> {
    let content = match record.content.as_deref() {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(SkipReason::EmptyContent),
    };
    parser.parse_declarations(content).map_err(|e| {
        warn!("{}/{}: {}", record.repo_name, record.path, e);
        SkipReason::Unparseable
    })
}

// ---------------------------------------------------------------------------
// Phase 1
// ---------------------------------------------------------------------------

pub fn build_index(
    shards: &[PathBuf],
    parser: &dyn DeclarationParser,
    config: &PipelineConfig,
) -> Result<(ClassIndex, IndexStats)> {
    info!("Indexing {} shard(s) with {}", shards.len(), parser.name());

    let (index, stats) = run_in_pool(config.threads, || {
        shards
            .par_iter()
            .map(|path| index_shard(path, parser))
            .try_reduce(
                || (ClassIndex::new(), IndexStats::default()),
                |(a, a_stats), (b, b_stats)| Ok((a.merged(b), a_stats.merge(b_stats))),
            )
    })??;

    info!(
        "Indexed {} of {} file(s): {} class name(s), {} entries",
        stats.files_indexed,
        stats.files_seen,
        index.class_count(),
        index.entry_count()
    );
    Ok((index, stats))
}

pub fn index_shard(path: &Path, parser: &dyn DeclarationParser) -> Result<(ClassIndex, IndexStats)> {
    let shard = corpus::read_shard(path)?;
    let (index, mut stats) = index_records(&shard.records, parser);
    for _ in 0..shard.malformed {
        stats.skip(SkipReason::MalformedRecord);
    }
    debug!(
        "{}: {} class name(s) from {} file(s)",
        path.display(),
        index.class_count(),
        stats.files_indexed
    );
    Ok((index, stats))
}

/// Builds the partial index of one batch of records.
pub fn index_records(records: &[CorpusRecord], parser: &dyn DeclarationParser) -> (ClassIndex, IndexStats) {
    let mut index = ClassIndex::new();
    let mut stats = IndexStats::default();

    for record in records {
        stats.files_seen += 1;
        match parse_record(record, parser) {
            Ok(decls) => {
                index.ingest(&record.repo_name, record.file_simple_name(), &decls);
                stats.files_indexed += 1;
            }
            Err(reason) => stats.skip(reason),
        }
    }

    (index, stats)
}

// ---------------------------------------------------------------------------
// Phase 2
// ---------------------------------------------------------------------------

pub fn extract_shard(
    snapshot: &CorpusSnapshot,
    path: &Path,
    parser: &dyn DeclarationParser,
    config: &PipelineConfig,
) -> Result<(Vec<FileRecord>, ExtractStats)> {
    let Shard {
        records, malformed, ..
    } = corpus::read_shard(path)?;

    let (out, mut stats) = extract_records(snapshot, &records, parser, config)?;
    for _ in 0..malformed {
        stats.skip(SkipReason::MalformedRecord);
    }
    debug!(
        "{}: {} record(s), {} method(s)",
        path.display(),
        out.len(),
        stats.methods_emitted
    );
    Ok((out, stats))
}

/// One task per file; the output keeps the input order.
pub fn extract_records(
    snapshot: &CorpusSnapshot,
    records: &[CorpusRecord],
    parser: &dyn DeclarationParser,
    config: &PipelineConfig,
) -> Result<(Vec<FileRecord>, ExtractStats)> {
    let results: Vec<(Option<FileRecord>, ExtractStats)> = run_in_pool(config.threads, || {
        records
            .par_iter()
            .map(|record| extract_file(snapshot, record, parser, config))
            .collect()
    })?;

    let mut out = Vec::new();
    let mut stats = ExtractStats::default();
    for (record, file_stats) in results {
        out.extend(record);
        stats = stats.merge(file_stats);
    }
    Ok((out, stats))
}

/// `None` when the file has no documented method to emit.
pub fn extract_file(
    snapshot: &IndexSnapshot,
    record: &CorpusRecord,
    parser: &dyn DeclarationParser,
    config: &PipelineConfig,
) -> (Option<FileRecord>, ExtractStats) {
    let mut stats = ExtractStats {
        files_seen: 1,
        ..Default::default()
    };

    if config.require_valid_repo && !snapshot.is_valid_repo(&record.repo_name) {
        stats.skip(SkipReason::RepositoryExcluded);
        return (None, stats);
    }

    let decls = match parse_record(record, parser) {
        Ok(decls) => decls,
        Err(reason) => {
            stats.skip(reason);
            return (None, stats);
        }
    };

    let resolver = config
        .resolve_types
        .then(|| FileResolver::for_file(&record.repo_name, &decls, snapshot));
    let out = MethodExtractor::new(resolver.as_ref(), config).extract(record, &decls, &mut stats);

    if out.classes.is_empty() {
        return (None, stats);
    }
    stats.files_emitted = 1;
    (Some(out), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnresolvedPolicy;
    use crate::error::TypemineError;
    use crate::model::{ImportDecl, Javadoc, MethodDecl, TypeDecl, TypeKind};

    /// Reads `package;Type;Type...` and documents one `Helper run()` method per type.
    struct LineParser;

    impl DeclarationParser for LineParser {
        fn name(&self) -> &str {
            "line"
        }

        fn parse_declarations(&self, source: &str) -> Result<FileDeclarations> {
            let mut parts = source.trim().split(';');
            let package = parts
                .next()
                .filter(|p| !p.starts_with('!'))
                .ok_or_else(|| TypemineError::Parsing("bad header".to_string()))?;
            let doc = Javadoc {
                description: "Runs.".to_string(),
                ..Default::default()
            };
            Ok(FileDeclarations {
                package: (!package.is_empty()).then(|| package.to_string()),
                imports: vec![ImportDecl::wildcard("com.acme.util")],
                types: parts
                    .map(|name| {
                        TypeDecl::new(name, TypeKind::Class)
                            .with_method(MethodDecl::new("run", "Helper").with_doc(doc.clone()))
                    })
                    .collect(),
            })
        }
    }

    fn record(repo: &str, path: &str, content: Option<&str>) -> CorpusRecord {
        CorpusRecord {
            repo_name: repo.to_string(),
            path: path.to_string(),
            content: content.map(str::to_string),
        }
    }

    fn corpus() -> Vec<CorpusRecord> {
        vec![
            record("acme", "Widget.java", Some("com.acme;Widget")),
            record("acme", "Helper.java", Some("com.acme.util;Helper")),
            record("acme", "Empty.java", None),
            record("acme", "Broken.java", Some("!oops")),
            record("fork", "Widget.java", Some("com.acme;Widget")),
        ]
    }

    #[test]
    fn test_index_records_counts_skips() {
        let (index, stats) = index_records(&corpus(), &LineParser);
        assert_eq!(stats.files_seen, 5);
        assert_eq!(stats.files_indexed, 3);
        assert_eq!(stats.files_skipped[&SkipReason::EmptyContent], 1);
        assert_eq!(stats.files_skipped[&SkipReason::Unparseable], 1);
        assert!(index.contains_class("Widget"));
        assert!(index.contains_class("Helper"));
    }

    #[test]
    fn test_extract_records_end_to_end() {
        let records = corpus();
        let (index, _) = index_records(&records, &LineParser);
        let snapshot = CorpusSnapshot::new(index);
        assert!(snapshot.is_valid_repo("acme"));
        assert!(!snapshot.is_valid_repo("fork"));

        let (out, stats) =
            extract_records(&snapshot, &records, &LineParser, &PipelineConfig::default()).unwrap();

        let paths: Vec<_> = out.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["Widget.java", "Helper.java"]);
        let run = &out[0].classes["com.acme.Widget"][0];
        assert_eq!(run.returns.as_ref().unwrap().type_name, "com.acme.util.Helper");

        assert_eq!(stats.files_seen, 5);
        assert_eq!(stats.files_emitted, 2);
        assert_eq!(stats.files_skipped[&SkipReason::RepositoryExcluded], 1);
        assert_eq!(stats.methods_emitted, 2);
    }

    #[test]
    fn test_extract_with_fixed_pool() {
        let records = corpus();
        let (index, _) = index_records(&records, &LineParser);
        let snapshot = CorpusSnapshot::new(index);
        let config = PipelineConfig {
            threads: 2,
            require_valid_repo: false,
            unresolved_policy: UnresolvedPolicy::KeepBlank,
            ..Default::default()
        };
        let (out, stats) = extract_records(&snapshot, &records, &LineParser, &config).unwrap();
        assert_eq!(out.len(), 3);
        // `Helper` is indexed for acme only, so the fork cannot resolve it.
        assert_eq!(out[2].repo, "fork");
        let run = &out[2].classes["com.acme.Widget"][0];
        assert_eq!(run.returns.as_ref().unwrap().type_name, "");
        assert_eq!(stats.unresolved_types, 1);
        assert_eq!(stats.skipped(), 2);
    }
}
