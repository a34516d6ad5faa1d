use std::path::{Path, PathBuf};
use typemine_core::config::PipelineConfig;
use typemine_core::corpus;
use typemine_core::model::{CorpusRecord, FileRecord};
use typemine_core::pipeline::{self, CorpusSnapshot};
use typemine_core::stats::ExtractStats;
use typemine_java::JavaParser;

pub fn record(repo: &str, path: &str, content: &str) -> CorpusRecord {
    CorpusRecord {
        repo_name: repo.to_string(),
        path: path.to_string(),
        content: Some(content.to_string()),
    }
}

/// Runs both phases over an in-memory corpus.
#[allow(dead_code)]
pub fn run_corpus(records: &[CorpusRecord]) -> (CorpusSnapshot, Vec<FileRecord>, ExtractStats) {
    let parser = JavaParser::new();
    let (index, _) = pipeline::index_records(records, &parser);
    let snapshot = CorpusSnapshot::new(index);
    let (out, stats) =
        pipeline::extract_records(&snapshot, records, &parser, &PipelineConfig::default())
            .unwrap();
    (snapshot, out, stats)
}

#[allow(dead_code)]
pub fn write_shard(dir: &Path, name: &str, records: &[CorpusRecord]) -> PathBuf {
    let path = dir.join(name);
    corpus::write_lines(&path, records).unwrap();
    path
}
