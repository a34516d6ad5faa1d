use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};
use typemine_core::config::PipelineConfig;
use typemine_core::corpus;
use typemine_core::index::{ClassIndex, IndexSnapshot};
use typemine_core::pipeline::{self, CorpusSnapshot};
use typemine_core::stats::ExtractStats;
use typemine_java::JavaParser;

pub fn run(
    shard_dir: &Path,
    index: Option<&Path>,
    out_dir: &Path,
    mut config: PipelineConfig,
) -> anyhow::Result<()> {
    let snapshot = match index {
        Some(path) => CorpusSnapshot::from_snapshot(
            IndexSnapshot::load(path)
                .with_context(|| format!("failed to load index {}", path.display()))?,
        ),
        None => {
            if config.require_valid_repo {
                warn!("No index given; extracting every repository");
                config.require_valid_repo = false;
            }
            CorpusSnapshot::new(ClassIndex::new())
        }
    };

    let shards = corpus::discover_shards(shard_dir)
        .with_context(|| format!("failed to list shards in {}", shard_dir.display()))?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let parser = JavaParser::new();
    let mut total = ExtractStats::default();
    for shard in &shards {
        let (records, stats) = pipeline::extract_shard(&snapshot, shard, &parser, &config)?;

        let name = shard
            .file_name()
            .with_context(|| format!("shard without file name: {}", shard.display()))?;
        let target = out_dir.join(name);
        corpus::write_records(&target, &records)
            .with_context(|| format!("failed to write {}", target.display()))?;
        info!("{} -> {}: {}", shard.display(), target.display(), stats);

        total = total.merge(stats);
    }

    println!("{}", total);
    Ok(())
}
