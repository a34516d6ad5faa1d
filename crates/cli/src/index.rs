use anyhow::Context;
use std::path::Path;
use tracing::info;
use typemine_core::config::PipelineConfig;
use typemine_core::corpus;
use typemine_core::index::IndexSnapshot;
use typemine_core::pipeline;
use typemine_java::JavaParser;

pub fn run(shard_dir: &Path, output: &Path, config: &PipelineConfig) -> anyhow::Result<()> {
    let shards = corpus::discover_shards(shard_dir)
        .with_context(|| format!("failed to list shards in {}", shard_dir.display()))?;
    if shards.is_empty() {
        anyhow::bail!("no .jsonl shards found in {}", shard_dir.display());
    }

    let parser = JavaParser::new();
    let (index, stats) = pipeline::build_index(&shards, &parser, config)?;
    let snapshot = IndexSnapshot::from_index(index);

    info!("Writing index to {}", output.display());
    snapshot
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Indexed {} of {} files", stats.files_indexed, stats.files_seen);
    for (reason, count) in &stats.files_skipped {
        println!("  skipped ({}): {}", reason, count);
    }
    println!(
        "{} class names, {} repositories, {} valid",
        snapshot.index.class_count(),
        snapshot.repo_sizes.len(),
        snapshot.valid_repos.len()
    );
    Ok(())
}
