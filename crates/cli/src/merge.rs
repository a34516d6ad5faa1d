use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use typemine_core::corpus;
use typemine_core::index::{ClassIndex, IndexSnapshot};

/// Directories stand for every `.json` index below them.
fn expand_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let found = corpus::discover_files(input, "json")
            .with_context(|| format!("failed to list indices in {}", input.display()))?;
        if found.is_empty() {
            anyhow::bail!("no .json index found in {}", input.display());
        }
        files.extend(found);
    }
    Ok(files)
}

pub fn run(inputs: &[PathBuf], output: &Path) -> anyhow::Result<()> {
    let files = expand_inputs(inputs)?;

    let mut merged = ClassIndex::new();
    for input in &files {
        let snapshot = IndexSnapshot::load(input)
            .with_context(|| format!("failed to load index {}", input.display()))?;
        info!("Merging {} ({} class names)", input.display(), snapshot.index.class_count());
        merged.merge(snapshot.index);
    }

    let snapshot = IndexSnapshot::from_index(merged);
    snapshot
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Merged {} indices: {} class names, {} valid repositories",
        files.len(),
        snapshot.index.class_count(),
        snapshot.valid_repos.len()
    );
    Ok(())
}
