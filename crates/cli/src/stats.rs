use anyhow::Context;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use typemine_core::index::IndexSnapshot;

#[derive(Tabled)]
struct RepoRow {
    repository: String,
    declarations: usize,
    packages: usize,
    valid: bool,
}

pub fn run(index: &Path, top: usize) -> anyhow::Result<()> {
    let snapshot = IndexSnapshot::load(index)
        .with_context(|| format!("failed to load index {}", index.display()))?;

    println!("class names:        {}", snapshot.index.class_count());
    println!("name/package pairs: {}", snapshot.index.entry_count());
    println!("repositories:       {}", snapshot.repo_sizes.len());
    println!("valid repositories: {}", snapshot.valid_repos.len());

    if top == 0 || snapshot.repo_sizes.is_empty() {
        return Ok(());
    }
    println!();
    println!("{}", Table::new(largest_repos(&snapshot, top)).with(Style::psql()));
    Ok(())
}

/// Largest repositories first, ties by identifier.
fn largest_repos(snapshot: &IndexSnapshot, top: usize) -> Vec<RepoRow> {
    let mut repos: Vec<_> = snapshot.repo_sizes.iter().collect();
    repos.sort_by(|(a, a_size), (b, b_size)| b_size.cmp(a_size).then_with(|| a.cmp(b)));

    repos
        .into_iter()
        .take(top)
        .map(|(repo, size)| RepoRow {
            repository: repo.clone(),
            declarations: *size,
            packages: snapshot.repo_packages.get(repo).map_or(0, |p| p.len()),
            valid: snapshot.is_valid_repo(repo),
        })
        .collect()
}
