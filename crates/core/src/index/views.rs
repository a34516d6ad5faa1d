use super::ClassIndex;
use std::collections::{BTreeMap, BTreeSet};

/// Repository -> number of (name, package) pairs it declares.
pub type RepoSizes = BTreeMap<String, usize>;

/// Repository -> packages it declares at least one class in.
pub type RepoPackages = BTreeMap<String, BTreeSet<String>>;

/// Repositories trusted for resolution.
pub type ValidRepos = BTreeSet<String>;

impl ClassIndex {
    pub fn repo_sizes(&self) -> RepoSizes {
        let mut sizes = RepoSizes::new();
        for (_, _, repos) in self.entries() {
            for repo in repos {
                *sizes.entry(repo.clone()).or_insert(0) += 1;
            }
        }
        sizes
    }

    pub fn repo_packages(&self) -> RepoPackages {
        let mut packages = RepoPackages::new();
        for (_, package, repos) in self.entries() {
            for repo in repos {
                packages
                    .entry(repo.clone())
                    .or_default()
                    .insert(package.to_string());
            }
        }
        packages
    }

    /// Repositories that never use the default package and that keep every
    /// (name, package) pair they declare unique among the surviving repositories.
    ///
    /// Pairs are visited in sorted order. For each pair, the surviving claimant with the
    /// largest size is kept (smallest identifier on a tie) and every other claimant is
    /// removed from the whole set, so one lost collision evicts a repository everywhere.
    pub fn valid_repos(&self) -> ValidRepos {
        let sizes = self.repo_sizes();
        let mut valid: ValidRepos = sizes.keys().cloned().collect();

        for (_, package, repos) in self.entries() {
            if package.is_empty() {
                for repo in repos {
                    valid.remove(repo);
                }
            }
        }

        for (_, package, repos) in self.entries() {
            if package.is_empty() {
                continue;
            }
            let winner = repos
                .iter()
                .filter(|repo| valid.contains(*repo))
                .max_by(|a, b| sizes[*a].cmp(&sizes[*b]).then_with(|| b.cmp(a)));
            if let Some(winner) = winner {
                for repo in repos {
                    if repo != winner {
                        valid.remove(repo);
                    }
                }
            }
        }

        valid
    }
}
