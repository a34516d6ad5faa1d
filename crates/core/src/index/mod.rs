//! Corpus-wide class index
//!
//! Answers "which repositories declare a class with this simple name in this package?"
//! for the whole corpus. The index is append-only while shards are ingested, shards are
//! combined with [`ClassIndex::merge`], and the finished index is shared read-only (see
//! [`IndexSnapshot`]) for the resolution phase.

mod snapshot;
mod views;

pub use snapshot::{INDEX_VERSION, IndexSnapshot};
pub use views::{RepoPackages, RepoSizes, ValidRepos};

use crate::error::Result;
use crate::model::{DeclEvent, FileDeclarations};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Package name -> repositories declaring the class in that package.
pub type PackageRepos = BTreeMap<String, BTreeSet<String>>;

/// Simple class name -> package -> repositories.
///
/// Sorted maps keep serialization and every derived view independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIndex {
    classes: BTreeMap<String, PackageRepos>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `repo` declares `name` in `package`.
    pub fn record(&mut self, name: &str, package: &str, repo: &str) {
        let packages = self.classes.entry(name.to_string()).or_default();
        if let Some(repos) = packages.get_mut(package) {
            repos.insert(repo.to_string());
        } else {
            packages.insert(package.to_string(), BTreeSet::from([repo.to_string()]));
        }
    }

    /// Records every type declared in one file.
    ///
    /// Types whose name differs from the file's simple name are keyed as
    /// `FileName.TypeName`. Deeper nesting is not disambiguated further, so a class nested
    /// two levels down is still keyed under the file name only.
    pub fn ingest(&mut self, repo: &str, file_simple_name: &str, decls: &FileDeclarations) {
        let package = decls.package_name();
        for event in decls.events() {
            if let DeclEvent::EnterType(ty) = event {
                if ty.name == file_simple_name {
                    self.record(&ty.name, package, repo);
                } else {
                    let keyed = format!("{}.{}", file_simple_name, ty.name);
                    self.record(&keyed, package, repo);
                }
            }
        }
    }

    /// Unions `other` into `self`. Commutative and associative as a set-valued structure.
    pub fn merge(&mut self, other: ClassIndex) {
        for (name, packages) in other.classes {
            match self.classes.get_mut(&name) {
                None => {
                    self.classes.insert(name, packages);
                }
                Some(existing) => {
                    for (package, repos) in packages {
                        existing.entry(package).or_default().extend(repos);
                    }
                }
            }
        }
    }

    /// By-value [`merge`](Self::merge), convenient as a reduce step.
    pub fn merged(mut self, other: ClassIndex) -> Self {
        if self.classes.len() < other.classes.len() {
            let mut other = other;
            other.merge(self);
            return other;
        }
        self.merge(other);
        self
    }

    /// Packages (with their repositories) declaring a class with this key.
    pub fn packages(&self, name: &str) -> Option<&PackageRepos> {
        self.classes.get(name)
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Iterates `(name, package, repositories)` in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<String>)> {
        self.classes.iter().flat_map(|(name, packages)| {
            packages
                .iter()
                .map(move |(package, repos)| (name.as_str(), package.as_str(), repos))
        })
    }

    /// Number of distinct class-name keys.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of distinct (name, package) pairs.
    pub fn entry_count(&self) -> usize {
        self.classes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let index = serde_json::from_reader(BufReader::new(file))?;
        Ok(index)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
