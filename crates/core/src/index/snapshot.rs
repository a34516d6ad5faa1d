use super::{ClassIndex, RepoPackages, RepoSizes, ValidRepos};
use crate::error::{Result, TypemineError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const INDEX_VERSION: u32 = 1;

/// The finished index together with its derived views.
///
/// Built once after the last shard is merged; the resolution phase only ever sees it
/// behind a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub index: ClassIndex,
    pub repo_sizes: RepoSizes,
    pub repo_packages: RepoPackages,
    pub valid_repos: ValidRepos,
}

impl IndexSnapshot {
    pub fn from_index(index: ClassIndex) -> Self {
        let repo_sizes = index.repo_sizes();
        let repo_packages = index.repo_packages();
        let valid_repos = index.valid_repos();
        Self {
            version: INDEX_VERSION,
            index,
            repo_sizes,
            repo_packages,
            valid_repos,
        }
    }

    pub fn is_valid_repo(&self, repo: &str) -> bool {
        self.valid_repos.contains(repo)
    }

    /// MessagePack, zstd-compressed.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let bytes = rmp_serde::to_vec(self)?;
        zstd::encode_all(&bytes[..], 0)
            .map_err(|e| TypemineError::Compression(format!("compression failed: {}", e)))
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let decompressed = zstd::decode_all(bytes)
            .map_err(|e| TypemineError::Compression(format!("decompression failed: {}", e)))?;
        let snapshot: IndexSnapshot = rmp_serde::from_slice(&decompressed)?;
        if snapshot.version != INDEX_VERSION {
            return Err(TypemineError::VersionMismatch {
                expected: INDEX_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    /// Writes the bare index as JSON for `.json` paths, the binary snapshot otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        if is_json(path) {
            self.index.save_json(path)
        } else {
            std::fs::write(path, self.serialize()?)?;
            Ok(())
        }
    }

    /// Loads either format; the views are recomputed when reading plain JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if is_json(path) {
            Ok(Self::from_index(ClassIndex::load_json(path)?))
        } else {
            Self::deserialize(&std::fs::read(path)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}
