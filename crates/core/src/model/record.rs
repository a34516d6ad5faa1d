use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One line of a corpus shard: a single source file of a single repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub repo_name: String,
    pub path: String,
    /// `None` for empty or unreadable files.
    #[serde(default)]
    pub content: Option<String>,
}

impl CorpusRecord {
    /// File name up to its first dot (`src/a/Widget.java` -> `Widget`).
    pub fn file_simple_name(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        file.split('.').next().unwrap_or(file)
    }
}

/// Why a file contributed nothing. Skips are reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MalformedRecord,
    EmptyContent,
    Unparseable,
    RepositoryExcluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MalformedRecord => "malformed record",
            SkipReason::EmptyContent => "file is empty",
            SkipReason::Unparseable => "parse error",
            SkipReason::RepositoryExcluded => "repository excluded",
        };
        f.write_str(text)
    }
}

/// Extraction output for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub repo: String,
    pub path: String,
    /// Fully-qualified class name -> documented methods of that class.
    pub classes: BTreeMap<String, Vec<MethodRecord>>,
}

impl FileRecord {
    pub fn method_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    /// `None` when the return type was unresolved and dropped.
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypedDoc>,
    pub params: Vec<ParamRecord>,
    pub docstring: String,
    pub source: String,
}

/// A resolved type together with the documentation attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDoc {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub name: String,
    #[serde(flatten)]
    pub typed: TypedDoc,
}
