use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a method whose signature contains an unresolved type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Drop the whole method.
    #[default]
    DropMethod,
    /// Keep the method but leave out the unresolved return value or parameter.
    DropField,
    /// Keep the method and emit the unresolved type as an empty string.
    KeepBlank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for both phases; 0 lets rayon decide.
    pub threads: usize,
    pub unresolved_policy: UnresolvedPolicy,
    /// When false, types are emitted exactly as written and never resolved.
    pub resolve_types: bool,
    /// Only extract files whose repository survived deduplication.
    pub require_valid_repo: bool,
    /// Cap (in characters) applied to every documentation string.
    pub max_doc_chars: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            unresolved_policy: UnresolvedPolicy::DropMethod,
            resolve_types: true,
            require_valid_repo: true,
            max_doc_chars: None,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Applies `max_doc_chars` to a documentation string.
    pub fn clip_doc(&self, text: &str) -> String {
        match self.max_doc_chars {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"unresolved_policy":"keep_blank"}"#).unwrap();
        assert_eq!(config.unresolved_policy, UnresolvedPolicy::KeepBlank);
        assert!(config.resolve_types);
        assert!(config.require_valid_repo);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_clip_doc_counts_chars() {
        let config = PipelineConfig {
            max_doc_chars: Some(3),
            ..Default::default()
        };
        assert_eq!(config.clip_doc("héllo"), "hél");
        assert_eq!(PipelineConfig::default().clip_doc("héllo"), "héllo");
    }
}
