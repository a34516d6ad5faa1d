mod extract;
mod index;
mod merge;
mod stats;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use typemine_core::config::{PipelineConfig, UnresolvedPolicy};

#[derive(Parser)]
#[command(
    name = "typemine",
    version,
    about = "Mines fully-qualified type signatures of documented Java methods",
    long_about = "Typemine reads a corpus of Java source files grouped by repository. A first pass \
                  builds a corpus-wide class index; a second pass resolves the return and parameter \
                  types of every documented method to fully-qualified names."
)]
pub struct Cli {
    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the corpus class index from a directory of shards
    #[command(
        long_about = "Parses every `.jsonl` shard below SHARD_DIR and writes the merged class index. \
                      A `.json` output holds the bare index; any other extension holds a compressed \
                      snapshot that also stores the derived repository views."
    )]
    Index {
        #[arg(value_name = "SHARD_DIR")]
        shards: PathBuf,

        /// Where to write the index
        #[arg(short, long, value_name = "INDEX")]
        output: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Merge several persisted indices into one
    Merge {
        /// Index files, or directories of `.json` indices
        #[arg(value_name = "INDEX", required = true)]
        inputs: Vec<PathBuf>,

        #[arg(short, long, value_name = "INDEX")]
        output: PathBuf,
    },
    /// Print repository and class counts of an index
    Stats {
        #[arg(value_name = "INDEX")]
        index: PathBuf,

        /// Number of largest repositories to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Resolve documented methods of every shard against an index
    Extract {
        #[arg(value_name = "SHARD_DIR")]
        shards: PathBuf,

        /// Index built by `typemine index`; without one only imports and java.lang resolve
        #[arg(short, long, value_name = "INDEX")]
        index: Option<PathBuf>,

        /// Directory receiving one output file per input shard
        #[arg(short, long, value_name = "OUT_DIR")]
        output: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    DropMethod,
    DropField,
    KeepBlank,
}

impl From<PolicyArg> for UnresolvedPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::DropMethod => UnresolvedPolicy::DropMethod,
            PolicyArg::DropField => UnresolvedPolicy::DropField,
            PolicyArg::KeepBlank => UnresolvedPolicy::KeepBlank,
        }
    }
}

/// Pipeline settings; flags override the values of `--config`.
#[derive(Args, Clone, Default)]
pub struct PipelineArgs {
    /// JSON file with pipeline settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// What to do with methods whose types cannot be resolved
    #[arg(long, value_enum)]
    pub unresolved: Option<PolicyArg>,

    /// Emit types as written instead of resolving them
    #[arg(long)]
    pub raw: bool,

    /// Extract files of repositories removed by deduplication too
    #[arg(long)]
    pub all_repos: bool,

    /// Truncate documentation text to this many characters
    #[arg(long, value_name = "CHARS")]
    pub max_doc_chars: Option<usize>,
}

impl PipelineArgs {
    pub fn to_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(policy) = self.unresolved {
            config.unresolved_policy = policy.into();
        }
        if self.raw {
            config.resolve_types = false;
        }
        if self.all_repos {
            config.require_valid_repo = false;
        }
        if self.max_doc_chars.is_some() {
            config.max_doc_chars = self.max_doc_chars;
        }
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Index { .. } | Commands::Merge { .. } => "index",
        Commands::Stats { .. } => "stats",
        Commands::Extract { .. } => "extract",
    };
    let _guard = typemine_core::logging::init_logging(component, cli.verbose);

    match cli.command {
        Commands::Index {
            shards,
            output,
            pipeline,
        } => index::run(&shards, &output, &pipeline.to_config()?),
        Commands::Merge { inputs, output } => merge::run(&inputs, &output),
        Commands::Stats { index, top } => stats::run(&index, top),
        Commands::Extract {
            shards,
            index,
            output,
            pipeline,
        } => extract::run(&shards, index.as_deref(), &output, pipeline.to_config()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "typemine",
            "extract",
            "shards",
            "-o",
            "out",
            "--unresolved",
            "keep-blank",
            "--all-repos",
            "-j",
            "3",
        ]);
        let Commands::Extract { pipeline, index, .. } = cli.command else {
            panic!("expected extract");
        };
        assert!(index.is_none());
        let config = pipeline.to_config().unwrap();
        assert_eq!(config.unresolved_policy, UnresolvedPolicy::KeepBlank);
        assert!(!config.require_valid_repo);
        assert!(config.resolve_types);
        assert_eq!(config.threads, 3);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typemine.json");
        std::fs::write(&path, r#"{"max_doc_chars": 500, "threads": 8}"#).unwrap();

        let args = PipelineArgs {
            config: Some(path),
            threads: Some(2),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.max_doc_chars, Some(500));
        assert_eq!(config.threads, 2);
    }
}
