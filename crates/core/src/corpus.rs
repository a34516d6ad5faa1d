//! Line-delimited corpus shards.

use crate::error::Result;
use crate::model::{CorpusRecord, FileRecord};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub const SHARD_EXTENSION: &str = "jsonl";

/// Records of one shard file, in line order.
#[derive(Debug, Clone, Default)]
pub struct Shard {
    pub path: PathBuf,
    pub records: Vec<CorpusRecord>,
    /// Non-blank lines that did not decode as a record.
    pub malformed: usize,
}

pub fn read_shard(path: &Path) -> Result<Shard> {
    let reader = BufReader::new(File::open(path)?);
    let mut shard = Shard {
        path: path.to_path_buf(),
        ..Default::default()
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CorpusRecord>(&line) {
            Ok(record) => shard.records.push(record),
            Err(e) => {
                warn!("{}:{}: skipping malformed record: {}", path.display(), number + 1, e);
                shard.malformed += 1;
            }
        }
    }

    Ok(shard)
}

/// All `.jsonl` files below `dir`, sorted by path. A file path is returned as is.
pub fn discover_shards(dir: &Path) -> Result<Vec<PathBuf>> {
    discover_files(dir, SHARD_EXTENSION)
}

/// All files with `extension` below `dir`, sorted by path. A file path is returned as is.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if dir.is_file() {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Writes one JSON document per line.
pub fn write_lines<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_records(path: &Path, records: &[FileRecord]) -> Result<()> {
    write_lines(path, records)
}
