//! Author record providers. The engine only sees `Author` values; where they come
//! from (a directory of exported JSON files, a request body) lives here.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::model::Author;

#[async_trait::async_trait]
pub trait AuthorSource: Send + Sync {
    async fn fetch_authors(&self) -> Result<Vec<Author>>;
    fn name(&self) -> &str;
}

/// Reads every `*.json` file in one directory. A file holds one author object
/// or an array of them. Files are read in name order so runs are reproducible.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    label: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let label = dir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| dir.display().to_string());
        Self { dir, label }
    }

    async fn json_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("listing {}", self.dir.display()))?;
        let mut files = Vec::new();
        while let Some(e) = entries.next_entry().await? {
            let path = e.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait::async_trait]
impl AuthorSource for DirectorySource {
    async fn fetch_authors(&self) -> Result<Vec<Author>> {
        let mut out = Vec::new();
        for path in self.json_files().await? {
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let mut authors = Author::many_from_json(&content)
                .with_context(|| format!("decoding {}", path.display()))?;
            tracing::debug!(target: "source", file = %path.display(), count = authors.len(), "loaded authors");
            out.append(&mut authors);
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Serves a fixed set of records (request bodies, tests).
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    authors: Vec<Author>,
}

impl MemorySource {
    pub fn new(authors: Vec<Author>) -> Self {
        Self { authors }
    }
}

#[async_trait::async_trait]
impl AuthorSource for MemorySource {
    async fn fetch_authors(&self) -> Result<Vec<Author>> {
        Ok(self.authors.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Affiliation sub-directories of `data_dir`: the configured ones, or every
/// sub-directory (name order) when none are configured.
pub fn affiliation_dirs(data_dir: &Path, configured: &[String]) -> Result<Vec<PathBuf>> {
    if !configured.is_empty() {
        return Ok(configured.iter().map(|a| data_dir.join(a)).collect());
    }
    let mut dirs = Vec::new();
    for e in std::fs::read_dir(data_dir)
        .with_context(|| format!("listing {}", data_dir.display()))?
    {
        let path = e?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
