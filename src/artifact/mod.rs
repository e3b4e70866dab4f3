//! Cached chart artifacts.
//!
//! Charts are produced by an external pipeline as `<root>/<name>.html`.
//! The reader resolves a logical name to that path, reads it once, and keeps
//! the result (content or absence) for the rest of the process.

pub mod source;

use anyhow::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::logging::{log_artifact_loaded, log_artifact_missing};
pub use source::{ArtifactSource, FsSource};

pub const ARTIFACT_EXT: &str = "html";

/// Logical names produced by the upstream pipeline.
pub const KNOWN_ARTIFACTS: [&str; 4] = [
    "genre_counts",
    "movies_by_year",
    "top_movies_by_ratings",
    "top_tags",
];

/// Snapshot of one artifact, as reported by `/api/artifacts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub name: String,
    pub path: String,
    pub present: bool,
    pub bytes: Option<usize>,
    pub sha256: Option<String>,
}

pub struct ArtifactReader<S = FsSource> {
    root: PathBuf,
    source: S,
    cache: BTreeMap<String, Option<Arc<str>>>,
}

impl ArtifactReader<FsSource> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, FsSource)
    }
}

impl<S: ArtifactSource> ArtifactReader<S> {
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            root: root.into(),
            source,
            cache: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, ARTIFACT_EXT))
    }

    /// Returns the artifact's content, or `None` when the file does not exist.
    ///
    /// Both outcomes are memoized. I/O failures on an existing file are
    /// returned as errors and left out of the cache.
    pub fn load(&mut self, name: &str) -> Result<Option<Arc<str>>> {
        if let Some(hit) = self.cache.get(name) {
            return Ok(hit.clone());
        }
        let loaded = self.read_uncached(name)?;
        self.cache.insert(name.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn read_uncached(&self, name: &str) -> Result<Option<Arc<str>>> {
        let path = self.path_for(name);
        let shown = path.display().to_string();
        if !self.source.exists(&path) {
            log_artifact_missing(name, &shown);
            return Ok(None);
        }
        match self.source.read_to_string(&path) {
            Ok(content) => {
                log_artifact_loaded(name, &shown, content.len());
                Ok(Some(Arc::from(content)))
            }
            // Removed between the existence check and the read.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log_artifact_missing(name, &shown);
                Ok(None)
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("failed to read artifact {}", shown))),
        }
    }

    /// Cached entry for `name`: outer `None` means never loaded.
    pub fn cached(&self, name: &str) -> Option<Option<&str>> {
        self.cache.get(name).map(|c| c.as_deref())
    }

    pub fn cached_names(&self) -> impl Iterator<Item = &str> {
        self.cache.keys().map(String::as_str)
    }

    /// Loads `name` (through the cache) and reports its size and fingerprint.
    pub fn describe(&mut self, name: &str) -> Result<ArtifactStatus> {
        let content = self.load(name)?;
        Ok(ArtifactStatus {
            name: name.to_string(),
            path: self.path_for(name).display().to_string(),
            present: content.is_some(),
            bytes: content.as_ref().map(|c| c.len()),
            sha256: content.as_deref().map(content_sha256),
        })
    }
}

pub fn content_sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
