//! Logical queries.
//!
//! A logical query is the query of one (language, data type) pair.
//! On disk it is either a single `<category>.sparql` file or a chain of
//! `<category>_1.sparql` .. `<category>_4.sparql` parts.
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const QUERY_EXTENSION: &str = "sparql";
pub const MAX_PARTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalQuery {
    // keep first: ordering is by canonical path.
    path: PathBuf,
    language: String,
    category: String,
}

impl LogicalQuery {
    /// Build a logical query from its canonical path (`.../<Language>/<category>/<name>.sparql`).
    pub fn new(path: PathBuf) -> Result<Self, Error> {
        let category = dir_name(path.parent())
            .ok_or_else(|| Error::Custom(format!("no data type folder for {:?}", path)))?;
        let language = dir_name(path.parent().and_then(Path::parent))
            .ok_or_else(|| Error::Custom(format!("no language folder for {:?}", path)))?;

        Ok(Self {
            path,
            language,
            category,
        })
    }

    /// Build the logical query a physical part belongs to.
    pub fn from_part(part: &Path) -> Result<Self, Error> {
        Self::new(canonical_path(part))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Physical files to run, in order.
    ///
    /// If the canonical file exists it is the only part. Otherwise parts `_1`, `_2`...
    /// are taken until one is missing.
    pub fn parts(&self) -> Vec<PathBuf> {
        if self.path.is_file() {
            return vec![self.path.clone()];
        }

        (1..=MAX_PARTS)
            .map(|n| self.part_path(n))
            .take_while(|p| p.is_file())
            .collect()
    }

    /// Path of the `n`th part, whether it exists or not.
    pub fn part_path(&self, n: usize) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!("{}_{}.{}", stem, n, QUERY_EXTENSION))
    }
}

impl std::fmt::Display for LogicalQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.language, self.category)
    }
}

/// Map `verbs_2.sparql` to `verbs.sparql`. Other paths are returned unchanged.
pub fn canonical_path(part: &Path) -> PathBuf {
    let stem = match part.file_stem().and_then(|s| s.to_str()) {
        Some(s) => s,
        None => return part.to_path_buf(),
    };

    match stem.rsplit_once('_') {
        Some((base, n)) if !base.is_empty() && is_part_number(n) => {
            part.with_file_name(format!("{}.{}", base, QUERY_EXTENSION))
        }
        _ => part.to_path_buf(),
    }
}

fn is_part_number(s: &str) -> bool {
    matches!(s, "1" | "2" | "3" | "4")
}

fn dir_name(dir: Option<&Path>) -> Option<String> {
    dir.and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
}
