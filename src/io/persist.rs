/*! Result persistence

Each (language, data type) pair has two files:
- a working snapshot, `<extraction_root>/<language>/<category>/<category>_queried.json`, rewritten after every query part and read by the formatting scripts,
- the export file, `<output_dir>/<Language>/<category>.json`, written once every part has been merged.

Both are compact JSON arrays. Non-ASCII text is written verbatim.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::lang::capitalize;
use crate::query::Record;

#[derive(Debug, Clone)]
pub struct Persister {
    extraction_root: PathBuf,
    output_dir: PathBuf,
}

impl Persister {
    pub fn new(extraction_root: &Path, output_dir: &Path) -> Self {
        Self {
            extraction_root: extraction_root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// `<output_dir>/<Language>`
    pub fn export_dir(&self, language: &str) -> PathBuf {
        self.output_dir.join(capitalize(language))
    }

    pub fn output_path(&self, language: &str, category: &str) -> PathBuf {
        self.export_dir(language).join(format!("{}.json", category))
    }

    pub fn snapshot_path(&self, language: &str, category: &str) -> PathBuf {
        self.extraction_root
            .join(language)
            .join(category)
            .join(format!("{}_queried.json", category))
    }

    /// Overwrite the working snapshot with everything merged so far.
    pub fn checkpoint(
        &self,
        language: &str,
        category: &str,
        records: &[Record],
    ) -> Result<(), Error> {
        let path = self.snapshot_path(language, category);
        debug!(
            "[{} {}] checkpoint of {} records",
            language,
            category,
            records.len()
        );
        write_json(&path, records)
    }

    /// Write the export file of a completed logical query.
    pub fn finalize(
        &self,
        language: &str,
        category: &str,
        records: &[Record],
    ) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(self.export_dir(language))?;
        let path = self.output_path(language, category);
        write_json(&path, records)?;
        Ok(path)
    }
}

fn write_json(path: &Path, records: &[Record]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut w, records)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn paths() {
        let p = Persister::new(Path::new("extract"), Path::new("out"));
        assert_eq!(
            p.output_path("finnish", "verbs"),
            PathBuf::from("out/Finnish/verbs.json")
        );
        assert_eq!(
            p.snapshot_path("Finnish", "verbs"),
            PathBuf::from("extract/Finnish/verbs/verbs_queried.json")
        );
    }

    #[test]
    fn compact_utf8() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let p = Persister::new(root.path(), out.path());
        let records = vec![record(&[("lexemeID", "L42"), ("noun", "книга")])];

        let path = p.finalize("Russian", "nouns", &records).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, r#"[{"lexemeID":"L42","noun":"книга"}]"#);
    }

    #[test]
    fn checkpoint_overwrites() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let p = Persister::new(root.path(), out.path());

        p.checkpoint("German", "verbs", &[record(&[("a", "1")])])
            .unwrap();
        p.checkpoint(
            "German",
            "verbs",
            &[record(&[("a", "1")]), record(&[("a", "2")])],
        )
        .unwrap();

        let written = std::fs::read_to_string(p.snapshot_path("German", "verbs")).unwrap();
        assert_eq!(written, r#"[{"a":"1"},{"a":"2"}]"#);
        assert!(!p.output_path("German", "verbs").exists());
    }
}
