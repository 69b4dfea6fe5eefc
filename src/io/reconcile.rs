/*! Existing output reconciliation

Before a logical query runs, previous `<category>*.json` files of its export folder are looked up.
Depending on the overwrite flag (or on a [Decide] implementation when the flag is off),
they are removed and the query proceeds, or the query is skipped and the files are left untouched.
!*/
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::lang::capitalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Proceed,
    Skip,
}

/// Chooses what to do with existing files when overwriting is not enabled.
pub trait Decide {
    fn decide(&self, language: &str, category: &str, existing: &[PathBuf]) -> Action;
}

/// Always returns the same [Action].
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Action);

impl Decide for Fixed {
    fn decide(&self, _language: &str, _category: &str, _existing: &[PathBuf]) -> Action {
        self.0
    }
}

/// Asks on stdin. `o` or `overwrite` (any case) proceeds, anything else skips.
#[derive(Debug, Default)]
pub struct Prompt;

impl Prompt {
    fn parse(answer: &str) -> Action {
        match answer.trim().to_lowercase().as_str() {
            "o" | "overwrite" => Action::Proceed,
            _ => Action::Skip,
        }
    }
}

impl Decide for Prompt {
    fn decide(&self, language: &str, category: &str, existing: &[PathBuf]) -> Action {
        println!("\nExisting file(s) found for {} {}:\n", language, category);
        for (i, file) in existing.iter().enumerate() {
            let name = file.file_name().unwrap_or(file.as_os_str());
            println!("{}. {}", i + 1, name.to_string_lossy());
        }
        print!(
            "\nChoose an option:\n1. Overwrite existing data (press 'o')\n2. Skip process (press anything else)\nEnter your choice: "
        );
        // a failed flush or read is a skip.
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => Self::parse(&answer),
            Err(_) => Action::Skip,
        }
    }
}

/// What [reconcile] chose, and the files it removed to do so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub action: Action,
    pub removed: Vec<PathBuf>,
}

/// List `<output_dir>/<Language>/<category>*.json`.
pub fn existing_files(
    output_dir: &Path,
    language: &str,
    category: &str,
) -> Result<Vec<PathBuf>, Error> {
    let export_dir = output_dir.join(capitalize(language));
    let dir_str = export_dir
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid output folder: {:?}", export_dir)))?;
    let pattern = format!(
        "{}/{}*.json",
        glob::Pattern::escape(dir_str),
        glob::Pattern::escape(category)
    );

    let mut files = Vec::new();
    for f in glob::glob(&pattern)? {
        files.push(f?);
    }
    files.sort();
    Ok(files)
}

/// Apply the overwrite policy for one (language, data type) pair.
///
/// Files are only removed when the action is [Action::Proceed].
pub fn reconcile(
    output_dir: &Path,
    language: &str,
    category: &str,
    overwrite: bool,
    decider: &dyn Decide,
) -> Result<Reconciled, Error> {
    let existing = existing_files(output_dir, language, category)?;
    if existing.is_empty() {
        debug!("[{} {}] no existing files", language, category);
        return Ok(Reconciled {
            action: Action::Proceed,
            removed: Vec::new(),
        });
    }

    let action = if overwrite {
        Action::Proceed
    } else {
        decider.decide(language, category, &existing)
    };

    match action {
        Action::Proceed => {
            for f in &existing {
                debug!("removing {:?}", f);
                std::fs::remove_file(f)?;
            }
            info!("[{} {}] removed {} existing files", language, category, existing.len());
            Ok(Reconciled {
                action,
                removed: existing,
            })
        }
        Action::Skip => {
            debug!("[{} {}] keeping existing files", language, category);
            Ok(Reconciled {
                action,
                removed: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs::File;

    use super::*;

    struct Counting {
        calls: Cell<usize>,
        action: Action,
    }

    impl Decide for Counting {
        fn decide(&self, _: &str, _: &str, existing: &[PathBuf]) -> Action {
            assert!(!existing.is_empty());
            self.calls.set(self.calls.get() + 1);
            self.action
        }
    }

    fn setup(files: &[&str]) -> tempfile::TempDir {
        let out = tempfile::tempdir().unwrap();
        let dir = out.path().join("German");
        std::fs::create_dir_all(&dir).unwrap();
        for f in files {
            File::create(dir.join(f)).unwrap();
        }
        out
    }

    #[test]
    fn nothing_to_reconcile() {
        let out = tempfile::tempdir().unwrap();
        let d = Counting {
            calls: Cell::new(0),
            action: Action::Skip,
        };
        let r = reconcile(out.path(), "German", "verbs", false, &d).unwrap();
        assert_eq!(r.action, Action::Proceed);
        assert!(r.removed.is_empty());
        assert_eq!(d.calls.get(), 0);
    }

    #[test]
    fn overwrite_removes_matches_only() {
        let out = setup(&["verbs.json", "verbs_old.json", "nouns.json"]);
        let d = Counting {
            calls: Cell::new(0),
            action: Action::Skip,
        };
        let r = reconcile(out.path(), "German", "verbs", true, &d).unwrap();

        assert_eq!(r.action, Action::Proceed);
        assert_eq!(
            r.removed,
            vec![
                out.path().join("German/verbs.json"),
                out.path().join("German/verbs_old.json"),
            ]
        );
        assert_eq!(d.calls.get(), 0);
        assert!(!out.path().join("German/verbs.json").exists());
        assert!(!out.path().join("German/verbs_old.json").exists());
        assert!(out.path().join("German/nouns.json").exists());
    }

    #[test]
    fn skip_keeps_files() {
        let out = setup(&["verbs.json"]);
        let r = reconcile(out.path(), "german", "verbs", false, &Fixed(Action::Skip)).unwrap();
        assert_eq!(r.action, Action::Skip);
        assert!(r.removed.is_empty());
        assert!(out.path().join("German/verbs.json").exists());
    }

    #[test]
    fn decided_overwrite() {
        let out = setup(&["verbs.json"]);
        let d = Counting {
            calls: Cell::new(0),
            action: Action::Proceed,
        };
        let r = reconcile(out.path(), "German", "verbs", false, &d).unwrap();
        assert_eq!(r.action, Action::Proceed);
        assert_eq!(r.removed, vec![out.path().join("German/verbs.json")]);
        assert_eq!(d.calls.get(), 1);
        assert!(!out.path().join("German/verbs.json").exists());
    }

    #[test]
    fn prompt_answers() {
        assert_eq!(Prompt::parse("o\n"), Action::Proceed);
        assert_eq!(Prompt::parse("Overwrite"), Action::Proceed);
        assert_eq!(Prompt::parse("k"), Action::Skip);
        assert_eq!(Prompt::parse(""), Action::Skip);
    }
}
