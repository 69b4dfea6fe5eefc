/*! Formatting scripts invocation

Once raw results are exported, each (language, data type) pair has its own formatting routine
(`<extraction_root>/<Language>/<category>/format_<category>.py`) that reshapes the export.
!*/
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

#[derive(Debug)]
pub enum FormatterError {
    Spawn(std::io::Error),
    MissingScript(PathBuf),
    ExitStatus { category: String, code: Option<i32> },
}

impl fmt::Display for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterError::Spawn(e) => write!(f, "could not start formatter: {}", e),
            FormatterError::MissingScript(p) => write!(f, "no formatting script at {:?}", p),
            FormatterError::ExitStatus { category, code } => match code {
                Some(c) => write!(f, "{} formatter exited with code {}", category, c),
                None => write!(f, "{} formatter was terminated by a signal", category),
            },
        }
    }
}

impl std::error::Error for FormatterError {}

pub trait Formatter {
    fn format(&self, language: &str, category: &str, output_dir: &Path)
        -> Result<(), FormatterError>;
}

/// Runs `<program> <script> --file-path <output_dir>`.
#[derive(Debug, Clone)]
pub struct ProcessFormatter {
    program: String,
    extraction_root: PathBuf,
}

impl ProcessFormatter {
    pub fn new(program: &str, extraction_root: &Path) -> Self {
        Self {
            program: program.to_string(),
            extraction_root: extraction_root.to_path_buf(),
        }
    }

    pub fn script_path(&self, language: &str, category: &str) -> PathBuf {
        self.extraction_root
            .join(language)
            .join(category)
            .join(format!("format_{}.py", category))
    }
}

impl Formatter for ProcessFormatter {
    fn format(
        &self,
        language: &str,
        category: &str,
        output_dir: &Path,
    ) -> Result<(), FormatterError> {
        let script = self.script_path(language, category);
        if !script.is_file() {
            return Err(FormatterError::MissingScript(script));
        }

        debug!("running {} {:?}", self.program, script);
        let status = Command::new(&self.program)
            .arg(&script)
            .arg("--file-path")
            .arg(output_dir)
            .status()
            .map_err(FormatterError::Spawn)?;

        if status.success() {
            Ok(())
        } else {
            Err(FormatterError::ExitStatus {
                category: category.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Does nothing. Used when formatting is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _: &str, _: &str, _: &Path) -> Result<(), FormatterError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    #[test]
    fn missing_script() {
        let root = tempfile::tempdir().unwrap();
        let f = ProcessFormatter::new("python3", root.path());
        let r = f.format("Finnish", "verbs", Path::new("out"));
        assert!(matches!(r, Err(FormatterError::MissingScript(_))));
    }

    #[test]
    fn spawn_failure() {
        let root = tempfile::tempdir().unwrap();
        let f = ProcessFormatter::new("surely-not-an-installed-program-xyz", root.path());
        let script = f.script_path("Finnish", "verbs");
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        File::create(&script).unwrap();

        let r = f.format("Finnish", "verbs", Path::new("out"));
        assert!(matches!(r, Err(FormatterError::Spawn(_))));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status() {
        let root = tempfile::tempdir().unwrap();
        // `false <script> --file-path out` exits with 1.
        let f = ProcessFormatter::new("false", root.path());
        let script = f.script_path("Finnish", "verbs");
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        File::create(&script).unwrap();

        let r = f.format("Finnish", "verbs", Path::new("out"));
        assert!(matches!(
            r,
            Err(FormatterError::ExitStatus { code: Some(1), .. })
        ));
    }

    #[test]
    fn script_location() {
        let f = ProcessFormatter::new("python3", Path::new("extract"));
        assert_eq!(
            f.script_path("German", "nouns"),
            PathBuf::from("extract/German/nouns/format_nouns.py")
        );
    }
}
