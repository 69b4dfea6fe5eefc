//! Error enum
use std::{fmt, path::PathBuf};

use crate::format::FormatterError;
use crate::sparql;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    /// Unknown language/category, missing extraction root, bad config file.
    Configuration(String),
    Service(sparql::Error),
    /// The service answered but there was nothing to keep.
    EmptyResult(PathBuf),
    RetryExhausted {
        query: PathBuf,
        attempts: usize,
    },
    Formatter(FormatterError),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {}", e),
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::Service(e) => write!(f, "query service error: {}", e),
            Error::EmptyResult(q) => write!(f, "nothing returned by the server for {:?}", q),
            Error::RetryExhausted { query, attempts } => {
                write!(f, "{:?} failed after {} attempts", query, attempts)
            }
            Error::Formatter(e) => write!(f, "formatter error: {}", e),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// true for errors that come from the remote service and may go away on a new attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Service(_) | Error::EmptyResult(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<sparql::Error> for Error {
    fn from(e: sparql::Error) -> Error {
        Error::Service(e)
    }
}

impl From<FormatterError> for Error {
    fn from(e: FormatterError) -> Error {
        Error::Formatter(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_retry_exhausted() {
        let e = Error::RetryExhausted {
            query: PathBuf::from("German/verbs/verbs.sparql"),
            attempts: 3,
        };
        assert_eq!(
            e.to_string(),
            "\"German/verbs/verbs.sparql\" failed after 3 attempts"
        );
    }

    #[test]
    fn from_io() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "nope").into();
        assert!(matches!(e, Error::Io(_)));
    }
}
