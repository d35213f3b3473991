//! All error types for the resxlate crate.
//!
//! Every fallible operation (loading defaults, reading settings, calling the
//! translation service, merging into a locale file) returns [`Error`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("translation service error for key `{key}` ({language}): {message}")]
    TranslationService {
        key: String,
        language: String,
        message: String,
    },

    #[error("merge error in {}: {message}", path.display())]
    Merge { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a parse error for the given document.
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a merge error for the given target file.
    pub fn merge_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Merge {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a translation service error. Key and language are usually
    /// filled in later with [`Error::for_key`].
    pub fn service_error(message: impl Into<String>) -> Self {
        Error::TranslationService {
            key: String::new(),
            language: String::new(),
            message: message.into(),
        }
    }

    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches key and language context to a translation service error.
    /// Other variants are returned unchanged.
    pub fn for_key(self, key: &str, language: &str) -> Self {
        match self {
            Error::TranslationService { message, .. } => Error::TranslationService {
                key: key.to_string(),
                language: language.to_string(),
                message,
            },
            other => other,
        }
    }

    /// Points a parse error at the file it came from.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Parse { message, .. } => Error::Parse {
                path: path.into(),
                message,
            },
            other => other,
        }
    }

    /// Whether this error must stop the run before any network or file work.
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::Config(_))
    }
}
