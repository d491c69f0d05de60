//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading or parsing a configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON parse error with a concrete line/column location.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// A value parsed but is not usable.
    Invalid {
        /// Optional path of the offending file.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the location when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
            } => match path {
                Some(p) => format!("Parse error at {}:{}:{}: {}", p.display(), line, col, message),
                None => format!("Parse error at line {}, column {}: {}", line, col, message),
            },
            Self::Invalid { path, message } => match path {
                Some(p) => format!("Invalid config at {}: {}", p.display(), message),
                None => format!("Invalid config: {}", message),
            },
        }
    }

    /// Attach a source path to the error.
    pub(crate) fn with_path(self, p: PathBuf) -> Self {
        match self {
            Self::Read { message, .. } => Self::Read {
                path: Some(p),
                message,
            },
            Self::Parse {
                line, col, message, ..
            } => Self::Parse {
                path: Some(p),
                line,
                col,
                message,
            },
            Self::Invalid { message, .. } => Self::Invalid {
                path: Some(p),
                message,
            },
        }
    }
}

impl From<ron::error::SpannedError> for Error {
    fn from(e: ron::error::SpannedError) -> Self {
        Self::Parse {
            path: None,
            line: e.span.start.line,
            col: e.span.start.col,
            message: e.code.to_string(),
        }
    }
}
