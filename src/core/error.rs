//! Purpose: Crate-wide error type shared by the parser, validator, and pipeline.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Carries enough context (kind, path, stage, source) to render one diagnostic line.
//! Invariants: `Error::diagnostic` is the only place user-facing error wording lives.
//! Invariants: Exit codes are derived from `ErrorKind` through `to_exit_code` only.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::pipeline::Stage;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Usage,
    NotFound,
    NotAFile,
    Io,
    InvalidJson,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    stage: Option<Stage>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            stage: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Renders the single stderr line reported for this failure.
    pub fn diagnostic(&self) -> String {
        let path = self
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        match self.kind {
            ErrorKind::Usage => self
                .message
                .clone()
                .unwrap_or_else(|| "Error: invalid arguments".to_string()),
            ErrorKind::NotFound => format!("Error: Input file '{path}' does not exist"),
            ErrorKind::NotAFile => format!("Error: '{path}' is not a file"),
            ErrorKind::Io => format!("Error: {}", self.detail("i/o error")),
            ErrorKind::InvalidJson => {
                format!("Error: Invalid JSON in input file: {}", self.detail("parse failed"))
            }
            ErrorKind::Internal => format!("Unexpected error: {}", self.detail("internal error")),
        }
    }

    fn detail(&self, fallback: &str) -> String {
        if let Some(source) = &self.source {
            return source.to_string();
        }
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(stage) = self.stage {
            write!(f, " (stage: {stage})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Every failure terminates the run with status 1; help and success exit 0.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage
        | ErrorKind::NotFound
        | ErrorKind::NotAFile
        | ErrorKind::Io
        | ErrorKind::InvalidJson
        | ErrorKind::Internal => 1,
    }
}
