//! Error types surfaced by the generator.
//!
//! Schema-structural problems (an unknown type tag, a missing required key)
//! are fatal and carry the packet + path that triggered them. I/O failures
//! are propagated as-is. Unsupported constructs (multi-condition inverse
//! switches) are *not* errors: the generator emits a sentinel comment and
//! keeps going, per the "never guess" policy in the schema compiler.

use std::fmt;

use thiserror::Error;

/// Where in the schema an error was noticed.
#[derive(Debug, Clone)]
pub struct SchemaPath {
    pub state: String,
    pub source: String,
    pub packet: String,
    pub field_path: Vec<String>,
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.state, self.source, self.packet)?;
        for segment in &self.field_path {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown type tag `{tag}` at {path}")]
    UnknownTypeTag { tag: String, path: SchemaPath },

    #[error("missing required key `{key}` at {path}")]
    MissingKey { key: String, path: SchemaPath },

    #[error("malformed compareTo `{compare_to}` at {path}: {reason}")]
    MalformedCompareTo {
        compare_to: String,
        reason: String,
        path: SchemaPath,
    },

    #[error("malformed type data at {path}: {reason}")]
    MalformedTypeData { reason: String, path: SchemaPath },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to load protocol schema: {0}")]
    Catalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
