use catbuffer_layout::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("codec error: {0}")]
    Codec(#[from] catbuffer_codec::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("unknown structure: {0}")]
    UnknownStructure(String),
    #[error("unknown field: {structure}.{field}")]
    UnknownField { structure: String, field: String },
    #[error("derived field cannot be set: {structure}.{field}")]
    DerivedField { structure: String, field: String },
    #[error("invalid value: {structure}.{field} expects {expected}")]
    InvalidValue {
        structure: String,
        field: String,
        expected: &'static str,
    },
}
