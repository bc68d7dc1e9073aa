//! Inspect schemas and convert structures between hex and JSON.
//!
//! Schemas are read from YAML or JSON files (by extension) and resolved before any command runs.
//! Every command returns its output as a string; printing is left to the binary.

use catbuffer_layout::{
    schema::{Cardinality, Element, FieldKind},
    Codec, Config, Schema,
};
use std::{fmt::Write as _, fs, path::Path};
use tracing::{debug, info};

mod error;
pub mod hex;
pub mod json;

pub use error::Error;

/// Subcommand for printing a schema.
pub const LAYOUT_CMD: &str = "layout";

/// Subcommand for decoding hex to JSON.
pub const DECODE_CMD: &str = "decode";

/// Subcommand for encoding JSON to hex.
pub const ENCODE_CMD: &str = "encode";

/// Loads and resolves the schema at `path`.
pub fn load(path: &Path) -> Result<Schema, Error> {
    let input = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => Schema::from_json(&input)?,
        _ => Schema::from_yaml(&input)?,
    };
    info!(
        path = ?path,
        structures = schema.structures().count(),
        "loaded schema"
    );
    Ok(schema)
}

/// Describes every structure of `schema`, one field per line, followed by its enumerations.
pub fn layout(schema: &Schema) -> String {
    let mut out = String::new();
    for structure in schema.structures() {
        match structure.fixed_size() {
            Some(size) => {
                let _ = writeln!(out, "{} ({size} bytes)", structure.name());
            }
            None => {
                let _ = writeln!(out, "{} (variable)", structure.name());
            }
        }
        for field in structure.fields() {
            let _ = writeln!(out, "  {}: {}", field.name, describe(&field.kind));
        }
        for constant in structure.constants() {
            let _ = writeln!(
                out,
                "  {}: const u{} = {}",
                constant.name,
                constant.width.bytes() * 8,
                constant.value
            );
        }
    }
    for enumeration in schema.enumerations() {
        let _ = writeln!(
            out,
            "{} (enum u{})",
            enumeration.name,
            enumeration.width.bytes() * 8
        );
        for entry in &enumeration.values {
            let _ = writeln!(out, "  {} = {}", entry.name, entry.value);
        }
    }
    out
}

fn describe(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Scalar(width) => format!("u{}", width.bytes() * 8),
        FieldKind::FixedBlob(size) => format!("bytes[{size}]"),
        FieldKind::VariableBlob { size_field } => format!("bytes[{size_field}]"),
        FieldKind::Embedded(ty) => ty.clone(),
        FieldKind::Repeated {
            element,
            cardinality,
        } => {
            let element = match element {
                Element::Structure(ty) => ty.clone(),
                Element::Scalar(width) => format!("u{}", width.bytes() * 8),
                Element::Blob(size) => format!("bytes[{size}]"),
            };
            match cardinality {
                Cardinality::Fixed(count) => format!("{element}[{count}]"),
                Cardinality::Counted(field) => format!("{element}[{field}]"),
                Cardinality::Budgeted(field) => format!("{element}[{field} bytes]"),
            }
        }
        FieldKind::Derived { width, of, rule } => {
            format!("u{} = {rule:?}({of})", width.bytes() * 8)
        }
    }
}

/// Decodes structure `name` from hex and renders it as JSON.
pub fn decode(schema: &Schema, config: Config, name: &str, input: &str) -> Result<String, Error> {
    let bytes = hex::decode(input).ok_or_else(|| Error::InvalidHex(input.to_string()))?;
    let codec = Codec::new(schema, config);
    let value = codec.decode_root(name, &bytes)?;
    debug!(structure = name, len = bytes.len(), "decoded");
    Ok(serde_json::to_string_pretty(&json::structure_to_json(
        &value,
    ))?)
}

/// Encodes structure `name` from JSON and renders it as hex.
pub fn encode(schema: &Schema, config: Config, name: &str, input: &str) -> Result<String, Error> {
    let parsed: serde_json::Value = serde_json::from_str(input)?;
    let value = json::from_json(schema, name, &parsed)?;
    let codec = Codec::new(schema, config);
    let bytes = codec.encode(name, &value)?;
    debug!(structure = name, len = bytes.len(), "encoded");
    Ok(hex::encode(&bytes))
}
