use thiserror::Error;

/// Errors that can occur while resolving a schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("unknown type: {structure}.{field} references {ty}")]
    UnknownType {
        structure: String,
        field: String,
        ty: String,
    },
    #[error("not a structure: {0}")]
    NotStructure(String),
    #[error("invalid scalar width: {ty} is {width} bytes")]
    InvalidWidth { ty: String, width: usize },
    #[error("signed scalars are not supported: {0}")]
    Signed(String),
    #[error("value out of range: {ty}.{name} = {value}")]
    ValueOverflow { ty: String, name: String, value: u64 },
    #[error("missing name: attribute of type {ty} in {structure}")]
    MissingName { structure: String, ty: String },
    #[error("missing size: {structure}.{field}")]
    MissingSize { structure: String, field: String },
    #[error("missing value: {structure}.{field}")]
    MissingValue { structure: String, field: String },
    #[error("duplicate field: {structure}.{field}")]
    DuplicateField { structure: String, field: String },
    #[error("unknown size field: {structure}.{field} is sized by {size_field}")]
    UnknownSizeField {
        structure: String,
        field: String,
        size_field: String,
    },
    #[error("size field is not a scalar: {structure}.{size_field}")]
    SizeFieldNotScalar {
        structure: String,
        size_field: String,
    },
    #[error("size field governs multiple fields: {structure}.{size_field}")]
    SharedSizeField {
        structure: String,
        size_field: String,
    },
    #[error("size field declared after content: {structure}.{size_field} sizes {field}")]
    SizeAfterContent {
        structure: String,
        field: String,
        size_field: String,
    },
    #[error("invalid sizing: {structure}.{field} is not a sibling-bound group")]
    InvalidSizing { structure: String, field: String },
    #[error("group of zero-sized elements: {structure}.{field}")]
    ZeroSizedElement { structure: String, field: String },
    #[error("cyclic embedding: {0}")]
    Cycle(String),
}
