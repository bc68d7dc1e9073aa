//! Conversion between structure values and JSON.
//!
//! Scalars map to JSON numbers, blobs to lowercase hex strings, embedded structures to objects,
//! and groups to arrays. Derived fields never appear: they are omitted when printing and
//! rejected when parsing.

use crate::{hex, Error};
use bytes::Bytes;
use catbuffer_layout::{
    schema::{Element, FieldKind},
    Schema, StructureValue, Value,
};
use serde_json::{Map, Value as Json};

/// Converts a value to JSON, preserving field order.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Uint(value) => Json::from(*value),
        Value::Bytes(bytes) => Json::String(hex::encode(bytes)),
        Value::Structure(structure) => structure_to_json(structure),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
    }
}

/// Converts a structure value to a JSON object.
pub fn structure_to_json(value: &StructureValue) -> Json {
    let fields: Map<String, Json> = value
        .iter()
        .map(|(name, value)| (name.to_string(), to_json(value)))
        .collect();
    Json::Object(fields)
}

/// Parses `json` as an instance of structure `name`.
///
/// Content fields that are absent from `json` are left unset.
pub fn from_json(schema: &Schema, name: &str, json: &Json) -> Result<StructureValue, Error> {
    let structure = schema
        .structure(name)
        .ok_or_else(|| Error::UnknownStructure(name.to_string()))?;
    let Json::Object(object) = json else {
        return Err(Error::InvalidValue {
            structure: name.to_string(),
            field: String::new(),
            expected: "an object",
        });
    };

    // Reject keys with no content field to land in
    for key in object.keys() {
        match structure.field(key) {
            None => {
                return Err(Error::UnknownField {
                    structure: name.to_string(),
                    field: key.clone(),
                })
            }
            Some(field) if matches!(field.kind, FieldKind::Derived { .. }) => {
                return Err(Error::DerivedField {
                    structure: name.to_string(),
                    field: key.clone(),
                })
            }
            Some(_) => {}
        }
    }

    let mut value = StructureValue::new();
    for field in structure.fields() {
        let Some(json) = object.get(&field.name) else {
            continue;
        };
        let invalid = |expected| Error::InvalidValue {
            structure: name.to_string(),
            field: field.name.clone(),
            expected,
        };
        let parsed = match &field.kind {
            FieldKind::Derived { .. } => continue,
            FieldKind::Scalar(_) => uint(json).ok_or_else(|| invalid("an unsigned integer"))?,
            FieldKind::FixedBlob(_) | FieldKind::VariableBlob { .. } => blob(json, invalid)?,
            FieldKind::Embedded(ty) => Value::Structure(from_json(schema, ty, json)?),
            FieldKind::Repeated { element, .. } => {
                let Json::Array(items) = json else {
                    return Err(invalid("an array"));
                };
                let items = items
                    .iter()
                    .map(|item| match element {
                        Element::Structure(ty) => {
                            Ok(Value::Structure(from_json(schema, ty, item)?))
                        }
                        Element::Scalar(_) => {
                            uint(item).ok_or_else(|| invalid("an array of unsigned integers"))
                        }
                        Element::Blob(_) => blob(item, invalid),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Value::List(items)
            }
        };
        value.insert(field.name.clone(), parsed);
    }
    Ok(value)
}

fn uint(json: &Json) -> Option<Value> {
    json.as_u64().map(Value::Uint)
}

fn blob(json: &Json, invalid: impl Fn(&'static str) -> Error) -> Result<Value, Error> {
    json.as_str()
        .and_then(hex::decode)
        .map(|bytes| Value::Bytes(Bytes::from(bytes)))
        .ok_or_else(|| invalid("a hex string"))
}
