//! Encode and decode structures by interpreting a resolved [Schema].
//!
//! # Decode
//!
//! Fields are read in wire order from a single shared [Cursor]. Derived fields are read into a
//! per-structure frame (never into the value) so that later variable blobs and groups can
//! consult them. Embedded structures and group items are decoded recursively on the same
//! cursor.
//!
//! # Encode
//!
//! Fields are written in the same order. Every derived field is recomputed from the field it
//! describes, so a value can never disagree with its own encoding. Missing content fields are
//! written as zeroes (scalars and fixed blobs), as empty (variable blobs and groups), or as an
//! empty structure (embedded structures).

use crate::{
    schema::{Cardinality, Derivation, Element, Field, FieldKind, Structure},
    Config, Schema, StructureValue, Value,
};
use bytes::{BufMut, Bytes, BytesMut};
use catbuffer_codec::{
    fit,
    types::group::{read_budgeted_with, read_counted_with},
    write_uint, Cursor, Error, Width,
};
use tracing::{debug, trace};

/// Encodes and decodes any structure of a [Schema].
///
/// A `Codec` holds no mutable state and can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct Codec<'a> {
    schema: &'a Schema,
    config: Config,
}

impl<'a> Codec<'a> {
    pub fn new(schema: &'a Schema, config: Config) -> Self {
        Self { schema, config }
    }

    /// Decodes structure `name` from `cursor`, consuming exactly its extent.
    pub fn decode(&self, name: &str, cursor: &mut Cursor<'_>) -> Result<StructureValue, Error> {
        let structure = self.structure(name)?;
        self.read_structure(structure, cursor)
    }

    /// Decodes structure `name` from the whole of `bytes`.
    ///
    /// Returns [Error::TrailingData] if the structure ends before the input does.
    pub fn decode_root(&self, name: &str, bytes: &[u8]) -> Result<StructureValue, Error> {
        let mut cursor = Cursor::new(bytes);
        let value = self.decode(name, &mut cursor)?;
        cursor.ensure_exhausted()?;
        Ok(value)
    }

    /// Encodes `value` as structure `name`.
    pub fn encode(&self, name: &str, value: &StructureValue) -> Result<Bytes, Error> {
        let structure = self.structure(name)?;
        let len = self.structure_size(structure, value)?;
        let mut buf = BytesMut::with_capacity(len);
        self.write_structure(structure, value, &mut buf)?;
        assert_eq!(buf.len(), len, "write did not write expected bytes");
        Ok(buf.freeze())
    }

    /// Writes `value` as structure `name` to `buf`.
    pub fn write(
        &self,
        name: &str,
        value: &StructureValue,
        buf: &mut impl BufMut,
    ) -> Result<(), Error> {
        let structure = self.structure(name)?;
        self.write_structure(structure, value, buf)
    }

    /// Returns the exact length of the encoding of `value` as structure `name`.
    pub fn encode_size(&self, name: &str, value: &StructureValue) -> Result<usize, Error> {
        let structure = self.structure(name)?;
        self.structure_size(structure, value)
    }

    /// Computes the derived field `field` of `value` as it would be encoded.
    pub fn derived(&self, name: &str, value: &StructureValue, field: &str) -> Result<u64, Error> {
        let structure = self.structure(name)?;
        match self.field(structure, field)?.kind {
            FieldKind::Derived { ref of, rule, .. } => self.derive(structure, value, of, rule),
            _ => Err(Error::Malformed(format!(
                "{}.{field} is not derived",
                structure.name()
            ))),
        }
    }

    /// Assigns content field `field` of `value`, checking it against the layout.
    ///
    /// Derived fields and constants are read-only. A scalar that does not fit its width fails
    /// with [Error::Overflow] and a blob longer than its fixed width with [Error::TooLarge]. The
    /// same checks apply to every item of a group and every field of a nested structure.
    pub fn set(
        &self,
        name: &str,
        value: &mut StructureValue,
        field: &str,
        content: Value,
    ) -> Result<(), Error> {
        let structure = self.structure(name)?;
        self.check_field(structure, field, &content)?;
        value.insert(field, content);
        Ok(())
    }

    fn structure(&self, name: &str) -> Result<&'a Structure, Error> {
        self.schema
            .structure(name)
            .ok_or_else(|| Error::Malformed(format!("unknown structure: {name}")))
    }

    fn field<'s>(&self, structure: &'s Structure, name: &str) -> Result<&'s Field, Error> {
        structure
            .field(name)
            .ok_or_else(|| Error::Malformed(format!("unknown field: {}.{name}", structure.name())))
    }

    fn check_structure(
        &self,
        structure: &Structure,
        value: &StructureValue,
    ) -> Result<(), Error> {
        for (field, content) in value.iter() {
            self.check_field(structure, field, content)?;
        }
        Ok(())
    }

    fn check_field(
        &self,
        structure: &Structure,
        field: &str,
        content: &Value,
    ) -> Result<(), Error> {
        if structure.constant(field).is_some() {
            return Err(Error::Malformed(format!(
                "{}.{field} is a constant",
                structure.name()
            )));
        }
        let descriptor = self.field(structure, field)?;
        match (&descriptor.kind, content) {
            (FieldKind::Derived { .. }, _) => Err(Error::Malformed(format!(
                "{}.{field} is derived",
                structure.name()
            ))),
            (FieldKind::Scalar(width), Value::Uint(scalar)) => check_uint(*width, *scalar),
            (FieldKind::FixedBlob(size), Value::Bytes(bytes)) => check_blob(*size, bytes),
            (FieldKind::VariableBlob { .. }, Value::Bytes(_)) => Ok(()),
            (FieldKind::Embedded(ty), Value::Structure(inner)) => {
                self.check_structure(self.structure(ty)?, inner)
            }
            (
                FieldKind::Repeated {
                    element,
                    cardinality,
                },
                Value::List(items),
            ) => {
                if let Cardinality::Fixed(count) = cardinality {
                    if items.len() != *count {
                        return Err(Error::Malformed(format!(
                            "{}.{field} holds {} items, expected {count}",
                            structure.name(),
                            items.len()
                        )));
                    }
                }
                for item in items {
                    match (element, item) {
                        (Element::Structure(ty), Value::Structure(inner)) => {
                            self.check_structure(self.structure(ty)?, inner)?
                        }
                        (Element::Scalar(width), Value::Uint(scalar)) => {
                            check_uint(*width, *scalar)?
                        }
                        (Element::Blob(size), Value::Bytes(bytes)) => check_blob(*size, bytes)?,
                        (_, other) => return Err(mismatch(structure, descriptor, other)),
                    }
                }
                Ok(())
            }
            (_, content) => Err(mismatch(structure, descriptor, content)),
        }
    }

    fn read_structure(
        &self,
        structure: &Structure,
        cursor: &mut Cursor<'_>,
    ) -> Result<StructureValue, Error> {
        let start = cursor.offset();
        let mut value = StructureValue::new();
        let mut frame: Vec<(&str, u64)> = Vec::new();
        for field in structure.fields() {
            let offset = cursor.offset();
            match &field.kind {
                FieldKind::Scalar(width) => {
                    value.insert(field.name.as_str(), cursor.read_uint(*width)?);
                }
                FieldKind::FixedBlob(size) => {
                    value.insert(field.name.as_str(), cursor.read_bytes(*size)?);
                }
                FieldKind::VariableBlob { size_field } => {
                    let len = lookup(structure, &frame, size_field)?;
                    let len = self.limit(len, self.config.max_blob_len)?;
                    value.insert(field.name.as_str(), cursor.read_bytes(len)?);
                }
                FieldKind::Embedded(ty) => {
                    let nested = self.read_structure(self.structure(ty)?, cursor)?;
                    value.insert(field.name.as_str(), nested);
                }
                FieldKind::Repeated {
                    element,
                    cardinality,
                } => {
                    let items = self.read_group(structure, &frame, element, cardinality, cursor)?;
                    value.insert(field.name.as_str(), items);
                }
                FieldKind::Derived { width, .. } => {
                    frame.push((field.name.as_str(), cursor.read_uint(*width)?));
                }
            }
            trace!(
                structure = structure.name(),
                field = field.name.as_str(),
                offset,
                len = cursor.offset() - offset,
                "decoded field"
            );
        }
        debug!(
            structure = structure.name(),
            offset = start,
            len = cursor.offset() - start,
            "decoded structure"
        );
        Ok(value)
    }

    fn read_group(
        &self,
        structure: &Structure,
        frame: &[(&str, u64)],
        element: &Element,
        cardinality: &Cardinality,
        cursor: &mut Cursor<'_>,
    ) -> Result<Vec<Value>, Error> {
        let read = |cursor: &mut Cursor<'_>| self.read_element(element, cursor);
        match cardinality {
            Cardinality::Fixed(count) => read_counted_with(cursor, *count as u64, read),
            Cardinality::Counted(count_field) => {
                let count = lookup(structure, frame, count_field)?;
                let count = self.limit(count, self.config.max_items)?;
                read_counted_with(cursor, count as u64, read)
            }
            Cardinality::Budgeted(size_field) => {
                let budget = lookup(structure, frame, size_field)?;
                let max_items = self.config.max_items;
                let mut items = 0usize;
                read_budgeted_with(cursor, budget, |cursor| {
                    items += 1;
                    if items > max_items {
                        return Err(Error::LengthExceeded(items, max_items));
                    }
                    read(cursor)
                })
            }
        }
    }

    fn read_element(&self, element: &Element, cursor: &mut Cursor<'_>) -> Result<Value, Error> {
        Ok(match element {
            Element::Structure(ty) => {
                Value::Structure(self.read_structure(self.structure(ty)?, cursor)?)
            }
            Element::Scalar(width) => Value::Uint(cursor.read_uint(*width)?),
            Element::Blob(size) => Value::from(cursor.read_bytes(*size)?),
        })
    }

    /// Converts a decoded size or count to `usize`, enforcing `max`.
    fn limit(&self, value: u64, max: usize) -> Result<usize, Error> {
        match usize::try_from(value) {
            Ok(value) if value <= max => Ok(value),
            _ => Err(Error::LengthExceeded(
                usize::try_from(value).unwrap_or(usize::MAX),
                max,
            )),
        }
    }

    fn write_structure(
        &self,
        structure: &Structure,
        value: &StructureValue,
        buf: &mut impl BufMut,
    ) -> Result<(), Error> {
        for field in structure.fields() {
            let content = value.get(&field.name);
            match &field.kind {
                FieldKind::Scalar(width) => {
                    let scalar = match content {
                        None => 0,
                        Some(Value::Uint(scalar)) => *scalar,
                        Some(other) => return Err(mismatch(structure, field, other)),
                    };
                    write_uint(scalar, *width, buf)?;
                }
                FieldKind::FixedBlob(size) => {
                    let bytes = match content {
                        None => None,
                        Some(Value::Bytes(bytes)) => Some(&bytes[..]),
                        Some(other) => return Err(mismatch(structure, field, other)),
                    };
                    buf.put_slice(&fit(bytes, *size)?);
                }
                FieldKind::VariableBlob { .. } => match content {
                    None => {}
                    Some(Value::Bytes(bytes)) => buf.put_slice(bytes),
                    Some(other) => return Err(mismatch(structure, field, other)),
                },
                FieldKind::Embedded(ty) => {
                    let nested = self.structure(ty)?;
                    match content {
                        None => self.write_structure(nested, &StructureValue::new(), buf)?,
                        Some(Value::Structure(inner)) => {
                            self.write_structure(nested, inner, buf)?
                        }
                        Some(other) => return Err(mismatch(structure, field, other)),
                    }
                }
                FieldKind::Repeated {
                    element,
                    cardinality,
                } => {
                    let items = items(structure, field, content)?;
                    if let Cardinality::Fixed(count) = cardinality {
                        if items.len() != *count {
                            return Err(Error::Malformed(format!(
                                "{}.{} holds {} items, expected {count}",
                                structure.name(),
                                field.name,
                                items.len()
                            )));
                        }
                    }
                    for item in items {
                        self.write_element(structure, field, element, item, buf)?;
                    }
                }
                FieldKind::Derived { width, of, rule } => {
                    let derived = self.derive(structure, value, of, *rule)?;
                    write_uint(derived, *width, buf)?;
                }
            }
        }
        Ok(())
    }

    fn write_element(
        &self,
        structure: &Structure,
        field: &Field,
        element: &Element,
        item: &Value,
        buf: &mut impl BufMut,
    ) -> Result<(), Error> {
        match (element, item) {
            (Element::Structure(ty), Value::Structure(inner)) => {
                self.write_structure(self.structure(ty)?, inner, buf)
            }
            (Element::Scalar(width), Value::Uint(scalar)) => write_uint(*scalar, *width, buf),
            (Element::Blob(size), Value::Bytes(bytes)) => {
                buf.put_slice(&fit(Some(&bytes[..]), *size)?);
                Ok(())
            }
            (_, other) => Err(mismatch(structure, field, other)),
        }
    }

    /// Computes a derived field from the current content of `of`.
    fn derive(
        &self,
        structure: &Structure,
        value: &StructureValue,
        of: &str,
        rule: Derivation,
    ) -> Result<u64, Error> {
        let field = self.field(structure, of)?;
        let content = value.get(of);
        let derived = match rule {
            Derivation::ByteLength => match content {
                None => 0,
                Some(Value::Bytes(bytes)) => bytes.len(),
                Some(other) => return Err(mismatch(structure, field, other)),
            },
            Derivation::ItemCount => items(structure, field, content)?.len(),
            Derivation::GroupSize => self.field_size(structure, field, content)?,
        };
        Ok(derived as u64)
    }

    fn structure_size(
        &self,
        structure: &Structure,
        value: &StructureValue,
    ) -> Result<usize, Error> {
        if let Some(size) = structure.fixed_size() {
            return Ok(size);
        }
        structure.fields().iter().try_fold(0usize, |total, field| {
            let size = self.field_size(structure, field, value.get(&field.name))?;
            Ok(total + size)
        })
    }

    fn field_size(
        &self,
        structure: &Structure,
        field: &Field,
        content: Option<&Value>,
    ) -> Result<usize, Error> {
        Ok(match &field.kind {
            FieldKind::Scalar(width) | FieldKind::Derived { width, .. } => width.bytes(),
            FieldKind::FixedBlob(size) => *size,
            FieldKind::VariableBlob { .. } => match content {
                None => 0,
                Some(Value::Bytes(bytes)) => bytes.len(),
                Some(other) => return Err(mismatch(structure, field, other)),
            },
            FieldKind::Embedded(ty) => {
                let nested = self.structure(ty)?;
                match content {
                    None => self.structure_size(nested, &StructureValue::new())?,
                    Some(Value::Structure(inner)) => self.structure_size(nested, inner)?,
                    Some(other) => return Err(mismatch(structure, field, other)),
                }
            }
            FieldKind::Repeated { element, .. } => {
                let mut total = 0;
                for item in items(structure, field, content)? {
                    total += match (element, item) {
                        (Element::Structure(ty), Value::Structure(inner)) => {
                            self.structure_size(self.structure(ty)?, inner)?
                        }
                        (Element::Scalar(width), Value::Uint(_)) => width.bytes(),
                        (Element::Blob(size), Value::Bytes(_)) => *size,
                        (_, other) => return Err(mismatch(structure, field, other)),
                    };
                }
                total
            }
        })
    }
}

/// Returns the value of derived field `name` decoded earlier in the same structure.
fn lookup(structure: &Structure, frame: &[(&str, u64)], name: &str) -> Result<u64, Error> {
    frame
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            Error::Malformed(format!(
                "{}.{name} was not decoded before its content",
                structure.name()
            ))
        })
}

fn items<'v>(
    structure: &Structure,
    field: &Field,
    content: Option<&'v Value>,
) -> Result<&'v [Value], Error> {
    match content {
        None => Ok(&[]),
        Some(Value::List(items)) => Ok(items),
        Some(other) => Err(mismatch(structure, field, other)),
    }
}

fn check_uint(width: Width, value: u64) -> Result<(), Error> {
    if value > width.max_value() {
        return Err(Error::Overflow {
            value,
            width: width.bytes(),
        });
    }
    Ok(())
}

fn check_blob(size: usize, bytes: &[u8]) -> Result<(), Error> {
    if bytes.len() > size {
        return Err(Error::TooLarge {
            len: bytes.len(),
            width: size,
        });
    }
    Ok(())
}

fn mismatch(structure: &Structure, field: &Field, content: &Value) -> Error {
    Error::Malformed(format!(
        "{}.{} cannot hold {}",
        structure.name(),
        field.name,
        content.kind()
    ))
}
