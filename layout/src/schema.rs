//! The resolved layout model.
//!
//! Resolution turns a loose [Document] into an immutable [Schema] in which every structure is a
//! flat, ordered list of [Field]s:
//! - inline attributes are spliced into their parent,
//! - every sibling-bound `size` is checked and its size field is marked [FieldKind::Derived],
//! - the embedding graph is checked to be acyclic.
//!
//! Nothing in a resolved schema can fail to look up while encoding or decoding, apart from
//! structure names supplied by the caller.

use crate::{
    document::{
        Attribute, Disposition, Document, EnumValue, Signedness, Size, Sizing, TypeDescriptor,
    },
    SchemaError,
};
use catbuffer_codec::Width;
use std::collections::BTreeMap;
use tracing::debug;

/// Built-in type of raw bytes.
const BYTE: &str = "byte";

/// A resolved field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

/// Wire shape of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned integer.
    Scalar(Width),
    /// Opaque bytes of a fixed length.
    FixedBlob(usize),
    /// Opaque bytes whose length is held by `size_field`.
    VariableBlob { size_field: String },
    /// A nested structure with no framing of its own.
    Embedded(String),
    /// A run of elements.
    Repeated {
        element: Element,
        cardinality: Cardinality,
    },
    /// A size or count computed from the field named `of`. Never part of a value.
    Derived {
        width: Width,
        of: String,
        rule: Derivation,
    },
}

/// Item type of a [FieldKind::Repeated] field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Structure(String),
    Scalar(Width),
    Blob(usize),
}

/// What governs the number of items in a [FieldKind::Repeated] field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly this many items.
    Fixed(usize),
    /// The named field holds the number of items.
    Counted(String),
    /// The named field holds the total encoded length of the items.
    Budgeted(String),
}

/// How a [FieldKind::Derived] field is computed from its content field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Derivation {
    /// Byte length of a variable blob.
    ByteLength,
    /// Number of items in a counted group.
    ItemCount,
    /// Encoded length of a budgeted group.
    GroupSize,
}

/// A schema constant. Constants have no wire presence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub width: Width,
    pub value: u64,
}

/// A resolved structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    name: String,
    fields: Vec<Field>,
    constants: Vec<Constant>,
    fixed_size: Option<usize>,
    min_size: usize,
}

impl Structure {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn constant(&self, name: &str) -> Option<u64> {
        self.constants
            .iter()
            .find(|constant| constant.name == name)
            .map(|constant| constant.value)
    }

    /// Encoded length of every value of this structure, if it does not depend on content.
    pub fn fixed_size(&self) -> Option<usize> {
        self.fixed_size
    }
}

/// A resolved scalar with labelled values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    pub name: String,
    pub width: Width,
    pub values: Vec<EnumValue>,
}

/// An immutable, fully resolved layout model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    structures: BTreeMap<String, Structure>,
    enumerations: BTreeMap<String, Enumeration>,
}

impl Schema {
    /// Resolve `document`, rejecting anything that would make a layout ambiguous.
    pub fn resolve(document: &Document) -> Result<Self, SchemaError> {
        let mut resolver = Resolver {
            document,
            resolved: BTreeMap::new(),
            visiting: Vec::new(),
        };
        let mut enumerations = BTreeMap::new();
        for (name, descriptor) in &document.0 {
            match descriptor {
                TypeDescriptor::Struct { .. } => {
                    resolver.structure(name)?;
                }
                TypeDescriptor::Enum { size, values } => {
                    let width = scalar_width(name, *size)?;
                    let overflow = values.iter().find(|entry| entry.value > width.max_value());
                    if let Some(entry) = overflow {
                        return Err(SchemaError::ValueOverflow {
                            ty: name.clone(),
                            name: entry.name.clone(),
                            value: entry.value,
                        });
                    }
                    enumerations.insert(
                        name.clone(),
                        Enumeration {
                            name: name.clone(),
                            width,
                            values: values.clone(),
                        },
                    );
                }
                TypeDescriptor::Byte { size, signedness } => {
                    byte_kind(name, *size, *signedness)?;
                }
            }
        }
        debug!(
            structures = resolver.resolved.len(),
            enumerations = enumerations.len(),
            "resolved schema"
        );
        Ok(Self {
            structures: resolver.resolved,
            enumerations,
        })
    }

    /// Parse and resolve a YAML document.
    pub fn from_yaml(input: &str) -> Result<Self, SchemaError> {
        let document = Document::from_yaml(input).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::resolve(&document)
    }

    /// Parse and resolve a JSON document.
    pub fn from_json(input: &str) -> Result<Self, SchemaError> {
        let document = Document::from_json(input).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::resolve(&document)
    }

    pub fn structure(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }

    /// Structures ordered by name.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.structures.values()
    }

    /// Enumerations ordered by name.
    pub fn enumerations(&self) -> impl Iterator<Item = &Enumeration> {
        self.enumerations.values()
    }
}

fn scalar_width(ty: &str, size: usize) -> Result<Width, SchemaError> {
    Width::try_from(size).map_err(|width| SchemaError::InvalidWidth {
        ty: ty.to_string(),
        width,
    })
}

/// Shape of a run of `size` bytes: a scalar if it has a signedness, a blob otherwise.
fn byte_kind(
    ty: &str,
    size: usize,
    signedness: Option<Signedness>,
) -> Result<FieldKind, SchemaError> {
    match signedness {
        Some(Signedness::Signed) => Err(SchemaError::Signed(ty.to_string())),
        Some(Signedness::Unsigned) => Ok(FieldKind::Scalar(scalar_width(ty, size)?)),
        None => Ok(FieldKind::FixedBlob(size)),
    }
}

/// A field awaiting its size field.
struct Binding {
    index: usize,
    size_field: String,
    rule: Derivation,
}

struct Resolver<'a> {
    document: &'a Document,
    resolved: BTreeMap<String, Structure>,
    visiting: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn structure(&mut self, name: &str) -> Result<&Structure, SchemaError> {
        if self.resolved.contains_key(name) {
            return Ok(&self.resolved[name]);
        }
        if let Some(start) = self.visiting.iter().position(|visiting| visiting == name) {
            let mut path = self.visiting[start..].to_vec();
            path.push(name.to_string());
            return Err(SchemaError::Cycle(path.join(" -> ")));
        }
        let document = self.document;
        let Some(TypeDescriptor::Struct { layout }) = document.get(name) else {
            return Err(SchemaError::NotStructure(name.to_string()));
        };

        self.visiting.push(name.to_string());
        let structure = self.layout(name, layout)?;
        self.visiting.pop();
        debug!(
            structure = name,
            fields = structure.fields.len(),
            fixed_size = ?structure.fixed_size,
            "resolved structure"
        );
        Ok(self
            .resolved
            .entry(name.to_string())
            .or_insert(structure))
    }

    fn layout(&mut self, name: &str, layout: &[Attribute]) -> Result<Structure, SchemaError> {
        let mut fields: Vec<Field> = Vec::new();
        let mut constants = Vec::new();
        let mut bindings = Vec::new();
        for attribute in layout {
            match attribute.disposition {
                Some(Disposition::Inline) => {
                    self.reference(name, attribute)?;
                    let inlined = self.structure(&attribute.ty)?;
                    fields.extend(inlined.fields.iter().cloned());
                    constants.extend(inlined.constants.iter().cloned());
                }
                Some(Disposition::Const) => {
                    constants.push(self.constant(name, attribute)?);
                }
                None => {
                    let (field, binding) = self.attribute(name, attribute)?;
                    if let Some((size_field, rule)) = binding {
                        bindings.push(Binding {
                            index: fields.len(),
                            size_field,
                            rule,
                        });
                    }
                    fields.push(field);
                }
            }
        }

        for (index, field) in fields.iter().enumerate() {
            let duplicate = fields[..index].iter().any(|other| other.name == field.name)
                || constants.iter().any(|constant| constant.name == field.name);
            if duplicate {
                return Err(SchemaError::DuplicateField {
                    structure: name.to_string(),
                    field: field.name.clone(),
                });
            }
        }

        for binding in bindings {
            bind(name, &mut fields, binding)?;
        }

        let fixed_size = fields
            .iter()
            .try_fold(0usize, |total, field| total.checked_add(self.size(field)?));
        let min_size = fields
            .iter()
            .fold(0usize, |total, field| total.saturating_add(self.min_size(field)));
        Ok(Structure {
            name: name.to_string(),
            fields,
            constants,
            fixed_size,
            min_size,
        })
    }

    /// Ensures `attribute` references a declared type.
    fn reference(
        &self,
        structure: &str,
        attribute: &Attribute,
    ) -> Result<&'a TypeDescriptor, SchemaError> {
        self.document
            .get(&attribute.ty)
            .ok_or_else(|| SchemaError::UnknownType {
                structure: structure.to_string(),
                field: attribute.name.clone().unwrap_or_default(),
                ty: attribute.ty.clone(),
            })
    }

    fn constant(&self, structure: &str, attribute: &Attribute) -> Result<Constant, SchemaError> {
        let name = attribute_name(structure, attribute)?;
        let value = attribute.value.ok_or_else(|| SchemaError::MissingValue {
            structure: structure.to_string(),
            field: name.clone(),
        })?;
        let width = if attribute.ty == BYTE {
            let Some(Size::Fixed(size)) = attribute.size else {
                return Err(SchemaError::MissingSize {
                    structure: structure.to_string(),
                    field: name,
                });
            };
            scalar_width(&attribute.ty, size)?
        } else {
            match self.reference(structure, attribute)? {
                TypeDescriptor::Byte { size, .. } | TypeDescriptor::Enum { size, .. } => {
                    scalar_width(&attribute.ty, *size)?
                }
                TypeDescriptor::Struct { .. } => {
                    return Err(SchemaError::SizeFieldNotScalar {
                        structure: structure.to_string(),
                        size_field: name,
                    })
                }
            }
        };
        if value > width.max_value() {
            return Err(SchemaError::ValueOverflow {
                ty: attribute.ty.clone(),
                name,
                value,
            });
        }
        Ok(Constant { name, width, value })
    }

    #[allow(clippy::type_complexity)]
    fn attribute(
        &mut self,
        structure: &str,
        attribute: &Attribute,
    ) -> Result<(Field, Option<(String, Derivation)>), SchemaError> {
        let name = attribute_name(structure, attribute)?;
        let invalid_sizing = || SchemaError::InvalidSizing {
            structure: structure.to_string(),
            field: name.clone(),
        };

        // Raw bytes: either a fixed run or a blob sized by a sibling
        if attribute.ty == BYTE {
            let kind = match &attribute.size {
                None => {
                    return Err(SchemaError::MissingSize {
                        structure: structure.to_string(),
                        field: name,
                    })
                }
                Some(_) if attribute.sizing.is_some() => return Err(invalid_sizing()),
                Some(Size::Fixed(size)) => byte_kind(&attribute.ty, *size, attribute.signedness)?,
                Some(Size::Field(size_field)) => {
                    let binding = (size_field.clone(), Derivation::ByteLength);
                    let kind = FieldKind::VariableBlob {
                        size_field: size_field.clone(),
                    };
                    return Ok((Field { name, kind }, Some(binding)));
                }
            };
            return Ok((Field { name, kind }, None));
        }

        // A single instance of a named type
        let element = match self.reference(structure, attribute)? {
            TypeDescriptor::Byte { size, signedness } => {
                match byte_kind(&attribute.ty, *size, *signedness)? {
                    FieldKind::Scalar(width) => Element::Scalar(width),
                    _ => Element::Blob(*size),
                }
            }
            TypeDescriptor::Enum { size, .. } => {
                Element::Scalar(scalar_width(&attribute.ty, *size)?)
            }
            TypeDescriptor::Struct { .. } => {
                self.structure(&attribute.ty)?;
                Element::Structure(attribute.ty.clone())
            }
        };

        let (cardinality, binding) = match (&attribute.size, attribute.sizing) {
            (None, Some(_)) | (Some(Size::Fixed(_)), Some(_)) => return Err(invalid_sizing()),
            (None, None) => {
                let kind = match element {
                    Element::Structure(ty) => FieldKind::Embedded(ty),
                    Element::Scalar(width) => FieldKind::Scalar(width),
                    Element::Blob(size) => FieldKind::FixedBlob(size),
                };
                return Ok((Field { name, kind }, None));
            }
            (Some(Size::Fixed(count)), None) => (Cardinality::Fixed(*count), None),
            (Some(Size::Field(size_field)), None | Some(Sizing::Count)) => (
                Cardinality::Counted(size_field.clone()),
                Some((size_field.clone(), Derivation::ItemCount)),
            ),
            (Some(Size::Field(size_field)), Some(Sizing::Bytes)) => (
                Cardinality::Budgeted(size_field.clone()),
                Some((size_field.clone(), Derivation::GroupSize)),
            ),
        };

        // Every item must consume input, or a group could outgrow its encoding
        if self.element_min_size(&element) == 0 {
            return Err(SchemaError::ZeroSizedElement {
                structure: structure.to_string(),
                field: name,
            });
        }
        let kind = FieldKind::Repeated {
            element,
            cardinality,
        };
        Ok((Field { name, kind }, binding))
    }

    /// Encoded length of `field`, if it does not depend on content.
    fn size(&self, field: &Field) -> Option<usize> {
        match &field.kind {
            FieldKind::Scalar(width) | FieldKind::Derived { width, .. } => Some(width.bytes()),
            FieldKind::FixedBlob(size) => Some(*size),
            FieldKind::VariableBlob { .. } => None,
            FieldKind::Embedded(ty) => self.resolved.get(ty)?.fixed_size,
            FieldKind::Repeated {
                element,
                cardinality: Cardinality::Fixed(count),
            } => {
                let size = match element {
                    Element::Structure(ty) => self.resolved.get(ty)?.fixed_size?,
                    Element::Scalar(width) => width.bytes(),
                    Element::Blob(size) => *size,
                };
                size.checked_mul(*count)
            }
            FieldKind::Repeated { .. } => None,
        }
    }

    /// Smallest encoded length of `field` over all contents.
    fn min_size(&self, field: &Field) -> usize {
        match &field.kind {
            FieldKind::Scalar(width) | FieldKind::Derived { width, .. } => width.bytes(),
            FieldKind::FixedBlob(size) => *size,
            FieldKind::VariableBlob { .. } => 0,
            FieldKind::Embedded(ty) => self.resolved.get(ty).map_or(0, |nested| nested.min_size),
            FieldKind::Repeated {
                element,
                cardinality: Cardinality::Fixed(count),
            } => self.element_min_size(element).saturating_mul(*count),
            FieldKind::Repeated { .. } => 0,
        }
    }

    fn element_min_size(&self, element: &Element) -> usize {
        match element {
            Element::Structure(ty) => self.resolved.get(ty).map_or(0, |nested| nested.min_size),
            Element::Scalar(width) => width.bytes(),
            Element::Blob(size) => *size,
        }
    }
}

fn attribute_name(structure: &str, attribute: &Attribute) -> Result<String, SchemaError> {
    attribute
        .name
        .clone()
        .ok_or_else(|| SchemaError::MissingName {
            structure: structure.to_string(),
            ty: attribute.ty.clone(),
        })
}

/// Marks the size field of `binding` as derived from the field at `binding.index`.
fn bind(structure: &str, fields: &mut [Field], binding: Binding) -> Result<(), SchemaError> {
    let content = fields[binding.index].name.clone();
    let Some(position) = fields
        .iter()
        .position(|field| field.name == binding.size_field)
    else {
        return Err(SchemaError::UnknownSizeField {
            structure: structure.to_string(),
            field: content,
            size_field: binding.size_field,
        });
    };

    // The size must be known before the content is read
    if position >= binding.index {
        return Err(SchemaError::SizeAfterContent {
            structure: structure.to_string(),
            field: content,
            size_field: binding.size_field,
        });
    }

    let width = match &fields[position].kind {
        FieldKind::Scalar(width) => *width,
        FieldKind::FixedBlob(size) => Width::try_from(*size).map_err(|_| {
            SchemaError::SizeFieldNotScalar {
                structure: structure.to_string(),
                size_field: binding.size_field.clone(),
            }
        })?,
        FieldKind::Derived { .. } => {
            return Err(SchemaError::SharedSizeField {
                structure: structure.to_string(),
                size_field: binding.size_field,
            })
        }
        _ => {
            return Err(SchemaError::SizeFieldNotScalar {
                structure: structure.to_string(),
                size_field: binding.size_field,
            })
        }
    };
    fields[position].kind = FieldKind::Derived {
        width,
        of: content,
        rule: binding.rule,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(yaml: &str) -> Result<Schema, SchemaError> {
        Schema::from_yaml(yaml)
    }

    const TRANSFER: &str = r#"
uint8:
  type: byte
  size: 1
  signedness: unsigned
uint16:
  type: byte
  size: 2
  signedness: unsigned
Mosaic:
  type: struct
  layout:
    - name: mosaic_id
      type: byte
      size: 8
    - name: amount
      type: byte
      size: 8
Header:
  type: struct
  layout:
    - name: size
      type: byte
      size: 4
      signedness: unsigned
    - name: version
      type: uint16
Transfer:
  type: struct
  layout:
    - disposition: inline
      type: Header
    - name: message_size
      type: uint16
    - name: mosaics_count
      type: uint8
    - name: message
      type: byte
      size: message_size
    - name: mosaics
      type: Mosaic
      size: mosaics_count
"#;

    #[test]
    fn test_resolve_fixed() {
        let schema = resolve(TRANSFER).unwrap();
        let mosaic = schema.structure("Mosaic").unwrap();
        assert_eq!(mosaic.fixed_size(), Some(16));
        assert_eq!(
            mosaic.fields(),
            &[
                Field {
                    name: "mosaic_id".into(),
                    kind: FieldKind::FixedBlob(8)
                },
                Field {
                    name: "amount".into(),
                    kind: FieldKind::FixedBlob(8)
                },
            ]
        );
        assert_eq!(schema.structure("Header").unwrap().fixed_size(), Some(6));
    }

    #[test]
    fn test_resolve_inline_and_bindings() {
        let schema = resolve(TRANSFER).unwrap();
        let transfer = schema.structure("Transfer").unwrap();
        let names: Vec<_> = transfer.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "size",
                "version",
                "message_size",
                "mosaics_count",
                "message",
                "mosaics"
            ]
        );
        assert_eq!(
            transfer.field("version").unwrap().kind,
            FieldKind::Scalar(Width::Two)
        );
        assert_eq!(
            transfer.field("message_size").unwrap().kind,
            FieldKind::Derived {
                width: Width::Two,
                of: "message".into(),
                rule: Derivation::ByteLength
            }
        );
        assert_eq!(
            transfer.field("mosaics_count").unwrap().kind,
            FieldKind::Derived {
                width: Width::One,
                of: "mosaics".into(),
                rule: Derivation::ItemCount
            }
        );
        assert_eq!(
            transfer.field("mosaics").unwrap().kind,
            FieldKind::Repeated {
                element: Element::Structure("Mosaic".into()),
                cardinality: Cardinality::Counted("mosaics_count".into())
            }
        );
        assert_eq!(transfer.fixed_size(), None);
        assert!(schema.structure("uint8").is_none());
    }

    #[test]
    fn test_resolve_budgeted_and_fixed_arrays() {
        let yaml = r#"
Pair:
  type: struct
  layout:
    - name: a
      type: byte
      size: 1
    - name: b
      type: byte
      size: 1
Envelope:
  type: struct
  layout:
    - name: pairs_size
      type: byte
      size: 4
    - name: pairs
      type: Pair
      size: pairs_size
      sizing: bytes
Triple:
  type: struct
  layout:
    - name: pairs
      type: Pair
      size: 3
"#;
        let schema = resolve(yaml).unwrap();
        let envelope = schema.structure("Envelope").unwrap();
        assert_eq!(
            envelope.field("pairs_size").unwrap().kind,
            FieldKind::Derived {
                width: Width::Four,
                of: "pairs".into(),
                rule: Derivation::GroupSize
            }
        );
        assert_eq!(schema.structure("Triple").unwrap().fixed_size(), Some(6));
    }

    #[test]
    fn test_resolve_enum_and_const() {
        let yaml = r#"
EntityType:
  type: enum
  size: 2
  values:
    - name: transfer
      value: 16724
Body:
  type: struct
  layout:
    - name: kind
      type: EntityType
      disposition: const
      value: 16724
    - name: types
      type: EntityType
      size: 2
"#;
        let schema = resolve(yaml).unwrap();
        let body = schema.structure("Body").unwrap();
        assert_eq!(body.constant("kind"), Some(16724));
        assert!(body.field("kind").is_none());
        assert_eq!(body.fixed_size(), Some(4));
        let enumerations: Vec<_> = schema.enumerations().collect();
        assert_eq!(enumerations.len(), 1);
        assert_eq!(enumerations[0].name, "EntityType");
        assert_eq!(enumerations[0].width, Width::Two);
        assert_eq!(
            enumerations[0].values,
            vec![EnumValue {
                name: "transfer".into(),
                value: 16724
            }]
        );
    }

    #[test]
    fn test_resolve_empty_structure() {
        let schema = resolve("Empty:\n  type: struct\n  layout: []\n").unwrap();
        let empty = schema.structure("Empty").unwrap();
        assert!(empty.fields().is_empty());
        assert_eq!(empty.fixed_size(), Some(0));
    }

    #[test]
    fn test_reject_cycles() {
        let yaml = r#"
A:
  type: struct
  layout:
    - name: b
      type: B
B:
  type: struct
  layout:
    - name: items
      type: A
      size: 1
"#;
        assert!(matches!(resolve(yaml), Err(SchemaError::Cycle(_))));

        let yaml = r#"
Selfish:
  type: struct
  layout:
    - disposition: inline
      type: Selfish
"#;
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::Cycle("Selfish -> Selfish".into()))
        );
    }

    #[test]
    fn test_reject_unknown_type() {
        let yaml = "A:\n  type: struct\n  layout:\n    - name: x\n      type: Missing\n";
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::UnknownType {
                structure: "A".into(),
                field: "x".into(),
                ty: "Missing".into()
            })
        );
    }

    #[test]
    fn test_reject_invalid_width() {
        let yaml = "odd:\n  type: byte\n  size: 3\n  signedness: unsigned\n";
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::InvalidWidth {
                ty: "odd".into(),
                width: 3
            })
        );
        let yaml = "E:\n  type: enum\n  size: 16\n";
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::InvalidWidth { width: 16, .. })
        ));
        let yaml = "int8:\n  type: byte\n  size: 1\n  signedness: signed\n";
        assert_eq!(resolve(yaml), Err(SchemaError::Signed("int8".into())));
    }

    #[test]
    fn test_reject_enum_overflow() {
        let yaml = "E:\n  type: enum\n  size: 1\n  values:\n    - name: big\n      value: 256\n";
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::ValueOverflow { value: 256, .. })
        ));
    }

    #[test]
    fn test_reject_bad_bindings() {
        // Size field after its content
        let yaml = r#"
A:
  type: struct
  layout:
    - name: data
      type: byte
      size: data_size
    - name: data_size
      type: byte
      size: 2
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::SizeAfterContent { .. })
        ));

        // Unknown size field
        let yaml = r#"
A:
  type: struct
  layout:
    - name: data
      type: byte
      size: nothing
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::UnknownSizeField { .. })
        ));

        // One size field for two blobs
        let yaml = r#"
A:
  type: struct
  layout:
    - name: shared_size
      type: byte
      size: 2
    - name: first
      type: byte
      size: shared_size
    - name: second
      type: byte
      size: shared_size
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::SharedSizeField { .. })
        ));

        // Size field that cannot be a scalar
        let yaml = r#"
A:
  type: struct
  layout:
    - name: wide_size
      type: byte
      size: 3
    - name: data
      type: byte
      size: wide_size
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::SizeFieldNotScalar { .. })
        ));
    }

    #[test]
    fn test_reject_duplicate_after_inline() {
        let yaml = r#"
Header:
  type: struct
  layout:
    - name: version
      type: byte
      size: 2
A:
  type: struct
  layout:
    - disposition: inline
      type: Header
    - name: version
      type: byte
      size: 2
"#;
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::DuplicateField {
                structure: "A".into(),
                field: "version".into()
            })
        );
    }

    #[test]
    fn test_reject_misplaced_sizing() {
        let yaml = r#"
A:
  type: struct
  layout:
    - name: data
      type: byte
      size: 4
      sizing: bytes
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::InvalidSizing { .. })
        ));
    }

    #[test]
    fn test_reject_missing_parts() {
        let yaml = "A:\n  type: struct\n  layout:\n    - type: byte\n      size: 1\n";
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::MissingName { .. })
        ));
        let yaml = "A:\n  type: struct\n  layout:\n    - name: x\n      type: byte\n";
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::MissingSize { .. })
        ));
        assert!(matches!(
            resolve("A: [1, 2]"),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn test_reject_zero_sized_elements() {
        let yaml = r#"
Empty:
  type: struct
  layout: []
Holder:
  type: struct
  layout:
    - name: items_count
      type: byte
      size: 4
    - name: items
      type: Empty
      size: items_count
"#;
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::ZeroSizedElement {
                structure: "Holder".into(),
                field: "items".into()
            })
        );

        let yaml = r#"
Nothing:
  type: byte
  size: 0
Holder:
  type: struct
  layout:
    - name: items
      type: Nothing
      size: 3
"#;
        assert!(matches!(
            resolve(yaml),
            Err(SchemaError::ZeroSizedElement { .. })
        ));

        // A variable element that may encode to nothing
        let yaml = r#"
Note:
  type: struct
  layout:
    - name: text_size
      type: byte
      size: 1
    - name: text
      type: byte
      size: text_size
Wrapper:
  type: struct
  layout:
    - name: notes
      type: Note
      size: 0
Holder:
  type: struct
  layout:
    - name: wrappers_size
      type: byte
      size: 2
    - name: wrappers
      type: Wrapper
      size: wrappers_size
      sizing: bytes
"#;
        assert_eq!(
            resolve(yaml),
            Err(SchemaError::ZeroSizedElement {
                structure: "Holder".into(),
                field: "wrappers".into()
            })
        );
    }

    #[test]
    fn test_resolve_variable_elements_with_size_field() {
        let yaml = r#"
Note:
  type: struct
  layout:
    - name: text_size
      type: byte
      size: 1
    - name: text
      type: byte
      size: text_size
Holder:
  type: struct
  layout:
    - name: notes_count
      type: byte
      size: 1
    - name: notes
      type: Note
      size: notes_count
"#;
        let schema = resolve(yaml).unwrap();
        assert_eq!(schema.structure("Holder").unwrap().fixed_size(), None);
    }

    #[test]
    fn test_resolve_built_document() {
        let mut document = Document::default();
        document.0.insert(
            "uint16".into(),
            TypeDescriptor::Byte {
                size: 2,
                signedness: Some(Signedness::Unsigned),
            },
        );
        document.0.insert(
            "Header".into(),
            TypeDescriptor::Struct {
                layout: vec![
                    Attribute::new("version", "byte").with_size(1.into()).unsigned(),
                    Attribute::new("kind", "uint16").constant(0x4154),
                ],
            },
        );
        document.0.insert(
            "Body".into(),
            TypeDescriptor::Struct {
                layout: vec![
                    Attribute::inline("Header"),
                    Attribute::new("headers_size", "uint16"),
                    Attribute::new("headers", "Header")
                        .with_size("headers_size".into())
                        .with_sizing(Sizing::Bytes),
                ],
            },
        );

        let yaml = r#"
uint16:
  type: byte
  size: 2
  signedness: unsigned
Header:
  type: struct
  layout:
    - name: version
      type: byte
      size: 1
      signedness: unsigned
    - name: kind
      type: uint16
      disposition: const
      value: 16724
Body:
  type: struct
  layout:
    - disposition: inline
      type: Header
    - name: headers_size
      type: uint16
    - name: headers
      type: Header
      size: headers_size
      sizing: bytes
"#;
        assert_eq!(document, Document::from_yaml(yaml).unwrap());
        let schema = Schema::resolve(&document).unwrap();
        let body = schema.structure("Body").unwrap();
        assert_eq!(body.constant("kind"), Some(0x4154));
        assert_eq!(
            body.field("version").map(|field| &field.kind),
            Some(&FieldKind::Scalar(Width::One))
        );
        assert_eq!(
            body.field("headers_size").map(|field| &field.kind),
            Some(&FieldKind::Derived {
                width: Width::Two,
                of: "headers".into(),
                rule: Derivation::GroupSize
            })
        );
    }
}
