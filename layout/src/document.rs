//! The schema document: type descriptors as handed over by a schema parser.
//!
//! A document maps type names to descriptors. It is deliberately loose (sizes may be integers
//! or sibling names, dispositions are optional) and carries no guarantees until it is resolved
//! into a [crate::Schema].
//!
//! # Example
//!
//! ```yaml
//! uint8:
//!   type: byte
//!   size: 1
//!   signedness: unsigned
//! Mosaic:
//!   type: struct
//!   layout:
//!     - name: mosaic_id
//!       type: byte
//!       size: 8
//!     - name: amount
//!       type: byte
//!       size: 8
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A collection of named type descriptors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Document(pub BTreeMap<String, TypeDescriptor>);

impl Document {
    /// Parse a document from YAML.
    pub fn from_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    /// Parse a document from JSON.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Returns the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.0.get(name)
    }
}

/// A named type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDescriptor {
    /// An alias for a run of `size` bytes.
    ///
    /// With `signedness` present, the alias is a scalar and `size` must be a legal scalar width.
    Byte {
        size: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signedness: Option<Signedness>,
    },
    /// A scalar of `size` bytes with labelled values.
    Enum {
        size: usize,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        values: Vec<EnumValue>,
    },
    /// An ordered list of attributes.
    Struct { layout: Vec<Attribute> },
}

/// A labelled value of an enumeration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: u64,
}

/// Interpretation of a scalar's bits.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Signedness {
    Unsigned,
    Signed,
}

/// One entry of a structure's layout.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Field name. Absent for inline attributes, whose fields keep their own names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Either `byte` or the name of another descriptor.
    #[serde(rename = "type")]
    pub ty: String,

    /// Width, fixed count, or the name of the sibling field holding the size or count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// What a sibling-bound `size` on a group measures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<Sizing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,

    /// Value of a `const` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signedness: Option<Signedness>,
}

impl Attribute {
    /// A named attribute of the given type with nothing else set.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
            size: None,
            sizing: None,
            disposition: None,
            value: None,
            signedness: None,
        }
    }

    /// An attribute splicing the fields of `ty` in place.
    pub fn inline(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            disposition: Some(Disposition::Inline),
            ..Self::new("", ty)
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = Some(sizing);
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.signedness = Some(Signedness::Unsigned);
        self
    }

    pub fn constant(mut self, value: u64) -> Self {
        self.disposition = Some(Disposition::Const);
        self.value = Some(value);
        self
    }
}

/// The `size` of an attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Size {
    Fixed(usize),
    Field(String),
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size::Fixed(value)
    }
}

impl From<&str> for Size {
    fn from(value: &str) -> Self {
        Size::Field(value.to_string())
    }
}

/// How a sibling-bound group measures its extent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sizing {
    /// The sibling holds the number of items.
    #[default]
    Count,
    /// The sibling holds the total number of bytes of all items.
    Bytes,
}

/// Placement of an attribute.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Splice the referenced structure's fields into the parent.
    Inline,
    /// A schema constant with no wire presence.
    Const,
}
