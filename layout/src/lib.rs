//! Resolve schema documents into layouts and encode or decode structures against them.
//!
//! # Overview
//!
//! A [Document] is the language-neutral description of a family of wire records, as produced by
//! a schema parser. [Schema::resolve] checks it and flattens it into an immutable layout model:
//! one ordered list of fields per structure, with every size and count field bound to the content
//! it describes. A [Codec] then interprets that model to decode bytes into a [StructureValue] and
//! to encode a value back into the exact same bytes.
//!
//! # Example
//!
//! ```
//! use catbuffer_layout::{Codec, Config, Schema, StructureValue, Value};
//!
//! let schema = Schema::from_yaml(
//!     r#"
//! Note:
//!   type: struct
//!   layout:
//!     - name: text_size
//!       type: byte
//!       size: 2
//!     - name: text
//!       type: byte
//!       size: text_size
//! "#,
//! )
//! .unwrap();
//! let codec = Codec::new(&schema, Config::default());
//!
//! let note = StructureValue::new().with("text", b"hi".to_vec());
//! let encoded = codec.encode("Note", &note).unwrap();
//! assert_eq!(&encoded[..], &[2, 0, b'h', b'i']);
//! assert_eq!(codec.decode_root("Note", &encoded).unwrap(), note);
//! assert_eq!(codec.derived("Note", &note, "text_size").unwrap(), 2);
//! ```

mod codec;
mod config;
pub mod document;
mod error;
pub mod schema;
mod value;

pub use codec::Codec;
pub use config::Config;
pub use document::{Document, TypeDescriptor};
pub use error::SchemaError;
pub use schema::Schema;
pub use value::{StructureValue, Value};
