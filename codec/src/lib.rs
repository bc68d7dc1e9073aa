//! Read and write schema-declared binary structures.
//!
//! # Overview
//!
//! The runtime half of a schema-driven codec generator. Every structure declared in a schema is
//! a concrete type that implements [Read] and [Write], consuming from a shared [Cursor] and
//! writing to any [bytes::BufMut]. Layouts are exact: there are no tags, no varints, and no
//! framing beyond what the schema declares.
//!
//! # Field Kinds
//!
//! - Scalars: `u8`, `u16`, `u32`, `u64`, little-endian.
//! - Fixed blobs: `[u8; N]`, copied verbatim.
//! - Variable blobs: bytes whose length is stored in a sibling size field.
//! - Embedded structures: another structure's fields, concatenated in place.
//! - Repeated groups: items governed by a sibling count field or a total-size budget
//!   (see [types::group]).
//!
//! Size and count fields are derived. They are never stored on the value; they are recomputed
//! from content on every write, so a decoded value can never disagree with its own encoding.
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BufMut};
//! use catbuffer_codec::{
//!     types::group, Cursor, Decode, Encode, EncodeSize, Error, Read, Uint, Write,
//! };
//!
//! // A note with a 2-byte size field followed by a 1-byte count field, then the content they
//! // describe.
//! #[derive(Debug, Clone, PartialEq)]
//! struct Note {
//!     text: Bytes,
//!     tags: Vec<u32>,
//! }
//!
//! impl Note {
//!     // Derived fields are read-only accessors computed from content.
//!     fn text_size(&self) -> Result<u16, Error> {
//!         u16::derive(self.text.len())
//!     }
//!
//!     fn tags_count(&self) -> Result<u8, Error> {
//!         group::count(&self.tags)
//!     }
//! }
//!
//! impl Write for Note {
//!     fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
//!         self.text_size()?.write(buf)?;
//!         self.tags_count()?.write(buf)?;
//!         buf.put_slice(&self.text);
//!         group::write_all(&self.tags, buf)
//!     }
//! }
//!
//! impl Read for Note {
//!     fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
//!         let text_size = u16::read(cursor)?;
//!         let tags_count = u8::read(cursor)?;
//!         let text = Bytes::copy_from_slice(cursor.read_bytes(text_size as usize)?);
//!         let tags = group::read_counted(cursor, tags_count as u64)?;
//!         Ok(Self { text, tags })
//!     }
//! }
//!
//! impl EncodeSize for Note {
//!     fn encode_size(&self) -> usize {
//!         2 + 1 + self.text.len() + group::encode_size_all(&self.tags)
//!     }
//! }
//!
//! let note = Note { text: Bytes::from_static(b"hi"), tags: vec![7] };
//! let encoded = note.encode().unwrap();
//! assert_eq!(&encoded[..], &[2, 0, 1, b'h', b'i', 7, 0, 0, 0]);
//! assert_eq!(Note::decode(&encoded).unwrap(), note);
//! ```

pub mod codec;
pub mod cursor;
pub mod error;
pub mod scalar;
pub mod types;

// Re-export main types and traits
pub use codec::{Codec, Decode, Encode, EncodeSize, FixedSize, Read, Write};
pub use cursor::Cursor;
pub use error::Error;
pub use scalar::{bytes_to_uint, concat, fit, uint_to_bytes, Width};
pub use types::primitives::{write_uint, Uint};
