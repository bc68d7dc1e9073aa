//! Typed transaction structures.
//!
//! Every structure implements [catbuffer_codec::Read] and [catbuffer_codec::Write] by
//! concatenating its fields in declaration order. Size and count fields are exposed as methods
//! that compute them from content; they are never stored.
//!
//! The layouts mirror `schema/transactions.yaml`, which the schema-driven codec in
//! `catbuffer-layout` encodes to the same bytes.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use catbuffer_codec::{Decode, Encode};
//! use catbuffer_model::{Mosaic, TransferTransactionBody};
//!
//! let body = TransferTransactionBody {
//!     recipient: [0x90; 25],
//!     message: Bytes::from_static(b"gm"),
//!     mosaics: vec![Mosaic { mosaic_id: [1; 8], amount: [0; 8] }],
//! };
//! assert_eq!(body.message_size(), Ok(2));
//! assert_eq!(body.mosaics_count(), Ok(1));
//!
//! let encoded = body.encode().unwrap();
//! assert_eq!(&encoded[25..28], &[2, 0, 1]);
//! assert_eq!(TransferTransactionBody::decode(&encoded).unwrap(), body);
//! ```

pub mod account_properties;
pub mod aggregate;
pub mod entity;
pub mod mosaic;
pub mod transfer;
pub mod types;

pub use account_properties::{
    AccountPropertiesAddressTransaction, AccountPropertiesEntityTypeTransaction,
    AccountPropertiesModification, AccountPropertiesMosaicTransaction,
    AccountPropertiesTransaction, AccountPropertiesTransactionBody, AddressModification,
    EmbeddedAccountPropertiesAddressTransaction, EmbeddedAccountPropertiesEntityTypeTransaction,
    EmbeddedAccountPropertiesMosaicTransaction, EmbeddedAccountPropertiesTransaction,
    EntityTypeModification, MosaicModification,
};
pub use aggregate::{AggregateTransaction, AggregateTransactionBody};
pub use entity::{EmbeddedTransaction, EntityBody, SizePrefixedEntity, Transaction, VerifiableEntity};
pub use mosaic::Mosaic;
pub use transfer::{EmbeddedTransferTransaction, TransferTransaction, TransferTransactionBody};

/// The schema describing every structure in this crate.
pub const SCHEMA: &str = include_str!("../schema/transactions.yaml");
