//! Named fixed-width fields shared by every structure.

/// Public key of an account.
pub type Key = [u8; 32];

/// Signature over a transaction.
pub type Signature = [u8; 64];

/// Decoded account address.
pub type Address = [u8; 25];

/// Mosaic identifier.
pub type MosaicId = [u8; 8];

/// Mosaic quantity, kept as raw little-endian bytes.
pub type Amount = [u8; 8];

/// Transaction type code.
pub type EntityType = u16;
