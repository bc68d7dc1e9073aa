//! Core codec traits and implementations

use crate::{cursor::Cursor, error::Error};
use bytes::{BufMut, Bytes, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Derived fields (sizes and counts) are recomputed from the current content. Returns an
    /// error if any field cannot be represented within its declared width, in which case the
    /// buffer contents are unspecified.
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error>;
}

/// Trait for types that can be read/decoded from a [Cursor].
pub trait Read: Sized {
    /// Reads a value from the cursor, consuming exactly the bytes of its encoding.
    ///
    /// The cursor is shared with any enclosing structure, so nested reads continue from the
    /// same offset.
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error>;
}

/// Trait for types that can report the exact length of their encoding.
pub trait EncodeSize {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types with a known, fixed encoded length.
pub trait FixedSize {
    /// The length of the encoded value.
    const SIZE: usize;
}

// Automatically implement `EncodeSize` for types with a known size.
// Otherwise, the type must define its own `encode_size()` method.
impl<T: FixedSize> EncodeSize for T {
    #[inline]
    fn encode_size(&self) -> usize {
        Self::SIZE
    }
}

/// Trait for types that can be encoded to bytes.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a [Bytes] buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> Result<Bytes, Error> {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer)?;
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        Ok(buffer.freeze())
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be decoded from a complete input.
pub trait Decode: Read {
    /// Decodes a value from `bytes`, ensuring every byte is consumed.
    ///
    /// Returns [Error::TrailingData] if the value ends before the input does.
    ///
    /// (Provided method).
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(bytes);
        let result = Self::read(&mut cursor)?;
        cursor.ensure_exhausted()?;
        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

// Automatically implement `Codec` for types that implement `Encode` and `Decode`.
impl<T: Encode + Decode> Codec for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_buffer() {
        let mut cursor = Cursor::new(&[0x01, 0x02]);
        assert!(matches!(
            u32::read(&mut cursor),
            Err(Error::OutOfRange {
                requested: 4,
                remaining: 2
            })
        ));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_extra_data() {
        assert!(matches!(
            u8::decode(&[0x01, 0x02]),
            Err(Error::TrailingData(1))
        ));
    }

    #[test]
    fn test_encode_decode() {
        let value = 42u32;
        let encoded = value.encode().unwrap();
        assert_eq!(&encoded[..], &[42, 0, 0, 0]);
        assert_eq!(u32::decode(&encoded).unwrap(), value);
    }
}
