//! Codec implementations for scalar fields and fixed-width blobs.
//!
//! All scalars are unsigned and written little-endian. Signed and floating point types are
//! intentionally absent: a schema only declares unsigned widths of 1, 2, 4, or 8 bytes.
//!
//! Fixed-width blobs (`[u8; N]`) are copied verbatim and carry no interpretation.

use crate::{
    scalar::{uint_to_bytes, Width},
    Cursor, Error, FixedSize, Read, Write,
};
use bytes::{Buf, BufMut};

/// An unsigned integer that can occupy a scalar field.
///
/// Implemented for `u8`, `u16`, `u32`, and `u64`.
pub trait Uint: Copy + Into<u64> + TryFrom<u64> + Read + Write + FixedSize {
    /// The width of the scalar on the wire.
    const WIDTH: Width;

    /// Converts a length or count into this scalar.
    ///
    /// Used to compute derived fields from content. Returns [Error::Overflow] if `value` cannot
    /// be represented at [Uint::WIDTH].
    fn derive(value: usize) -> Result<Self, Error> {
        let value = value as u64;
        Self::try_from(value).map_err(|_| Error::Overflow {
            value,
            width: Self::WIDTH.bytes(),
        })
    }
}

// Numeric types implementation
macro_rules! impl_uint {
    ($type:ty, $width:expr, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
                buf.$write_method(*self);
                Ok(())
            }
        }

        impl Read for $type {
            #[inline]
            fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
                cursor.at_least(std::mem::size_of::<$type>())?;
                Ok(cursor.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }

        impl Uint for $type {
            const WIDTH: Width = $width;
        }
    };
}

impl_uint!(u8, Width::One, get_u8, put_u8);
impl_uint!(u16, Width::Two, get_u16_le, put_u16_le);
impl_uint!(u32, Width::Four, get_u32_le, put_u32_le);
impl_uint!(u64, Width::Eight, get_u64_le, put_u64_le);

// Constant-size array implementation
impl<const N: usize> Write for [u8; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        buf.put_slice(&self[..]);
        Ok(())
    }
}

impl<const N: usize> Read for [u8; N] {
    #[inline]
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        cursor.read_array()
    }
}

impl<const N: usize> FixedSize for [u8; N] {
    const SIZE: usize = N;
}

/// Writes `value` as a scalar of the given width, failing if it does not fit.
pub fn write_uint(value: u64, width: Width, buf: &mut impl BufMut) -> Result<(), Error> {
    buf.put_slice(&uint_to_bytes(value, width)?);
    Ok(())
}
