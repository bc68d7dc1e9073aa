//! Little-endian scalar conversion and byte sequence utilities.
//!
//! Every higher layer builds its wire output out of these four operations:
//! - [bytes_to_uint] and [uint_to_bytes] convert between unsigned integers and their
//!   little-endian representation at a [Width].
//! - [concat] joins two byte sequences in order.
//! - [fit] left-pads a byte sequence with zeroes to a declared width.

use crate::Error;
use bytes::{Bytes, BytesMut};
use std::fmt;

/// The byte width of a scalar field.
///
/// Only 1, 2, 4, and 8 byte scalars exist on the wire. Any other width is a schema authoring
/// error and is rejected (via [TryFrom]) before a codec is ever built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    One,
    Two,
    Four,
    Eight,
}

impl Width {
    /// Number of bytes occupied by a scalar of this width.
    pub const fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
            Width::Eight => 8,
        }
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u64 {
        match self {
            Width::One => u8::MAX as u64,
            Width::Two => u16::MAX as u64,
            Width::Four => u32::MAX as u64,
            Width::Eight => u64::MAX,
        }
    }
}

impl TryFrom<usize> for Width {
    /// The rejected width.
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Width::One),
            2 => Ok(Width::Two),
            4 => Ok(Width::Four),
            8 => Ok(Width::Eight),
            other => Err(other),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Interprets a little-endian byte sequence as an unsigned integer.
///
/// Sequences shorter than 8 bytes are interpreted as if zero-extended. Returns
/// [Error::TooLarge] if `bytes` is longer than 8 bytes.
pub fn bytes_to_uint(bytes: &[u8]) -> Result<u64, Error> {
    let width = Width::Eight.bytes();
    if bytes.len() > width {
        return Err(Error::TooLarge {
            len: bytes.len(),
            width,
        });
    }
    let mut padded = [0u8; 8];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(u64::from_le_bytes(padded))
}

/// Converts `value` into its little-endian representation at `width`.
///
/// Returns [Error::Overflow] if `value` cannot be represented in `width` bytes.
pub fn uint_to_bytes(value: u64, width: Width) -> Result<Bytes, Error> {
    if value > width.max_value() {
        return Err(Error::Overflow {
            value,
            width: width.bytes(),
        });
    }
    Ok(Bytes::copy_from_slice(&value.to_le_bytes()[..width.bytes()]))
}

/// Returns `a` followed by `b`.
pub fn concat(a: &[u8], b: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out.freeze()
}

/// Left-pads `bytes` with zeroes until it is exactly `width` bytes long.
///
/// An absent input yields `width` zero bytes. Returns [Error::TooLarge] if `bytes` is already
/// longer than `width`.
pub fn fit(bytes: Option<&[u8]>, width: usize) -> Result<Bytes, Error> {
    let Some(bytes) = bytes else {
        return Ok(Bytes::from(vec![0u8; width]));
    };
    if bytes.len() > width {
        return Err(Error::TooLarge {
            len: bytes.len(),
            width,
        });
    }
    let mut out = BytesMut::zeroed(width - bytes.len());
    out.extend_from_slice(bytes);
    Ok(out.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[232], 232; "one byte")]
    #[test_case(&[0], 0; "one byte zero")]
    #[test_case(&[0x49, 0xD4], 54345; "two bytes")]
    #[test_case(&[0xFB, 0xAD, 0x0B, 0x00], 765435; "four bytes")]
    #[test_case(&[0xF2, 0x26, 0x6C, 0x06, 0x40, 0x83, 0xB2, 0x92], 0x92B2_8340_066C_26F2; "eight bytes")]
    fn test_bytes_to_uint(bytes: &[u8], expected: u64) {
        assert_eq!(bytes_to_uint(bytes), Ok(expected));
    }

    #[test]
    fn test_bytes_to_uint_too_long() {
        assert_eq!(
            bytes_to_uint(&[0; 9]),
            Err(Error::TooLarge { len: 9, width: 8 })
        );
        assert_eq!(bytes_to_uint(&[]), Ok(0));
    }

    #[test_case(233, Width::One, &[233]; "one byte")]
    #[test_case(54346, Width::Two, &[74, 212]; "two bytes")]
    #[test_case(765436, Width::Four, &[252, 173, 11, 0]; "four bytes")]
    #[test_case(u64::MAX, Width::Eight, &[0xFF; 8]; "eight bytes")]
    fn test_uint_to_bytes(value: u64, width: Width, expected: &[u8]) {
        let encoded = uint_to_bytes(value, width).unwrap();
        assert_eq!(encoded.len(), width.bytes());
        assert_eq!(&encoded[..], expected);
    }

    #[test]
    fn test_uint_to_bytes_overflow() {
        assert_eq!(
            uint_to_bytes(256, Width::One),
            Err(Error::Overflow {
                value: 256,
                width: 1
            })
        );
        assert_eq!(
            uint_to_bytes(u32::MAX as u64 + 1, Width::Four),
            Err(Error::Overflow {
                value: u32::MAX as u64 + 1,
                width: 4
            })
        );
        assert!(uint_to_bytes(u16::MAX as u64, Width::Two).is_ok());
    }

    #[test]
    fn test_uint_round_trip_at_every_width() {
        for width in [Width::One, Width::Two, Width::Four, Width::Eight] {
            for value in [0, 1, width.max_value() / 2, width.max_value()] {
                let encoded = uint_to_bytes(value, width).unwrap();
                let decoded = bytes_to_uint(&encoded).unwrap();
                assert_eq!(decoded, value);
                assert_eq!(uint_to_bytes(decoded, width).unwrap(), encoded);
            }
        }
    }

    #[test]
    fn test_width_try_from() {
        assert_eq!(Width::try_from(1), Ok(Width::One));
        assert_eq!(Width::try_from(8), Ok(Width::Eight));
        assert_eq!(Width::try_from(3), Err(3));
        assert_eq!(Width::try_from(0), Err(0));
        assert_eq!(Width::try_from(16), Err(16));
    }

    #[test]
    fn test_concat() {
        assert!(concat(&[], &[]).is_empty());

        let a = [23, 54];
        let b = [34, 2, 77, 91, 12];
        assert_eq!(&concat(&[], &a)[..], &a);
        assert_eq!(&concat(&a, &[])[..], &a);
        assert_eq!(&concat(&a, &b)[..], &[23, 54, 34, 2, 77, 91, 12]);
        assert_eq!(&concat(&b, &a)[..], &[34, 2, 77, 91, 12, 23, 54]);
    }

    #[test]
    fn test_fit_too_large() {
        assert_eq!(
            fit(Some(&[34, 2, 77, 91, 12]), 2),
            Err(Error::TooLarge { len: 5, width: 2 })
        );
    }

    #[test]
    fn test_fit_absent() {
        assert!(fit(None, 0).unwrap().is_empty());
        assert_eq!(&fit(None, 2).unwrap()[..], &[0, 0]);
    }

    #[test]
    fn test_fit_exact() {
        let empty: [u8; 0] = [];
        let bytes = [34, 2, 77, 91, 12];
        assert_eq!(&fit(Some(&empty), 0).unwrap()[..], &empty);
        assert_eq!(&fit(Some(&bytes), bytes.len()).unwrap()[..], &bytes);
    }

    #[test]
    fn test_fit_pads_left() {
        assert_eq!(&fit(Some(&[4]), 2).unwrap()[..], &[0, 4]);
        let fitted = fit(Some(&[34, 2, 77, 91, 12]), 10).unwrap();
        assert_eq!(&fitted[..], &[0, 0, 0, 0, 0, 34, 2, 77, 91, 12]);
    }
}
