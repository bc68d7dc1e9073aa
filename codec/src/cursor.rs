//! Bounds-checked, offset-tracking reader over an immutable byte sequence.

use crate::{
    scalar::{bytes_to_uint, Width},
    Error,
};
use bytes::Buf;

/// A sequential reader over borrowed input.
///
/// The offset never exceeds the length of the input and a read that would run past the end
/// fails with [Error::OutOfRange] without moving the offset.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the first byte of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying input.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying input is empty.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes not yet consumed.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Ensures at least `len` bytes remain.
    #[inline]
    pub fn at_least(&self, len: usize) -> Result<(), Error> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(Error::OutOfRange {
                requested: len,
                remaining,
            });
        }
        Ok(())
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.at_least(n)?;
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    /// Reads the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads a little-endian unsigned integer of the given width.
    pub fn read_uint(&mut self, width: Width) -> Result<u64, Error> {
        bytes_to_uint(self.read_bytes(width.bytes())?)
    }

    /// Ensures every byte of the input has been consumed.
    pub fn ensure_exhausted(&self) -> Result<(), Error> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(Error::TrailingData(remaining)),
        }
    }
}

impl Buf for Cursor<'_> {
    fn remaining(&self) -> usize {
        Cursor::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        &self.data[self.offset..]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= Cursor::remaining(self),
            "cannot advance past the end of the cursor"
        );
        self.offset += cnt;
    }
}
