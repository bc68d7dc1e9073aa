//! Repeated groups of sub-structures.
//!
//! A group never frames itself. Its cardinality is governed by one of:
//! - a sibling count field, read before the group ([read_counted]), or
//! - a sibling total-size field that bounds the group's bytes ([read_budgeted]).
//!
//! In both cases the governing field is derived on encode ([count] and [size]) and must never be
//! carried alongside the items.

use crate::{Cursor, EncodeSize, Error, Read, Uint, Write};
use bytes::BufMut;

/// Reads exactly `count` items.
///
/// Returns [Error::Malformed] if an item consumes no bytes, so that the number of items is
/// always bounded by the remaining input.
pub fn read_counted<T: Read>(cursor: &mut Cursor<'_>, count: u64) -> Result<Vec<T>, Error> {
    read_counted_with(cursor, count, T::read)
}

/// Reads items until exactly `budget` bytes have been consumed.
///
/// Returns [Error::Malformed] if the last item crosses the budget or if an item consumes no
/// bytes (which would never exhaust the budget).
pub fn read_budgeted<T: Read>(cursor: &mut Cursor<'_>, budget: u64) -> Result<Vec<T>, Error> {
    read_budgeted_with(cursor, budget, T::read)
}

/// Like [read_counted], reading each item with `read`.
pub fn read_counted_with<'a, T>(
    cursor: &mut Cursor<'a>,
    count: u64,
    mut read: impl FnMut(&mut Cursor<'a>) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let count = usize::try_from(count).map_err(|_| Error::OutOfRange {
        requested: usize::MAX,
        remaining: cursor.remaining(),
    })?;

    // Never reserve more slots than there are bytes left
    let mut items = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let before = cursor.offset();
        items.push(read(cursor)?);
        if cursor.offset() == before {
            return Err(Error::Malformed(
                "zero-sized item in count-governed group".to_string(),
            ));
        }
    }
    Ok(items)
}

/// Like [read_budgeted], reading each item with `read`.
pub fn read_budgeted_with<'a, T>(
    cursor: &mut Cursor<'a>,
    budget: u64,
    mut read: impl FnMut(&mut Cursor<'a>) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let remaining = cursor.remaining();
    let budget = match usize::try_from(budget) {
        Ok(budget) if budget <= remaining => budget,
        _ => {
            return Err(Error::OutOfRange {
                requested: usize::try_from(budget).unwrap_or(usize::MAX),
                remaining,
            })
        }
    };

    let start = cursor.offset();
    let mut items = Vec::new();
    loop {
        let consumed = cursor.offset() - start;
        if consumed == budget {
            return Ok(items);
        }
        if consumed > budget {
            return Err(Error::Malformed(format!(
                "group overshot its budget: consumed {consumed} of {budget} bytes"
            )));
        }
        let before = cursor.offset();
        items.push(read(cursor)?);
        if cursor.offset() == before {
            return Err(Error::Malformed(
                "zero-sized item in byte-bounded group".to_string(),
            ));
        }
    }
}

/// Writes every item in order.
pub fn write_all<T: Write>(items: &[T], buf: &mut impl BufMut) -> Result<(), Error> {
    for item in items {
        item.write(buf)?;
    }
    Ok(())
}

/// Total encoded length of `items`.
pub fn encode_size_all<T: EncodeSize>(items: &[T]) -> usize {
    items.iter().map(EncodeSize::encode_size).sum()
}

/// Derives a count field from the number of items.
pub fn count<U: Uint, T>(items: &[T]) -> Result<U, Error> {
    U::derive(items.len())
}

/// Derives a total-size field from the encoded length of the items.
pub fn size<U: Uint, T: EncodeSize>(items: &[T]) -> Result<U, Error> {
    U::derive(encode_size_all(items))
}
