//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every variant is terminal for the enclosing decode or encode call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("out of range: requested {requested} bytes, {remaining} remaining")]
    OutOfRange { requested: usize, remaining: usize },
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("trailing data: {0} bytes")]
    TrailingData(usize),
    #[error("overflow: {value} does not fit in {width} bytes")]
    Overflow { value: u64, width: usize },
    #[error("too large: {len} bytes do not fit in {width} bytes")]
    TooLarge { len: usize, width: usize },
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
}
