/// Limits applied while decoding untrusted input.
///
/// A declared count or blob length above its limit fails with
/// [catbuffer_codec::Error::LengthExceeded] before anything is read. A byte-bounded group fails
/// as soon as it holds more items than allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// The maximum number of items in a single repeated group.
    pub max_items: usize,

    /// The maximum length of a single variable blob, in bytes.
    pub max_blob_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: usize::MAX,
            max_blob_len: usize::MAX,
        }
    }
}
