//! Hexadecimal text for byte blobs on the command line and in JSON.
//!
//! Output is always lowercase and unprefixed. Input is lenient about the forms a pasted
//! transaction usually takes: an optional `0x` prefix, either case, and whitespace anywhere.

use std::fmt::Write as _;

/// Renders `bytes` as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses hex text into bytes.
///
/// Returns `None` on a character that is not a hex digit or on an odd number of digits.
pub fn decode(input: &str) -> Option<Vec<u8>> {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = match digits.as_slice() {
        ['0', 'x' | 'X', rest @ ..] => rest,
        all => all,
    };
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let high = pair[0].to_digit(16)?;
            let low = pair[1].to_digit(16)?;
            Some((high << 4 | low) as u8)
        })
        .collect()
}
