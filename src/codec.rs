//! Packing of arbitrary bytes into sysex-safe 7-bit data bytes.
//!
//! Sysex payloads may only carry data bytes (top bit clear), so each 8-bit value is sent as two
//! data bytes: the bottom 7 bits first, then the top bit.
//!
//! ```rust
//! use midi_parser::{decode_value, encode_value};
//!
//! let encoded = encode_value(&[200]);
//! assert_eq!(encoded, [72, 1]);
//! assert_eq!(decode_value(&encoded), [200]);
//! ```

use crate::{
    error::{ErrorKind, Result},
    prelude::*,
};

/// The amount of encoded bytes produced for `len` raw bytes.
#[inline]
pub const fn encoded_len(len: usize) -> usize {
    len * 2
}

/// Split every byte into a low and a high 7-bit data byte.
pub fn encode_value(bytes: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(encoded_len(bytes.len()));
    for &byte in bytes {
        encoded.push(byte & 0x7F);
        encoded.push((byte >> 7) & 0x7F);
    }
    encoded
}

/// Join pairs of 7-bit data bytes back into whole bytes.
///
/// A trailing unpaired byte is ignored.
/// Bits of the high half beyond the first do not fit in a byte and are discarded.
pub fn decode_value(encoded: &[u8]) -> Vec<u8> {
    encoded
        .chunks_exact(2)
        .map(|pair| (pair[0] & 0x7F) | (pair[1] << 7))
        .collect()
}

/// Encode text, one byte per character.
///
/// Characters are truncated to their low byte, so text outside of the Latin-1 range does not
/// survive the trip.
/// Use [`encode_ascii`](fn.encode_ascii.html) to reject such text instead.
pub fn encode_string(text: &str) -> Vec<u8> {
    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
    encode_value(&bytes)
}

/// Decode text previously encoded with [`encode_string`](fn.encode_string.html).
///
/// The top bit of every decoded byte is cleared, so the result is always ASCII.
pub fn decode_string(encoded: &[u8]) -> String {
    decode_value(encoded)
        .into_iter()
        .map(|byte| char::from(byte & 0x7F))
        .collect()
}

/// Like [`encode_string`](fn.encode_string.html), but fails on text that is not pure ASCII
/// instead of truncating it.
pub fn encode_ascii(text: &str) -> Result<Vec<u8>> {
    if !text.is_ascii() {
        bail!(err_invalid!("text contains non-ascii characters"));
    }
    Ok(encode_value(text.as_bytes()))
}

/// Like [`decode_string`](fn.decode_string.html), but fails if any decoded byte has its top bit
/// set instead of masking it off.
pub fn decode_ascii(encoded: &[u8]) -> Result<String> {
    let decoded = decode_value(encoded);
    ensure!(
        decoded.is_ascii(),
        err_malformed!("decoded bytes are not ascii text")
    );
    Ok(decoded.into_iter().map(char::from).collect())
}
