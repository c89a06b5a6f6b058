//! Base58Check encoding.
//!
//! The checksummed payload is treated as one big-endian integer and reduced
//! by repeated division by 58; leading zero bytes of the payload, which the
//! numeric conversion cannot represent, are restored as leading `'1'`
//! characters. Only encoding is needed in production — addresses and WIF
//! strings are emitted, never parsed back.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha2::{Digest, Sha256};

use crate::error::EncodingError;

/// The 58-symbol alphabet: digits and letters minus `0`, `O`, `I`, `l`.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Returns true if `c` is a base58 symbol.
#[inline]
pub fn is_alphabet_char(c: char) -> bool {
    c.is_ascii() && ALPHABET.contains(&(c as u8))
}

/// Computes double SHA-256.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Encodes `payload` with an appended 4-byte double-SHA-256 checksum.
///
/// One `'1'` is prepended per leading zero byte of `payload`, so fixed-width
/// payloads (e.g. a 0x00 version byte) survive the numeric conversion. The
/// only unrecoverable input — an all-zero payload whose checksum itself
/// starts with zero bytes — is rejected as [`EncodingError::LeadingZeroAmbiguity`].
pub fn encode_check(payload: &[u8]) -> Result<String, EncodingError> {
    let checksum = sha256d(payload);
    let mut extended = Vec::with_capacity(payload.len() + 4);
    extended.extend_from_slice(payload);
    extended.extend_from_slice(&checksum[..4]);

    let zeros = payload.iter().take_while(|&&b| b == 0).count();
    let extended_zeros = extended.iter().take_while(|&&b| b == 0).count();
    if extended_zeros > zeros {
        return Err(EncodingError::LeadingZeroAmbiguity);
    }

    let mut n = BigUint::from_bytes_be(&extended);

    // Remainders accumulate least-significant digit first.
    let mut digits = Vec::with_capacity(extended.len() * 138 / 100 + 1);
    while !n.is_zero() {
        let rem = &n % 58u32;
        n /= 58u32;
        let index = rem.to_usize().ok_or(EncodingError::DigitOutOfRange)?;
        digits.push(ALPHABET[index]);
    }

    let mut text = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        text.push(ALPHABET[0] as char);
    }
    for &d in digits.iter().rev() {
        text.push(d as char);
    }
    Ok(text)
}
