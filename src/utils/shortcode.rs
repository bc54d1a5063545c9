//! Shortcode generation
//!
//! Encodes the global link counter into a short, deterministic,
//! non-sequential Base62 slug. The counter is offset by an xxh64 hash of a
//! secret salt and wrapped modulo `62^length`, so consecutive counters do
//! not yield adjacent codes and the output stays fixed-length.
//!
//! Collisions only appear once the counter wraps the `62^length` space;
//! links expire after a year, so the live key space never gets there in
//! practice.

use xxhash_rust::xxh64::xxh64;

use crate::errors::{Result, ShortenerError};

/// Base62 字符表：小写 + 大写 + 数字
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u128 = ALPHABET.len() as u128;

/// Default slug length, enough for ~3.5e12 live codes
pub const DEFAULT_SHORTCODE_LENGTH: usize = 7;

/// Generate a fixed-length Base62 shortcode from a counter and a salt.
///
/// The same `(counter, salt, length)` triple always yields the same code;
/// the output is not reversible without the salt.
pub fn generate_shortcode(counter: u64, salt: &str, length: usize) -> Result<String> {
    if salt.is_empty() {
        return Err(ShortenerError::validation(
            "shortcode salt must be a non-empty string",
        ));
    }
    if length == 0 || length > 21 {
        // 62^21 仍在 u128 范围内
        return Err(ShortenerError::validation(format!(
            "shortcode length must be between 1 and 21 (given: {length})"
        )));
    }

    let space = BASE.pow(length as u32);
    let salted = (u128::from(counter) + u128::from(xxh64(salt.as_bytes(), 0))) % space;

    // 从最高位到最低位编码
    let mut code = Vec::with_capacity(length);
    for i in (0..length).rev() {
        let digit = (salted / BASE.pow(i as u32)) % BASE;
        code.push(ALPHABET[digit as usize]);
    }

    Ok(String::from_utf8(code).expect("alphabet is ASCII"))
}
