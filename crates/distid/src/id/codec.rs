//! Radix renderings of a packed ID.
//!
//! All encoders are most-significant digit first and render zero as a single
//! `"0"`.

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Digits needed for `u64::MAX` in base 36; base 62 needs fewer.
const MAX_DIGITS: usize = 13;

/// Width of the zero-padded hex form.
pub const HEX_WIDTH: usize = 16;

/// Lowercase hexadecimal, zero-padded to [`HEX_WIDTH`] characters.
///
/// ```
/// assert_eq!(distid::to_hex(0x13a8f5c00050007b), "13a8f5c00050007b");
/// assert_eq!(distid::to_hex(255), "00000000000000ff");
/// ```
pub fn to_hex(value: u64) -> String {
    format!("{value:0width$x}", width = HEX_WIDTH)
}

/// Lowercase base 36 (`0-9a-z`).
///
/// ```
/// assert_eq!(distid::to_base36(35), "z");
/// assert_eq!(distid::to_base36(36), "10");
/// ```
pub fn to_base36(value: u64) -> String {
    encode_radix(value, BASE36_ALPHABET)
}

/// Base 62 over `0-9A-Za-z`.
///
/// ```
/// assert_eq!(distid::to_base62(0), "0");
/// assert_eq!(distid::to_base62(61), "z");
/// assert_eq!(distid::to_base62(62), "10");
/// ```
pub fn to_base62(value: u64) -> String {
    encode_radix(value, BASE62_ALPHABET)
}

fn encode_radix(mut value: u64, alphabet: &[u8]) -> String {
    let radix = alphabet.len() as u64;
    let mut buf = [0_u8; MAX_DIGITS];
    let mut start = MAX_DIGITS;
    loop {
        start -= 1;
        buf[start] = alphabet[(value % radix) as usize];
        value /= radix;
        if value == 0 {
            break;
        }
    }
    buf[start..].iter().copied().map(char::from).collect()
}
