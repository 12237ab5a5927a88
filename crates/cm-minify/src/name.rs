//! Short-name generation.
//!
//! Names are bijective base-52 numerals over `a`–`z` then `A`–`Z`, the same
//! scheme spreadsheets use for column names but with a 52-letter alphabet:
//!
//! ```text
//! 0 -> a    25 -> z    26 -> A    51 -> Z
//! 52 -> aa  53 -> ab   103 -> aZ  104 -> ba
//! ```
//!
//! Every single-letter name comes before any two-letter name, and every
//! index maps to exactly one name. Plain base-52 with `a` as zero would make
//! `a`, `aa` and `aaa` all mean zero.

/// The 52 letters used for names, in sequence order.
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Converts a sequence index into its short name.
///
/// # Examples
///
/// ```
/// use cm_minify::generate_name;
///
/// assert_eq!(generate_name(0), "a");
/// assert_eq!(generate_name(51), "Z");
/// assert_eq!(generate_name(52), "aa");
/// ```
#[must_use]
pub fn generate_name(index: u64) -> String {
    // index + 1 overflows u64 at u64::MAX.
    let mut n = u128::from(index) + 1;
    let mut letters = Vec::with_capacity(12);
    while n > 0 {
        n -= 1;
        letters.push(ALPHABET[(n % u128::from(BASE)) as usize]);
        n /= u128::from(BASE);
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Converts a short name back into its sequence index.
///
/// Returns `None` for empty strings, characters outside [`ALPHABET`], and
/// names whose index does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use cm_minify::{decode_name, generate_name};
///
/// assert_eq!(decode_name("aa"), Some(52));
/// assert_eq!(decode_name(&generate_name(9_999)), Some(9_999));
/// assert_eq!(decode_name("a1"), None);
/// ```
#[must_use]
pub fn decode_name(name: &str) -> Option<u64> {
    if name.is_empty() {
        return None;
    }
    let mut value: u128 = 0;
    for byte in name.bytes() {
        let digit = letter_value(byte)?;
        value = value
            .checked_mul(u128::from(BASE))?
            .checked_add(u128::from(digit) + 1)?;
    }
    u64::try_from(value - 1).ok()
}

/// Returns `true` if `name` is a non-empty run of ASCII letters.
#[inline]
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}

fn letter_value(byte: u8) -> Option<u64> {
    match byte {
        b'a'..=b'z' => Some(u64::from(byte - b'a')),
        b'A'..=b'Z' => Some(u64::from(byte - b'A') + 26),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_values() {
        assert_eq!(generate_name(0), "a");
        assert_eq!(generate_name(25), "z");
        assert_eq!(generate_name(26), "A");
        assert_eq!(generate_name(51), "Z");
        assert_eq!(generate_name(52), "aa");
        assert_eq!(generate_name(103), "aZ");
        assert_eq!(generate_name(104), "ba");
    }

    #[test]
    fn test_first_104_names_have_no_gaps() {
        let letters: Vec<String> = ALPHABET.iter().map(|&b| char::from(b).to_string()).collect();
        let mut expected = letters.clone();
        expected.extend(letters.iter().map(|second| format!("a{second}")));

        let generated: Vec<String> = (0..104).map(generate_name).collect();
        assert_eq!(generated, expected);
    }

    #[test]
    fn test_bijection_first_ten_thousand() {
        let mut seen = HashSet::new();
        let mut previous_len = 0;
        for n in 0..10_000 {
            let name = generate_name(n);
            assert!(name.len() >= previous_len, "length shrank at {n}");
            previous_len = name.len();
            assert!(seen.insert(name), "duplicate name at {n}");
        }
    }

    #[test]
    fn test_length_boundaries() {
        // 52 one-letter names, 52^2 two-letter names.
        assert_eq!(generate_name(51).len(), 1);
        assert_eq!(generate_name(52 + 2703).len(), 2);
        assert_eq!(generate_name(52 + 2704), "aaa");
    }

    #[test]
    fn test_decode_inverts_generate() {
        for n in (0..5_000).chain([u64::from(u32::MAX), u64::MAX - 1, u64::MAX]) {
            assert_eq!(decode_name(&generate_name(n)), Some(n));
        }
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert_eq!(decode_name(""), None);
        assert_eq!(decode_name("a-b"), None);
        assert_eq!(decode_name("ä"), None);
        assert_eq!(decode_name("ZZZZZZZZZZZZZ"), None);
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("aZ"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a1"));
    }
}
