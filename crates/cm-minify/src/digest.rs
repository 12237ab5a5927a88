//! Content digest for utility-class strings.
//!
//! The digest is a 32-bit rolling hash (`h = h * 31 + unit`, wrapping) over
//! the UTF-16 code units of the input, reported as the magnitude of the
//! signed result in lowercase base 36. Exported maps carry this value in the
//! `hash` field of every entry.
//!
//! It is not collision resistant. It is only used to notice when two
//! semantic names currently resolve to the same classes.

/// Computes the digest of a class string.
///
/// # Examples
///
/// ```
/// use cm_minify::hash_classes;
///
/// assert_eq!(hash_classes("abc"), "22ci");
/// assert_eq!(hash_classes(""), "0");
/// ```
#[must_use]
pub fn hash_classes(classes: &str) -> String {
    let hash = classes.encode_utf16().fold(0_i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });
    to_base36(hash.unsigned_abs())
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::with_capacity(7);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
