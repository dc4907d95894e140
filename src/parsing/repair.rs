//! Repair of Meta's broken text encoding (Mojibake).
//!
//! The exporter writes UTF-8 text as if each byte were an ISO-8859-1
//! character, so "Björn" arrives as "BjÃ¶rn" and "👍" as "ðŸ‘\u{8d}".
//! Reversing it means taking every char as a byte and decoding the bytes as
//! UTF-8 again.
//!
//! The reversal is only defined when every char fits in a byte and the
//! resulting bytes are valid UTF-8. Anything else was never corrupted and is
//! passed through untouched.

use std::borrow::Cow;

/// Re-encodes `s` as Latin-1 bytes and decodes them as UTF-8.
///
/// Returns `None` when the repair does not apply: a char above U+00FF, or
/// bytes that are not valid UTF-8.
///
/// ```
/// use chatlens::parsing::try_repair;
///
/// assert_eq!(try_repair("BjÃ¶rn").as_deref(), Some("Björn"));
/// assert_eq!(try_repair("Björn"), None);
/// assert_eq!(try_repair("Привет"), None);
/// ```
pub fn try_repair(s: &str) -> Option<String> {
    let bytes = s
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

/// Repairs `s` if it is Mojibake, otherwise returns it unchanged.
///
/// Pure ASCII is its own repair, so it always comes back borrowed.
pub fn repair(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    match try_repair(s) {
        Some(fixed) => Cow::Owned(fixed),
        None => Cow::Borrowed(s),
    }
}

/// Applies [`repair`] when `enabled`, otherwise copies `s`.
pub fn repair_if(s: &str, enabled: bool) -> String {
    if enabled {
        repair(s).into_owned()
    } else {
        s.to_string()
    }
}

/// Produces the Mojibake form of `s`, the exact defect [`repair`] undoes.
pub fn mojibake(s: &str) -> String {
    s.bytes().map(char::from).collect()
}
