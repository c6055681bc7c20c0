//! Canonical display tokens for place names.
//!
//! The panel renders in a fixed box-drawing aesthetic, so city names are
//! flattened to the `[A-Z0-9 ]` charset: uppercased, transliterated out of
//! Cyrillic, stripped of diacritics, and collapsed to single spaces.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Cyrillic capitals to Latin, applied after uppercasing and before
/// decomposition. Hard and soft signs drop out entirely.
const CYRILLIC: &[(char, &str)] = &[
    ('А', "A"),
    ('Б', "B"),
    ('В', "V"),
    ('Г', "G"),
    ('Д', "D"),
    ('Е', "E"),
    ('Ё', "E"),
    ('Ж', "ZH"),
    ('З', "Z"),
    ('И', "I"),
    ('Й', "Y"),
    ('К', "K"),
    ('Л', "L"),
    ('М', "M"),
    ('Н', "N"),
    ('О', "O"),
    ('П', "P"),
    ('Р', "R"),
    ('С', "S"),
    ('Т', "T"),
    ('У', "U"),
    ('Ф', "F"),
    ('Х', "KH"),
    ('Ц', "TS"),
    ('Ч', "CH"),
    ('Ш', "SH"),
    ('Щ', "SHCH"),
    ('Ъ', ""),
    ('Ы', "Y"),
    ('Ь', ""),
    ('Э', "E"),
    ('Ю', "YU"),
    ('Я', "YA"),
];

fn transliterate(ch: char) -> Option<&'static str> {
    CYRILLIC
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

/// Normalizes a raw place name into the panel's display charset.
///
/// Pipeline: uppercase, transliterate Cyrillic, canonical decomposition
/// with combining marks stripped, replace anything outside `[A-Z0-9 ]`
/// with a space, collapse runs of spaces, trim.
///
/// Total and idempotent. Input that strips down to nothing yields an empty
/// string; the caller decides the fallback in that case.
pub fn display_token(raw: &str) -> String {
    let mut upper = String::with_capacity(raw.len());
    for ch in raw.chars() {
        upper.extend(ch.to_uppercase());
    }

    let mut latin = String::with_capacity(upper.len());
    for ch in upper.chars() {
        match transliterate(ch) {
            Some(mapped) => latin.push_str(mapped),
            None => latin.push(ch),
        }
    }

    // Decompose so that e.g. É becomes E plus a combining acute, then drop
    // the marks.
    let stripped: String = latin.nfd().filter(|ch| !is_combining_mark(*ch)).collect();

    // Charset clamp, whitespace collapse and trim in one pass: spaces are
    // withheld until the next kept character, so leading and trailing runs
    // never make it into the output.
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for ch in stripped.chars() {
        let ch = if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            ch
        } else {
            ' '
        };
        if ch == ' ' {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
