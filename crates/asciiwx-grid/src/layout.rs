//! Single-line layout primitives.
//!
//! All functions are total: they pad or truncate rather than fail, and they
//! count characters rather than bytes so multi-byte input cannot split a
//! code point.

/// Pads `text` with trailing spaces, or truncates it from the right, to
/// exactly `width` characters.
pub fn pad_line(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut len = 0;
    for ch in text.chars().take(width) {
        out.push(ch);
        len += 1;
    }
    out.push_str(&" ".repeat(width - len));
    out
}

/// Centers `text` in a line of `width` characters.
///
/// When the leftover space is odd the extra column goes to the right. Text
/// wider than `width` is truncated from the right; text of exactly `width`
/// characters passes through unchanged.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return pad_line(text, width);
    }
    let left = (width - len) / 2;
    let mut out = String::with_capacity(width);
    out.push_str(&" ".repeat(left));
    out.push_str(text);
    out.push_str(&" ".repeat(width - len - left));
    out
}

/// Overlays `text` onto `base` starting at column `col`.
///
/// The base is first padded or truncated to `width` characters, so the
/// result has exactly `width` characters; base characters outside the
/// overlay span are preserved and the overlay is truncated at the right
/// edge. A `col` at or past `width` returns `base` unchanged.
pub fn overlay(base: &str, text: &str, col: usize, width: usize) -> String {
    if col >= width {
        return base.to_string();
    }
    let padded: Vec<char> = pad_line(base, width).chars().collect();
    let mut out = String::with_capacity(width);
    out.extend(&padded[..col]);
    let mut cursor = col;
    for ch in text.chars().take(width - col) {
        out.push(ch);
        cursor += 1;
    }
    out.extend(&padded[cursor..]);
    out
}
