//! Character classes and string normalization used by the grammar.
//!
//! Whitespace here is the classic C set (space, tab, newline, carriage return,
//! form feed, vertical tab). Note that [`char::is_ascii_whitespace`] does not
//! include vertical tab, so the helpers below never defer to it.

/// Returns true for `A-Z` and `a-z`.
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Returns true for space, `\t`, `\n`, `\r`, form feed and vertical tab.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C' | '\x0B')
}

/// Removes leading and trailing whitespace.
///
/// An empty or all-whitespace input yields an empty string.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Cuts the string at the first `?` (dropping the mark and whatever follows it),
/// then trims.
pub fn strip_question_mark_and_trim(s: &str) -> &str {
    match s.find('?') {
        Some(idx) => trim(&s[..idx]),
        None => trim(s),
    }
}

/// Splits on runs of whitespace, skipping empty pieces.
pub fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(is_space).filter(|w| !w.is_empty())
}

/// Returns the trimmed input when it is exactly one whitespace-delimited token.
pub fn single_word(s: &str) -> Option<&str> {
    let mut it = words(s);
    match (it.next(), it.next()) {
        (Some(word), None) => Some(word),
        _ => None,
    }
}

/// Potion names: non-empty, only ASCII letters and single spaces.
///
/// Two spaces in a row are rejected. Callers trim before checking, so leading
/// or trailing spaces never reach this function in practice.
pub fn is_valid_potion_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut prev_space = false;
    for c in name.chars() {
        if c == ' ' {
            if prev_space {
                return false;
            }
            prev_space = true;
        } else if is_letter(c) {
            prev_space = false;
        } else {
            return false;
        }
    }
    true
}
