//! Code-point counting and offset conversion.
//!
//! Annotation positions are always Unicode code points. Rust strings are UTF-8,
//! while editor hosts usually report UTF-16 code units; these helpers bridge
//! both. Lone surrogates are counted as one code point each and never panic.

/// Number of code points in a UTF-8 string.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// True if the code unit at `i` is the high half of a surrogate pair.
pub fn is_surrogate_start(units: &[u16], i: usize) -> bool {
    units
        .get(i)
        .is_some_and(|&u| (0xD800..=0xDBFF).contains(&u))
}

/// Number of code units the code point starting at `i` occupies (1 or 2).
fn step(units: &[u16], i: usize) -> usize {
    if is_surrogate_start(units, i) && i + 1 < units.len() {
        2
    } else {
        1
    }
}

/// Number of code points in a UTF-16 string.
pub fn code_point_len(units: &[u16]) -> usize {
    utf16_to_code_point(units, units.len())
}

/// Converts a UTF-16 code-unit offset into a code-point offset.
///
/// An offset pointing into the middle of a surrogate pair resolves to the
/// code point that pair encodes. Offsets past the end clamp to the length.
pub fn utf16_to_code_point(units: &[u16], offset: usize) -> usize {
    let end = offset.min(units.len());
    let mut i = 0;
    let mut pos = 0;
    while i < end {
        i += step(units, i);
        pos += 1;
    }
    if i > end { pos - 1 } else { pos }
}

/// Converts a code-point offset into a UTF-16 code-unit offset.
///
/// Positions past the end clamp to the string length in code units.
pub fn code_point_to_utf16(units: &[u16], pos: usize) -> usize {
    let mut i = 0;
    for _ in 0..pos {
        if i >= units.len() {
            break;
        }
        i += step(units, i);
    }
    i.min(units.len())
}

/// Decodes host UTF-16 text, replacing lone surrogates with U+FFFD.
///
/// Replacement keeps the code-point count unchanged, so annotation offsets
/// computed on the host stay valid.
pub fn decode_utf16_lossy(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}
