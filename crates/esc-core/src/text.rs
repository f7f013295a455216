//! Forgiving text helpers shared by the level parser and the game engine.

/// Parse an integer the forgiving way: surrounding whitespace is ignored, an
/// optional leading `-` is accepted, and anything that is not a plain run of
/// ASCII digits yields 0. Values beyond the `i32` range saturate.
pub fn lenient_int(s: &str) -> i32 {
    let t = s.trim();
    let (negative, digits) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    let mut value: i64 = 0;
    for b in digits.bytes() {
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) {
            value = i64::from(i32::MAX);
            break;
        }
    }
    let value = if negative { -value } else { value };
    // In range after the saturation above.
    i32::try_from(value).unwrap_or(0)
}

/// Trim and lowercase for case-insensitive comparisons.
pub fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
