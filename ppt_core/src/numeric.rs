//! Fail-soft parsing of user-typed reps and weights.
//!
//! Every derived number in analytics goes through these two functions.
//! `None` means "contributes nothing"; callers never see an error.

/// Parse the leading integer of `s` ("10", " 8 reps", "-2")
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit follows.
pub fn parse_reps(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a weight such as "20kg", "16kg x2" or "12.5 lb"
///
/// Everything except digits and '.' is stripped first, then the longest
/// leading decimal number is read. "16kg x2" therefore reads as 162.
pub fn parse_weight(s: &str) -> Option<f64> {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = kept.len();
    let mut seen_dot = false;
    for (i, c) in kept.char_indices() {
        if c == '.' {
            if seen_dot {
                end = i;
                break;
            }
            seen_dot = true;
        }
    }

    let number = &kept[..end];
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}
