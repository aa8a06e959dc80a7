/// Canonical comparison form: lower-cased, letters/digits/whitespace only,
/// whitespace runs collapsed to one space, trimmed.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every ASCII decimal digit of `text`, in order. Empty input yields an empty string.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// The last `n` characters of an ASCII digit string (all of it when shorter).
pub fn last_digits(digits: &str, n: usize) -> &str {
    if digits.len() > n {
        &digits[digits.len() - n..]
    } else {
        digits
    }
}
