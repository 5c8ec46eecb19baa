/// Reads a quantity typed into a numeric text field.
///
/// Leading whitespace and an optional sign are skipped, then the longest run
/// of ASCII digits is taken; anything after it (a fractional part, trailing
/// text) is ignored. Input with no leading digits reads as 0. Values that do
/// not fit saturate, so absurd entries still reach the budget check and get
/// rejected there.
pub fn parse_requested(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (neg, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in body.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    if neg { -value } else { value }
}

/// Clamps a requested quantity into the owned-units domain.
pub fn clamp_requested(requested: i64) -> u64 {
    u64::try_from(requested).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_integer() {
        assert_eq!(parse_requested("42"), 42);
        assert_eq!(parse_requested("  7"), 7);
        assert_eq!(parse_requested("12abc"), 12);
        assert_eq!(parse_requested("3.9"), 3);
        assert_eq!(parse_requested("+5"), 5);
        assert_eq!(parse_requested("-5"), -5);
    }

    #[test]
    fn non_numeric_reads_as_zero() {
        assert_eq!(parse_requested(""), 0);
        assert_eq!(parse_requested("abc"), 0);
        assert_eq!(parse_requested("-"), 0);
        assert_eq!(parse_requested(".5"), 0);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(parse_requested("99999999999999999999999999"), i64::MAX);
    }

    #[test]
    fn negative_requests_clamp_to_zero() {
        assert_eq!(clamp_requested(-1), 0);
        assert_eq!(clamp_requested(i64::MIN), 0);
        assert_eq!(clamp_requested(0), 0);
        assert_eq!(clamp_requested(999_999_999), 999_999_999);
    }
}
