//! Human-readable byte quantities.
//!
//! Volume quotas arrive as either a bare decimal byte count or a
//! decimal count with a binary unit suffix (`K`, `M`, `G`, `T`, `P`),
//! optionally followed by `B` or `iB`, case-insensitive. A leading `-`
//! yields a negative quantity, which reallocation uses to shrink an
//! existing mount.

/// Parse a human-readable byte quantity into a signed byte count.
///
/// Returns `None` for malformed input or values that overflow `i64`.
pub fn parse_byte_size(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let (digits, suffix) = rest.split_at(digits_end);
    let value: i64 = digits.parse().ok()?;

    let shift = match suffix.to_ascii_uppercase().as_str() {
        "" | "B" => 0,
        "K" | "KB" | "KIB" => 10,
        "M" | "MB" | "MIB" => 20,
        "G" | "GB" | "GIB" => 30,
        "T" | "TB" | "TIB" => 40,
        "P" | "PB" | "PIB" => 50,
        _ => return None,
    };

    let bytes = value.checked_mul(1i64 << shift)?;
    Some(if negative { -bytes } else { bytes })
}
