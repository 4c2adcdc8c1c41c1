//! Display formatting shared by the card and history views.

/// Formats an amount with thousands separators and at most three fraction
/// digits, trimming trailing zeros: `40000.0` → `40,000`, `1234.5` → `1,234.5`.
pub fn format_amount(value: f64) -> String {
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && rendered.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats a balance as US dollars with cents: `1234.5` → `$1,234.50`.
pub fn format_usd(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, cents) = rendered.split_once('.').unwrap_or((&rendered, "00"));
    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortens a hex identifier to its first 6 and last 4 characters.
pub fn truncate_hex(value: &str) -> String {
    if value.len() <= 10 || !value.is_ascii() {
        return value.to_string();
    }
    format!("{}...{}", &value[..6], &value[value.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_amounts() {
        assert_eq!(format_amount(40_000.0), "40,000");
        assert_eq!(format_amount(200_000.0), "200,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_234_567.25), "1,234,567.25");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-1500.0), "-1,500");
    }

    #[test]
    fn formats_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(-42.0), "-$42.00");
    }

    #[test]
    fn truncates_addresses() {
        assert_eq!(
            truncate_hex("0x1234567890123456789012345678901234567890"),
            "0x1234...7890"
        );
        assert_eq!(truncate_hex("0xabc"), "0xabc");
    }
}
