//! Utility functions and helpers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format an integer string with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Dollar amount with grouped integer part and two decimals
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, format_number(whole), cents)
}

/// Compact dollar amount for chart axes, e.g. `$24.8K`
pub fn format_compact_currency(value: u64) -> String {
    if value >= 1_000 {
        let thousands = value as f64 / 1_000.0;
        if value % 1_000 == 0 {
            format!("${}K", value / 1_000)
        } else {
            format!("${:.1}K", thousands)
        }
    } else {
        format!("${}", value)
    }
}

/// Table timestamp, e.g. `Jun 1, 2025, 12:05 PM`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Escape text for inclusion in HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate a unique session ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(10820), "10,820");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-4500), "-4,500");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::new(12345, 2)), "$123.45");
        assert_eq!(format_currency(Decimal::new(20, 0)), "$20.00");
        assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
    }

    #[test]
    fn test_format_compact_currency() {
        assert_eq!(format_compact_currency(24_800), "$24.8K");
        assert_eq!(format_compact_currency(12_000), "$12K");
        assert_eq!(format_compact_currency(950), "$950");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jun 1, 2025, 2:05 PM");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        assert_eq!(a.len(), 36);
        assert_ne!(a, generate_id());
    }
}
