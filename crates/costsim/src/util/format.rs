/// Insert thousands separators into a whole number
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format an amount without cents, e.g. `25,431`
pub fn format_amount_short(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(value.abs().round() as u64))
}

/// Format an amount in compact form (e.g., 2.1M, 450K, 50)
pub fn format_compact_amount(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs_value / 1_000_000.0)
    } else if abs_value >= 10_000.0 {
        format!("{sign}{:.1}K", abs_value / 1_000.0)
    } else {
        format!("{sign}{}", format_amount_short(abs_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_short() {
        assert_eq!(format_amount_short(0.0), "0");
        assert_eq!(format_amount_short(999.4), "999");
        assert_eq!(format_amount_short(25_430.6), "25,431");
        assert_eq!(format_amount_short(1_234_567.0), "1,234,567");
        assert_eq!(format_amount_short(-1_500.0), "-1,500");
    }

    #[test]
    fn test_format_compact_amount() {
        assert_eq!(format_compact_amount(2_100_000.0), "2.1M");
        assert_eq!(format_compact_amount(25_400.0), "25.4K");
        assert_eq!(format_compact_amount(9_500.0), "9,500");
        assert_eq!(format_compact_amount(50.0), "50");
    }
}
