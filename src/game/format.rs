//! Currency formatting.

/// Insert thousands separators into the integer part (e.g. 1234567 → "1,234,567").
pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Whole dollars, floored, with separators: `1234.9` → `"$1,234"`.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return "$∞".to_string();
    }
    if amount < 0.0 {
        return format!("-{}", format_money(-amount));
    }
    format!("${}", format_with_commas(amount.floor() as u64))
}

/// Compact form for narrow screens: `$12.3K`, `$4.5M`, `$1.2B`.
pub fn format_money_short(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{}${:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}${:.1}M", sign, abs / 1e6)
    } else if abs >= 1e4 {
        format!("{}${:.1}K", sign, abs / 1e3)
    } else {
        format_money(amount)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_money_no_panic(n in -1e15f64..1e15) {
            let _ = format_money(n);
            let _ = format_money_short(n);
        }

        #[test]
        fn prop_format_money_digits_round_trip(n in 0u64..1_000_000_000_000) {
            let s = format_money(n as f64);
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits, n.to_string());
        }

        #[test]
        fn prop_commas_every_three_digits(n in 0u64..u64::MAX) {
            let s = format_with_commas(n);
            for group in s.split(',').skip(1) {
                prop_assert_eq!(group.len(), 3);
            }
        }
    }
}
