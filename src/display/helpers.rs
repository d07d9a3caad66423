//! Formatting helpers shared by the display modules

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::amount::format_decimal;

/// Format a percentage with two decimals
pub fn format_percentage(pct: Decimal) -> String {
    format!("{}%", format_decimal(pct, 2))
}

/// Create a simple bar chart representation
pub fn format_bar(value: Decimal, max_value: Decimal, width: usize) -> String {
    if max_value <= Decimal::ZERO || value <= Decimal::ZERO {
        return " ".repeat(width);
    }

    let filled = value
        .checked_div(max_value)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(width)))
        .and_then(|cells| cells.round().to_usize())
        .unwrap_or(width)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Width of the widest value in a column, at least `min`
pub fn column_width<I, S>(values: I, min: usize) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}

/// `-` for missing optional values
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(57.14)), "57.14%");
        assert_eq!(format_percentage(dec!(100)), "100.00%");
        assert_eq!(format_percentage(Decimal::ZERO), "0.00%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(dec!(50), dec!(100), 10), "█████░░░░░");
        assert_eq!(format_bar(dec!(100), dec!(100), 4), "████");
        assert_eq!(format_bar(dec!(-5), dec!(100), 3), "   ");
        assert_eq!(format_bar(dec!(5), Decimal::ZERO, 2), "  ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long name", 8), "a ver...");
        assert_eq!(truncate("café au lait", 6), "caf...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(["a", "abcd"], 2), 4);
        assert_eq!(column_width(Vec::<String>::new(), 4), 4);
        assert_eq!(column_width(["é"], 0), 1);
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("MA")), "MA");
        assert_eq!(or_dash(None::<&str>), "-");
    }
}
