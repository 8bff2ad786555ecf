//! Price-text parsing.

/// Extracts the numeric price from a formatted string like `"TZS 1800/kg"`.
///
/// Every non-digit character is treated as noise, so a thousands separator
/// ("TZS 2,000/kg") simply collapses into the digit run. Returns `None` when
/// no digit survives (or the digit run overflows); the aggregation layer
/// decides what to do with such defects. This function never panics.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_and_unit_suffix() {
        assert_eq!(parse_price("TZS 1800/kg"), Some(1800));
        assert_eq!(parse_price("TZS 900/kg"), Some(900));
    }

    #[test]
    fn thousands_separator_is_noise() {
        assert_eq!(parse_price("TZS 2,000/kg"), Some(2000));
        assert_eq!(parse_price("1.000.000"), Some(1_000_000));
    }

    #[test]
    fn bare_number_passes_through() {
        assert_eq!(parse_price("1500"), Some(1500));
    }

    #[test]
    fn digitless_text_is_a_defect() {
        assert_eq!(parse_price("TZS /kg"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("bei nzuri"), None);
    }
}
