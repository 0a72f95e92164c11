//! Text-to-number rules for scraped figures.

const CURRENCY_SYMBOL: char = '$';
const GROUPING_SEPARATOR: char = ',';

/// Parses a currency-formatted amount such as `$1,234.56`.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
    parse_plain(unsigned.trim())
}

/// Parses the leading token of a quantity such as `19,560,000 BTC`.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    raw.split_whitespace().next().and_then(parse_currency)
}

/// Reads the integer after `prefix` in text such as `Rank #3`.
pub fn parse_rank(raw: &str, prefix: &str) -> Option<u32> {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(prefix)
        .unwrap_or(trimmed)
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank > 0)
}

fn parse_plain(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|ch| *ch != GROUPING_SEPARATOR).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}
