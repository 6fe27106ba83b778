use std::fmt;

/// Amounts are integer cents: 1 unit = 100 cents, so $150.00 = 15000.
pub type Cents = i64;

/// Largest amount a single transaction or limit may carry: $1,000,000,000,000.00.
/// Totals saturate at `Cents::MAX` rather than wrap.
pub const MAX_AMOUNT_CENTS: Cents = 100_000_000_000_000;

/// Render cents with two decimals, e.g. 21000 -> "210.00", -5 -> "-0.05".
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse decimal text into cents.
/// Accepts "150", "150.5", "150.50" and ".50"; digits past the second
/// decimal place are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, fraction_str) = digits.split_once('.').unwrap_or((digits, ""));
    if units_str.is_empty() && fraction_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units = parse_digits(units_str)?;
    let fraction = match fraction_str.len() {
        0 => 0,
        1 => parse_digits(fraction_str)? * 10,
        _ => {
            // the rest must still be digits, even though it is dropped
            parse_digits(fraction_str)?;
            parse_digits(&fraction_str[..2])?
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or(ParseCentsError::Overflow)?;
    Ok(if negative { -cents } else { cents })
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if s.is_empty() {
        return Ok(0);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::Overflow)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(21000), "210.00");
        assert_eq!(format_cents(15050), "150.50");
        assert_eq!(format_cents(7), "0.07");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-79000), "-790.00");
        assert_eq!(format_cents(-5), "-0.05");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("1000"), Ok(100000));
        assert_eq!(parse_cents("150.00"), Ok(15000));
        assert_eq!(parse_cents("60.5"), Ok(6050));
        assert_eq!(parse_cents(".99"), Ok(99));
        assert_eq!(parse_cents(" 12.34 "), Ok(1234));
        assert_eq!(parse_cents("-20"), Ok(-2000));
        assert_eq!(parse_cents("9.999"), Ok(999));
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert_eq!(parse_cents(""), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("."), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("abc"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.2.3"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1e3"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("+5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::Overflow)
        );
    }
}
