use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift when summing.
/// For USD, 1 unit = 100 cents, so $12.50 = 1250 cents.
pub type Cents = i64;

/// Format cents as a human-readable currency string.
/// Example: 1250 -> "12.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Largest amount a single expense may carry: 1,000,000,000.00.
/// Keeps every ledger total far away from `i64` overflow.
pub const MAX_AMOUNT_CENTS: Cents = 100_000_000_000;

/// Parse a decimal string into cents.
/// Example: "12.50" -> 1250, "12.5" -> 1250, "40" -> 4000, ".5" -> 50, "1e3" -> 100000
///
/// The value must be a whole number of cents: "12.999" is rejected rather
/// than rounded, while "12.500" is accepted. A leading '-' is accepted here;
/// callers decide whether negative amounts make sense.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..])?),
        None => (unsigned, 0),
    };

    let (units_str, decimal_str) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !is_ascii_digits(units_str) || !is_ascii_digits(decimal_str) {
        // Also catches a second '.', which lands in the decimal part
        return Err(ParseCentsError::InvalidFormat);
    }

    // The mantissa digits read as one integer, times 10^scale, is the amount in cents
    let joined = format!("{}{}", units_str, decimal_str);
    let digits = joined.trim_start_matches('0');
    let scale = i64::from(exponent) + 2 - decimal_str.len() as i64;

    let significant = if scale >= 0 {
        digits
    } else {
        let drop = usize::try_from(-scale).unwrap_or(usize::MAX);
        let keep = digits.len().saturating_sub(drop);
        if digits[keep..].bytes().any(|b| b != b'0') {
            return Err(ParseCentsError::TooPrecise);
        }
        &digits[..keep]
    };

    if significant.is_empty() {
        return Ok(0);
    }
    let value: i64 = significant
        .parse()
        .map_err(|_| ParseCentsError::Overflow)?;
    let factor = u32::try_from(scale.max(0))
        .ok()
        .and_then(|s| 10i64.checked_pow(s))
        .ok_or(ParseCentsError::Overflow)?;
    let cents = value
        .checked_mul(factor)
        .ok_or(ParseCentsError::Overflow)?;

    Ok(if negative { -cents } else { cents })
}

fn parse_exponent(s: &str) -> Result<i32, ParseCentsError> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.is_empty() || !is_ascii_digits(unsigned) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::Overflow)
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    /// Finer than a cent, e.g. "12.999"
    TooPrecise,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooPrecise => write!(f, "more than two decimal places"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
