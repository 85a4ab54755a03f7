use std::fmt;

/// Monetary amounts are plain floats, matching how they are entered, stored
/// (SQLite REAL) and summed. Repeated additions drift below the cent, so
/// every displayed sum goes through `round_to_cents` exactly once, after
/// summation.
pub type Amount = f64;

/// Round an amount to 2 decimal places, half-up on the cent boundary.
/// Example: 0.1 + 0.2 -> 0.30000000000000004 -> 0.30
pub fn round_to_cents(amount: Amount) -> Amount {
    (amount * 100.0).round() / 100.0
}

/// Format an amount with 2 decimal places.
/// Example: 50.0 -> "50.00", -12.345 -> "-12.35"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into a non-negative amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "100" -> 100.0
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if amount < 0.0 {
        return Err(ParseAmountError::Negative);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    Negative,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::Negative => write!(f, "amount must not be negative"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
