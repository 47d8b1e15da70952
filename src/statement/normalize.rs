//! Normalization of textual cost and phone-number tokens

use bigdecimal::BigDecimal;

use crate::types::{BillError, BillResult};

/// Tokens the vendor prints in place of a zero amount
const ZERO_PLACEHOLDERS: [&str; 2] = ["Included", "-"];

/// Convert a raw cost token into a numeric amount.
///
/// The placeholder tokens `Included` and `-` map to zero; anything else is
/// stripped of a leading `$` and comma grouping and parsed as a decimal.
/// Vendor credits parse as negative amounts. Unparseable tokens fail with
/// [`BillError::InvalidAmount`] rather than being coerced to zero.
pub fn parse_amount(token: &str) -> BillResult<BigDecimal> {
    let trimmed = token.trim();
    if ZERO_PLACEHOLDERS.contains(&trimmed) {
        return Ok(BigDecimal::from(0));
    }

    let cleaned = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    cleaned
        .parse::<BigDecimal>()
        .map_err(|_| BillError::InvalidAmount(token.to_string()))
}

/// Canonicalize a phone-number token into `(DDD) DDD-DDDD`.
///
/// Non-digit characters are stripped first; exactly ten digits must remain
/// or the token fails with [`BillError::InvalidPhoneNumber`].
pub fn normalize_phone_number(token: &str) -> BillResult<String> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 10 {
        return Err(BillError::InvalidPhoneNumber(token.to_string()));
    }

    Ok(format!(
        "({}) {}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..]
    ))
}
