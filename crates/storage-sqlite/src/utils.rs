//! Conversion helpers shared by the database models.

use std::str::FromStr;

use log::error;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

/// Parses a TEXT column into a Decimal, falling back through f64 and finally
/// to zero so a single malformed row cannot poison a whole listing.
pub(crate) fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(value) => value,
        Err(decimal_err) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(value) => value,
                None => {
                    error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name, value_str, f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(float_err) => {
                error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, decimal_err, float_err
                );
                Decimal::ZERO
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_decimal_tolerant("185.50", "price"), dec!(185.50));
    }

    #[test]
    fn parses_scientific_notation_via_f64() {
        assert_eq!(parse_decimal_tolerant("1e2", "price"), dec!(100));
    }

    #[test]
    fn falls_back_to_zero_on_garbage() {
        assert_eq!(parse_decimal_tolerant("not-a-number", "price"), Decimal::ZERO);
    }
}
