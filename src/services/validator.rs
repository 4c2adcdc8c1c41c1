use crate::config::TopUpLimits;
use crate::models::format::format_amount;
use thiserror::Error;

pub const TOKEN_SYMBOL: &str = "PEPU";

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AmountError {
    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Minimum amount is {} {}", format_amount(*.min), TOKEN_SYMBOL)]
    BelowMinimum { min: f64 },

    #[error("Maximum amount is {} {}", format_amount(*.max), TOKEN_SYMBOL)]
    AboveMaximum { max: f64 },
}

/// Parses a user-entered amount and checks it against the inclusive limits.
pub fn validate_amount(raw: &str, limits: &TopUpLimits) -> Result<f64, AmountError> {
    let value: f64 = raw.trim().parse().map_err(|_| AmountError::NotANumber)?;
    if !value.is_finite() {
        return Err(AmountError::NotANumber);
    }
    if value < limits.min_amount {
        return Err(AmountError::BelowMinimum {
            min: limits.min_amount,
        });
    }
    if value > limits.max_amount {
        return Err(AmountError::AboveMaximum {
            max: limits.max_amount,
        });
    }
    Ok(value)
}

/// Form-facing variant: `None` when the amount is acceptable.
pub fn validation_message(raw: &str, limits: &TopUpLimits) -> Option<String> {
    validate_amount(raw, limits).err().map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> TopUpLimits {
        TopUpLimits::default()
    }

    #[test]
    fn accepts_amounts_in_range() {
        for raw in ["40000", "75000", "150000.5", " 200000 ", "4e4"] {
            assert!(validation_message(raw, &limits()).is_none(), "{raw}");
        }
        assert_eq!(validate_amount("75000", &limits()), Ok(75_000.0));
    }

    #[test]
    fn rejects_out_of_range_amounts() {
        assert_eq!(
            validation_message("39999.99", &limits()).as_deref(),
            Some("Minimum amount is 40,000 PEPU")
        );
        assert_eq!(
            validation_message("200001", &limits()).as_deref(),
            Some("Maximum amount is 200,000 PEPU")
        );
        assert_eq!(
            validate_amount("-5", &limits()),
            Err(AmountError::BelowMinimum { min: 40_000.0 })
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        for raw in ["", "   ", "abc", "12abc", "NaN", "inf", "-inf"] {
            assert_eq!(
                validation_message(raw, &limits()).as_deref(),
                Some("Please enter a valid number"),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn below_configured_minimum_is_rejected() {
        let limits = TopUpLimits {
            min_amount: 50_000.0,
            max_amount: 200_000.0,
        };
        assert_eq!(
            validation_message("10000", &limits).as_deref(),
            Some("Minimum amount is 50,000 PEPU")
        );
    }
}
