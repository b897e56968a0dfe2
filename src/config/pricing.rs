use crate::pricing::{CurrencyFormat, PriceRounder, MAX_MINOR_UNIT_DIGITS};
use serde::Deserialize;

/// Price rounding and display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Amount at which `auto` switches from hundreds to thousands
    pub auto_breakpoint: u64,

    /// Currency symbol prefix (e.g., "$")
    pub currency_symbol: String,

    /// Currency code suffix (e.g., "MXN"); empty disables it
    pub currency_code: String,

    pub thousands_separator: char,

    pub decimal_separator: char,

    /// Trailing amount digits shown as the fractional part
    pub minor_unit_digits: u32,
}

impl PricingConfig {
    pub fn rounder(&self) -> Result<PriceRounder, String> {
        PriceRounder::new(self.auto_breakpoint).map_err(|e| e.to_string())
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency_symbol.clone(),
            code: (!self.currency_code.is_empty()).then(|| self.currency_code.clone()),
            thousands_separator: self.thousands_separator,
            decimal_separator: self.decimal_separator,
            minor_unit_digits: self.minor_unit_digits,
        }
    }

    /// Validate pricing configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.auto_breakpoint == 0 || self.auto_breakpoint % 1000 != 0 {
            return Err("PRICING_AUTO_BREAKPOINT must be a positive multiple of 1000".to_string());
        }

        if self.minor_unit_digits > MAX_MINOR_UNIT_DIGITS {
            return Err(format!(
                "PRICING_MINOR_UNIT_DIGITS must be between 0 and {}",
                MAX_MINOR_UNIT_DIGITS
            ));
        }

        if self.thousands_separator == self.decimal_separator {
            return Err(
                "PRICING_THOUSANDS_SEPARATOR and PRICING_DECIMAL_SEPARATOR must differ".to_string(),
            );
        }

        Ok(())
    }
}
