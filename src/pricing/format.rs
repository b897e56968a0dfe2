/// Largest supported `minor_unit_digits`; wider values are clamped to it
pub const MAX_MINOR_UNIT_DIGITS: u32 = 4;

/// Currency display settings.
///
/// `minor_unit_digits` says how many trailing digits of an amount are the
/// fractional part: `0` when amounts are whole pesos, `2` for centavos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub code: Option<String>,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub minor_unit_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            code: Some("MXN".to_string()),
            thousands_separator: ',',
            decimal_separator: '.',
            minor_unit_digits: 0,
        }
    }
}

impl CurrencyFormat {
    /// Render `amount` for display, e.g. `$20,171 MXN`.
    pub fn format(&self, amount: u64) -> String {
        let minor = self.minor_unit_digits.min(MAX_MINOR_UNIT_DIGITS) as usize;
        let digits = format!("{:0>width$}", amount, width = minor + 1);
        let (major, fraction) = digits.split_at(digits.len() - minor);

        let mut out = String::with_capacity(digits.len() * 2 + self.symbol.len() + 8);
        out.push_str(&self.symbol);

        for (i, ch) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(ch);
        }

        if minor > 0 {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }

        if let Some(code) = &self.code {
            out.push(' ');
            out.push_str(code);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_pesos() {
        let format = CurrencyFormat::default();

        assert_eq!(format.format(0), "$0 MXN");
        assert_eq!(format.format(999), "$999 MXN");
        assert_eq!(format.format(1000), "$1,000 MXN");
        assert_eq!(format.format(20171), "$20,171 MXN");
        assert_eq!(format.format(1234567), "$1,234,567 MXN");
    }

    #[test]
    fn test_format_minor_units() {
        let format = CurrencyFormat {
            minor_unit_digits: 2,
            ..CurrencyFormat::default()
        };

        assert_eq!(format.format(2017150), "$20,171.50 MXN");
        assert_eq!(format.format(5), "$0.05 MXN");
        assert_eq!(format.format(0), "$0.00 MXN");
    }

    #[test]
    fn test_format_custom_separators_without_code() {
        let format = CurrencyFormat {
            symbol: "€".to_string(),
            code: None,
            thousands_separator: '.',
            decimal_separator: ',',
            minor_unit_digits: 2,
        };

        assert_eq!(format.format(123456789), "€1.234.567,89");
    }

    #[test]
    fn test_format_never_panics_at_extremes() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(u64::MAX), "$18,446,744,073,709,551,615 MXN");

        let wide = CurrencyFormat {
            minor_unit_digits: 4,
            ..CurrencyFormat::default()
        };
        assert_eq!(wide.format(u64::MAX), "$1,844,674,407,370,955.1615 MXN");
    }

    #[test]
    fn test_format_clamps_minor_unit_digits() {
        let huge = CurrencyFormat {
            minor_unit_digits: u32::MAX,
            ..CurrencyFormat::default()
        };

        assert_eq!(huge.format(2017150), "$201.7150 MXN");
        assert_eq!(huge.format(0), "$0.0000 MXN");
    }
}
