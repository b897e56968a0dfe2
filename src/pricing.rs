//! Price rounding strategies and display formatting.
//!
//! Rounding is pure: the same amount, strategy and auto breakpoint always
//! produce the same result, and applying a strategy to its own output is a
//! no-op. Formatting lives in [`CurrencyFormat`] and never fails.

mod format;

pub use format::{CurrencyFormat, MAX_MINOR_UNIT_DIGITS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default magnitude at which `auto` switches from hundreds to thousands.
pub const DEFAULT_AUTO_BREAKPOINT: u64 = 10_000;

/// Errors raised by the pricing functions.
///
/// Pricing fails closed: a price is never guessed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Unknown rounding strategy: {0}")]
    UnknownStrategy(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(u64),

    #[error("Invalid auto breakpoint {0}: must be a positive multiple of 1000")]
    InvalidBreakpoint(u64),
}

/// Named rounding policy applied to a raw price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingStrategy {
    /// Round down to a price ending in 99 (or 9 below one hundred).
    Charm,
    /// Nearest multiple of 100, ties up.
    Hundred,
    /// Nearest multiple of 1000, ties up.
    Thousand,
    /// `Hundred` below the breakpoint, `Thousand` at or above it.
    Auto,
}

impl RoundingStrategy {
    pub const ALL: [RoundingStrategy; 4] = [
        RoundingStrategy::Charm,
        RoundingStrategy::Hundred,
        RoundingStrategy::Thousand,
        RoundingStrategy::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingStrategy::Charm => "charm",
            RoundingStrategy::Hundred => "hundred",
            RoundingStrategy::Thousand => "thousand",
            RoundingStrategy::Auto => "auto",
        }
    }
}

impl FromStr for RoundingStrategy {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "charm" => Ok(RoundingStrategy::Charm),
            "hundred" => Ok(RoundingStrategy::Hundred),
            "thousand" => Ok(RoundingStrategy::Thousand),
            "auto" => Ok(RoundingStrategy::Auto),
            _ => Err(PricingError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for RoundingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies a [`RoundingStrategy`] to raw amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRounder {
    auto_breakpoint: u64,
}

impl Default for PriceRounder {
    fn default() -> Self {
        Self {
            auto_breakpoint: DEFAULT_AUTO_BREAKPOINT,
        }
    }
}

impl PriceRounder {
    /// Create a rounder with a custom `auto` breakpoint.
    ///
    /// The breakpoint must be a positive multiple of 1000 so that a value
    /// rounded up to the breakpoint by `hundred` is already a thousand
    /// multiple, which keeps `auto` idempotent at the boundary.
    pub fn new(auto_breakpoint: u64) -> Result<Self, PricingError> {
        if auto_breakpoint == 0 || auto_breakpoint % 1000 != 0 {
            return Err(PricingError::InvalidBreakpoint(auto_breakpoint));
        }

        Ok(Self { auto_breakpoint })
    }

    pub fn auto_breakpoint(&self) -> u64 {
        self.auto_breakpoint
    }

    /// Round `amount` with `strategy`.
    pub fn round(&self, amount: u64, strategy: RoundingStrategy) -> Result<u64, PricingError> {
        match strategy {
            RoundingStrategy::Charm => Ok(charm(amount)),
            RoundingStrategy::Hundred => nearest_multiple(amount, 100),
            RoundingStrategy::Thousand => nearest_multiple(amount, 1000),
            RoundingStrategy::Auto if amount < self.auto_breakpoint => {
                nearest_multiple(amount, 100)
            }
            RoundingStrategy::Auto => nearest_multiple(amount, 1000),
        }
    }

    /// Round `amount` with a strategy given by its identifier.
    pub fn round_named(&self, amount: u64, strategy: &str) -> Result<u64, PricingError> {
        self.round(amount, strategy.parse()?)
    }
}

/// A rounded amount together with its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundedPrice {
    pub rounded_amount: u64,
    pub formatted: String,
    pub strategy: RoundingStrategy,
}

/// Rounds and formats prices for display.
#[derive(Debug, Clone, Default)]
pub struct PricingService {
    rounder: PriceRounder,
    format: CurrencyFormat,
}

impl PricingService {
    pub fn new(rounder: PriceRounder, format: CurrencyFormat) -> Self {
        Self { rounder, format }
    }

    pub fn rounder(&self) -> &PriceRounder {
        &self.rounder
    }

    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    /// Round `amount` with the named strategy and format the result.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::UnknownStrategy` for unrecognized identifiers
    /// and `PricingError::AmountOutOfRange` if rounding up would overflow.
    pub fn quote(&self, amount: u64, strategy: &str) -> Result<RoundedPrice, PricingError> {
        let strategy: RoundingStrategy = strategy.parse()?;
        let rounded_amount = self.rounder.round(amount, strategy)?;

        Ok(RoundedPrice {
            rounded_amount,
            formatted: self.format.format(rounded_amount),
            strategy,
        })
    }
}

fn nearest_multiple(amount: u64, step: u64) -> Result<u64, PricingError> {
    let remainder = amount % step;
    let down = amount - remainder;

    if remainder < step - remainder {
        Ok(down)
    } else {
        down.checked_add(step)
            .ok_or(PricingError::AmountOutOfRange(amount))
    }
}

fn charm(amount: u64) -> u64 {
    if amount >= 99 {
        amount - (amount % 100 + 1) % 100
    } else if amount >= 9 {
        amount - (amount % 10 + 1) % 10
    } else {
        amount
    }
}
