//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents). Multiplication by a quantity goes
//! through `Decimal` so weighed goods (1.5 kg) price exactly before the
//! single rounding step back to minor units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    ILS,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "ILS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ILS => "ILS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ILS => "\u{20aa}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "ILS" => Some(Currency::ILS),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Create a value from whole major units (e.g., 12 shekels).
    ///
    /// Saturates at the representable range; use [`Money::try_from_units`]
    /// for amounts read from outside.
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a value from whole major units, or `None` if it does not fit.
    pub fn try_from_units(units: i64, currency: Currency) -> Option<Self> {
        units
            .checked_mul(currency.minor_per_major())
            .map(|cents| Self::new(cents, currency))
    }

    /// Create a value from a decimal amount in major units.
    ///
    /// Rounds half away from zero to the currency's precision. Returns `None`
    /// when the amount does not fit.
    ///
    /// ```
    /// use grocer_commerce::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_decimal(Decimal::new(4999, 2), Currency::ILS).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Option<Self> {
        let minor = amount.checked_mul(Decimal::from(currency.minor_per_major()))?;
        let minor = minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        minor.to_i64().map(|cents| Self::new(cents, currency))
    }

    /// Convert to an exact decimal amount in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount_cents, self.currency.decimal_places())
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Round down to whole major units.
    pub fn floor_units(&self) -> Self {
        let per = self.currency.minor_per_major();
        Self::new(self.amount_cents.div_euclid(per) * per, self.currency)
    }

    /// Round up to whole major units.
    pub fn ceil_units(&self) -> Self {
        let per = self.currency.minor_per_major();
        let floored = self.amount_cents.div_euclid(per) * per;
        if floored == self.amount_cents {
            *self
        } else {
            Self::new(floored.saturating_add(per), self.currency)
        }
    }

    /// Format as a display string (e.g., "₪49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a (possibly fractional) quantity.
    ///
    /// The product is computed exactly and rounded once, half away from zero.
    pub fn try_multiply(&self, quantity: Decimal) -> Option<Money> {
        Money::from_decimal(self.to_decimal().checked_mul(quantity)?, self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: Decimal) -> Option<Money> {
        self.try_multiply(percent / Decimal::ONE_HUNDRED)
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl PartialOrd for Money {
    /// Amounts only compare within one currency.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount_cents.cmp(&other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
