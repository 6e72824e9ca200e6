//! Money amounts and price rendering.
//!
//! Amounts are held in integer cents so family multipliers and totals never
//! accumulate floating-point noise. Persisted data and DOM attributes carry
//! dollars, so conversion happens only at those two edges.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use num_traits::cast::cast;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel persisted in place of a number for contact-priced items.
pub const CONTACT_SENTINEL: &str = "contact";

/// Text rendered wherever a single contact-priced item is shown.
pub const CONTACT_LABEL: &str = "Contact us";

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Self = Self(0);

    /// Convert a dollar amount to cents, rounding to the nearest cent.
    /// Non-finite input yields zero.
    #[must_use]
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() {
            return Self::ZERO;
        }
        let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
        let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
        let scaled = (dollars * 100.0).clamp(min, max).round();
        Self(cast::<f64, i64>(scaled).unwrap_or(0))
    }

    #[must_use]
    pub fn from_whole_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    #[must_use]
    pub fn as_dollars(self) -> f64 {
        cast::<i64, f64>(self.0).unwrap_or(0.0) / 100.0
    }

    #[must_use]
    pub const fn is_whole(self) -> bool {
        self.0 % 100 == 0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by `factor` and apply a percentage discount, rounding half up.
    #[must_use]
    pub fn scaled_with_discount(self, factor: u32, discount_pct: u32) -> Self {
        let keep = 100_i64 - i64::from(discount_pct.min(100));
        let raw = self
            .0
            .saturating_mul(i64::from(factor))
            .saturating_mul(keep);
        let rounded = if raw >= 0 {
            (raw + 50) / 100
        } else {
            (raw - 50) / 100
        };
        Self(rounded)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// How numeric prices are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// Whole amounts without decimals, anything else with exactly two.
    #[default]
    Rounded,
    /// Shortest decimal form, the way plain number interpolation prints it.
    Raw,
}

impl PriceFormat {
    /// Render cents as a dollar string without the currency symbol.
    #[must_use]
    pub fn render(self, amount: Cents) -> String {
        let sign = if amount.0 < 0 { "-" } else { "" };
        let abs = amount.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        if frac == 0 {
            return format!("{sign}{whole}");
        }
        match self {
            Self::Rounded => format!("{sign}{whole}.{frac:02}"),
            Self::Raw if frac % 10 == 0 => format!("{sign}{whole}.{}", frac / 10),
            Self::Raw => format!("{sign}{whole}.{frac:02}"),
        }
    }
}

/// A catalog or selection price: a concrete amount or "contact us".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Amount(Cents),
    Contact,
}

impl Default for Price {
    fn default() -> Self {
        Self::Amount(Cents::ZERO)
    }
}

impl Price {
    #[must_use]
    pub fn dollars(dollars: f64) -> Self {
        Self::Amount(Cents::from_dollars(dollars))
    }

    #[must_use]
    pub const fn is_contact(self) -> bool {
        matches!(self, Self::Contact)
    }

    #[must_use]
    pub const fn amount(self) -> Option<Cents> {
        match self {
            Self::Amount(c) => Some(c),
            Self::Contact => None,
        }
    }

    /// Coerce a loosely typed JSON value into a price.
    ///
    /// Numbers are dollars, numeric strings are parsed, the contact sentinel
    /// maps to [`Price::Contact`] and everything else coerces to zero.
    #[must_use]
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or_else(Self::default, Self::dollars),
            Value::String(s) => Self::parse_text(s, true),
            _ => Self::default(),
        }
    }

    /// Parse a DOM attribute or stored string. Empty and non-numeric text is
    /// zero; the contact sentinel is only honoured when `allow_contact` is set.
    #[must_use]
    pub fn parse_text(text: &str, allow_contact: bool) -> Self {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(CONTACT_SENTINEL) {
            return if allow_contact {
                Self::Contact
            } else {
                Self::default()
            };
        }
        trimmed
            .parse::<f64>()
            .map_or_else(|_| Self::default(), Self::dollars)
    }

    /// Render with a leading `$`, or the contact label.
    #[must_use]
    pub fn display(self, format: PriceFormat) -> String {
        match self {
            Self::Amount(c) => format!("${}", format.render(c)),
            Self::Contact => CONTACT_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(PriceFormat::Rounded))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Contact => serializer.serialize_str(CONTACT_SENTINEL),
            Self::Amount(c) if c.is_whole() => serializer.serialize_i64(c.0 / 100),
            Self::Amount(c) => serializer.serialize_f64(c.as_dollars()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::coerce(&value))
    }
}
