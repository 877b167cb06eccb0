//! Runtime unit tags.
//!
//! Database records and model variables carry their units as text
//! (`"kWh/m^3"`, `"kg/s"`, `"dimensionless"`). Those tags are parsed once into a
//! [`UnitTag`]: an SI scale factor plus a [`Dimension`] (exponents of the base
//! dimensions). Typed `uom` quantities are used at API boundaries; unit tags are
//! used where the dimension is only known at runtime, e.g. when checking that
//! both sides of a model constraint reduce to the same dimension.
//!
//! Grammar: `term (('*' | '/') term)*` with `term = symbol ('^' integer)?`,
//! evaluated left to right (`a/b*c` is `(a/b)*c`).

use std::fmt;

use thiserror::Error;

/// Errors raised while parsing unit tags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit symbol '{symbol}' in '{tag}'")]
    UnknownSymbol { symbol: String, tag: String },

    #[error("Malformed unit tag '{tag}': {reason}")]
    Malformed { tag: String, reason: &'static str },
}

/// Exponents of the base dimensions used by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub temperature: i8,
    pub amount: i8,
}

impl Dimension {
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(1, 0, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(0, 1, 0, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0);
    pub const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 1);
    pub const VOLUME: Dimension = Dimension::new(0, 3, 0, 0, 0);
    pub const MASS_FLOW: Dimension = Dimension::new(1, 0, -1, 0, 0);
    pub const VOLUME_FLOW: Dimension = Dimension::new(0, 3, -1, 0, 0);
    pub const ENERGY: Dimension = Dimension::new(1, 2, -2, 0, 0);
    pub const POWER: Dimension = Dimension::new(1, 2, -3, 0, 0);
    pub const ENERGY_PER_VOLUME: Dimension = Dimension::new(1, -1, -2, 0, 0);

    pub const fn new(mass: i8, length: i8, time: i8, temperature: i8, amount: i8) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
            amount,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::NONE
    }

    /// Every exponent multiplied by `n`, or `None` if one leaves the `i8` range.
    pub fn checked_powi(self, n: i8) -> Option<Self> {
        Some(Self::new(
            self.mass.checked_mul(n)?,
            self.length.checked_mul(n)?,
            self.time.checked_mul(n)?,
            self.temperature.checked_mul(n)?,
            self.amount.checked_mul(n)?,
        ))
    }

    /// Dimension of a product, or `None` on exponent overflow.
    pub fn checked_mul(self, rhs: Dimension) -> Option<Self> {
        Some(Self::new(
            self.mass.checked_add(rhs.mass)?,
            self.length.checked_add(rhs.length)?,
            self.time.checked_add(rhs.time)?,
            self.temperature.checked_add(rhs.temperature)?,
            self.amount.checked_add(rhs.amount)?,
        ))
    }

    /// Dimension of a quotient, or `None` on exponent overflow.
    pub fn checked_div(self, rhs: Dimension) -> Option<Self> {
        Some(Self::new(
            self.mass.checked_sub(rhs.mass)?,
            self.length.checked_sub(rhs.length)?,
            self.time.checked_sub(rhs.time)?,
            self.temperature.checked_sub(rhs.temperature)?,
            self.amount.checked_sub(rhs.amount)?,
        ))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let mut first = true;
        for (sym, exp) in [
            ("M", self.mass),
            ("L", self.length),
            ("T", self.time),
            ("Θ", self.temperature),
            ("N", self.amount),
        ] {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{sym}")?;
            } else {
                write!(f, "{sym}^{exp}")?;
            }
        }
        Ok(())
    }
}

/// A parsed unit: display text, SI scale factor and dimension.
///
/// A value `v` expressed in this unit equals `v * factor` in SI base units.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTag {
    text: String,
    factor: f64,
    dim: Dimension,
}

impl UnitTag {
    /// Parse a unit tag such as `"kWh/m^3"` or `"dimensionless"`.
    pub fn parse(tag: &str) -> Result<Self, UnitError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed == "1" || trimmed.eq_ignore_ascii_case("dimensionless")
        {
            return Ok(Self::dimensionless());
        }

        let mut factor = 1.0;
        let mut dim = Dimension::NONE;
        let mut divide = false;
        let mut rest = trimmed;

        loop {
            let end = rest.find(['*', '/']).unwrap_or(rest.len());
            let term = rest[..end].trim();
            if term.is_empty() {
                return Err(UnitError::Malformed {
                    tag: tag.to_string(),
                    reason: "empty term",
                });
            }

            let (term_factor, term_dim) = parse_term(term, tag)?;
            let combined = if divide {
                factor /= term_factor;
                dim.checked_div(term_dim)
            } else {
                factor *= term_factor;
                dim.checked_mul(term_dim)
            };
            dim = combined.ok_or_else(|| out_of_range(tag))?;

            if end == rest.len() {
                break;
            }
            divide = rest.as_bytes()[end] == b'/';
            rest = &rest[end + 1..];
        }

        Ok(Self {
            text: trimmed.to_string(),
            factor,
            dim,
        })
    }

    pub fn dimensionless() -> Self {
        Self {
            text: "dimensionless".to_string(),
            factor: 1.0,
            dim: Dimension::NONE,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Multiplier converting a value in this unit to SI base units.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dim.is_dimensionless()
    }

    pub fn to_si(&self, value: f64) -> f64 {
        value * self.factor
    }

    pub fn from_si(&self, value_si: f64) -> f64 {
        value_si / self.factor
    }

    /// Convert `value` expressed in `self` into `target` units.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn convert_to(&self, value: f64, target: &UnitTag) -> Option<f64> {
        if self.dim != target.dim {
            return None;
        }
        if self.factor == target.factor {
            return Some(value);
        }
        Some(target.from_si(self.to_si(value)))
    }
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn parse_term(term: &str, tag: &str) -> Result<(f64, Dimension), UnitError> {
    let (symbol, exponent) = match term.split_once('^') {
        Some((sym, exp)) => {
            let exp: i8 = exp.trim().parse().map_err(|_| UnitError::Malformed {
                tag: tag.to_string(),
                reason: "exponent must be an integer",
            })?;
            (sym.trim(), exp)
        }
        None => (term, 1),
    };

    let (factor, dim) = lookup_symbol(symbol).ok_or_else(|| UnitError::UnknownSymbol {
        symbol: symbol.to_string(),
        tag: tag.to_string(),
    })?;

    let dim = dim.checked_powi(exponent).ok_or_else(|| out_of_range(tag))?;
    Ok((factor.powi(i32::from(exponent)), dim))
}

fn out_of_range(tag: &str) -> UnitError {
    UnitError::Malformed {
        tag: tag.to_string(),
        reason: "exponent out of range",
    }
}

/// Recognized unit symbols with their SI factor and dimension.
fn lookup_symbol(symbol: &str) -> Option<(f64, Dimension)> {
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 86_400.0;

    let entry = match symbol {
        "dimensionless" | "1" => (1.0, Dimension::NONE),
        "%" | "percent" => (0.01, Dimension::NONE),

        "kg" => (1.0, Dimension::MASS),
        "g" => (1e-3, Dimension::MASS),
        "mg" => (1e-6, Dimension::MASS),
        "ug" | "μg" => (1e-9, Dimension::MASS),
        "tonne" | "t" => (1e3, Dimension::MASS),

        "m" => (1.0, Dimension::LENGTH),
        "cm" => (1e-2, Dimension::LENGTH),
        "mm" => (1e-3, Dimension::LENGTH),
        "km" => (1e3, Dimension::LENGTH),

        "L" | "l" | "liter" => (1e-3, Dimension::VOLUME),
        "mL" | "ml" => (1e-6, Dimension::VOLUME),
        "Mgal" => (3_785.411_784, Dimension::VOLUME),
        "gal" => (3.785_411_784e-3, Dimension::VOLUME),

        "s" | "second" => (1.0, Dimension::TIME),
        "min" | "minute" => (60.0, Dimension::TIME),
        "h" | "hr" | "hour" => (HOUR, Dimension::TIME),
        "day" | "d" => (DAY, Dimension::TIME),
        "year" | "yr" => (365.0 * DAY, Dimension::TIME),

        "J" => (1.0, Dimension::ENERGY),
        "kJ" => (1e3, Dimension::ENERGY),
        "MJ" => (1e6, Dimension::ENERGY),
        "Wh" => (HOUR, Dimension::ENERGY),
        "kWh" => (1e3 * HOUR, Dimension::ENERGY),
        "MWh" => (1e6 * HOUR, Dimension::ENERGY),

        "W" => (1.0, Dimension::POWER),
        "kW" => (1e3, Dimension::POWER),
        "MW" => (1e6, Dimension::POWER),

        "K" => (1.0, Dimension::TEMPERATURE),
        "mol" => (1.0, Dimension::AMOUNT),
        "kmol" => (1e3, Dimension::AMOUNT),
        _ => return None,
    };
    Some(entry)
}
