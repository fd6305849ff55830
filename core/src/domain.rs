//! Domain tags for decision variables.
//!
//! A domain is the type-level marker attached to a variable. It restricts the
//! values the variable may take and is what cone constructors inspect when
//! they require a non-negative variable. Explicit bounds on a variable narrow
//! the domain but never change its tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The set of values a variable ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Domain {
    /// All real numbers.
    #[default]
    Reals,
    /// Reals greater than or equal to zero.
    NonNegativeReals,
    /// Reals less than or equal to zero.
    NonPositiveReals,
    /// Reals strictly greater than zero.
    PositiveReals,
    /// Reals strictly less than zero.
    NegativeReals,
    /// All integers.
    Integers,
    /// Integers greater than or equal to zero.
    NonNegativeIntegers,
    /// The set {0, 1}.
    Binary,
}

impl Domain {
    /// Returns the canonical name of this domain.
    pub fn name(&self) -> &'static str {
        match self {
            Domain::Reals => "Reals",
            Domain::NonNegativeReals => "NonNegativeReals",
            Domain::NonPositiveReals => "NonPositiveReals",
            Domain::PositiveReals => "PositiveReals",
            Domain::NegativeReals => "NegativeReals",
            Domain::Integers => "Integers",
            Domain::NonNegativeIntegers => "NonNegativeIntegers",
            Domain::Binary => "Binary",
        }
    }

    /// Returns true if every member of this domain is >= 0.
    ///
    /// This is the non-negativity tag checked by the cone constructors.
    pub fn is_non_negative(&self) -> bool {
        matches!(
            self,
            Domain::NonNegativeReals
                | Domain::PositiveReals
                | Domain::NonNegativeIntegers
                | Domain::Binary
        )
    }

    /// Returns true if every member of this domain is <= 0.
    pub fn is_non_positive(&self) -> bool {
        matches!(self, Domain::NonPositiveReals | Domain::NegativeReals)
    }

    /// Returns true if this domain only admits integral values.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Domain::Integers | Domain::NonNegativeIntegers | Domain::Binary
        )
    }

    /// Returns true if this domain only admits continuous values.
    pub fn is_continuous(&self) -> bool {
        !self.is_integer()
    }

    /// Closed bounds implied by the domain. `None` means unbounded.
    ///
    /// Strict domains report their closure: `PositiveReals` reports a lower
    /// bound of 0 even though 0 itself is excluded.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Domain::Reals | Domain::Integers => (None, None),
            Domain::NonNegativeReals | Domain::PositiveReals | Domain::NonNegativeIntegers => {
                (Some(0.0), None)
            }
            Domain::NonPositiveReals | Domain::NegativeReals => (None, Some(0.0)),
            Domain::Binary => (Some(0.0), Some(1.0)),
        }
    }

    /// Check whether a value belongs to this domain.
    ///
    /// Non-finite values never belong to any domain.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let integral = value.fract() == 0.0;
        match self {
            Domain::Reals => true,
            Domain::NonNegativeReals => value >= 0.0,
            Domain::NonPositiveReals => value <= 0.0,
            Domain::PositiveReals => value > 0.0,
            Domain::NegativeReals => value < 0.0,
            Domain::Integers => integral,
            Domain::NonNegativeIntegers => integral && value >= 0.0,
            Domain::Binary => value == 0.0 || value == 1.0,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
