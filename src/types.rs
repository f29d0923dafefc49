//! Core domain types shared by the pricing models and the solver.
//!
//! # Newtype Strategy
//!
//! Solver output is wrapped in [`Vol`] so an implied volatility cannot be
//! confused with a price at the call site. Pricing inputs stay bare `f64`;
//! their parameter names already say what they are.
//!
//! # Why no `Eq` or `Ord` on `Vol`?
//! `f64` does not implement `Eq` or `Ord` because `NaN` breaks total ordering.
//! We derive `PartialEq` and `PartialOrd` only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptCalcError;

/// Implied volatility `σ`, measured as annualized standard deviation.
///
/// # Examples
/// ```
/// use optcalc::Vol;
/// let vol = Vol(0.60);
/// assert_eq!(vol.0, 0.60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
///
/// Encoded externally as `"C"` and `"P"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    #[serde(rename = "C")]
    Call,
    /// Right to sell at strike price.
    #[serde(rename = "P")]
    Put,
}

impl OptionType {
    /// `+1` for calls, `-1` for puts.
    ///
    /// The only place the option type enters the pricing formulas.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// External single-letter code.
    pub fn code(self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OptionType {
    type Err = OptCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(OptionType::Call),
            "P" => Ok(OptionType::Put),
            other => Err(OptCalcError::InvalidInput {
                message: format!("option type must be \"C\" or \"P\", got {other:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_selects_branch() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }

    #[test]
    fn parses_external_codes() {
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("P".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(OptionType::Put.to_string(), "P");
    }

    #[test]
    fn rejects_unknown_code() {
        let r = "X".parse::<OptionType>();
        assert!(matches!(r, Err(OptCalcError::InvalidInput { .. })));
    }

    #[test]
    fn serde_uses_single_letter_codes() {
        let json = serde_json::to_string(&OptionType::Call).unwrap();
        assert_eq!(json, "\"C\"");
        let back: OptionType = serde_json::from_str("\"P\"").unwrap();
        assert_eq!(back, OptionType::Put);
    }
}
