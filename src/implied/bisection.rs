//! Bracketed implied volatility search.
//!
//! Published as [`SolverMethod::Bisection`](super::SolverMethod::Bisection),
//! but the bracket is not halved: each pass places the next guess by linear
//! interpolation between the prices at the two bounds (regula falsi).
//!
//! The bracket bounds, tolerance and iteration cap are fixed constants.

use crate::error::{self, OptCalcError};

/// Lower volatility bound of the search.
pub const VOL_MIN: f64 = 0.00001;
/// Upper volatility bound of the search.
pub const VOL_MAX: f64 = 5.0;
/// Width below which the volatility bracket counts as closed.
pub const EPSILON: f64 = 0.0001;
/// Iteration cap. The counter is pre-incremented, so at most
/// `MAX_ITERATIONS - 1` passes run.
pub const MAX_ITERATIONS: usize = 100;

/// Volatility bounds with the option prices last computed at them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VolatilityBracket {
    pub low: f64,
    pub high: f64,
    pub value_at_low: f64,
    pub value_at_high: f64,
}

impl VolatilityBracket {
    fn new<P: Fn(f64) -> f64>(low: f64, high: f64, price: &P) -> Self {
        Self {
            low,
            high,
            value_at_low: price(low),
            value_at_high: price(high),
        }
    }

    /// Price both bounds again, even when only one of them moved.
    fn reprice<P: Fn(f64) -> f64>(&mut self, price: &P) {
        self.value_at_low = price(self.low);
        self.value_at_high = price(self.high);
    }

    /// Keep searching while the bounds are wide apart OR still price differently.
    fn is_open(&self) -> bool {
        self.high - self.low > EPSILON || self.value_at_low != self.value_at_high
    }

    fn is_flat(&self) -> bool {
        self.value_at_low == self.value_at_high
    }

    fn excludes(&self, market_price: f64) -> bool {
        market_price < self.value_at_low || market_price > self.value_at_high
    }

    /// Volatility at which the chord between the bound prices hits `market_price`.
    fn interpolate(&self, market_price: f64) -> f64 {
        self.low
            + (market_price - self.value_at_low) * (self.high - self.low)
                / (self.value_at_high - self.value_at_low)
    }

    fn narrow(&mut self, vol_guess: f64, value_guess: f64, market_price: f64) {
        if value_guess < market_price {
            self.low = vol_guess;
        } else {
            self.high = vol_guess;
        }
    }
}

/// Result of a completed search.
#[cfg_attr(not(feature = "logging"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchOutcome {
    /// Last volatility guess.
    pub vol: f64,
    /// Number of interpolation passes run.
    pub passes: usize,
    /// `false` when the iteration cap ended the search.
    pub converged: bool,
}

/// Find the volatility at which `price` reaches `market_price`.
///
/// `price` maps a volatility to an option value and must be increasing in
/// volatility over `[VOL_MIN, VOL_MAX]`.
///
/// # Errors
/// Returns [`OptCalcError::OutOfRange`] if `market_price` lies strictly below
/// the price at [`VOL_MIN`] or strictly above the price at [`VOL_MAX`].
pub(crate) fn search<P>(market_price: f64, price: P) -> error::Result<SearchOutcome>
where
    P: Fn(f64) -> f64,
{
    let mut bracket = VolatilityBracket::new(VOL_MIN, VOL_MAX, &price);
    if bracket.excludes(market_price) {
        #[cfg(feature = "logging")]
        tracing::debug!(
            market_price,
            value_at_min = bracket.value_at_low,
            value_at_max = bracket.value_at_high,
            "market price outside volatility bracket"
        );
        return Err(OptCalcError::OutOfRange {
            vol_min: VOL_MIN,
            vol_max: VOL_MAX,
        });
    }

    let mut vol_guess = bracket.low;
    let mut passes = 0;
    let mut converged = false;

    for _ in 1..MAX_ITERATIONS {
        if !bracket.is_open() {
            converged = true;
            break;
        }

        bracket.reprice(&price);
        if bracket.is_flat() {
            // Both bounds price the same: the chord has no slope to follow.
            #[cfg(feature = "logging")]
            tracing::debug!(low = bracket.low, high = bracket.high, "volatility bracket collapsed");
            vol_guess = bracket.low;
            converged = true;
            break;
        }

        vol_guess = bracket.interpolate(market_price);
        let value_guess = price(vol_guess);
        bracket.narrow(vol_guess, value_guess, market_price);
        passes += 1;
    }

    if !converged && !bracket.is_open() {
        converged = true;
    }

    #[cfg(feature = "logging")]
    if !converged {
        tracing::warn!(
            passes,
            vol = vol_guess,
            width = bracket.high - bracket.low,
            "implied volatility search hit the iteration cap"
        );
    }

    Ok(SearchOutcome {
        vol: vol_guess,
        passes,
        converged,
    })
}
