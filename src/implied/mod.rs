//! Implied volatility extraction from Black-76 option prices.
//!
//! [`ImpliedVolatilitySolver`] inverts [`Black76::evaluate`] for a single
//! market price, or for a chain of [`OptionQuote`]s at once.
//!
//! ## Methods
//!
//! - [`SolverMethod::Bisection`] — bracketed interpolation search over
//!   `[VOL_MIN, VOL_MAX]` (see [`bisection`])
//! - [`SolverMethod::NewtonRaphson`] — recognized, not implemented; always
//!   fails with [`OptCalcError::NotImplemented`]

pub mod bisection;

pub use bisection::{EPSILON, MAX_ITERATIONS, VOL_MAX, VOL_MIN};

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::black76::Black76;
use crate::error::{self, OptCalcError};
use crate::types::{OptionType, Vol};

/// Root-finding method for implied volatility.
///
/// Encoded externally as integers: `1` for bisection, `2` for Newton-Raphson.
///
/// # Examples
/// ```
/// use optcalc::{OptCalcError, SolverMethod};
///
/// assert_eq!(SolverMethod::try_from(1), Ok(SolverMethod::Bisection));
/// assert_eq!(
///     SolverMethod::try_from(99),
///     Err(OptCalcError::UnsupportedMethod { method: 99 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SolverMethod {
    /// Bracketed interpolation search. Default.
    #[default]
    Bisection,
    /// Newton-Raphson iteration. Not implemented.
    NewtonRaphson,
}

impl SolverMethod {
    /// External integer code.
    pub fn code(self) -> i64 {
        match self {
            SolverMethod::Bisection => 1,
            SolverMethod::NewtonRaphson => 2,
        }
    }
}

impl From<SolverMethod> for i64 {
    fn from(method: SolverMethod) -> Self {
        method.code()
    }
}

impl TryFrom<i64> for SolverMethod {
    type Error = OptCalcError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SolverMethod::Bisection),
            2 => Ok(SolverMethod::NewtonRaphson),
            method => Err(OptCalcError::UnsupportedMethod { method }),
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMethod::Bisection => f.write_str("bisection"),
            SolverMethod::NewtonRaphson => f.write_str("Newton-Raphson"),
        }
    }
}

/// One observed option price to invert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub option_type: OptionType,
    /// Futures price `F`.
    pub underlying_price: f64,
    /// Strike price `X`.
    pub strike_price: f64,
    /// Time to expiry `T` in years.
    pub time_to_maturity: f64,
    /// Observed option price.
    pub market_price: f64,
}

/// Recovers the volatility that reproduces a market price under [`Black76`].
///
/// Holds its own copy of the engine, so the discount rate used for the
/// inversion is the one the engine was built with.
///
/// # Examples
///
/// ```
/// use optcalc::{Black76, ImpliedVolatilitySolver, OptionType, SolverMethod};
///
/// let solver = ImpliedVolatilitySolver::new(Black76::default());
/// let vol = solver.solve(
///     OptionType::Call,
///     10.5,
///     12.0,
///     0.082,
///     0.2405826183655344,
///     SolverMethod::Bisection,
/// )?;
/// assert!((vol.0 - 0.60).abs() < 1e-12);
/// # Ok::<(), optcalc::OptCalcError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpliedVolatilitySolver {
    engine: Black76,
}

impl ImpliedVolatilitySolver {
    /// Create a solver inverting `engine`.
    pub fn new(engine: Black76) -> Self {
        Self { engine }
    }

    /// The pricing engine being inverted.
    pub fn engine(&self) -> &Black76 {
        &self.engine
    }

    /// Implied volatility of `market_price`.
    ///
    /// When the iteration cap is reached before the bracket closes, the last
    /// guess is returned rather than an error.
    ///
    /// # Errors
    /// - [`OptCalcError::NotImplemented`] for [`SolverMethod::NewtonRaphson`],
    ///   regardless of the other inputs.
    /// - [`OptCalcError::OutOfRange`] if `market_price` is strictly below the
    ///   value at [`VOL_MIN`] or strictly above the value at [`VOL_MAX`].
    pub fn solve(
        &self,
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        market_price: f64,
        method: SolverMethod,
    ) -> error::Result<Vol> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            %option_type,
            underlying_price,
            strike_price,
            time_to_maturity,
            market_price,
            %method,
            "implied volatility solve started"
        );

        match method {
            SolverMethod::Bisection => {
                let outcome = bisection::search(market_price, |vol| {
                    self.engine
                        .evaluate(option_type, underlying_price, strike_price, time_to_maturity, vol)
                        .value
                })?;

                #[cfg(feature = "logging")]
                tracing::debug!(
                    vol = outcome.vol,
                    passes = outcome.passes,
                    converged = outcome.converged,
                    "implied volatility solve complete"
                );

                Ok(Vol(outcome.vol))
            }
            SolverMethod::NewtonRaphson => Err(OptCalcError::NotImplemented { method }),
        }
    }

    /// [`solve`](Self::solve) with the method given by its integer code.
    ///
    /// # Errors
    /// [`OptCalcError::UnsupportedMethod`] for codes other than `1` and `2`,
    /// then everything [`solve`](Self::solve) reports.
    pub fn solve_with_code(
        &self,
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        market_price: f64,
        method: i64,
    ) -> error::Result<Vol> {
        let method = SolverMethod::try_from(method)?;
        self.solve(
            option_type,
            underlying_price,
            strike_price,
            time_to_maturity,
            market_price,
            method,
        )
    }

    /// Implied volatility of every quote in `quotes`, in order.
    ///
    /// Each quote is solved independently; one failing quote does not affect
    /// the others. With the `parallel` feature the quotes are spread across
    /// the rayon thread pool.
    pub fn solve_quotes(&self, quotes: &[OptionQuote], method: SolverMethod) -> Vec<error::Result<Vol>> {
        #[cfg(feature = "logging")]
        tracing::debug!(n_quotes = quotes.len(), %method, "batch solve started");

        let solve_quote = |q: &OptionQuote| {
            self.solve(
                q.option_type,
                q.underlying_price,
                q.strike_price,
                q.time_to_maturity,
                q.market_price,
                method,
            )
        };

        #[cfg(feature = "parallel")]
        let vols: Vec<error::Result<Vol>> = quotes.par_iter().map(solve_quote).collect();
        #[cfg(not(feature = "parallel"))]
        let vols: Vec<error::Result<Vol>> = quotes.iter().map(solve_quote).collect();

        vols
    }
}
