//! # optcalc
//!
//! Option pricing for European options: Black-76 values and Greeks for
//! options on futures, Black-Scholes values for options on spot, and implied
//! volatility extraction from observed Black-76 prices.
//!
//! ## Architecture
//!
//! - **`normal`** — Standard normal CDF/PDF approximation shared by both models
//! - **`black76`** — [`Black76`] pricing engine: value, delta, gamma, vega, theta, rho
//! - **`implied`** — [`ImpliedVolatilitySolver`] inverting [`Black76`]
//! - **`black_scholes`** — [`BlackScholes`] spot-option values
//!
//! ## Design
//!
//! - **Permissive pricing, opt-in validation.** [`Black76::evaluate`] takes
//!   bare `f64`s and lets degenerate inputs (zero expiry, zero vol) propagate
//!   as NaN/∞. [`PricingInputs`] and [`Black76::evaluate_checked`] reject them
//!   up front instead.
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **Closed enums, stable encodings.** [`OptionType`] serializes as `"C"` /
//!   `"P"`, [`SolverMethod`] as `1` / `2`.
//! - **Thread-safe.** Engines and solvers are immutable `Copy` values and can
//!   be shared freely across pricing threads.
//!
//! ## Features
//!
//! - `logging` — emit `tracing` events from the solver
//! - `parallel` — solve quote chains on the rayon thread pool
//!
//! ```
//! use optcalc::{Black76, OptionType, SolverMethod};
//!
//! let engine = Black76::default();
//! let put = engine.evaluate(OptionType::Put, 10.5, 12.0, 0.082, 0.60);
//! let vol = engine.implied_volatility(
//!     OptionType::Put,
//!     10.5,
//!     12.0,
//!     0.082,
//!     put.value,
//!     SolverMethod::Bisection,
//! )?;
//! assert!((vol.0 - 0.60).abs() < 1e-12);
//! # Ok::<(), optcalc::OptCalcError>(())
//! ```

pub mod black76;
pub mod black_scholes;
pub mod conventions;
pub mod error;
pub mod implied;
pub mod normal;
pub mod types;
mod validate;

#[doc(inline)]
pub use black76::{Black76, ModelConfig, PricingInputs, PricingResult};
#[doc(inline)]
pub use black_scholes::BlackScholes;
#[doc(inline)]
pub use error::{OptCalcError, Result};
#[doc(inline)]
pub use implied::{ImpliedVolatilitySolver, OptionQuote, SolverMethod};
#[doc(inline)]
pub use types::{OptionType, Vol};
