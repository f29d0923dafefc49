//! Black-76 pricing engine for European options on futures.
//!
//! Value and Greeks are computed in closed form and discounted at the
//! engine's annual risk-free rate:
//!
//! ```text
//! d1 = (ln(F/X) + σ²T/2) / (σ√T)
//! d2 = d1 − σ√T
//! V  = s·e^(−rT)·(F·N(s·d1) − X·N(s·d2))      s = +1 call, −1 put
//! ```
//!
//! Vega and rho are scaled to a one percentage point move (×0.01).
//!
//! # References
//! - Black, F. "The pricing of commodity contracts" (1976)

use serde::{Deserialize, Serialize};

use crate::conventions::{discount_factor, log_moneyness};
use crate::error::{self, OptCalcError};
use crate::implied::{ImpliedVolatilitySolver, SolverMethod};
use crate::normal;
use crate::types::{OptionType, Vol};
use crate::validate::{validate_finite, validate_positive};

/// Default annual risk-free rate (1%).
pub const DEFAULT_INTEREST_RATE: f64 = 0.01;

/// Engine configuration: the annual risk-free rate used for discounting.
///
/// Missing fields take their defaults on deserialization.
///
/// # Examples
/// ```
/// use optcalc::ModelConfig;
///
/// let config: ModelConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.interest_rate, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Annual continuously compounded risk-free rate.
    pub interest_rate: f64,
}

impl ModelConfig {
    /// Create a config with the given rate.
    ///
    /// # Errors
    /// Returns [`OptCalcError::InvalidInput`] if the rate is NaN or infinite.
    pub fn new(interest_rate: f64) -> error::Result<Self> {
        validate_finite(interest_rate, "interest_rate")?;
        Ok(Self { interest_rate })
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interest_rate: DEFAULT_INTEREST_RATE,
        }
    }
}

/// Validated model inputs for a single evaluation.
///
/// [`Black76::evaluate`] takes bare `f64`s and accepts anything. Building a
/// `PricingInputs` first is the opt-in path that rejects non-positive or
/// non-finite values before any arithmetic happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricingInputsRaw", into = "PricingInputsRaw")]
pub struct PricingInputs {
    underlying_price: f64,
    strike_price: f64,
    time_to_maturity: f64,
    volatility: f64,
}

#[derive(Serialize, Deserialize)]
struct PricingInputsRaw {
    underlying_price: f64,
    strike_price: f64,
    time_to_maturity: f64,
    volatility: f64,
}

impl TryFrom<PricingInputsRaw> for PricingInputs {
    type Error = OptCalcError;
    fn try_from(raw: PricingInputsRaw) -> Result<Self, Self::Error> {
        Self::new(
            raw.underlying_price,
            raw.strike_price,
            raw.time_to_maturity,
            raw.volatility,
        )
    }
}

impl From<PricingInputs> for PricingInputsRaw {
    fn from(p: PricingInputs) -> Self {
        Self {
            underlying_price: p.underlying_price,
            strike_price: p.strike_price,
            time_to_maturity: p.time_to_maturity,
            volatility: p.volatility,
        }
    }
}

impl PricingInputs {
    /// Create validated inputs.
    ///
    /// # Errors
    /// Returns [`OptCalcError::InvalidInput`] if any value is zero, negative,
    /// NaN or infinite.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        volatility: f64,
    ) -> error::Result<Self> {
        Ok(Self {
            underlying_price: validate_positive(underlying_price, "underlying_price")?,
            strike_price: validate_positive(strike_price, "strike_price")?,
            time_to_maturity: validate_positive(time_to_maturity, "time_to_maturity")?,
            volatility: validate_positive(volatility, "volatility")?,
        })
    }

    /// Futures price `F`.
    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    /// Strike price `X`.
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Time to expiry `T` in years.
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Annualized volatility `σ`.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

/// Option value and its five Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Discounted fair value.
    pub value: f64,
    /// dV/dF.
    pub delta: f64,
    /// d²V/dF².
    pub gamma: f64,
    /// dV/dσ per 1 percentage point of volatility.
    pub vega: f64,
    /// dV/dt per year.
    pub theta: f64,
    /// dV/dr per 1 percentage point of rate.
    pub rho: f64,
}

/// Black-76 pricing engine bound to a fixed annual risk-free rate.
///
/// Stateless apart from its [`ModelConfig`], so one engine can be shared
/// across threads and reused for any inputs.
///
/// # Examples
/// ```
/// use optcalc::{Black76, OptionType};
///
/// let engine = Black76::default();
/// let call = engine.evaluate(OptionType::Call, 10.5, 12.0, 0.082, 0.60);
/// assert!((call.value - 0.2405826183655344).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Black76 {
    config: ModelConfig,
}

impl Black76 {
    /// Create an engine discounting at `interest_rate`.
    pub fn new(interest_rate: f64) -> Self {
        Self {
            config: ModelConfig { interest_rate },
        }
    }

    /// Create an engine from a prepared configuration.
    pub fn with_config(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Annual risk-free rate used for discounting.
    pub fn interest_rate(&self) -> f64 {
        self.config.interest_rate
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Option value and Greeks.
    ///
    /// Inputs are not validated: `time_to_maturity = 0` or `volatility = 0`
    /// yield non-finite results. Use [`evaluate_checked`](Self::evaluate_checked)
    /// to reject such inputs up front.
    pub fn evaluate(
        &self,
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        volatility: f64,
    ) -> PricingResult {
        let rate = self.config.interest_rate;
        let df = discount_factor(rate, time_to_maturity);
        let (d1, d2) = d1_d2(underlying_price, strike_price, time_to_maturity, volatility);
        let sign = option_type.sign();

        let nd1 = normal::cdf(d1 * sign);
        let nd2 = normal::cdf(d2 * sign);
        let pdf_d1 = normal::pdf(d1);
        let sqrt_t = time_to_maturity.sqrt();

        let undiscounted = underlying_price * nd1 - strike_price * nd2;
        let value = sign * df * undiscounted;

        let delta = sign * df * nd1;
        let gamma = df * pdf_d1 / (volatility * underlying_price * sqrt_t);
        let vega = 0.01 * underlying_price * df * pdf_d1 * sqrt_t;
        let theta = (-underlying_price * df * pdf_d1 * volatility / (2.0 * sqrt_t))
            + sign * rate * df * undiscounted;
        let rho = -0.01 * time_to_maturity * value;

        PricingResult {
            value,
            delta,
            gamma,
            vega,
            theta,
            rho,
        }
    }

    /// [`evaluate`](Self::evaluate) over pre-validated inputs.
    pub fn evaluate_inputs(&self, option_type: OptionType, inputs: &PricingInputs) -> PricingResult {
        self.evaluate(
            option_type,
            inputs.underlying_price,
            inputs.strike_price,
            inputs.time_to_maturity,
            inputs.volatility,
        )
    }

    /// Validate the inputs, then [`evaluate`](Self::evaluate).
    ///
    /// # Errors
    /// Returns [`OptCalcError::InvalidInput`] if any input is zero, negative,
    /// NaN or infinite.
    pub fn evaluate_checked(
        &self,
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        volatility: f64,
    ) -> error::Result<PricingResult> {
        let inputs = PricingInputs::new(
            underlying_price,
            strike_price,
            time_to_maturity,
            volatility,
        )?;
        Ok(self.evaluate_inputs(option_type, &inputs))
    }

    /// Implied volatility of `market_price` under this engine.
    ///
    /// Shorthand for building an [`ImpliedVolatilitySolver`] over `self`.
    ///
    /// # Errors
    /// See [`ImpliedVolatilitySolver::solve`].
    pub fn implied_volatility(
        &self,
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        market_price: f64,
        method: SolverMethod,
    ) -> error::Result<Vol> {
        ImpliedVolatilitySolver::new(*self).solve(
            option_type,
            underlying_price,
            strike_price,
            time_to_maturity,
            market_price,
            method,
        )
    }
}

/// The Black-76 `d1` and `d2` terms.
fn d1_d2(
    underlying_price: f64,
    strike_price: f64,
    time_to_maturity: f64,
    volatility: f64,
) -> (f64, f64) {
    let d1 = (log_moneyness(underlying_price, strike_price)
        + (volatility.powf(2.0) / 2.0) * time_to_maturity)
        / (volatility * time_to_maturity.sqrt());
    let d2 = d1 - volatility * time_to_maturity.sqrt();
    (d1, d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const F: f64 = 10.5;
    const X: f64 = 12.0;
    const T: f64 = 0.082;
    const SIGMA: f64 = 0.60;

    #[test]
    fn call_value_and_greeks() {
        let r = Black76::default().evaluate(OptionType::Call, F, X, T, SIGMA);
        assert_abs_diff_eq!(r.value, 0.2405826183655344, epsilon = 1e-15);
        assert_abs_diff_eq!(r.delta, 0.24449431791580983, epsilon = 1e-15);
        assert_abs_diff_eq!(r.gamma, 0.17399585222314845, epsilon = 1e-15);
        assert_abs_diff_eq!(r.vega, 0.009438057012140243, epsilon = 1e-16);
        assert_abs_diff_eq!(r.theta, -3.450541861184725, epsilon = 1e-14);
        assert_abs_diff_eq!(r.rho, -0.00019727774705973822, epsilon = 1e-17);
    }

    #[test]
    fn put_value_and_greeks() {
        let r = Black76::default().evaluate(OptionType::Put, F, X, T, SIGMA);
        assert_abs_diff_eq!(r.value, 1.7393531225277215, epsilon = 1e-14);
        assert_abs_diff_eq!(r.delta, -0.7546860181923143, epsilon = 1e-15);
        assert_abs_diff_eq!(r.gamma, 0.17399585222314845, epsilon = 1e-15);
        assert_abs_diff_eq!(r.vega, 0.009438057012140243, epsilon = 1e-16);
        assert_abs_diff_eq!(r.theta, -3.435554156143103, epsilon = 1e-14);
        assert_abs_diff_eq!(r.rho, -0.0014262695604727318, epsilon = 1e-16);
    }

    #[test]
    fn gamma_and_vega_do_not_depend_on_type() {
        let engine = Black76::new(0.03);
        let call = engine.evaluate(OptionType::Call, 95.0, 100.0, 0.75, 0.25);
        let put = engine.evaluate(OptionType::Put, 95.0, 100.0, 0.75, 0.25);
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
    }

    #[test]
    fn put_call_parity() {
        let engine = Black76::new(0.05);
        let (f, x, t) = (100.0, 90.0, 0.5);
        let call = engine.evaluate(OptionType::Call, f, x, t, 0.3);
        let put = engine.evaluate(OptionType::Put, f, x, t, 0.3);
        let df = (-0.05_f64 * t).exp();
        assert_abs_diff_eq!(call.value - put.value, df * (f - x), epsilon = 1e-10);
    }

    #[test]
    fn rho_is_scaled_value() {
        let r = Black76::default().evaluate(OptionType::Call, 100.0, 100.0, 2.0, 0.2);
        assert_eq!(r.rho, -0.01 * 2.0 * r.value);
    }

    #[test]
    fn default_rate_is_one_percent() {
        assert_eq!(Black76::default().interest_rate(), 0.01);
        assert_eq!(Black76::new(0.04).config().interest_rate, 0.04);
    }

    #[test]
    fn zero_expiry_propagates_non_finite() {
        let r = Black76::default().evaluate(OptionType::Call, 100.0, 100.0, 0.0, 0.2);
        assert!(!r.gamma.is_finite());
    }

    #[test]
    fn zero_volatility_propagates_non_finite() {
        let r = Black76::default().evaluate(OptionType::Call, 100.0, 100.0, 1.0, 0.0);
        assert!(!r.gamma.is_finite());
    }

    #[test]
    fn checked_rejects_zero_expiry() {
        let r = Black76::default().evaluate_checked(OptionType::Call, 100.0, 100.0, 0.0, 0.2);
        assert!(matches!(r, Err(OptCalcError::InvalidInput { .. })));
    }

    #[test]
    fn checked_matches_unchecked() {
        let engine = Black76::default();
        let checked = engine
            .evaluate_checked(OptionType::Put, F, X, T, SIGMA)
            .unwrap();
        assert_eq!(checked, engine.evaluate(OptionType::Put, F, X, T, SIGMA));
    }

    #[test]
    fn inputs_reject_nan_strike() {
        let r = PricingInputs::new(100.0, f64::NAN, 1.0, 0.2);
        assert!(matches!(r, Err(OptCalcError::InvalidInput { .. })));
    }

    #[test]
    fn config_rejects_infinite_rate() {
        assert!(ModelConfig::new(f64::INFINITY).is_err());
        assert_eq!(ModelConfig::new(-0.01).unwrap().interest_rate, -0.01);
    }
}
