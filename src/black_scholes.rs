//! Black-Scholes values for European options on a spot underlying.
//!
//! The closed-form sibling of [`Black76`](crate::Black76): same normal
//! approximation, but the rate enters `d1` as carry and only the strike is
//! discounted.
//!
//! ```text
//! d1 = (ln(S/X) + (r + σ²/2)·T) / (σ√T)
//! C  = S·N(d1) − X·e^(−rT)·N(d2)
//! P  = X·e^(−rT)·N(−d2) − S·N(−d1)
//! ```

use serde::{Deserialize, Serialize};

use crate::conventions::{discount_factor, log_moneyness};
use crate::normal;
use crate::types::OptionType;

/// Decimal places values are rounded to.
const VALUE_DECIMALS: i32 = 8;

/// A European option on a spot underlying, priced with Black-Scholes.
///
/// # Examples
/// ```
/// use optcalc::BlackScholes;
///
/// let option = BlackScholes::new(60.0, 65.0, 0.25, 8.0, 30.0);
/// assert_eq!(option.value_put(), 8.79679341);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholes {
    underlying_price: f64,
    strike_price: f64,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl BlackScholes {
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            underlying_price,
            strike_price,
            time_to_maturity,
            risk_free_rate,
            volatility,
        }
    }

    /// Call value, rounded to 8 decimal places.
    pub fn value_call(&self) -> f64 {
        let (d1, d2) = self.d1_d2();
        let call = self.underlying_price * normal::cdf(d1)
            - self.discounted_strike() * normal::cdf(d2);
        round_to(call, VALUE_DECIMALS)
    }

    /// Put value, rounded to 8 decimal places.
    pub fn value_put(&self) -> f64 {
        let (d1, d2) = self.d1_d2();
        let put = self.discounted_strike() * normal::cdf(-d2)
            - self.underlying_price * normal::cdf(-d1);
        round_to(put, VALUE_DECIMALS)
    }

    /// Value of the given option type, rounded to 8 decimal places.
    pub fn value(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.value_call(),
            OptionType::Put => self.value_put(),
        }
    }

    fn discounted_strike(&self) -> f64 {
        self.strike_price * discount_factor(self.risk_free_rate, self.time_to_maturity)
    }

    fn d1_d2(&self) -> (f64, f64) {
        let vol_sqrt_t = self.volatility * self.time_to_maturity.powf(0.5);
        let d1 = (log_moneyness(self.underlying_price, self.strike_price)
            + (self.risk_free_rate + self.volatility.powf(2.0) / 2.0) * self.time_to_maturity)
            / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
