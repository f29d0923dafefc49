//! Rate and moneyness conventions.
//!
//! Rates are annual and continuously compounded; time is in years.

/// Discount factor `exp(−r·T)`.
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Forward price of a spot underlying: `F = S · exp(r · T)`.
///
/// Converts a spot price into the futures price [`Black76`](crate::Black76) expects.
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Log-moneyness `k = ln(F / X)`.
pub fn log_moneyness(underlying_price: f64, strike_price: f64) -> f64 {
    (underlying_price / strike_price).ln()
}
