//! Absolute humidity derivation

/// Absolute humidity in grams/m³ from temperature and relative humidity.
///
/// Clausius-Clapeyron approximation:
/// `6.112 × e^[(17.67 × T)/(T + 243.5)] × rh × 2.1674 / (273.15 + T)` with T in °C.
/// Callers are responsible for keeping inputs in realistic ranges.
#[must_use]
pub fn absolute_humidity(temp_f: f64, relative_humidity: f64) -> f64 {
    let temp_c = (temp_f - 32.0) * 5.0 / 9.0;
    let exponent = (17.67 * temp_c) / (temp_c + 243.5);

    6.112 * exponent.exp() * relative_humidity * 2.1674 / (273.15 + temp_c)
}
