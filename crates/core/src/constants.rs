//! Physical constants and unit conversions.

/// Standard gravitational acceleration (m/s²)
pub const G: f64 = 9.80665;

/// Angular velocity of Earth's rotation (rad/s)
pub const OMEGA: f64 = 7.292115e-5;

/// Saturation vapor pressure over water at 0°C (hPa)
pub const SAT_PRESSURE_0C: f64 = 6.112;

/// One statute mile per hour in m/s
pub const MPH_TO_MPS: f64 = 0.44704;

/// One knot in m/s
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// Convert a temperature from degrees Celsius to degrees Fahrenheit.
#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Convert a temperature from degrees Fahrenheit to degrees Celsius.
#[inline]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 1.8
}
