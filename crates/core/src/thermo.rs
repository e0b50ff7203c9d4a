//! Elementwise thermodynamic indices.
//!
//! All functions are rank-preserving: pass an `Array0` for a single
//! observation, or a grid of any rank for many. Two-input formulas require
//! both inputs to share a shape.
//!
//! # References
//!
//! - D. Bolton (1980). The computation of equivalent potential temperature.
//!   Monthly Weather Review, 108, 1046-1053.
//! - R. Osczevski and M. Bluestein (2005). The new wind chill equivalent
//!   temperature chart. Bull. Amer. Meteor. Soc., 86, 1453-1458.
//! - L.P. Rothfusz (1990). The heat index equation. NWS Southern Region
//!   Technical Attachment SR 90-23.

use ndarray::{ArrayBase, Data, Dimension, Zip};
use tracing::debug;

use crate::config::{HeatIndexConfig, WindChillConfig};
use crate::constants::{celsius_to_fahrenheit, fahrenheit_to_celsius, MPH_TO_MPS, SAT_PRESSURE_0C};
use crate::error::Result;
use crate::field::{ensure_same_shape, Field};
use crate::masked::Masked;

// Magnus-form coefficients (Bolton 1980)
const MAGNUS_A: f64 = 17.67;
const MAGNUS_B: f64 = 243.5; // °C

/// Upper temperature limit of the wind chill formula (°F)
const WIND_CHILL_MAX_TEMP_F: f64 = 50.0;
/// Wind speeds at or below this are calm for wind chill purposes (mph)
const WIND_CHILL_MIN_SPEED_MPH: f64 = 3.0;
/// Wind measured at face level is slower than at the 10 m standard height
const FACE_LEVEL_FACTOR: f64 = 1.5;

/// Heat index regression is fitted for temperatures at or above 80°F
const HEAT_INDEX_MIN_TEMP_F: f64 = 80.0;
/// Heat index regression is fitted for relative humidity at or above 40%
const HEAT_INDEX_MIN_RH: f64 = 40.0;

/// Saturation vapor pressure (hPa) over liquid water at `temperature` (°C).
///
/// Evaluated at the dewpoint this is the actual vapor pressure of the air.
///
/// # Example
///
/// ```
/// use metcalc_core::thermo::vapor_pressure;
/// use ndarray::arr0;
///
/// let es = vapor_pressure(&arr0(0.0)).into_scalar();
/// assert!((es - 6.112).abs() < 1e-9);
/// ```
pub fn vapor_pressure<S, D>(temperature: &ArrayBase<S, D>) -> Field<D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    temperature.mapv(saturation_pressure)
}

#[inline]
fn saturation_pressure(temp_c: f64) -> f64 {
    SAT_PRESSURE_0C * (MAGNUS_A * temp_c / (temp_c + MAGNUS_B)).exp()
}

/// Dewpoint (°C) of air holding water vapor at pressure `vapor_pressure` (hPa).
///
/// Inverse of [`vapor_pressure`].
pub fn dewpoint_from_vapor_pressure<S, D>(vapor_pressure: &ArrayBase<S, D>) -> Field<D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    vapor_pressure.mapv(|e| {
        let ln_ratio = (e / SAT_PRESSURE_0C).ln();
        MAGNUS_B * ln_ratio / (MAGNUS_A - ln_ratio)
    })
}

/// Dewpoint (°C) from temperature (°C) and relative humidity (fraction, 0-1).
///
/// # Errors
///
/// `InvalidShape` if the inputs differ in shape.
pub fn dewpoint<S1, S2, D>(
    temperature: &ArrayBase<S1, D>,
    relative_humidity: &ArrayBase<S2, D>,
) -> Result<Field<D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape("temperature", temperature, "relative humidity", relative_humidity)?;

    let vapor = Zip::from(temperature)
        .and(relative_humidity)
        .map_collect(|&t, &rh| rh * saturation_pressure(t));
    Ok(dewpoint_from_vapor_pressure(&vapor))
}

/// Wind chill temperature index.
///
/// Uses the 2001 NWS / Environment Canada formula, in imperial units:
///
/// ```text
/// WCTI = 35.74 + 0.6215 T + (0.4275 T - 35.75) V^0.16
/// ```
///
/// With `config.metric` the inputs are °C and m/s and the result is °C;
/// otherwise °F and mph in, °F out. The formula is only defined for
/// temperatures at or below 50°F and winds above 3 mph; when
/// `config.mask_undefined` is set, other samples are flagged in the mask.
///
/// # Errors
///
/// `InvalidShape` if the inputs differ in shape.
pub fn wind_chill<S1, S2, D>(
    temperature: &ArrayBase<S1, D>,
    speed: &ArrayBase<S2, D>,
    config: WindChillConfig,
) -> Result<Masked<D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape("temperature", temperature, "wind speed", speed)?;

    let (temp_f, mut speed_mph) = if config.metric {
        (
            temperature.mapv(celsius_to_fahrenheit),
            speed.mapv(|s| s / MPH_TO_MPS),
        )
    } else {
        (temperature.to_owned(), speed.to_owned())
    };
    if config.face_level_winds {
        speed_mph.mapv_inplace(|s| s * FACE_LEVEL_FACTOR);
    }

    let mut wcti = Zip::from(&temp_f).and(&speed_mph).map_collect(|&t, &v| {
        let speed_factor = v.powf(0.16);
        35.74 + 0.6215 * t + (0.4275 * t - 35.75) * speed_factor
    });
    if config.metric {
        wcti.mapv_inplace(fahrenheit_to_celsius);
    }

    if !config.mask_undefined {
        return Ok(Masked::unmasked(wcti));
    }

    let mask = Zip::from(&temp_f)
        .and(&speed_mph)
        .map_collect(|&t, &v| t > WIND_CHILL_MAX_TEMP_F || v <= WIND_CHILL_MIN_SPEED_MPH);
    let result = Masked::new(wcti, mask)?;
    debug!(
        samples = result.data().len(),
        masked = result.masked_count(),
        "wind chill computed"
    );
    Ok(result)
}

/// Heat index (°F) from temperature (°F) and relative humidity (%).
///
/// Rothfusz regression of Steadman's apparent temperature tables. The fit is
/// only valid at or above 80°F and 40% relative humidity; when
/// `config.mask_undefined` is set, other samples are flagged in the mask.
///
/// # Errors
///
/// `InvalidShape` if the inputs differ in shape.
pub fn heat_index<S1, S2, D>(
    temperature: &ArrayBase<S1, D>,
    relative_humidity: &ArrayBase<S2, D>,
    config: HeatIndexConfig,
) -> Result<Masked<D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape("temperature", temperature, "relative humidity", relative_humidity)?;

    let hi = Zip::from(temperature)
        .and(relative_humidity)
        .map_collect(|&t, &rh| rothfusz(t, rh));

    if !config.mask_undefined {
        return Ok(Masked::unmasked(hi));
    }

    let mask = Zip::from(temperature)
        .and(relative_humidity)
        .map_collect(|&t, &rh| t < HEAT_INDEX_MIN_TEMP_F || rh < HEAT_INDEX_MIN_RH);
    let result = Masked::new(hi, mask)?;
    debug!(
        samples = result.data().len(),
        masked = result.masked_count(),
        "heat index computed"
    );
    Ok(result)
}

fn rothfusz(t: f64, rh: f64) -> f64 {
    let t2 = t * t;
    let rh2 = rh * rh;
    -42.379 + 2.04901523 * t + 10.14333127 * rh
        - 0.22475541 * t * rh
        - 6.83783e-3 * t2
        - 5.481717e-2 * rh2
        + 1.22874e-3 * t2 * rh
        + 8.5282e-4 * t * rh2
        - 1.99e-6 * t2 * rh2
}
