//! Conversion between wind speed/direction and (u, v) components.
//!
//! Directions are meteorological: the compass bearing the wind blows
//! *from*, in degrees clockwise from north. A northerly (0° or 360°) has
//! `v < 0`; a westerly (270°) has `u > 0`.

use ndarray::{ArrayBase, Data, Dimension, Zip};

use crate::error::Result;
use crate::field::{ensure_same_shape, Field};

/// Split wind speed and direction into `(u, v)` components.
///
/// `u = -speed * sin(direction)`, `v = -speed * cos(direction)`. Components
/// carry the units of `speed`.
///
/// # Errors
///
/// `InvalidShape` if the inputs differ in shape.
///
/// # Example
///
/// ```
/// use metcalc_core::wind::wind_components;
/// use ndarray::arr0;
///
/// let (u, v) = wind_components(&arr0(10.0), &arr0(270.0)).unwrap();
/// assert!((u.into_scalar() - 10.0).abs() < 1e-12);
/// assert!(v.into_scalar().abs() < 1e-12);
/// ```
pub fn wind_components<S1, S2, D>(
    speed: &ArrayBase<S1, D>,
    direction: &ArrayBase<S2, D>,
) -> Result<(Field<D>, Field<D>)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape("wind speed", speed, "wind direction", direction)?;

    let u = Zip::from(speed)
        .and(direction)
        .map_collect(|&s, &d| -s * d.to_radians().sin());
    let v = Zip::from(speed)
        .and(direction)
        .map_collect(|&s, &d| -s * d.to_radians().cos());
    Ok((u, v))
}

/// Recover wind speed and meteorological direction from `(u, v)`.
///
/// Directions fall in (0, 360]: a northerly is reported as 360°, and 0° is
/// reserved for calm.
///
/// # Errors
///
/// `InvalidShape` if the inputs differ in shape.
pub fn wind_speed_direction<S1, S2, D>(
    u: &ArrayBase<S1, D>,
    v: &ArrayBase<S2, D>,
) -> Result<(Field<D>, Field<D>)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape("u", u, "v", v)?;

    let speed = Zip::from(u).and(v).map_collect(|&u, &v| u.hypot(v));
    let direction = Zip::from(u).and(v).map_collect(|&u, &v| {
        if u == 0.0 && v == 0.0 {
            return 0.0;
        }
        let bearing = (-u).atan2(-v).to_degrees();
        if bearing <= 0.0 {
            bearing + 360.0
        } else {
            bearing
        }
    });
    Ok((speed, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr0, array};

    #[test]
    fn test_cardinal_directions() {
        let speed = array![10.0, 10.0, 10.0, 10.0];
        let dirs = array![360.0, 90.0, 180.0, 270.0];
        let (u, v) = wind_components(&speed, &dirs).unwrap();
        assert_abs_diff_eq!(u, array![0.0, -10.0, 0.0, 10.0], epsilon = 1e-12);
        assert_abs_diff_eq!(v, array![-10.0, 0.0, 10.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn test_speed_direction_round_trip() {
        let speed = array![[3.0, 12.5], [7.0, 0.5]];
        let dirs = array![[45.0, 360.0], [200.0, 315.0]];
        let (u, v) = wind_components(&speed, &dirs).unwrap();
        let (s, d) = wind_speed_direction(&u, &v).unwrap();
        assert_abs_diff_eq!(s, speed, epsilon = 1e-12);
        assert_abs_diff_eq!(d, dirs, epsilon = 1e-9);
    }

    #[test]
    fn test_calm_and_northerly() {
        let (s, d) = wind_speed_direction(&arr0(0.0), &arr0(0.0)).unwrap();
        assert_eq!(s.into_scalar(), 0.0);
        assert_eq!(d.into_scalar(), 0.0);

        let (_, d) = wind_speed_direction(&arr0(0.0), &arr0(-5.0)).unwrap();
        assert_eq!(d.into_scalar(), 360.0);
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(wind_components(&array![1.0, 2.0], &array![0.0]).is_err());
        assert!(wind_speed_direction(&array![1.0, 2.0], &array![1.0]).is_err());
    }
}
