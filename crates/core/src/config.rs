//! Options for the domain-restricted thermodynamic formulas.

use serde::{Deserialize, Serialize};

/// Configuration for [`wind_chill`](crate::thermo::wind_chill)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindChillConfig {
    /// Inputs and output are °C and m/s instead of °F and mph
    pub metric: bool,

    /// Speeds were measured at face level rather than the standard 10 m.
    /// The formula expects 10 m winds, so face-level speeds are scaled by 1.5.
    pub face_level_winds: bool,

    /// Flag samples outside the formula's range (above 50°F, or at or
    /// below 3 mph) in the returned mask
    pub mask_undefined: bool,
}

impl Default for WindChillConfig {
    fn default() -> Self {
        Self {
            metric: true,
            face_level_winds: false,
            mask_undefined: true,
        }
    }
}

impl WindChillConfig {
    /// Imperial units (°F, mph) with masking enabled
    #[must_use]
    pub fn imperial() -> Self {
        Self {
            metric: false,
            ..Self::default()
        }
    }

    /// Enable or disable masking of out-of-range samples
    #[must_use]
    pub fn with_mask_undefined(mut self, mask_undefined: bool) -> Self {
        self.mask_undefined = mask_undefined;
        self
    }
}

/// Configuration for [`heat_index`](crate::thermo::heat_index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatIndexConfig {
    /// Flag samples outside the regression's range (below 80°F, or below
    /// 40% relative humidity) in the returned mask
    pub mask_undefined: bool,
}

impl Default for HeatIndexConfig {
    fn default() -> Self {
        Self {
            mask_undefined: true,
        }
    }
}
