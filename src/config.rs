//! Converter configuration.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeShape;

/// Factor converting Mapbox dash units (pixels) into harp.gl dash lengths.
pub const PX_TO_METER_MULTIPLIER: f64 = 3.0;

pub const DEFAULT_STYLE_SET: &str = "tilezen";

/// Options controlling a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterConfig {
    /// Name of the style set the converted styles are stored under.
    pub style_set_name: String,
    pub shape: ThemeShape,
    pub px_to_meter: f64,
    /// Skip layers whose layout sets `visibility: "none"`.
    pub skip_hidden: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            style_set_name: DEFAULT_STYLE_SET.to_string(),
            shape: ThemeShape::Wrapped,
            px_to_meter: PX_TO_METER_MULTIPLIER,
            skip_hidden: false,
        }
    }
}

impl ConverterConfig {
    pub fn new(style_set_name: impl Into<String>) -> Self {
        Self {
            style_set_name: style_set_name.into(),
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: ThemeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_px_to_meter(mut self, px_to_meter: f64) -> Self {
        self.px_to_meter = px_to_meter;
        self
    }

    /// Load a configuration from JSON; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        if !valid_px_to_meter(config.px_to_meter) {
            return Err(serde::de::Error::custom(format!(
                "invalid pxToMeter {}; expected a positive number",
                config.px_to_meter
            )));
        }
        Ok(config)
    }
}

/// Dash multipliers must be finite and positive.
pub fn valid_px_to_meter(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}
