//! harp.gl theme output types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// harp.gl rendering technique of a style record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technique {
    Text,
    Circles,
    SolidLine,
    DashedLine,
    Fill,
    ExtrudedPolygon,
}

/// One translated style rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStyle {
    pub id: String,
    pub technique: Technique,
    /// Source-layer name the rule applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// Translated filter; `[]` matches every feature.
    pub when: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom_level: Option<f64>,
}

impl TargetStyle {
    /// A record with only the identifying fields set and an always-true filter.
    pub fn new(id: impl Into<String>, technique: Technique) -> Self {
        Self {
            id: id.into(),
            technique,
            layer: None,
            when: Value::Array(Vec::new()),
            color: None,
            opacity: None,
            metric_unit: None,
            line_width: None,
            dash_size: None,
            gap_size: None,
            text: None,
            size: None,
            background_color: None,
            background_opacity: None,
            min_zoom_level: None,
            max_zoom_level: None,
        }
    }
}

/// Layout of the emitted theme document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeShape {
    /// `{"styles": {name: [...]}}`
    #[default]
    Wrapped,
    /// `{name: [...]}`
    Bare,
}

impl ThemeShape {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "wrapped" | "styles" => Some(ThemeShape::Wrapped),
            "bare" => Some(ThemeShape::Bare),
            _ => None,
        }
    }
}

/// Converted style set, named by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTheme {
    pub style_set: String,
    pub styles: Vec<TargetStyle>,
}

impl TargetTheme {
    pub fn new(style_set: impl Into<String>, styles: Vec<TargetStyle>) -> Self {
        Self {
            style_set: style_set.into(),
            styles,
        }
    }

    /// Render the theme as JSON in the requested shape.
    pub fn to_json(&self, shape: ThemeShape) -> Result<Value, serde_json::Error> {
        let mut set = Map::new();
        set.insert(self.style_set.clone(), serde_json::to_value(&self.styles)?);
        let root = match shape {
            ThemeShape::Bare => set,
            ThemeShape::Wrapped => {
                let mut root = Map::new();
                root.insert("styles".to_string(), Value::Object(set));
                root
            }
        };
        Ok(Value::Object(root))
    }
}
