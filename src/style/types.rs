//! Source document types for the Mapbox GL Style Spec.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Complete Mapbox style document.
///
/// `sources` and `layers` are optional here so that a document missing them
/// is reported as a structural error by the converter rather than as a JSON
/// decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style version (8 for Mapbox GL).
    #[serde(default)]
    pub version: Option<u32>,
    /// Style name.
    #[serde(default)]
    pub name: Option<String>,
    /// Data sources by identifier. Only each source's `type` is read.
    #[serde(default)]
    pub sources: Option<Map<String, Value>>,
    /// Style layers, decoded one by one during conversion.
    #[serde(default)]
    pub layers: Option<Vec<Value>>,
}

/// A single style layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleLayer {
    /// Layer ID, unique within a document (not enforced).
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    /// Source ID.
    #[serde(default)]
    pub source: Option<String>,
    /// Source layer name inside the vector tiles.
    #[serde(rename = "source-layer")]
    #[serde(default)]
    pub source_layer: Option<String>,
    #[serde(default)]
    pub filter: Option<Value>,
    /// Paint properties, keyed by their style-spec names.
    #[serde(default)]
    pub paint: Map<String, Value>,
    /// Layout properties, keyed by their style-spec names.
    #[serde(default)]
    pub layout: Map<String, Value>,
    #[serde(default)]
    pub minzoom: Option<f64>,
    #[serde(default)]
    pub maxzoom: Option<f64>,
}

/// Layer types the converter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerType {
    Symbol,
    Circle,
    Line,
    Fill,
    FillExtrusion,
    /// background, raster, heatmap, hillshade, sky, ...
    #[serde(other)]
    Other,
}

impl LayerType {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerType::Symbol => "symbol",
            LayerType::Circle => "circle",
            LayerType::Line => "line",
            LayerType::Fill => "fill",
            LayerType::FillExtrusion => "fill-extrusion",
            LayerType::Other => "other",
        }
    }

    /// Prefix of the paint keys holding this layer's color and opacity.
    pub fn paint_prefix(self) -> &'static str {
        match self {
            LayerType::Symbol => "text",
            other => other.as_str(),
        }
    }
}

impl StyleDocument {
    /// Identifiers of all sources whose `type` is `"vector"`.
    pub fn vector_source_ids(&self) -> Vec<&str> {
        let Some(sources) = &self.sources else {
            return Vec::new();
        };
        sources
            .iter()
            .filter(|(_, descriptor)| {
                descriptor.get("type").and_then(Value::as_str) == Some("vector")
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

impl StyleLayer {
    /// Check if layer is visible (default true if not specified).
    pub fn is_visible(&self) -> bool {
        self.layout
            .get("visibility")
            .and_then(Value::as_str)
            .map(|v| v != "none")
            .unwrap_or(true)
    }

    pub fn paint_value(&self, key: &str) -> Option<&Value> {
        self.paint.get(key)
    }

    pub fn layout_value(&self, key: &str) -> Option<&Value> {
        self.layout.get(key)
    }
}
