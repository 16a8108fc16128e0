//! Mapbox Style Spec JSON parser.

use std::fs;
use std::path::Path;

use log::warn;

use crate::style::types::{StyleDocument, StyleLayer};

/// Error type for style parsing and conversion.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid style: document has no sources")]
    MissingSources,
    #[error("Invalid style: document has no layers")]
    MissingLayers,
    #[error("Invalid style: {0}")]
    Invalid(String),
}

/// Parse a Mapbox GL Style Spec JSON file.
pub fn parse_style(path: &Path) -> Result<StyleDocument, StyleError> {
    let content = fs::read_to_string(path)?;
    parse_style_str(&content)
}

/// Parse a Mapbox GL Style Spec from a JSON string.
pub fn parse_style_str(json: &str) -> Result<StyleDocument, StyleError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(StyleError::Invalid("top level is not a JSON object".to_string()));
    }
    let doc: StyleDocument = serde_json::from_value(value)?;
    Ok(doc)
}

/// Check the parts of a document the converter depends on.
pub fn validate_style(doc: &StyleDocument) -> Result<(), StyleError> {
    if doc.sources.is_none() {
        return Err(StyleError::MissingSources);
    }
    if doc.layers.is_none() {
        return Err(StyleError::MissingLayers);
    }
    if let Some(version) = doc.version {
        if version != 8 {
            warn!("unexpected style version {version} (expected 8), converting anyway");
        }
    }
    Ok(())
}

/// Decode a single raw layer, logging and skipping it when malformed.
pub fn decode_layer(raw: &serde_json::Value) -> Option<StyleLayer> {
    match serde_json::from_value::<StyleLayer>(raw.clone()) {
        Ok(layer) => Some(layer),
        Err(e) => {
            let id = raw.get("id").and_then(|v| v.as_str()).unwrap_or("<no id>");
            warn!("skipping malformed layer '{id}': {e}");
            None
        }
    }
}
