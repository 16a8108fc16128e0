//! Converters from Mapbox style layers to harp.gl theme styles.

use log::{debug, info};
use serde_json::{json, Value};

use crate::config::ConverterConfig;
use crate::style::expressions::translate;
use crate::style::parser::{decode_layer, validate_style, StyleError};
use crate::style::resolvers::{
    resolve_color, resolve_halo_color, resolve_line_dash, resolve_line_width, resolve_opacity,
    resolve_text, resolve_text_size, LineDash, Resolved,
};
use crate::style::types::{LayerType, StyleDocument, StyleLayer};
use crate::theme::{TargetStyle, TargetTheme, Technique};

/// Convert a whole style document into a named harp.gl style set.
pub fn convert(doc: &StyleDocument, config: &ConverterConfig) -> Result<TargetTheme, StyleError> {
    validate_style(doc)?;
    let vector_sources = doc.vector_source_ids();
    let raw_layers = doc.layers.as_deref().unwrap_or_default();

    let styles: Vec<TargetStyle> = raw_layers
        .iter()
        .filter(|raw| {
            let source = raw.get("source").and_then(Value::as_str);
            let bound = source.is_some_and(|s| vector_sources.contains(&s));
            if !bound {
                debug!("excluding layer {} (not bound to a vector source)", layer_id(raw));
            }
            bound
        })
        .filter_map(decode_layer)
        .filter_map(|layer| map_layer(&layer, config))
        .collect();

    info!(
        "converted {} of {} layers into style set '{}'",
        styles.len(),
        raw_layers.len(),
        config.style_set_name
    );
    Ok(TargetTheme::new(config.style_set_name.clone(), styles))
}

fn layer_id(raw: &Value) -> &str {
    raw.get("id").and_then(Value::as_str).unwrap_or("<no id>")
}

/// Map one layer to a target style, or `None` when it produces no output.
pub fn map_layer(layer: &StyleLayer, config: &ConverterConfig) -> Option<TargetStyle> {
    if config.skip_hidden && !layer.is_visible() {
        debug!("skipping hidden layer '{}'", layer.id);
        return None;
    }

    let technique = match layer.layer_type {
        LayerType::Symbol => Technique::Text,
        LayerType::Circle => Technique::Circles,
        LayerType::Line => Technique::SolidLine,
        LayerType::Fill => Technique::Fill,
        LayerType::FillExtrusion => Technique::ExtrudedPolygon,
        LayerType::Other => {
            debug!("skipping layer '{}' of unsupported type", layer.id);
            return None;
        }
    };

    let color = resolve_color(layer);
    if color.is_omit() {
        debug!("dropping pattern-filled layer '{}'", layer.id);
        return None;
    }

    let mut style = TargetStyle::new(layer.id.clone(), technique);
    style.layer = layer.source_layer.clone();
    style.when = layer
        .filter
        .as_ref()
        .map(|filter| translate(filter).into_value())
        .unwrap_or_else(|| json!([]));
    style.color = color.into_option();
    style.opacity = resolve_opacity(layer).into_option();
    style.min_zoom_level = layer.minzoom;
    style.max_zoom_level = layer.maxzoom;

    match layer.layer_type {
        LayerType::Line => apply_line_attributes(&mut style, layer, config),
        LayerType::Symbol => apply_text_attributes(&mut style, layer),
        _ => {}
    }
    Some(style)
}

fn apply_line_attributes(style: &mut TargetStyle, layer: &StyleLayer, config: &ConverterConfig) {
    let dash = resolve_line_dash(layer, config.px_to_meter);
    style.technique = dash.technique();
    style.metric_unit = Some("Pixel".to_string());
    style.line_width = resolve_line_width(layer).into_option();
    if let LineDash::Dashed(Some(pattern)) = dash {
        style.dash_size = Some(pattern.dash_size);
        style.gap_size = Some(pattern.gap_size);
    }
}

fn apply_text_attributes(style: &mut TargetStyle, layer: &StyleLayer) {
    style.text = resolve_text(layer).into_option();
    style.size = resolve_text_size(layer).into_option();
    if let Resolved::Value(halo) = resolve_halo_color(layer) {
        style.background_color = Some(halo);
        style.background_opacity = Some(1.0);
    }
}
