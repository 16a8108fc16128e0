//! Attribute resolvers: read one paint/layout property off a layer, apply
//! its default, and translate it when it is not a literal.

use log::warn;
use serde_json::{json, Map, Value};

use crate::style::expressions::{translate, Translated};
use crate::style::types::StyleLayer;
use crate::theme::Technique;

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_OPACITY: f64 = 1.0;
pub const DEFAULT_LINE_WIDTH: u32 = 1;
pub const DEFAULT_TEXT_SIZE: u32 = 16;

/// Outcome of resolving one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Value(Value),
    /// Leave the attribute out of the target style.
    Empty,
    /// Drop the whole layer.
    Omit,
}

impl Resolved {
    /// `None` for both `Empty` and `Omit`.
    pub fn into_option(self) -> Option<Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Empty | Resolved::Omit => None,
        }
    }

    pub fn is_omit(&self) -> bool {
        matches!(self, Resolved::Omit)
    }
}

impl From<Translated> for Resolved {
    fn from(translated: Translated) -> Self {
        match translated {
            Translated::Expr(value) => Resolved::Value(value),
            Translated::Empty => Resolved::Empty,
        }
    }
}

/// Pass `value` through when `is_literal` holds, translate it otherwise.
fn literal_or_translate(
    layer: &StyleLayer,
    key: &str,
    value: &Value,
    is_literal: fn(&Value) -> bool,
) -> Resolved {
    if is_literal(value) {
        return Resolved::Value(value.clone());
    }
    let resolved = Resolved::from(translate(value));
    if resolved == Resolved::Empty {
        warn!("layer '{}': cannot translate {key}, leaving it out", layer.id);
    }
    resolved
}

/// `{prefix}-color`; `Omit` for pattern-only fills.
pub fn resolve_color(layer: &StyleLayer) -> Resolved {
    let prefix = layer.layer_type.paint_prefix();
    let key = format!("{prefix}-color");
    match layer.paint_value(&key) {
        Some(color) => literal_or_translate(layer, &key, color, Value::is_string),
        None if layer.paint_value(&format!("{prefix}-pattern")).is_some() => Resolved::Omit,
        None => Resolved::Value(json!(DEFAULT_COLOR)),
    }
}

/// `{prefix}-opacity`, fully opaque when absent.
pub fn resolve_opacity(layer: &StyleLayer) -> Resolved {
    let key = format!("{}-opacity", layer.layer_type.paint_prefix());
    match layer.paint_value(&key) {
        Some(opacity) => literal_or_translate(layer, &key, opacity, Value::is_number),
        None => Resolved::Value(json!(DEFAULT_OPACITY)),
    }
}

pub fn resolve_line_width(layer: &StyleLayer) -> Resolved {
    match layer.paint_value("line-width") {
        Some(width) => literal_or_translate(layer, "line-width", width, Value::is_number),
        None => Resolved::Value(json!(DEFAULT_LINE_WIDTH)),
    }
}

/// Dash and gap lengths in harp.gl units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash_size: f64,
    pub gap_size: f64,
}

/// Line dash state derived from `line-dasharray`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineDash {
    Solid,
    /// Sizes are `None` when the dash array is not a numeric pair.
    Dashed(Option<DashPattern>),
}

impl LineDash {
    pub fn technique(&self) -> Technique {
        match self {
            LineDash::Solid => Technique::SolidLine,
            LineDash::Dashed(_) => Technique::DashedLine,
        }
    }
}

pub fn resolve_line_dash(layer: &StyleLayer, px_to_meter: f64) -> LineDash {
    let Some(dasharray) = layer.paint_value("line-dasharray") else {
        return LineDash::Solid;
    };
    let pair = dasharray
        .as_array()
        .and_then(|values| Some((values.first()?.as_f64()?, values.get(1)?.as_f64()?)));
    match pair {
        Some((dash, gap)) => LineDash::Dashed(Some(DashPattern {
            dash_size: dash * px_to_meter,
            gap_size: gap * px_to_meter,
        })),
        None => {
            warn!(
                "layer '{}': line-dasharray {dasharray} is not a numeric pair, dash sizes left out",
                layer.id
            );
            LineDash::Dashed(None)
        }
    }
}

/// Split a `text-field` template such as `"{name} ({ref})"` into a harp.gl
/// text expression.
pub fn parse_text_template(template: &str) -> Value {
    let mut segments: Vec<Value> = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        literal.push_str(&rest[..open]);
        if name.is_empty() || name.contains('{') {
            literal.push('{');
            rest = after;
            continue;
        }
        if !literal.is_empty() {
            segments.push(Value::String(std::mem::take(&mut literal)));
        }
        segments.push(json!(["get", name]));
        rest = &after[close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Value::String(literal));
    }

    match segments.len() {
        0 => Value::String(String::new()),
        1 => segments.remove(0),
        _ => {
            segments.insert(0, Value::from("concat"));
            Value::Array(segments)
        }
    }
}

/// `text-field` of a symbol layer; `Empty` when absent.
pub fn resolve_text(layer: &StyleLayer) -> Resolved {
    match layer.layout_value("text-field") {
        Some(Value::String(template)) => Resolved::Value(parse_text_template(template)),
        Some(Value::Object(function)) => {
            let function = Value::Object(expand_text_stops(function));
            literal_or_translate(layer, "text-field", &function, |_| false)
        }
        Some(field) => literal_or_translate(layer, "text-field", field, |_| false),
        None => Resolved::Empty,
    }
}

/// Expand the templates of a `text-field` style function. Strings cannot be
/// interpolated, so the function type defaults to `interval`.
fn expand_text_stops(function: &Map<String, Value>) -> Map<String, Value> {
    let mut expanded = function.clone();
    expanded
        .entry("type")
        .or_insert_with(|| Value::from("interval"));
    if let Some(Value::Array(stops)) = expanded.get_mut("stops") {
        for stop in stops.iter_mut() {
            let template = match stop.as_array().map(Vec::as_slice) {
                Some([_, Value::String(template)]) => template.clone(),
                _ => continue,
            };
            stop[1] = parse_text_template(&template);
        }
    }
    expanded
}

pub fn resolve_text_size(layer: &StyleLayer) -> Resolved {
    match layer.layout_value("text-size") {
        Some(size) => literal_or_translate(layer, "text-size", size, Value::is_number),
        None => Resolved::Value(json!(DEFAULT_TEXT_SIZE)),
    }
}

/// `text-halo-color`, mapped to the harp.gl text background color.
pub fn resolve_halo_color(layer: &StyleLayer) -> Resolved {
    match layer.paint_value("text-halo-color") {
        Some(color) => literal_or_translate(layer, "text-halo-color", color, Value::is_string),
        None => Resolved::Empty,
    }
}
