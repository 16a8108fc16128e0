//! Mapbox Style Spec expression translation.
//!
//! Rewrites Mapbox filter/paint expressions into the harp.gl expression
//! dialect:
//! - implicit property references (`["==", "class", "road"]`) become explicit
//!   `["get", "class"]` lookups
//! - `"$type"` becomes `["geometry-type"]`
//! - the value list of legacy `in`/`!in` filters is wrapped in `["literal", [...]]`
//! - legacy `{base, stops}` style functions become `interpolate`, `step` or
//!   `match` expressions
//!
//! Translation never fails. Inputs that cannot be translated yield
//! [`Translated::Empty`], which callers treat as "leave the attribute out".

use log::{debug, warn};
use serde_json::{json, Map, Value};

use crate::style::vocabulary::{ArgKind, Vocabulary};

/// Result of translating one expression or style function.
#[derive(Debug, Clone, PartialEq)]
pub enum Translated {
    Expr(Value),
    /// Nothing usable; an invalid style function, for instance.
    Empty,
}

impl Translated {
    pub fn is_empty(&self) -> bool {
        matches!(self, Translated::Empty)
    }

    /// The translated value, with `Empty` rendered as `[]`.
    pub fn into_value(self) -> Value {
        match self {
            Translated::Expr(value) => value,
            Translated::Empty => Value::Array(Vec::new()),
        }
    }

}

/// Translate with the standard harp.gl vocabulary.
pub fn translate(node: &Value) -> Translated {
    Translator::default().translate(node)
}

/// Recursive expression rewriter bound to an operator vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'v> {
    vocab: &'v Vocabulary,
}

impl Default for Translator<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v> Translator<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn translate(&self, node: &Value) -> Translated {
        match node {
            Value::Array(items) => Translated::Expr(Value::Array(self.translate_array(items))),
            Value::Object(function) if is_style_function(function) => {
                self.translate_function(function)
            }
            other => Translated::Expr(other.clone()),
        }
    }

    fn translate_array(&self, items: &[Value]) -> Vec<Value> {
        let head = items.first().and_then(Value::as_str);
        let head_kind = head.and_then(|op| self.vocab.first_arg_kind(op));
        let membership = matches!(head, Some("in" | "!in"));

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let token = match item {
                Value::String(s) => s.as_str(),
                Value::Array(nested) => {
                    out.push(Value::Array(self.translate_array(nested)));
                    continue;
                }
                Value::Object(function) if is_style_function(function) => {
                    out.push(self.translate_function(function).into_value());
                    continue;
                }
                other => {
                    out.push(other.clone());
                    continue;
                }
            };

            if token == "$type" {
                out.push(json!(["geometry-type"]));
            } else if self.vocab.is_operator(token) {
                out.push(item.clone());
            } else if i == 1 && head_kind == Some(ArgKind::Property) {
                out.push(json!(["get", token]));
            } else if membership {
                out.push(Value::Array(vec![
                    Value::from("literal"),
                    Value::Array(items[i..].to_vec()),
                ]));
                break;
            } else {
                out.push(item.clone());
            }
        }
        out
    }

    /// Translate a legacy style function (`{base?, stops, property?, type?}`).
    fn translate_function(&self, function: &Map<String, Value>) -> Translated {
        let input = match function.get("property").and_then(Value::as_str) {
            Some(property) => json!(["get", property]),
            None => json!(["zoom"]),
        };
        let kind = function
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("exponential");

        if kind == "identity" && function.contains_key("property") {
            return Translated::Expr(input);
        }

        let Some(stops) = function.get("stops").and_then(Value::as_array) else {
            debug!("style function without stops, dropping");
            return Translated::Empty;
        };
        let pairs = stop_pairs(stops);
        if pairs.is_empty() {
            return Translated::Empty;
        }
        if pairs.iter().any(|(key, _)| key.is_object()) {
            warn!("zoom-and-property style functions are not supported, dropping");
            return Translated::Empty;
        }

        let mut expr = match kind {
            "interval" => vec![Value::from("step"), input, pairs[0].1.clone()],
            "categorical" => vec![Value::from("match"), input],
            _ => vec![Value::from("interpolate"), interpolation_kind(function), input],
        };
        let flattened = if kind == "interval" { &pairs[1..] } else { &pairs[..] };
        for (key, value) in flattened {
            expr.push((*key).clone());
            expr.push((*value).clone());
        }
        if kind == "categorical" {
            let fallback = function.get("default").unwrap_or(pairs[0].1);
            expr.push(fallback.clone());
        }
        Translated::Expr(Value::Array(expr))
    }
}

/// Legacy function objects carry `stops` or `base`, or `property`/`type` for
/// the data-driven forms. Other objects (`format` and `number-format` options,
/// `collator` settings, object literals) are kept as they are.
fn is_style_function(object: &Map<String, Value>) -> bool {
    ["stops", "base", "property", "type"]
        .iter()
        .any(|key| object.contains_key(*key))
}

/// `["exponential", base]` for a non-zero numeric base, otherwise `["linear"]`.
fn interpolation_kind(function: &Map<String, Value>) -> Value {
    match function.get("base") {
        Some(base) if base.as_f64().is_some_and(|b| b != 0.0) => json!(["exponential", base]),
        _ => json!(["linear"]),
    }
}

fn stop_pairs(stops: &[Value]) -> Vec<(&Value, &Value)> {
    stops
        .iter()
        .filter_map(|stop| match stop.as_array().map(Vec::as_slice) {
            Some([key, value]) => Some((key, value)),
            _ => {
                warn!("skipping malformed stop {stop}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(node: Value) -> Value {
        translate(&node).into_value()
    }

    #[test]
    fn test_number_passes_through() {
        for n in [json!(0), json!(-3), json!(12.5), json!(1e9)] {
            assert_eq!(translate(&n), Translated::Expr(n.clone()));
        }
    }

    #[test]
    fn test_implicit_property_after_comparison() {
        assert_eq!(
            tr(json!(["==", "class", "motorway"])),
            json!(["==", ["get", "class"], "motorway"])
        );
        assert_eq!(
            tr(json!([">=", "rank", 3])),
            json!([">=", ["get", "rank"], 3])
        );
    }

    #[test]
    fn test_explicit_names_are_not_wrapped_twice() {
        assert_eq!(tr(json!(["get", "name"])), json!(["get", "name"]));
        assert_eq!(tr(json!(["has", "name"])), json!(["has", "name"]));
        assert_eq!(
            tr(json!(["concat", "Exit ", ["get", "ref"]])),
            json!(["concat", "Exit ", ["get", "ref"]])
        );
        assert_eq!(tr(json!(["to-color", "#fff"])), json!(["to-color", "#fff"]));
    }

    #[test]
    fn test_type_becomes_geometry_type() {
        assert_eq!(
            tr(json!(["==", "$type", "Polygon"])),
            json!(["==", ["geometry-type"], "Polygon"])
        );
    }

    #[test]
    fn test_operator_tokens_pass_through() {
        assert_eq!(tr(json!(["==", "$id", 5])), json!(["==", "$id", 5]));
    }

    #[test]
    fn test_later_slots_stay_literal() {
        // "e" is a math constant; the output after it must not become a lookup
        assert_eq!(
            tr(json!(["match", ["get", "k"], "e", "red", "blue"])),
            json!(["match", ["get", "k"], "e", "red", "blue"])
        );
    }

    #[test]
    fn test_nested_filter() {
        let filter = json!([
            "all",
            ["==", "$type", "LineString"],
            ["!=", "brunnel", "tunnel"],
            ["in", "class", "primary", "secondary"]
        ]);
        assert_eq!(
            tr(filter),
            json!([
                "all",
                ["==", ["geometry-type"], "LineString"],
                ["!=", ["get", "brunnel"], "tunnel"],
                ["in", ["get", "class"], ["literal", ["primary", "secondary"]]]
            ])
        );
    }

    #[test]
    fn test_membership_list_is_captured() {
        assert_eq!(
            tr(json!(["!in", "class", "a", "b", "c"])),
            json!(["!in", ["get", "class"], ["literal", ["a", "b", "c"]]])
        );
        // numbers ahead of the first string stay in place
        assert_eq!(
            tr(json!(["in", "rank", 1, "x", 2])),
            json!(["in", ["get", "rank"], 1, ["literal", ["x", 2]]])
        );
    }

    #[test]
    fn test_booleans_and_null_pass_through() {
        assert_eq!(
            tr(json!(["==", "oneway", true])),
            json!(["==", ["get", "oneway"], true])
        );
        assert_eq!(tr(json!(["coalesce", null, 1])), json!(["coalesce", null, 1]));
    }

    #[test]
    fn test_stops_linear_without_base() {
        assert_eq!(
            tr(json!({"stops": [[12, 0.5], [13, 1], [20, 15]]})),
            json!(["interpolate", ["linear"], ["zoom"], 12, 0.5, 13, 1, 20, 15])
        );
    }

    #[test]
    fn test_stops_exponential_with_base() {
        assert_eq!(
            tr(json!({"base": 1.2, "stops": [[12, 0.5], [14, 4]]})),
            json!(["interpolate", ["exponential", 1.2], ["zoom"], 12, 0.5, 14, 4])
        );
        assert_eq!(
            tr(json!({"base": 0, "stops": [[12, 1]]})),
            json!(["interpolate", ["linear"], ["zoom"], 12, 1])
        );
    }

    #[test]
    fn test_stops_keep_order_and_duplicates() {
        assert_eq!(
            tr(json!({"stops": [[14, 2], [10, 1], [10, 1]]})),
            json!(["interpolate", ["linear"], ["zoom"], 14, 2, 10, 1, 10, 1])
        );
    }

    #[test]
    fn test_invalid_stops_are_empty() {
        assert_eq!(translate(&json!({"base": 1.4})), Translated::Empty);
        assert_eq!(translate(&json!({"stops": []})), Translated::Empty);
        assert_eq!(translate(&json!({"stops": "nope"})), Translated::Empty);
        assert_eq!(translate(&json!({"stops": [[1, 2, 3]]})), Translated::Empty);
    }

    #[test]
    fn test_nested_function_inside_expression() {
        assert_eq!(
            tr(json!(["*", {"stops": [[10, 1], [15, 2]]}, 2])),
            json!(["*", ["interpolate", ["linear"], ["zoom"], 10, 1, 15, 2], 2])
        );
        assert_eq!(tr(json!(["*", {"base": 2}, 2])), json!(["*", [], 2]));
    }

    #[test]
    fn test_option_objects_are_kept() {
        assert_eq!(
            tr(json!(["format", ["get", "name"], {"font-scale": 1.2}])),
            json!(["format", ["get", "name"], {"font-scale": 1.2}])
        );
        assert_eq!(tr(json!(["literal", {"a": 1}])), json!(["literal", {"a": 1}]));
        assert_eq!(
            tr(json!(["number-format", ["get", "ele"], {"max-fraction-digits": 0}])),
            json!(["number-format", ["get", "ele"], {"max-fraction-digits": 0}])
        );
        assert_eq!(
            translate(&json!({"case-sensitive": true})),
            Translated::Expr(json!({"case-sensitive": true}))
        );
    }

    #[test]
    fn test_property_functions() {
        assert_eq!(
            tr(json!({"property": "height", "stops": [[0, 0], [100, 50]]})),
            json!(["interpolate", ["linear"], ["get", "height"], 0, 0, 100, 50])
        );
        assert_eq!(
            tr(json!({"type": "interval", "stops": [[0, "a"], [10, "b"], [14, "c"]]})),
            json!(["step", ["zoom"], "a", 10, "b", 14, "c"])
        );
        assert_eq!(
            tr(json!({
                "type": "categorical",
                "property": "class",
                "default": "#888",
                "stops": [["park", "#0f0"], ["water", "#00f"]]
            })),
            json!(["match", ["get", "class"], "park", "#0f0", "water", "#00f", "#888"])
        );
        assert_eq!(
            tr(json!({"type": "identity", "property": "color"})),
            json!(["get", "color"])
        );
    }

    #[test]
    fn test_composite_functions_are_dropped() {
        let composite = json!({
            "property": "rank",
            "stops": [[{"zoom": 10, "value": 1}, 2]]
        });
        assert!(translate(&composite).is_empty());
    }
}
