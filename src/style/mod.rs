//! Mapbox Style Spec import and translation.
//!
//! This module parses Mapbox GL Style Spec JSON and converts it into harp.gl
//! theme styles.
//!
//! Supported layer types:
//! - `fill`: polygon fill with color and opacity
//! - `fill-extrusion`: extruded polygons
//! - `line`: solid or dashed polylines with width
//! - `symbol`: text labels with size, color and halo
//! - `circle`: point circles
//!
//! Layers that are not bound to a vector source, layers of other types, and
//! pattern-filled layers are left out.
//!
//! See <https://docs.mapbox.com/mapbox-gl-js/style-spec/> for full spec.

pub mod converters;
pub mod expressions;
pub mod parser;
pub mod resolvers;
pub mod types;
pub mod vocabulary;

pub use converters::{convert, map_layer};
pub use expressions::{translate, Translated, Translator};
pub use parser::{parse_style, parse_style_str, StyleError};
pub use resolvers::Resolved;
pub use types::{LayerType, StyleDocument, StyleLayer};
pub use vocabulary::{ArgKind, Vocabulary};
