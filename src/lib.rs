//! Mapbox GL style to harp.gl theme converter.
//!
//! ```
//! use mapbox2harp::{convert_str, ConverterConfig};
//!
//! let style = r##"{
//!     "sources": {"v": {"type": "vector"}},
//!     "layers": [{"id": "water", "type": "fill", "source": "v",
//!                 "source-layer": "water", "paint": {"fill-color": "#0066ff"}}]
//! }"##;
//! let theme = convert_str(style, &ConverterConfig::new("tilezen")).unwrap();
//! assert_eq!(theme["styles"]["tilezen"][0]["technique"], "fill");
//! ```

pub mod cli;
pub mod config;
pub mod style;
pub mod theme;

pub use config::ConverterConfig;
pub use style::{convert, StyleDocument, StyleError};
pub use theme::{TargetStyle, TargetTheme, Technique, ThemeShape};

/// Parse, convert and render a style document in one step.
pub fn convert_str(json: &str, config: &ConverterConfig) -> Result<serde_json::Value, StyleError> {
    let doc = style::parse_style_str(json)?;
    let theme = convert(&doc, config)?;
    Ok(theme.to_json(config.shape)?)
}
