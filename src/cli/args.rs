// src/cli/args.rs
// Command-line arguments for the style converter

use std::path::PathBuf;

use clap::Parser;

use crate::config::{valid_px_to_meter, ConverterConfig};
use crate::theme::ThemeShape;

/// Convert a Mapbox GL style into a harp.gl theme.
#[derive(Parser, Debug, Clone)]
#[command(name = "mapbox2harp", version, about, long_about = None)]
pub struct ConvertArgs {
    /// Mapbox GL style JSON file
    pub style: PathBuf,

    /// Converter configuration JSON; flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the style set in the emitted theme
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output layout: `wrapped` ({"styles": {...}}) or `bare`
    #[arg(long, value_parser = parse_shape)]
    pub shape: Option<ThemeShape>,

    /// Multiplier from Mapbox dash pixels to harp.gl dash lengths
    #[arg(long, value_name = "FACTOR")]
    pub px_to_meter: Option<f64>,

    /// Leave out layers whose visibility is "none"
    #[arg(long)]
    pub skip_hidden: bool,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,

    /// Write the theme to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn parse_shape(value: &str) -> Result<ThemeShape, String> {
    ThemeShape::from_str(value)
        .ok_or_else(|| format!("invalid shape '{value}'; expected 'wrapped' or 'bare'"))
}

impl ConvertArgs {
    /// Apply the command-line overrides on top of `base`.
    pub fn apply_to(&self, mut base: ConverterConfig) -> Result<ConverterConfig, String> {
        if let Some(name) = &self.name {
            base.style_set_name = name.clone();
        }
        if let Some(shape) = self.shape {
            base.shape = shape;
        }
        if let Some(factor) = self.px_to_meter {
            if !valid_px_to_meter(factor) {
                return Err(format!(
                    "invalid --px-to-meter value '{factor}'; expected a positive number"
                ));
            }
            base.px_to_meter = factor;
        }
        if self.skip_hidden {
            base.skip_hidden = true;
        }
        Ok(base)
    }
}
