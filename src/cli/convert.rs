use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;

use crate::cli::args::ConvertArgs;
use crate::config::ConverterConfig;
use crate::style::{convert, parse_style};

/// Run the converter CLI: parse arguments, convert the style, emit the theme.
pub fn run_convert_cli() -> anyhow::Result<()> {
    let args = ConvertArgs::parse();
    run_convert(&args)
}

pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ConverterConfig::from_json_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ConverterConfig::default(),
    };
    let config = args.apply_to(base).map_err(|e| anyhow!(e))?;

    let doc = parse_style(&args.style)
        .with_context(|| format!("loading style {}", args.style.display()))?;
    let theme = convert(&doc, &config)?;
    let json = theme.to_json(config.shape)?;
    let text = if args.compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("writing theme {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}
