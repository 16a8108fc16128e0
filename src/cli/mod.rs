//! Command-line front end for the converter.

pub mod args;
pub mod convert;

pub use args::ConvertArgs;
pub use convert::{run_convert, run_convert_cli};
