//! Dialograph CLI library
//!
//! This module contains the core CLI logic for the Dialograph layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use dialograph::{DiagramBuilder, DialographError};

/// Run the Dialograph CLI application
///
/// Reads the plot JSON named by `args.input`, derives and lays out its
/// display graph and writes the diagram JSON to `args.output`.
///
/// # Errors
///
/// Returns `DialographError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Plot parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), DialographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing plot"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let plot = builder.parse(&source)?;
    let json = builder.render_json(&plot)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
