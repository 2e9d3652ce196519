//! CLI logic for the Trellis layout tool.
//!
//! This module reads a graph file, lays it out and writes the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{DiagramBuilder, TrellisError, config::AppConfig};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Graph source and reference errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(orientation) = args.orientation {
        info!(orientation:%; "Overriding orientation");
        app_config = AppConfig::new(
            app_config.layout().clone(),
            app_config.style().clone().with_orientation(orientation),
        );
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let mut graph = builder.parse(&source)?;
    let layout = builder.layout(&mut graph)?;
    let svg = builder.render_svg(&graph, &layout)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
