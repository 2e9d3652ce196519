//! Trellis - Automatic layout for merge diagrams.
//!
//! A merge diagram is a directed acyclic graph in which a cell may have
//! several parents, such as a tournament bracket or a graph of merged
//! branches. Trellis assigns every cell a level and a horizontal position so
//! that siblings never overlap and connected cells line up, then renders the
//! result to SVG.
//!
//! # Pipeline
//!
//! ```text
//! TOML text
//!     ↓ parse         GraphSource → MergeGraph (structure)
//!     ↓ layout        levels, balanced positions, canvas bounds (layout)
//!     ↓ render_svg    oriented SVG document (export)
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use trellis_core::{color, geometry, identifier, orientation};

pub use error::TrellisError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{CellLabel, Exporter};
use layout::Layout;
use structure::{GraphSource, MergeGraph};

/// Builder for parsing, laying out and rendering merge diagrams.
///
/// # Examples
///
/// ```rust
/// use trellis::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
/// [final]
/// children = ["semi_a", "semi_b"]
/// payload = { name = "Final" }
///
/// [semi_a]
/// payload = { name = "Semi A" }
///
/// [semi_b]
/// payload = { name = "Semi B" }
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let mut graph = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&mut graph).expect("Failed to lay out");
/// let svg = builder.render_svg(&graph, &layout).expect("Failed to render");
///
/// assert!(svg.contains("Semi A"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse TOML text into a resolved merge graph.
    ///
    /// Every top-level table is one cell with an optional `children` list of
    /// cell ids and an optional `payload` (or `data`) table.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Source`] for malformed TOML, and the
    /// resolution errors of [`MergeGraph::from_source`].
    pub fn parse(&self, source: &str) -> Result<MergeGraph<toml::Table>, TrellisError> {
        info!("Parsing graph source");

        let source: GraphSource<toml::Table> =
            toml::from_str(source).map_err(|err| TrellisError::Source(err.to_string()))?;
        debug!(cells = source.len(); "Graph source parsed");

        let graph = MergeGraph::from_source(source)?;
        trace!(graph:?; "Resolved graph");

        Ok(graph)
    }

    /// Assign levels and positions to every cell of `graph`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`layout::compute_layout`].
    pub fn layout<P>(&self, graph: &mut MergeGraph<P>) -> Result<Layout, TrellisError> {
        layout::compute_layout(graph, self.config.layout())
    }

    /// Render a laid-out graph to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Export`] if a configured color is invalid or
    /// the document cannot be written.
    pub fn render_svg<P: CellLabel>(
        &self,
        graph: &MergeGraph<P>,
        layout: &Layout,
    ) -> Result<String, TrellisError> {
        info!(orientation:% = self.config.style().orientation(); "Rendering SVG");

        let svg_exporter = export::svg::SvgBuilder::new(self.config.layout())
            .with_style(self.config.style())
            .build()?;

        let mut buffer = Vec::new();
        svg_exporter.export_layout(graph, layout, &mut buffer)?;

        let svg_string = String::from_utf8(buffer)
            .map_err(|err| TrellisError::from(export::Error::Render(err.to_string())))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
