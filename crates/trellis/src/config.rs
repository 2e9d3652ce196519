//! Configuration types for Trellis layout and rendering.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Cell geometry, connector heights and balancing budget.
//! - [`StyleConfig`] - Orientation, padding, labels and colors used by the SVG export.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     max_rounds = 40
//!
//!     [layout.cell]
//!     width = 100
//!
//!     [style]
//!     orientation = "left"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().max_rounds(), 40);
//! assert_eq!(config.layout().cell().width(), 100.0);
//! assert_eq!(config.layout().cell().height(), 90.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use trellis_core::{
    color::Color,
    geometry::{Insets, Size},
    orientation::Orientation,
};

use crate::TrellisError;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every section for values the layout cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), TrellisError> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Size of one cell and the spacing between siblings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    width: f32,
    height: f32,
    /// Horizontal gap between two sibling cells.
    padding: f32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 90.0,
            padding: 30.0,
        }
    }
}

impl CellConfig {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Returns the cell dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Segment between the bus and a child cell.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputLinkerConfig {
    height: f32,
    /// Horizontal distance between input segments of a cell with several parents.
    offset: f32,
}

impl Default for InputLinkerConfig {
    fn default() -> Self {
        Self {
            height: 50.0,
            offset: 0.0,
        }
    }
}

/// Segment between a parent cell and its bus.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputLinkerConfig {
    height: f32,
}

impl Default for OutputLinkerConfig {
    fn default() -> Self {
        Self { height: 40.0 }
    }
}

/// Geometry of the connectors drawn between two levels.
///
/// A connector leaves the parent through an output segment, runs along a
/// horizontal bus and enters each child through an input segment. In TOML
/// the two segments are the `[layout.linker.input]` and
/// `[layout.linker.output]` tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    input: InputLinkerConfig,
    output: OutputLinkerConfig,
}

impl LinkerConfig {
    pub fn new(input_height: f32, output_height: f32, input_offset: f32) -> Self {
        Self {
            input: InputLinkerConfig {
                height: input_height,
                offset: input_offset,
            },
            output: OutputLinkerConfig {
                height: output_height,
            },
        }
    }

    pub fn input_height(&self) -> f32 {
        self.input.height
    }

    pub fn output_height(&self) -> f32 {
        self.output.height
    }

    pub fn input_offset(&self) -> f32 {
        self.input.offset
    }

    /// Returns the vertical space taken by a connector between two levels.
    pub fn total_height(&self) -> f32 {
        self.input.height + self.output.height
    }
}

/// Parameters of the layout pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    cell: CellConfig,
    linker: LinkerConfig,
    /// Upper bound on balancing rounds.
    max_rounds: usize,
    /// Balancing stops once the per-round movement change drops below this.
    convergence_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell: CellConfig::default(),
            linker: LinkerConfig::default(),
            max_rounds: 99,
            convergence_threshold: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Sets the cell geometry.
    pub fn with_cell(mut self, cell: CellConfig) -> Self {
        self.cell = cell;
        self
    }

    /// Sets the connector geometry.
    pub fn with_linker(mut self, linker: LinkerConfig) -> Self {
        self.linker = linker;
        self
    }

    /// Sets the balancing round budget.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Sets the balancing convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f32) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn cell(&self) -> &CellConfig {
        &self.cell
    }

    pub fn linker(&self) -> &LinkerConfig {
        &self.linker
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn convergence_threshold(&self) -> f32 {
        self.convergence_threshold
    }

    /// Horizontal distance between two adjacent slots of a level.
    pub fn slot_width(&self) -> f32 {
        self.cell.width + self.cell.padding
    }

    /// Vertical distance between two adjacent levels.
    pub fn row_pitch(&self) -> f32 {
        self.cell.height + self.linker.total_height()
    }

    /// Initial x of the cell in slot `slot` of its level.
    pub fn standard_x(&self, slot: usize) -> f32 {
        slot as f32 * self.slot_width()
    }

    /// y of every cell in `level`.
    pub fn standard_y(&self, level: usize) -> f32 {
        level as f32 * self.row_pitch() + self.cell.height
    }

    pub(crate) fn validate(&self) -> Result<(), TrellisError> {
        if !is_positive(self.cell.width) || !is_positive(self.cell.height) {
            return Err(TrellisError::Config(format!(
                "cell size must be positive and finite, got {}x{}",
                self.cell.width, self.cell.height
            )));
        }
        for (name, value) in [
            ("cell padding", self.cell.padding),
            ("linker input height", self.linker.input_height()),
            ("linker output height", self.linker.output_height()),
            ("convergence_threshold", self.convergence_threshold),
        ] {
            if !is_non_negative(value) {
                return Err(TrellisError::Config(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        if !self.linker.input_offset().is_finite() {
            return Err(TrellisError::Config(format!(
                "linker input offset must be finite, got {}",
                self.linker.input_offset()
            )));
        }
        if self.max_rounds == 0 {
            return Err(TrellisError::Config(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Stroke colors of the rendered diagram, as CSS color strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    cell: String,
    bus: String,
    input: String,
    output: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            cell: "black".to_string(),
            bus: "black".to_string(),
            input: "green".to_string(),
            output: "blue".to_string(),
        }
    }
}

impl ColorConfig {
    /// Returns the cell border [`Color`].
    pub fn cell(&self) -> Result<Color, String> {
        Color::new(&self.cell)
    }

    /// Returns the bus line [`Color`].
    pub fn bus(&self) -> Result<Color, String> {
        Color::new(&self.bus)
    }

    /// Returns the input segment [`Color`].
    pub fn input(&self) -> Result<Color, String> {
        Color::new(&self.input)
    }

    /// Returns the output segment [`Color`].
    pub fn output(&self) -> Result<Color, String> {
        Color::new(&self.output)
    }
}

/// Visual styling used when handing the layout to the SVG export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Side of the canvas the roots are drawn on.
    orientation: Orientation,
    /// Draw horizontal bus lines joining siblings.
    need_bus: bool,
    /// Empty space around the canvas.
    padding: Insets,
    /// Payload key whose value labels a cell; the cell id is used when missing.
    label_key: String,
    /// Background color string; transparent when unset.
    background_color: Option<String>,
    colors: ColorConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            need_bus: true,
            padding: Insets::default(),
            label_key: "name".to_string(),
            background_color: None,
            colors: ColorConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Sets the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enables or disables bus lines.
    pub fn with_need_bus(mut self, need_bus: bool) -> Self {
        self.need_bus = need_bus;
        self
    }

    /// Sets the canvas padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn need_bus(&self) -> bool {
        self.need_bus
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    pub fn colors(&self) -> &ColorConfig {
        &self.colors
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    fn validate(&self) -> Result<(), TrellisError> {
        self.background_color().map_err(TrellisError::Config)?;
        for color in [
            self.colors.cell(),
            self.colors.bus(),
            self.colors.input(),
            self.colors.output(),
        ] {
            color.map_err(TrellisError::Config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let config = LayoutConfig::default();

        assert_eq!(config.cell().size(), Size::new(120.0, 90.0));
        assert_eq!(config.cell().padding(), 30.0);
        assert_eq!(config.linker().total_height(), 90.0);
        assert_eq!(config.max_rounds(), 99);
        assert_eq!(config.convergence_threshold(), 10.0);
    }

    #[test]
    fn test_standard_positions() {
        let config = LayoutConfig::default();

        assert_eq!(config.slot_width(), 150.0);
        assert_eq!(config.standard_x(0), 0.0);
        assert_eq!(config.standard_x(3), 450.0);
        assert_eq!(config.row_pitch(), 180.0);
        assert_eq!(config.standard_y(0), 90.0);
        assert_eq!(config.standard_y(2), 450.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout.linker.input]
            height = 20

            [style]
            need_bus = false
            padding = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().linker().input_height(), 20.0);
        assert_eq!(config.layout().linker().output_height(), 40.0);
        assert!(!config.style().need_bus());
        assert_eq!(config.style().padding(), Insets::uniform(12.0));
        assert_eq!(config.style().label_key(), "name");
        assert_eq!(config.style().orientation(), Orientation::Top);
    }

    #[test]
    fn test_padding_per_side() {
        let config: StyleConfig = toml::from_str(
            r#"
            padding = { left = 5, top = 7 }
            "#,
        )
        .unwrap();

        assert_eq!(config.padding(), Insets::new(7.0, 0.0, 0.0, 5.0));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout().max_rounds(), 99);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cell() {
        let config = AppConfig::new(
            LayoutConfig::default().with_cell(CellConfig::new(0.0, 90.0, 30.0)),
            StyleConfig::default(),
        );
        assert!(matches!(config.validate(), Err(TrellisError::Config(_))));
    }

    #[test]
    fn test_linker_sections() {
        let config: LayoutConfig = toml::from_str(
            r#"
            [linker.input]
            offset = 8

            [linker.output]
            height = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.linker().input_height(), 50.0);
        assert_eq!(config.linker().input_offset(), 8.0);
        assert_eq!(config.linker().output_height(), 25.0);
        assert_eq!(config.row_pitch(), 165.0);
    }

    #[test]
    fn test_validate_rejects_nan_padding() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout.cell]
            padding = nan
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, TrellisError::Config(_)));
        assert!(err.to_string().contains("cell padding"));
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let layouts = [
            LayoutConfig::default().with_cell(CellConfig::new(f32::INFINITY, 90.0, 30.0)),
            LayoutConfig::default().with_cell(CellConfig::new(120.0, f32::NAN, 30.0)),
            LayoutConfig::default().with_linker(LinkerConfig::new(f32::NAN, 40.0, 0.0)),
            LayoutConfig::default().with_linker(LinkerConfig::new(50.0, f32::INFINITY, 0.0)),
            LayoutConfig::default().with_linker(LinkerConfig::new(50.0, 40.0, f32::NAN)),
            LayoutConfig::default().with_convergence_threshold(f32::NAN),
            LayoutConfig::default().with_convergence_threshold(f32::INFINITY),
        ];

        for layout in layouts {
            assert!(
                matches!(layout.validate(), Err(TrellisError::Config(_))),
                "accepted {layout:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_rounds() {
        let config = AppConfig::new(
            LayoutConfig::default().with_max_rounds(0),
            StyleConfig::default(),
        );
        assert!(matches!(config.validate(), Err(TrellisError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.colors]
            bus = "not-a-color"
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_background_color() {
        let style: StyleConfig = toml::from_str(r##"background_color = "#ffffff""##).unwrap();
        assert!(style.background_color().unwrap().is_some());
        assert!(StyleConfig::default().background_color().unwrap().is_none());
    }
}
