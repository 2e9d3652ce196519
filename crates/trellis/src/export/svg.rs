//! SVG rendering of a positioned merge diagram.
//!
//! Cells are drawn as labelled rectangles and connectors as straight lines.
//! Geometry is computed in the native layout frame and mapped onto the
//! screen through an [`OrientedFrame`] right before it is written.

mod connector;

use std::io;

use log::{debug, info};
use svg::{
    Document,
    node::element::{Group, Line, Rectangle, Text},
};

use trellis_core::{
    color::Color,
    geometry::{Insets, Point, Size},
    orientation::{FrameTransform, Orientation, OrientedFrame},
};

use connector::{Segment, SegmentKind};

use crate::{
    config::{LayoutConfig, LinkerConfig, StyleConfig},
    export::{self, CellLabel, Exporter},
    layout::Layout,
    structure::MergeGraph,
};

const FONT_SIZE: f32 = 14.0;
const STROKE_WIDTH: f32 = 1.5;

/// Builder for creating an [`Svg`] exporter.
///
/// # Examples
///
/// ```
/// use trellis::{
///     config::{LayoutConfig, StyleConfig},
///     export::svg::SvgBuilder,
/// };
///
/// let layout = LayoutConfig::default();
/// let style = StyleConfig::default();
/// let svg = SvgBuilder::new(&layout).with_style(&style).build();
/// assert!(svg.is_ok());
/// ```
pub struct SvgBuilder<'a> {
    layout: &'a LayoutConfig,
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    /// Creates a builder for cells and connectors sized by `layout`.
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self {
            layout,
            style: None,
        }
    }

    /// Sets the style; the default style is used otherwise.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Builds the exporter, resolving every configured color.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);
        let colors = style.colors();

        Ok(Svg {
            cell: self.layout.cell().size(),
            linker: *self.layout.linker(),
            orientation: style.orientation(),
            need_bus: style.need_bus(),
            padding: style.padding(),
            label_key: style.label_key().to_string(),
            background: style.background_color().map_err(export::Error::Render)?,
            cell_color: colors.cell().map_err(export::Error::Render)?,
            bus_color: colors.bus().map_err(export::Error::Render)?,
            input_color: colors.input().map_err(export::Error::Render)?,
            output_color: colors.output().map_err(export::Error::Render)?,
        })
    }
}

/// SVG exporter for merge diagrams.
#[derive(Debug, Clone)]
pub struct Svg {
    cell: Size,
    linker: LinkerConfig,
    orientation: Orientation,
    need_bus: bool,
    padding: Insets,
    label_key: String,
    background: Option<Color>,
    cell_color: Color,
    bus_color: Color,
    input_color: Color,
    output_color: Color,
}

impl Svg {
    /// Renders the positioned `graph` into an SVG document.
    pub fn render<P: CellLabel>(&self, graph: &MergeGraph<P>, layout: &Layout) -> Document {
        let frame = OrientedFrame::new(self.orientation, layout.origin(), layout.size(), self.cell);
        let canvas = frame.canvas_size();
        let svg_size = canvas.add_padding(self.padding);
        debug!(
            orientation:% = self.orientation,
            width = svg_size.width(),
            height = svg_size.height();
            "SVG canvas sized"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background),
            );
        }

        let mut connectors = Group::new().set("stroke-width", STROKE_WIDTH);
        for segment in connector::segments(graph, self.cell, &self.linker, self.need_bus) {
            connectors = connectors.add(self.render_segment(&frame, segment));
        }

        let mut cells = Group::new();
        for cell in graph.cells() {
            let label = cell
                .payload()
                .label(&self.label_key)
                .unwrap_or_else(|| cell.id().to_string());
            cells = cells.add(self.render_cell(&frame, cell.position(), &label));
        }

        let main_group = Group::new()
            .set(
                "transform",
                format!("translate({}, {})", self.padding.left(), self.padding.top()),
            )
            .add(connectors)
            .add(cells);

        doc.add(main_group)
    }

    fn render_segment(&self, frame: &impl FrameTransform, segment: Segment) -> Line {
        let color = match segment.kind {
            SegmentKind::Output => &self.output_color,
            SegmentKind::Bus => &self.bus_color,
            SegmentKind::Input => &self.input_color,
        };
        let from = frame.map_point(segment.from);
        let to = frame.map_point(segment.to);

        Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", color)
    }

    fn render_cell(&self, frame: &impl FrameTransform, top_left: Point, label: &str) -> Group {
        let bounds = frame.map_cell(top_left);
        let center = Point::new(
            bounds.min_x() + bounds.width() / 2.0,
            bounds.min_y() + bounds.height() / 2.0,
        );

        let rect = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", "white")
            .set("stroke", &self.cell_color)
            .set("stroke-width", STROKE_WIDTH);

        let text = Text::new(label)
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "Arial")
            .set("font-size", FONT_SIZE);

        Group::new().add(rect).add(text)
    }
}

impl Exporter for Svg {
    fn export_layout<P: CellLabel>(
        &self,
        graph: &MergeGraph<P>,
        layout: &Layout,
        out: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render(graph, layout);
        debug!("SVG document rendered");

        write!(out, "{doc}").map_err(export::Error::Io)?;
        info!(cells = graph.len(); "SVG written");
        Ok(())
    }
}
