//! Screen orientation of a merge diagram.
//!
//! The layout engine always works in its native frame: levels grow along
//! +Y and cells of one level spread along +X, with the roots on top. The
//! [`Orientation`] names where the roots end up on screen, and
//! [`OrientedFrame`] maps native coordinates onto that screen frame. The
//! mapping is applied only when final coordinates are handed to a renderer.
//!
//! ```text
//!   top          bottom        left           right
//!   root          leaf         root ─► leaf   leaf ◄─ root
//!    │             ▲
//!    ▼             │
//!   leaf          root
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::geometry::{Bounds, Point, Size};

/// Side of the canvas the root cells are placed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Orientation {
    /// Returns `true` when cells of the same level are laid out horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Top | Orientation::Bottom)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Top => "top",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Orientation::Top),
            "bottom" => Ok(Orientation::Bottom),
            "left" => Ok(Orientation::Left),
            "right" => Ok(Orientation::Right),
            other => Err(format!(
                "unknown orientation `{other}`; use top, bottom, left or right"
            )),
        }
    }
}

/// Transform from the native layout frame to a renderer's frame.
///
/// Renderers only talk to this trait, so alternative projections can be
/// plugged in without touching the layout math.
pub trait FrameTransform {
    /// Maps a native point to the renderer frame.
    fn map_point(&self, point: Point) -> Point;

    /// Maps the cell whose native top-left corner is `top_left` to its
    /// on-screen bounds.
    fn map_cell(&self, top_left: Point) -> Bounds;

    /// Returns the canvas size in the renderer frame.
    fn canvas_size(&self) -> Size;
}

/// [`FrameTransform`] for one of the four [`Orientation`]s.
///
/// Native coordinates are first shifted so that `origin` (the minimum
/// corner of all cells) lands on `(0, 0)`, then rotated or mirrored inside
/// the native canvas `extent`.
#[derive(Debug, Clone, Copy)]
pub struct OrientedFrame {
    orientation: Orientation,
    origin: Point,
    extent: Size,
    cell: Size,
}

impl OrientedFrame {
    /// Creates a frame for a layout.
    ///
    /// # Arguments
    ///
    /// * `orientation` - Side of the canvas the roots are drawn on.
    /// * `origin` - Minimum corner of all cell positions in the native frame.
    /// * `extent` - Native canvas size, cell dimensions included.
    /// * `cell` - Native cell size.
    pub fn new(orientation: Orientation, origin: Point, extent: Size, cell: Size) -> Self {
        Self {
            orientation,
            origin,
            extent,
            cell,
        }
    }

    /// Returns the orientation of this frame.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl FrameTransform for OrientedFrame {
    fn map_point(&self, point: Point) -> Point {
        let local = point.sub_point(self.origin);
        let (x, y) = (local.x(), local.y());
        let (width, height) = (self.extent.width(), self.extent.height());

        match self.orientation {
            Orientation::Top => Point::new(x, y),
            Orientation::Bottom => Point::new(width - x, height - y),
            Orientation::Left => Point::new(y, width - x),
            Orientation::Right => Point::new(height - y, x),
        }
    }

    fn map_cell(&self, top_left: Point) -> Bounds {
        let bottom_right = Point::new(
            top_left.x() + self.cell.width(),
            top_left.y() + self.cell.height(),
        );
        Bounds::from_corners(self.map_point(top_left), self.map_point(bottom_right))
    }

    fn canvas_size(&self) -> Size {
        if self.orientation.is_horizontal() {
            self.extent
        } else {
            self.extent.transpose()
        }
    }
}
