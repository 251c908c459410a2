//! Drop-zone geometry
//!
//! Classifies a pointer position relative to a drop target's bounds into one of
//! the five drop zones. Coordinates are whatever space the host uses, as long as
//! bounds and pointer share it.

/// Rectangle for zone calculations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A pointer position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Region of a drop target under the pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DropZone {
    #[default]
    None,
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

impl DropZone {
    /// Edge zones split the target; Center and None merge into it
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            DropZone::Left | DropZone::Right | DropZone::Top | DropZone::Bottom
        )
    }

    /// Whether a new pane goes before the target (Left/Top) or after it
    pub fn is_leading(self) -> bool {
        matches!(self, DropZone::Left | DropZone::Top)
    }
}

/// Classify `point` against `bounds`.
///
/// The outer quarter of each axis is an edge zone. Horizontal edges win over
/// vertical ones, so a corner point is Left or Right, never Top or Bottom.
pub fn classify(bounds: Rect, point: Option<Point>) -> DropZone {
    let Some(pos) = point else {
        return DropZone::None;
    };

    let left_zone = bounds.x + bounds.width * 0.25;
    let right_zone = bounds.x + bounds.width * 0.75;
    let top_zone = bounds.y + bounds.height * 0.25;
    let bottom_zone = bounds.y + bounds.height * 0.75;

    if pos.x < left_zone {
        DropZone::Left
    } else if pos.x > right_zone {
        DropZone::Right
    } else if pos.y < top_zone {
        DropZone::Top
    } else if pos.y > bottom_zone {
        DropZone::Bottom
    } else {
        DropZone::Center
    }
}

/// Preview rectangle for a zone: the half of the target the new pane would
/// occupy, or the centered half-size rect for a merge into the group.
pub fn zone_highlight(bounds: Rect, zone: DropZone) -> Rect {
    let half_w = bounds.width * 0.5;
    let half_h = bounds.height * 0.5;
    match zone {
        DropZone::Left => Rect::new(bounds.x, bounds.y, half_w, bounds.height),
        DropZone::Right => Rect::new(bounds.x + half_w, bounds.y, half_w, bounds.height),
        DropZone::Top => Rect::new(bounds.x, bounds.y, bounds.width, half_h),
        DropZone::Bottom => Rect::new(bounds.x, bounds.y + half_h, bounds.width, half_h),
        DropZone::Center | DropZone::None => Rect::new(
            bounds.x + bounds.width * 0.25,
            bounds.y + bounds.height * 0.25,
            half_w,
            half_h,
        ),
    }
}
