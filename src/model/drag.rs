//! Drag session state
//!
//! A [`DropAdorner`] tracks which tab group the pointer is over and which zone
//! of it is hovered. Classification is memoized on (bounds, pointer), and a
//! redraw is only requested when the highlighted zone actually changes.

use crate::commands::Cmd;
use crate::geometry::{classify, zone_highlight, DropZone, Point, Rect};

use super::node::NodeKey;
use super::tool::ToolKey;

/// Zone classifier state for the tab group under the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropAdorner {
    target: Option<NodeKey>,
    bounds: Rect,
    point: Option<Point>,
    zone: DropZone,
}

impl DropAdorner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<NodeKey> {
        self.target
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn zone(&self) -> DropZone {
        self.zone
    }

    /// Pointer moved over (possibly another) target.
    ///
    /// A new target always re-classifies and redraws, since the highlight
    /// moves even if the zone name stays the same.
    pub fn update_target(
        &mut self,
        target: NodeKey,
        bounds: Rect,
        point: Option<Point>,
    ) -> Option<Cmd> {
        if self.target != Some(target) {
            self.target = Some(target);
            self.bounds = bounds;
            self.point = point;
            self.zone = classify(bounds, point);
            return Some(Cmd::Redraw);
        }
        self.update(bounds, point)
    }

    /// Pointer moved within the current target
    pub fn update_pointer(&mut self, point: Option<Point>) -> Option<Cmd> {
        self.update(self.bounds, point)
    }

    fn update(&mut self, bounds: Rect, point: Option<Point>) -> Option<Cmd> {
        if bounds == self.bounds && point == self.point {
            return None;
        }
        self.bounds = bounds;
        self.point = point;

        let zone = classify(bounds, point);
        if zone == self.zone {
            return None;
        }
        tracing::trace!(?zone, "drop zone changed");
        self.zone = zone;
        Some(Cmd::Redraw)
    }

    /// Pointer left the target
    pub fn clear(&mut self) -> Option<Cmd> {
        let had_zone = self.zone != DropZone::None;
        *self = Self::default();
        Cmd::redraw_if(had_zone)
    }

    /// Rectangle to highlight for the hovered zone, if any
    pub fn highlight_rect(&self) -> Option<Rect> {
        match self.zone {
            DropZone::None => None,
            zone => Some(zone_highlight(self.bounds, zone)),
        }
    }
}

/// An in-flight drag of one tool
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub tool: ToolKey,
    pub adorner: DropAdorner,
}

impl DragSession {
    pub fn new(tool: ToolKey) -> Self {
        Self {
            tool,
            adorner: DropAdorner::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_first_target_redraws() {
        let mut adorner = DropAdorner::new();
        let target = NodeKey::next();
        let cmd = adorner.update_target(target, bounds(), Some(Point::new(50.0, 50.0)));
        assert_eq!(cmd, Some(Cmd::Redraw));
        assert_eq!(adorner.zone(), DropZone::Center);
        assert_eq!(adorner.target(), Some(target));
    }

    #[test]
    fn test_same_input_is_a_no_op() {
        let mut adorner = DropAdorner::new();
        let target = NodeKey::next();
        let p = Some(Point::new(10.0, 50.0));
        adorner.update_target(target, bounds(), p);

        let before = adorner.clone();
        assert_eq!(adorner.update_target(target, bounds(), p), None);
        assert_eq!(adorner, before);
    }

    #[test]
    fn test_redraw_only_on_zone_change() {
        let mut adorner = DropAdorner::new();
        adorner.update_target(NodeKey::next(), bounds(), Some(Point::new(10.0, 50.0)));
        assert_eq!(adorner.zone(), DropZone::Left);

        // Still Left
        assert_eq!(adorner.update_pointer(Some(Point::new(12.0, 40.0))), None);
        // Now Right
        assert_eq!(
            adorner.update_pointer(Some(Point::new(90.0, 40.0))),
            Some(Cmd::Redraw)
        );
        assert_eq!(adorner.zone(), DropZone::Right);
    }

    #[test]
    fn test_clear_resets_zone() {
        let mut adorner = DropAdorner::new();
        adorner.update_target(NodeKey::next(), bounds(), Some(Point::new(50.0, 5.0)));
        assert_eq!(adorner.highlight_rect(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

        assert_eq!(adorner.clear(), Some(Cmd::Redraw));
        assert_eq!(adorner.zone(), DropZone::None);
        assert_eq!(adorner.highlight_rect(), None);
        assert_eq!(adorner.clear(), None);
    }
}
