//! Layout message handlers (split sizes, normalization)

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::{DockLayoutRoot, DockNode};

/// Handle layout messages
pub fn update_layout<C>(root: &mut DockLayoutRoot<C>, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::ResizeSplit { split, sizes } => {
            if sizes.iter().any(|w| !w.is_finite() || *w < 0.0) {
                tracing::warn!(%split, ?sizes, "ignoring invalid split sizes");
                return None;
            }
            let changed = root.edit(|node, events| {
                match node.node_mut(split).and_then(DockNode::as_split_mut) {
                    Some(target) => {
                        target.set_sizes(sizes, events);
                        !events.is_empty()
                    }
                    None => false,
                }
            });
            Cmd::redraw_if(changed)
        }

        LayoutMsg::Normalize => {
            let report = root.normalize();
            if !report.is_empty() {
                tracing::info!(steps = report.steps.len(), "normalized layout");
            }
            Cmd::redraw_if(!report.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DockHostRoot, Orientation, SplitNode, TabNode, Tool};

    #[test]
    fn test_resize_sets_sizes_once() {
        let mut root: DockLayoutRoot<()> = DockLayoutRoot::with_panels(["a", "b"]);
        let split = root.root().key();

        let msg = LayoutMsg::ResizeSplit {
            split,
            sizes: vec![1.0, 3.0],
        };
        assert_eq!(update_layout(&mut root, msg.clone()), Some(Cmd::Redraw));
        assert_eq!(update_layout(&mut root, msg), None);
        assert_eq!(root.root().as_split().map(SplitNode::sizes), Some(&[1.0, 3.0][..]));
    }

    #[test]
    fn test_resize_rejects_negative_weight() {
        let mut root: DockLayoutRoot<()> = DockLayoutRoot::with_panels(["a", "b"]);
        let split = root.root().key();
        let msg = LayoutMsg::ResizeSplit {
            split,
            sizes: vec![-1.0, 1.0],
        };
        assert_eq!(update_layout(&mut root, msg), None);
        assert!(root.root().as_split().map(SplitNode::sizes).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_removes_empty_groups() {
        let tree = SplitNode::new(Orientation::Horizontal)
            .with_child(TabNode::new().with_id("empty"))
            .with_child(TabNode::new().with_tool(Tool::with_id("t")))
            .with_child(TabNode::new().with_tool(Tool::with_id("u")));
        let mut root: DockLayoutRoot<()> =
            DockLayoutRoot::from_host(DockHostRoot::new(tree.into()));

        assert_eq!(update_layout(&mut root, LayoutMsg::Normalize), Some(Cmd::Redraw));
        assert!(root.root().find_node("empty").is_none());
        assert_eq!(update_layout(&mut root, LayoutMsg::Normalize), None);
    }
}
