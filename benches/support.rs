//! Shared helpers for benchmarks

use dockyard::model::{
    DockHostRoot, DockLayoutRoot, DockNode, Orientation, SplitNode, TabNode, Tool,
};

/// Balanced tree of alternating splits, `depth` levels deep, with
/// `tools_per_group` tools in every leaf tab group
#[allow(dead_code)]
pub fn make_tree(depth: usize, tools_per_group: usize) -> DockNode<u32> {
    fn build(
        depth: usize,
        tools: usize,
        orientation: Orientation,
        next_id: &mut usize,
    ) -> DockNode<u32> {
        *next_id += 1;
        let id = format!("n{}", next_id);
        if depth == 0 {
            return (0..tools)
                .fold(TabNode::new().with_id(id.clone()), |group, i| {
                    group.with_tool(Tool::with_id(format!("{}-t{}", id, i)).with_attached(i as u32))
                })
                .into();
        }
        let other = match orientation {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        };
        SplitNode::new(orientation)
            .with_id(id)
            .with_child(build(depth - 1, tools, other, next_id))
            .with_child(build(depth - 1, tools, other, next_id))
            .with_sizes(vec![1.0, 1.0])
            .into()
    }
    let mut next_id = 0;
    build(depth, tools_per_group, Orientation::Horizontal, &mut next_id)
}

#[allow(dead_code)]
pub fn make_root(depth: usize, tools_per_group: usize) -> DockLayoutRoot<u32> {
    DockLayoutRoot::from_host(DockHostRoot::new(make_tree(depth, tools_per_group)))
}
