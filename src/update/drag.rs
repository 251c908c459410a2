//! Drag message handlers (zone tracking, drop)

use crate::commands::Cmd;
use crate::messages::DragMsg;
use crate::model::{DockLayoutRoot, DragSession};
use crate::update::DropOutcome;

/// Handle drag messages
pub fn update_drag<C>(root: &mut DockLayoutRoot<C>, msg: DragMsg) -> Option<Cmd> {
    match msg {
        DragMsg::Start { tool } => {
            if root.root().tool(tool).is_none() {
                tracing::debug!(%tool, "drag started for unknown tool");
                return None;
            }
            root.set_drag(Some(DragSession::new(tool)));
            None
        }

        DragMsg::Over {
            target,
            bounds,
            pointer,
        } => root
            .drag_mut()?
            .adorner
            .update_target(target, bounds, pointer),

        DragMsg::Move { pointer } => root.drag_mut()?.adorner.update_pointer(Some(pointer)),

        DragMsg::Leave => root.drag_mut()?.adorner.clear(),

        DragMsg::Drop => {
            let session = root.set_drag(None)?;
            let Some(target) = session.adorner.target() else {
                return None;
            };
            match root.drop_tool(session.tool, target, session.adorner.zone()) {
                Ok(outcome) => {
                    tracing::debug!(?outcome, "drop finished");
                    Cmd::redraw_if(outcome != DropOutcome::Ignored)
                }
                Err(err) => {
                    tracing::warn!(%err, tool = %session.tool, %target, "drop failed");
                    Some(Cmd::Redraw)
                }
            }
        }

        DragMsg::Cancel => {
            let session = root.set_drag(None)?;
            Cmd::redraw_if(session.adorner.highlight_rect().is_some())
        }
    }
}
