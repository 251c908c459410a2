//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host application should perform after
//! an update. The layout core only ever asks for redraws.

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the dock area (zone highlight, tree shape, flags)
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// `Some(Redraw)` when `changed`, the usual return of an update handler
    pub fn redraw_if(changed: bool) -> Option<Cmd> {
        changed.then_some(Cmd::Redraw)
    }
}
