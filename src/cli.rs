//! Command-line interface for inspecting and editing saved layouts
//!
//! Supports:
//! - Printing a layout as an indented outline
//! - Checking version, degenerate nodes and duplicate tool ids
//! - Normalizing a layout
//! - Moving a tool onto a drop zone of a tab group

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DockConfig;
use crate::geometry::DropZone;
use crate::layout::{
    build_view_model, DockLayout, DockLayoutNode, JsonLayoutManager, LayoutManager,
    CURRENT_MAJOR_VERSION,
};
use crate::model::{DockLayoutRoot, DockNode, Tool};

/// Inspect and edit docking layouts
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about = "Inspect and edit docking layouts")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the layout tree
    Show {
        /// Layout file (defaults to the configured layout)
        file: Option<PathBuf>,
    },
    /// Report problems; exits non-zero if any are found
    Check { file: Option<PathBuf> },
    /// Remove empty groups and single-child splits
    Normalize {
        file: Option<PathBuf>,
        /// Write here instead of overwriting the input
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Drop a tool onto a zone of a tab group
    Move {
        file: Option<PathBuf>,
        /// Id of the tool to move
        #[arg(long)]
        tool: String,
        /// Id of the target tab group
        #[arg(long)]
        target: String,
        #[arg(long, value_enum)]
        zone: ZoneArg,
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Drop zone as spelled on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneArg {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl From<ZoneArg> for DropZone {
    fn from(zone: ZoneArg) -> Self {
        match zone {
            ZoneArg::Left => DropZone::Left,
            ZoneArg::Right => DropZone::Right,
            ZoneArg::Top => DropZone::Top,
            ZoneArg::Bottom => DropZone::Bottom,
            ZoneArg::Center => DropZone::Center,
        }
    }
}

/// Run a parsed command. Returns false when `check` found problems.
pub fn run(args: CliArgs, config: &DockConfig, out: &mut dyn Write) -> Result<bool> {
    match args.command {
        Command::Show { file } => {
            let path = resolve_file(file, config)?;
            let root = load_root(&path, config)?;
            write!(out, "{}", outline(root.root()))?;
            Ok(true)
        }

        Command::Check { file } => {
            let path = resolve_file(file, config)?;
            let layout = JsonLayoutManager::new(config.pretty_json)
                .load_from_path(&path)
                .with_context(|| format!("Failed to read layout {}", path.display()))?;
            let problems = check_layout(&layout);
            for problem in &problems {
                writeln!(out, "{}: {}", path.display(), problem)?;
            }
            if problems.is_empty() {
                writeln!(out, "{}: ok", path.display())?;
            }
            Ok(problems.is_empty())
        }

        Command::Normalize { file, output } => {
            let path = resolve_file(file, config)?;
            let mut root = load_root(&path, config)?;
            let report = root.normalize();
            let dest = output.unwrap_or(path);
            root.save_layout_to_path(&dest)
                .with_context(|| format!("Failed to write layout {}", dest.display()))?;
            writeln!(out, "{} repairs, wrote {}", report.steps.len(), dest.display())?;
            Ok(true)
        }

        Command::Move {
            file,
            tool,
            target,
            zone,
            output,
        } => {
            let path = resolve_file(file, config)?;
            let mut root = load_root(&path, config)?;
            let tool_key = root
                .root()
                .find_tool(&tool)
                .map(Tool::key)
                .ok_or_else(|| anyhow!("No tool with id '{}'", tool))?;
            let target_key = root
                .root()
                .find_node(&target)
                .map(DockNode::key)
                .ok_or_else(|| anyhow!("No node with id '{}'", target))?;

            let outcome = root
                .drop_tool(tool_key, target_key, zone.into())
                .with_context(|| format!("Failed to move '{}' onto '{}'", tool, target))?;
            let dest = output.unwrap_or(path);
            root.save_layout_to_path(&dest)
                .with_context(|| format!("Failed to write layout {}", dest.display()))?;
            writeln!(out, "{:?}, wrote {}", outcome, dest.display())?;
            Ok(true)
        }
    }
}

fn resolve_file(file: Option<PathBuf>, config: &DockConfig) -> Result<PathBuf> {
    match file.or_else(|| config.layout_path()) {
        Some(path) => Ok(path),
        None => bail!("No layout file given and no config directory available"),
    }
}

fn load_root(path: &Path, config: &DockConfig) -> Result<DockLayoutRoot<()>> {
    let mut root = DockLayoutRoot::from_config(config);
    root.load_layout_from_path(path)
        .with_context(|| format!("Failed to load layout {}", path.display()))?;
    Ok(root)
}

/// Problems found in a persisted layout, one line each
pub fn check_layout(layout: &DockLayout) -> Vec<String> {
    let mut problems = Vec::new();

    if layout.major_version != CURRENT_MAJOR_VERSION {
        problems.push(format!(
            "unsupported version {}.{}",
            layout.major_version, layout.minor_version
        ));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    if let Some(node) = &layout.root_node {
        count_tool_ids(node, &mut seen);
    }
    let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (id, count) in duplicates {
        problems.push(format!("tool id '{}' appears {} times", id, count));
    }

    match build_view_model::<()>(layout) {
        Ok(host) => {
            let root = host.root();
            root.visit(&mut |node| {
                if node.key() != root.key() && node.is_degenerate() {
                    problems.push(format!("degenerate node {}", describe(node)));
                }
            });
        }
        Err(err) if problems.is_empty() => problems.push(err.to_string()),
        Err(_) => {}
    }

    problems
}

fn count_tool_ids<'a>(node: &'a DockLayoutNode, seen: &mut HashMap<&'a str, usize>) {
    match node {
        DockLayoutNode::Split(split) => {
            for child in &split.children {
                count_tool_ids(child, seen);
            }
        }
        DockLayoutNode::Tab(tab) => {
            for tool in &tab.tools {
                *seen.entry(tool.id.as_str()).or_default() += 1;
            }
        }
    }
}

fn describe<C>(node: &DockNode<C>) -> String {
    let kind = if node.is_tab() { "tab" } else { "split" };
    match node.id() {
        Some(id) => format!("{} '{}'", kind, id),
        None => format!("{} {}", kind, node.key()),
    }
}

/// Indented outline of a tree, one node or tool per line
pub fn outline<C>(root: &DockNode<C>) -> String {
    fn walk<C>(node: &DockNode<C>, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match node {
            DockNode::Split(split) => {
                out.push_str(&format!(
                    "{}split {} {:?} {:?}\n",
                    indent,
                    split.id().unwrap_or("-"),
                    split.orientation(),
                    split.sizes()
                ));
                for child in split.children() {
                    walk(child, depth + 1, out);
                }
            }
            DockNode::Tab(tab) => {
                out.push_str(&format!("{}tab {}\n", indent, tab.id().unwrap_or("-")));
                for tool in tab.tabs() {
                    let mut flags = Vec::new();
                    if tool.is_selected() {
                        flags.push("selected");
                    }
                    if !tool.is_pinned() {
                        flags.push("unpinned");
                    }
                    if tool.is_closed() {
                        flags.push("closed");
                    }
                    out.push_str(&format!(
                        "{}  {} \"{}\" {}\n",
                        indent,
                        tool.id(),
                        tool.header(),
                        if flags.is_empty() {
                            String::new()
                        } else {
                            format!("[{}]", flags.join(", "))
                        }
                    ));
                }
            }
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}
