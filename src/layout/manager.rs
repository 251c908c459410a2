//! Layout managers - reading and writing persisted layouts
//!
//! A [`LayoutManager`] turns a byte stream into a [`DockLayout`] and back.
//! [`JsonLayoutManager`] is the stock implementation.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::DockError;

use super::DockLayout;

/// Pluggable layout persistence
pub trait LayoutManager: fmt::Debug {
    fn load(&self, reader: &mut dyn Read) -> Result<DockLayout, DockError>;

    fn save(&self, layout: &DockLayout, writer: &mut dyn Write) -> Result<(), DockError>;

    fn load_from_path(&self, path: &Path) -> Result<DockLayout, DockError> {
        check_path(path)?;
        let mut reader = BufReader::new(File::open(path)?);
        self.load(&mut reader)
    }

    /// Save to `path`, creating its parent directory if needed
    fn save_to_path(&self, layout: &DockLayout, path: &Path) -> Result<(), DockError> {
        check_path(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(layout, &mut writer)?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), "saved layout");
        Ok(())
    }
}

fn check_path(path: &Path) -> Result<(), DockError> {
    if path.as_os_str().is_empty() {
        return Err(DockError::invalid_argument("path", "path must not be empty"));
    }
    Ok(())
}

/// camelCase JSON, nulls omitted on write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonLayoutManager {
    /// Indent the output for humans
    pub pretty: bool,
}

impl Default for JsonLayoutManager {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonLayoutManager {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl LayoutManager for JsonLayoutManager {
    fn load(&self, reader: &mut dyn Read) -> Result<DockLayout, DockError> {
        let layout: Option<DockLayout> = serde_json::from_reader(reader)?;
        layout.ok_or(DockError::EmptyLayout)
    }

    fn save(&self, layout: &DockLayout, writer: &mut dyn Write) -> Result<(), DockError> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, layout)
        } else {
            serde_json::to_writer(&mut *writer, layout)
        };
        result.map_err(|e| {
            if e.is_io() {
                DockError::Io(e.into())
            } else {
                DockError::Parse(e)
            }
        })
    }
}
