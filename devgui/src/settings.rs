//! Persistence for window layout state.
//!
//! The overlay never touches the filesystem on its own. Automatic saving by
//! the UI library is disabled and the serialized layout text is routed
//! through a [`SettingsStore`] the host provides, so engines can keep it in
//! their own save path or config system. [`FileSettingsStore`] is a plain
//! file implementation for hosts without such a system.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::OverlayResult;

/// Backing storage for the serialized window layout.
pub trait SettingsStore {
    /// Load the previously saved layout text, or `None` if nothing was saved.
    fn load(&mut self) -> OverlayResult<Option<String>>;

    /// Persist the layout text.
    fn save(&mut self, data: &str) -> OverlayResult<()>;
}

/// Stores the layout in a single file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&mut self) -> OverlayResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, data: &str) -> OverlayResult<()> {
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory store, useful in tests and for hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    data: Option<String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved layout text, if any.
    pub fn contents(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&mut self) -> OverlayResult<Option<String>> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &str) -> OverlayResult<()> {
        self.data = Some(data.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemorySettingsStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("[Window][Demo]\nPos=60,60\n").unwrap();
        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("[Window][Demo]\nPos=60,60\n")
        );
    }

    #[test]
    fn file_store_missing_file_is_not_an_error() {
        let mut store = FileSettingsStore::new("/nonexistent/devgui-layout.ini");
        assert!(store.load().unwrap().is_none());
    }
}
