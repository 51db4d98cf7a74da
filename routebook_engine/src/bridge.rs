//! Host file access behind a trait seam.
//!
//! Everything the engine reads or writes goes through [`FileBridge`], so
//! tests can substitute an in-memory bridge and an embedding host can route
//! file access however it likes. [`FsBridge`] is the plain filesystem
//! implementation used by the terminal viewer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use routebook_data::Chapter;

/// Named-file read/write access provided by the host.
pub trait FileBridge {
    /// Read the full contents of a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> Result<String>;

    /// Write `contents` to a file, replacing any existing contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// [`FileBridge`] over the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBridge;

impl FileBridge for FsBridge {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
    }
}

/// Persist a chapter as pretty-printed JSON through the bridge.
///
/// Nodes the engine does not recognize round-trip untouched, so saving a
/// chapter loaded from a newer authoring tool loses nothing.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_chapter(bridge: &dyn FileBridge, path: &Path, chapter: &Chapter) -> Result<()> {
    let json = serde_json::to_string_pretty(chapter)
        .with_context(|| format!("serializing chapter '{}'", chapter.id))?;
    bridge.write(path, &json)
}

/// Load a chapter from JSON through the bridge.
///
/// # Errors
/// Returns an error if the read or the parse fails.
pub fn load_chapter(bridge: &dyn FileBridge, path: &Path) -> Result<Chapter> {
    let raw = bridge.read(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing chapter {}", path.display()))
}
