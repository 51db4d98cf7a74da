//! Viewer settings and loader.
//!
//! Settings come from a `settings.toml` next to the guide (or the current
//! directory). Missing or unparsable files fall back to hardcoded defaults
//! so the viewer always starts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wrap width for rendered text; 0 means use the terminal width.
    pub text_width: usize,
    /// Show only instructions relevant with the Cutscene Remover mod.
    pub csr_mode: bool,
    /// Label conditional branches and pending blitz outcomes in the output.
    pub show_condition_markers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_width: 0,
            csr_mode: false,
            show_condition_markers: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("no settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                info!("settings loaded from {}", path.display());
                settings
            },
            Err(err) => {
                warn!("failed to load settings from {}: {err:#}", path.display());
                Self::default()
            },
        }
    }

    /// Effective wrap width, consulting the terminal when unset.
    pub fn effective_width(&self) -> usize {
        if self.text_width > 0 {
            self.text_width
        } else {
            textwrap::termwidth().min(100)
        }
    }
}
