//! Resource and flag tracking across a run.
//!
//! The tracker holds consumable quantities (spheres, grenades, gil and the
//! like), boolean item/event flags, and the set of auto-update ids already
//! applied. The applied-id set is what makes "apply once when the runner
//! passes this point" survive re-renders and reloads; it is persisted with
//! the rest of the tracker state.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use routebook_data::{ResourceUpdateType, TrackedResource};

pub const TRACKER_FILE: &str = "tracker.json";

/// Mutable run state: resource quantities, flags, applied auto-update ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub resources: HashMap<String, i64>,
    pub flags: HashMap<String, bool>,
    pub applied_update_ids: HashSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity of a resource, 0 when never touched.
    pub fn resource(&self, name: &str) -> i64 {
        self.resources.get(name).copied().unwrap_or(0)
    }

    /// Adjust a resource by a signed delta. Quantities never go below zero.
    pub fn adjust_resource(&mut self, name: &str, delta: i64) {
        let current = self.resource(name);
        self.resources.insert(name.to_string(), (current + delta).max(0));
    }

    /// Set a resource to an absolute quantity, clamped at zero.
    pub fn set_resource(&mut self, name: &str, quantity: i64) {
        self.resources.insert(name.to_string(), quantity.max(0));
    }

    /// Flag state, `None` when the flag has never been set either way.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_string(), value);
    }

    pub fn toggle_flag(&mut self, name: &str) {
        let next = !self.flag(name).unwrap_or(false);
        self.flags.insert(name.to_string(), next);
    }

    /// Whether an auto update has already been counted.
    pub fn is_applied(&self, update_id: &str) -> bool {
        self.applied_update_ids.contains(update_id)
    }

    /// Apply a tracked update, respecting its update type.
    ///
    /// Automatic types (`auto_guaranteed` and the two consumption types)
    /// adjust the resource at most once per update id and return `true` the
    /// first time. User-confirmed types are never applied here; the REPL
    /// applies those through [`Tracker::adjust_resource`] after the runner
    /// confirms the actual quantity.
    pub fn apply_update(&mut self, update: &TrackedResource) -> bool {
        match update.update_type {
            ResourceUpdateType::AutoGuaranteed
            | ResourceUpdateType::ConsumptionImplicitGrid
            | ResourceUpdateType::ConsumptionExplicitFixed => {
                if !self.applied_update_ids.insert(update.id.clone()) {
                    return false;
                }
                self.adjust_resource(&update.name, update.quantity);
                true
            },
            ResourceUpdateType::UserConfirmRngGain
            | ResourceUpdateType::UserConfirmRngConsumption => false,
        }
    }

    /// Write the tracker as JSON to `path`, stamping the save time.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut stamped = self.clone();
        stamped.saved_at = OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .format(&Rfc3339)
            .ok();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&stamped).context("serializing tracker")?;
        fs::write(path, json).with_context(|| format!("writing tracker to {}", path.display()))?;
        info!("tracker saved to {}", path.display());
        Ok(())
    }

    /// Load tracker state from `path`, falling back to a fresh tracker when
    /// the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Tracker>(&raw) {
                Ok(tracker) => {
                    if let Some(stamp) = &tracker.saved_at {
                        info!("tracker restored from {} (saved {stamp})", path.display());
                    }
                    tracker
                },
                Err(err) => {
                    warn!("tracker file {} is unreadable, starting fresh: {err}", path.display());
                    Self::new()
                },
            },
            Err(err) => {
                warn!("could not read tracker file {}: {err}", path.display());
                Self::new()
            },
        }
    }
}

/// Default on-disk location for tracker state.
pub fn default_tracker_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("routebook")
        .join(TRACKER_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn auto_update(id: &str, name: &str, quantity: i64) -> TrackedResource {
        TrackedResource {
            name: name.into(),
            quantity,
            update_type: ResourceUpdateType::AutoGuaranteed,
            id: id.into(),
            description: None,
            condition: None,
        }
    }

    #[test]
    fn resources_clamp_at_zero() {
        let mut tracker = Tracker::new();
        tracker.adjust_resource("Potion", 3);
        tracker.adjust_resource("Potion", -10);
        assert_eq!(tracker.resource("Potion"), 0);
        tracker.set_resource("Potion", -2);
        assert_eq!(tracker.resource("Potion"), 0);
    }

    #[test]
    fn auto_update_applies_at_most_once() {
        let mut tracker = Tracker::new();
        let update = auto_update("u1", "Power Sphere", 2);
        assert!(tracker.apply_update(&update));
        assert!(!tracker.apply_update(&update));
        assert_eq!(tracker.resource("Power Sphere"), 2);
    }

    #[test]
    fn user_confirm_updates_are_not_auto_applied() {
        let mut tracker = Tracker::new();
        let update = TrackedResource {
            update_type: ResourceUpdateType::UserConfirmRngGain,
            ..auto_update("u2", "Grenade", 3)
        };
        assert!(!tracker.apply_update(&update));
        assert_eq!(tracker.resource("Grenade"), 0);
        assert!(!tracker.is_applied("u2"));
    }

    #[test]
    fn toggle_flag_starts_from_unset() {
        let mut tracker = Tracker::new();
        assert_eq!(tracker.flag("BlitzballGameWon_Luca"), None);
        tracker.toggle_flag("BlitzballGameWon_Luca");
        assert_eq!(tracker.flag("BlitzballGameWon_Luca"), Some(true));
    }

    #[test]
    fn save_and_reload_round_trips_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tracker.json");

        let mut tracker = Tracker::new();
        tracker.set_resource("Gil", 400);
        tracker.set_flag("ZombieStrike", true);
        tracker.apply_update(&auto_update("u3", "Speed Sphere", 1));
        tracker.save_to(&path).unwrap();

        let restored = Tracker::load_or_default(&path);
        assert_eq!(restored.resource("Gil"), 400);
        assert_eq!(restored.flag("ZombieStrike"), Some(true));
        assert!(restored.is_applied("u3"));
        assert!(restored.saved_at.is_some());
    }

    #[test]
    fn missing_or_corrupt_file_yields_fresh_tracker() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(Tracker::load_or_default(&missing), Tracker::new());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json at all").unwrap();
        assert_eq!(Tracker::load_or_default(&bad), Tracker::new());
    }
}
