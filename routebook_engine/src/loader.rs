//! Guide loading and sub-file merging.
//!
//! A guide document may inline its content or reference separate JSON files
//! for the introduction, acknowledgements, and chapters. The main document
//! failing to load is fatal; any referenced sub-file failing is degradation,
//! logged and omitted, so one broken chapter file never takes the whole
//! guide down.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use routebook_data::{Chapter, ContentNode, GuideDoc, validate_guide};

use crate::bridge::FileBridge;

/// Load a guide document and resolve its file references.
///
/// Referenced files resolve relative to the main document's directory.
///
/// # Errors
/// Returns an error if the main document cannot be read or parsed.
pub fn load_guide(path: &Path, bridge: &dyn FileBridge) -> Result<GuideDoc> {
    let raw = bridge
        .read(path)
        .with_context(|| format!("loading guide {}", path.display()))?;
    let mut doc: GuideDoc =
        serde_json::from_str(&raw).with_context(|| format!("parsing guide {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));

    if let Some(file) = doc.introduction_file.clone() {
        match load_nodes(bridge, &base.join(&file)) {
            Ok(nodes) => doc.introduction = Some(nodes),
            Err(err) => warn!("skipping introduction file '{file}': {err:#}"),
        }
    }
    if let Some(file) = doc.acknowledgements_file.clone() {
        match load_nodes(bridge, &base.join(&file)) {
            Ok(nodes) => doc.acknowledgements = Some(nodes),
            Err(err) => warn!("skipping acknowledgements file '{file}': {err:#}"),
        }
    }
    if let Some(files) = doc.chapter_files.clone() {
        let mut chapters = doc.chapters.take().unwrap_or_default();
        for file in files {
            match load_chapter_file(bridge, &base.join(&file)) {
                Ok(chapter) => chapters.push(chapter),
                Err(err) => warn!("skipping chapter file '{file}': {err:#}"),
            }
        }
        doc.chapters = Some(chapters);
    }

    for issue in validate_guide(&doc) {
        warn!("guide issue: {issue}");
    }
    info!(
        "loaded guide '{}' with {} chapter(s)",
        doc.title,
        doc.chapters.as_deref().map_or(0, <[Chapter]>::len)
    );
    Ok(doc)
}

fn load_nodes(bridge: &dyn FileBridge, path: &Path) -> Result<Vec<ContentNode>> {
    let raw = bridge.read(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_chapter_file(bridge: &dyn FileBridge, path: &Path) -> Result<Chapter> {
    let raw = bridge.read(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
