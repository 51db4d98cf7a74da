//! Top-level display assembly: banners, table of contents, tracker pane,
//! and the loading / error / empty states.

use colored::Colorize;

use crate::session::SessionState;
use crate::style::GuideStyle;
use crate::tracker::Tracker;

/// Banner shown once when the guide opens.
pub fn title_banner(title: &str, width: usize) -> String {
    let rule = "═".repeat(width.min(72));
    format!("{}\n{}\n{}", rule.dim_style(), title.banner_style(), rule.dim_style())
}

/// Header printed above each revealed section.
pub fn section_banner(title: &str, width: usize) -> String {
    let rule = "─".repeat(width.min(72));
    format!("{}\n{}", title.chapter_style(), rule.dim_style())
}

/// Table of contents with reveal and position markers.
pub fn toc(state: &SessionState) -> String {
    let mut out = String::from("Sections:\n");
    for id in state.nav_order() {
        let title = state.section_title(&id).unwrap_or_else(|| id.clone());
        let marker = if state.current.as_deref() == Some(id.as_str()) {
            ">"
        } else if state.revealed.contains(&id) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("  {marker} {} {title}\n", id.as_str().dim_style()));
    }
    out.push_str(&format!("{}\n", "> current  * revealed".note_style()));
    out
}

/// Tracker pane: resources, flags, applied-update count.
pub fn tracker_pane(tracker: &Tracker) -> String {
    let mut out = String::from("Tracker\n");

    let mut resources: Vec<_> = tracker.resources.iter().collect();
    resources.sort_by(|a, b| a.0.cmp(b.0));
    if resources.is_empty() {
        out.push_str(&format!("  {}\n", "no resources tracked yet".note_style()));
    }
    for (name, quantity) in resources {
        out.push_str(&format!("  {name}: {}\n", quantity.to_string().gain_style()));
    }

    let mut flags: Vec<_> = tracker.flags.iter().collect();
    flags.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in flags {
        let state = if *value { "on".gain_style() } else { "off".spend_style() };
        out.push_str(&format!("  {} {state}\n", name.as_str().flag_style()));
    }

    out.push_str(&format!(
        "  {}\n",
        format!("{} auto update(s) applied", tracker.applied_update_ids.len()).note_style()
    ));
    out
}

/// Shown when the guide has no navigable sections at all.
pub fn empty_state() -> String {
    format!("{}", "This guide has no sections to show.".note_style())
}

/// Shown when the guide could not be loaded.
pub fn error_state(err: &anyhow::Error) -> String {
    format!("{} {err:#}", "Failed to load guide:".error_style())
}

pub fn help_text() -> String {
    let lines = [
        ("next (n, more)", "reveal the next section"),
        ("jump <id> (j)", "jump to a section, revealing up to it"),
        ("passed", "mark the current section passed (applies auto pickups)"),
        ("toc", "list sections"),
        ("tracker (t)", "show tracked resources and flags"),
        ("add <res> <n>", "adjust a resource by a delta"),
        ("set <res> <n>", "set a resource"),
        ("flag <name> [on|off|toggle]", "set or flip a flag"),
        ("csr on|off", "toggle Cutscene Remover instructions"),
        ("markers on|off", "toggle conditional branch markers"),
        ("refresh", "re-render the current section"),
        ("save", "save the tracker"),
        ("quit (q)", "exit"),
    ];
    let mut out = String::from("Commands:\n");
    for (cmd, desc) in lines {
        out.push_str(&format!("  {:<30} {desc}\n", cmd.bold()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebook_data::{Chapter, ContentNode, GuideDoc};

    #[test]
    fn toc_marks_current_and_revealed() {
        colored::control::set_override(false);
        let guide = GuideDoc {
            title: "Any%".into(),
            chapters: Some(vec![
                Chapter { id: "ch1".into(), title: "Besaid".into(), content: vec![ContentNode::text("a")] },
                Chapter { id: "ch2".into(), title: "Kilika".into(), content: vec![ContentNode::text("b")] },
            ]),
            ..GuideDoc::default()
        };
        let state = SessionState::new(guide, Tracker::new());
        let out = toc(&state);
        assert!(out.contains("> ch1 Besaid"));
        assert!(out.contains("  ch2 Kilika"));
    }

    #[test]
    fn tracker_pane_lists_sorted_resources() {
        colored::control::set_override(false);
        let mut tracker = Tracker::new();
        tracker.set_resource("Potion", 4);
        tracker.set_resource("Gil", 300);
        let out = tracker_pane(&tracker);
        let gil = out.find("Gil").unwrap();
        let potion = out.find("Potion").unwrap();
        assert!(gil < potion);
    }
}
