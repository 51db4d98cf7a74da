//! The interactive read-eval-print loop for guide viewing.
//!
//! Reading a guide in a terminal replaces scroll physics with explicit
//! commands: `next` plays the role of scrolling to the bottom (revealing the
//! following section and marking the previous one passed), `jump` is the
//! table-of-contents click, and `refresh` re-renders in place after a
//! settings or tracker change.

use anyhow::Result;
use log::info;

use crate::command::{Command, Toggle, parse_command};
use crate::input::{InputEvent, InputManager};
use crate::render::{RenderContext, Renderer};
use crate::scope;
use crate::session::{Session, SessionCommand};
use crate::settings::Settings;
use crate::style::GuideStyle;
use crate::tracker;
use crate::view;

/// Run the viewer loop until the reader quits.
///
/// # Errors
/// Returns an error if terminal input fails unrecoverably.
pub fn run_repl(session: &mut Session, settings: &mut Settings) -> Result<()> {
    let width = settings.effective_width();
    println!("{}", view::title_banner(&session.state.guide.title, width));

    if session.state.revealed.is_empty() {
        println!("{}", view::empty_state());
    } else if let Some(first) = session.state.revealed.last().cloned() {
        print_section(session, settings, &first);
    }

    let mut input = InputManager::new();
    loop {
        let line = match input.read_line("routebook> ")? {
            InputEvent::Line(line) => line,
            InputEvent::Interrupted => continue,
            InputEvent::Eof => break,
        };
        if !handle_command(session, settings, &parse_command(&line)) {
            break;
        }
    }

    info!("session ended");
    Ok(())
}

/// Handle one parsed command. Returns `false` when the loop should exit.
pub fn handle_command(session: &mut Session, settings: &mut Settings, command: &Command) -> bool {
    match command {
        Command::Next => reveal_next(session, settings),
        Command::Jump(id) => jump_to(session, settings, id),
        Command::Passed => {
            if let Some(current) = session.state.current.clone() {
                mark_passed(session, &current);
            }
        },
        Command::Toc => println!("{}", view::toc(&session.state)),
        Command::Tracker => println!("{}", view::tracker_pane(&session.state.tracker)),
        Command::AddResource { name, delta } => {
            session.state.tracker.adjust_resource(name, *delta);
            println!("{name}: {}", session.state.tracker.resource(name));
        },
        Command::SetResource { name, quantity } => {
            session.state.tracker.set_resource(name, *quantity);
            println!("{name}: {}", session.state.tracker.resource(name));
        },
        Command::Flag { name, toggle } => {
            match toggle {
                Toggle::On => session.state.tracker.set_flag(name, true),
                Toggle::Off => session.state.tracker.set_flag(name, false),
                Toggle::Flip => session.state.tracker.toggle_flag(name),
            }
            let state = session.state.tracker.flag(name).unwrap_or(false);
            println!("{name}: {}", if state { "on" } else { "off" });
        },
        Command::Csr(enabled) => {
            settings.csr_mode = *enabled;
            refresh(session, settings);
        },
        Command::Markers(enabled) => {
            settings.show_condition_markers = *enabled;
            refresh(session, settings);
        },
        Command::Refresh => refresh(session, settings),
        Command::Save => match session.state.tracker.save_to(&tracker::default_tracker_path()) {
            Ok(()) => println!("tracker saved"),
            Err(err) => println!("{} {err:#}", "save failed:".error_style()),
        },
        Command::Help => println!("{}", view::help_text()),
        Command::Quit => return false,
        Command::Unknown => {
            println!("{}", "Unrecognized command. Try 'help'.".error_style());
        },
    }
    true
}

fn reveal_next(session: &mut Session, settings: &Settings) {
    let before = session.state.revealed.len();
    let previous = session.state.revealed.last().cloned();
    session.dispatch(&SessionCommand::RevealNext);

    if session.state.revealed.len() > before {
        // Scrolling onward means the reader passed the previous section.
        if let Some(prev) = previous
            && session.observer.passed(&prev).is_some()
        {
            session.dispatch(&SessionCommand::SectionPassed(prev));
        }
        if let Some(newest) = session.state.revealed.last().cloned() {
            session.dispatch(&SessionCommand::VisibilityChanged(vec![newest.clone()]));
            print_section(session, settings, &newest);
        }
    } else {
        println!("{}", "End of the guide.".note_style());
    }
}

fn jump_to(session: &mut Session, settings: &Settings, id: &str) {
    match session.state.resolve_section(id) {
        Ok(_) => {
            session.dispatch(&SessionCommand::JumpTo(id.to_string()));
            print_section(session, settings, id);
        },
        Err(err) => println!("{}", format!("{err}. Try 'toc'.").error_style()),
    }
}

fn mark_passed(session: &mut Session, id: &str) {
    if session.observer.passed(id).is_some() {
        session.dispatch(&SessionCommand::SectionPassed(id.to_string()));
        println!("{}", format!("Section '{id}' marked passed.").note_style());
    } else {
        println!("{}", format!("Section '{id}' was already passed.").note_style());
    }
}

fn refresh(session: &mut Session, settings: &Settings) {
    if let Some(current) = session.state.current.clone() {
        print_section(session, settings, &current);
    }
}

/// Render one section fresh: its numbering scopes are reset first so a
/// re-render never continues counters from the previous pass.
fn print_section(session: &mut Session, settings: &Settings, id: &str) {
    let Some((title, content)) = session.state.section_data(id) else {
        return;
    };
    session.numbering.reset_prefix(&scope::section_root(id));
    let width = settings.effective_width();
    println!("\n{}", view::section_banner(&title, width));
    let mut renderer = Renderer::new(&mut session.numbering, &session.state.tracker, settings);
    let body = renderer.render_nodes(&content, &RenderContext::section(id));
    println!("{body}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Tracker;
    use routebook_data::{
        Chapter, ContentNode, GuideDoc, ListItem, ResourceUpdateType, TrackedResource,
    };

    fn guide_with_pickup() -> GuideDoc {
        GuideDoc {
            title: "Any%".into(),
            chapters: Some(vec![
                Chapter {
                    id: "ch1".into(),
                    title: "Besaid".into(),
                    content: vec![ContentNode::ListItem(ListItem {
                        content: vec![ContentNode::text("grab the sphere")],
                        tracked_resource_updates: Some(vec![TrackedResource {
                            name: "Power Sphere".into(),
                            quantity: 2,
                            update_type: ResourceUpdateType::AutoGuaranteed,
                            id: "besaid_sphere".into(),
                            description: None,
                            condition: None,
                        }]),
                        ..ListItem::default()
                    })],
                },
                Chapter { id: "ch2".into(), title: "Kilika".into(), content: vec![ContentNode::text("sail")] },
            ]),
            ..GuideDoc::default()
        }
    }

    #[test]
    fn next_applies_auto_updates_from_the_passed_section() {
        colored::control::set_override(false);
        let mut session = Session::new(guide_with_pickup(), Tracker::new());
        let mut settings = Settings { text_width: 80, ..Settings::default() };

        handle_command(&mut session, &mut settings, &Command::Next);
        assert_eq!(session.state.tracker.resource("Power Sphere"), 2);

        // Revealing again cannot double-apply.
        handle_command(&mut session, &mut settings, &Command::Next);
        assert_eq!(session.state.tracker.resource("Power Sphere"), 2);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = Session::new(guide_with_pickup(), Tracker::new());
        let mut settings = Settings::default();
        assert!(!handle_command(&mut session, &mut settings, &Command::Quit));
    }

    #[test]
    fn tracker_commands_mutate_state() {
        let mut session = Session::new(guide_with_pickup(), Tracker::new());
        let mut settings = Settings::default();
        handle_command(
            &mut session,
            &mut settings,
            &Command::AddResource { name: "Gil".into(), delta: 500 },
        );
        handle_command(
            &mut session,
            &mut settings,
            &Command::Flag { name: "ZombieStrike".into(), toggle: Toggle::On },
        );
        assert_eq!(session.state.tracker.resource("Gil"), 500);
        assert_eq!(session.state.tracker.flag("ZombieStrike"), Some(true));
    }
}
