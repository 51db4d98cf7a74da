//! Rendering of conditional blocks.
//!
//! Textual condition sources describe choices the runner resolves by
//! reading, so every branch is shown with its label. Tracker-backed sources
//! are resolved against live state and render exactly one branch; the
//! inactive branch neither renders nor advances list numbering, because each
//! branch numbers under its own slot scope.

use routebook_data::{Conditional, ConditionSource};

use super::{RenderContext, Renderer, blocks};
use crate::scope;
use crate::style::GuideStyle;

/// Flag name recording the Luca blitzball outcome.
pub const BLITZ_FLAG: &str = "BlitzballGameWon_Luca";

pub fn render(renderer: &mut Renderer, cond: &Conditional, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let mut parts: Vec<String> = Vec::new();

    match cond.condition_source {
        ConditionSource::Blitzballdetermination | ConditionSource::IfthenelseBlitzresult => {
            blitz(renderer, cond, &base, ctx, &mut parts);
        },
        ConditionSource::TextualDirectChoice | ConditionSource::TextualBlockOptions => {
            options(renderer, cond, &base, ctx, &mut parts);
        },
        ConditionSource::TextualInlineIfThen => {
            let condition = cond
                .text_condition
                .as_deref()
                .map(|text| renderer.render_nodes(text, &ctx.nested(scope::slot(&base, "cond"))))
                .filter(|rendered| !rendered.is_empty());
            let then = cond
                .then_content
                .as_deref()
                .map(|nodes| renderer.render_nodes(nodes, &ctx.nested(scope::slot(&base, "then"))))
                .filter(|rendered| !rendered.is_empty());
            if ctx.in_list_item {
                // Inside a list item the branch reads as one compact run,
                // not a stack of blocks.
                let mut line = ctx.indent();
                if let Some(condition) = &condition {
                    let prefix = format!("If {}:", condition.trim());
                    line.push_str(&format!("{} ", prefix.condition_label_style()));
                }
                if let Some(then) = &then {
                    line.push_str(then.trim_start());
                }
                if !line.trim().is_empty() {
                    parts.push(line);
                }
            } else {
                if let Some(condition) = condition {
                    parts.push(condition);
                }
                if let Some(then) = then {
                    parts.push(then);
                }
            }
            if cond.else_content.is_some() {
                parts.push(label("Otherwise:", ctx));
                push_slot(renderer, cond.else_content.as_deref(), "else", &base, ctx, &mut parts);
            }
        },
        ConditionSource::TrackedResourceCheck => {
            let holds = resource_check_holds(renderer, cond);
            if renderer.settings.show_condition_markers
                && let (Some(name), Some(cmp), Some(value)) =
                    (&cond.resource_name, cond.comparison, cond.value)
            {
                let current = renderer.tracker.resource(name);
                parts.push(label(
                    &format!("({name}: {current}, branch for {name} {} {value})", describe(cmp)),
                    ctx,
                ));
            }
            let (slot_content, slot_name) = if holds {
                (cond.content_to_show_if_true.as_deref(), "then")
            } else {
                (cond.content_to_show_if_false.as_deref(), "else")
            };
            push_slot(renderer, slot_content, slot_name, &base, ctx, &mut parts);
        },
        ConditionSource::AcquiredItemFlagCheck => {
            let holds = cond
                .flag_name
                .as_deref()
                .and_then(|name| renderer.tracker.flag(name))
                .unwrap_or(false);
            if renderer.settings.show_condition_markers
                && let Some(name) = &cond.flag_name
            {
                let state = if holds { "set" } else { "not set" };
                parts.push(label(&format!("({name} {state})"), ctx));
            }
            let (slot_content, slot_name) = if holds {
                (cond.content_to_show_if_true.as_deref(), "then")
            } else {
                (cond.content_to_show_if_false.as_deref(), "else")
            };
            push_slot(renderer, slot_content, slot_name, &base, ctx, &mut parts);
        },
    }

    push_slot(renderer, cond.then_content_for_all.as_deref(), "all", &base, ctx, &mut parts);
    if let Some(note) = &cond.additional_note {
        parts.push(format!("{}{}", ctx.indent(), note.note_style()));
    }
    push_slot(renderer, cond.notes.as_deref(), "notes", &base, ctx, &mut parts);
    if let Some(flags) = &cond.item_acquisition_flags {
        let lines = blocks::annotations(None, Some(flags), &format!("{}  ", ctx.indent()));
        if !lines.is_empty() {
            parts.push(lines);
        }
    }

    parts.join("\n")
}

fn blitz(
    renderer: &mut Renderer,
    cond: &Conditional,
    base: &str,
    ctx: &RenderContext,
    parts: &mut Vec<String>,
) {
    let outcome = renderer.tracker.flag(BLITZ_FLAG);
    match outcome {
        Some(true) => push_slot(renderer, cond.win_content.as_deref(), "win", base, ctx, parts),
        Some(false) => push_slot(renderer, cond.loss_content.as_deref(), "loss", base, ctx, parts),
        None => {
            // Outcome not recorded yet: show the win route as the default.
            if renderer.settings.show_condition_markers {
                parts.push(label("(blitzball result pending, showing the win route)", ctx));
            }
            push_slot(renderer, cond.win_content.as_deref(), "win", base, ctx, parts);
        },
    }
    push_slot(renderer, cond.both_content.as_deref(), "both", base, ctx, parts);
}

fn options(
    renderer: &mut Renderer,
    cond: &Conditional,
    base: &str,
    ctx: &RenderContext,
    parts: &mut Vec<String>,
) {
    let Some(options) = &cond.options else { return };
    let itemized = cond.display_as_itemized_condition.unwrap_or(false);
    for (i, option) in options.iter().enumerate() {
        // Itemized choices read as a bulleted menu of alternatives.
        let heading = if itemized {
            format!(
                "{}• {}",
                ctx.indent(),
                format!("If {}:", option.condition_text).condition_label_style()
            )
        } else {
            label(&format!("If {}:", option.condition_text), ctx)
        };
        parts.push(heading);
        let slot_ctx = ctx.nested(scope::child(base, "option", i));
        let rendered = renderer.render_nodes(&option.content, &slot_ctx);
        if !rendered.is_empty() {
            parts.push(rendered);
        }
    }
}

fn resource_check_holds(renderer: &Renderer, cond: &Conditional) -> bool {
    match (&cond.resource_name, cond.comparison, cond.value) {
        (Some(name), Some(cmp), Some(value)) => cmp.holds(renderer.tracker.resource(name), value),
        _ => false,
    }
}

fn push_slot(
    renderer: &mut Renderer,
    slot_content: Option<&[routebook_data::ContentNode]>,
    slot_name: &str,
    base: &str,
    ctx: &RenderContext,
    parts: &mut Vec<String>,
) {
    let Some(nodes) = slot_content else { return };
    let slot_ctx = ctx.nested(scope::slot(base, slot_name));
    let rendered = renderer.render_nodes(nodes, &slot_ctx);
    if !rendered.is_empty() {
        parts.push(rendered);
    }
}

fn label(text: &str, ctx: &RenderContext) -> String {
    format!("{}{}", ctx.indent(), text.condition_label_style())
}

fn describe(cmp: routebook_data::Comparison) -> &'static str {
    match cmp {
        routebook_data::Comparison::LessThan => "<",
        routebook_data::Comparison::GreaterThanOrEqualTo => ">=",
        routebook_data::Comparison::Equals => "==",
        routebook_data::Comparison::NotEquals => "!=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::ListNumbering;
    use crate::settings::Settings;
    use crate::tracker::Tracker;
    use routebook_data::{Comparison, ConditionalOption, ContentNode};

    fn plain_settings() -> Settings {
        colored::control::set_override(false);
        Settings { text_width: 80, show_condition_markers: false, ..Settings::default() }
    }

    fn empty_conditional(source: ConditionSource) -> Conditional {
        Conditional {
            condition_source: source,
            win_content: None,
            loss_content: None,
            both_content: None,
            display_as_itemized_condition: None,
            options: None,
            text_condition: None,
            then_content: None,
            else_content: None,
            resource_name: None,
            comparison: None,
            value: None,
            content_to_show_if_true: None,
            content_to_show_if_false: None,
            flag_name: None,
            then_content_for_all: None,
            additional_note: None,
            notes: None,
            item_acquisition_flags: None,
        }
    }

    #[test]
    fn resource_check_renders_exactly_one_branch() {
        let settings = plain_settings();
        let mut tracker = Tracker::new();
        tracker.set_resource("Grenade", 3);
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            resource_name: Some("Grenade".into()),
            comparison: Some(Comparison::LessThan),
            value: Some(6),
            content_to_show_if_true: Some(vec![ContentNode::text("buy grenades")]),
            content_to_show_if_false: Some(vec![ContentNode::text("skip the shop")]),
            ..empty_conditional(ConditionSource::TrackedResourceCheck)
        };
        let ctx = RenderContext::section("ch1");
        let out = render(&mut renderer, &cond, 0, &ctx);
        assert!(out.contains("buy grenades"));
        assert!(!out.contains("skip the shop"));
    }

    #[test]
    fn textual_choice_renders_every_option() {
        let settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            options: Some(vec![
                ConditionalOption {
                    condition_text: "you got the drop".into(),
                    content: vec![ContentNode::text("sell it")],
                },
                ConditionalOption {
                    condition_text: "you did not".into(),
                    content: vec![ContentNode::text("steal again")],
                },
            ]),
            ..empty_conditional(ConditionSource::TextualDirectChoice)
        };
        let ctx = RenderContext::section("ch1");
        let out = render(&mut renderer, &cond, 0, &ctx);
        assert!(out.contains("sell it"));
        assert!(out.contains("steal again"));
        assert!(out.contains("If you got the drop:"));
    }

    #[test]
    fn inline_if_then_compacts_inside_list_items() {
        let settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            text_condition: Some(vec![ContentNode::text("you kept the potion")]),
            then_content: Some(vec![ContentNode::text("use it now")]),
            ..empty_conditional(ConditionSource::TextualInlineIfThen)
        };
        let ctx = RenderContext::section("ch1");
        let block_out = render(&mut renderer, &cond, 0, &ctx);
        // At block level the condition and consequence are separate chunks.
        assert!(block_out.contains('\n'));

        let item_ctx = ctx.nested_in_item("section_ch1_level0.block0.li0_content".into());
        let item_out = render(&mut renderer, &cond, 0, &item_ctx);
        assert!(
            item_out.contains("If you kept the potion: use it now"),
            "expected a compact run:\n{item_out}"
        );
    }

    #[test]
    fn itemized_choice_bullets_each_option() {
        let settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            display_as_itemized_condition: Some(true),
            options: Some(vec![
                ConditionalOption {
                    condition_text: "you got the drop".into(),
                    content: vec![ContentNode::text("sell it")],
                },
                ConditionalOption {
                    condition_text: "you did not".into(),
                    content: vec![ContentNode::text("steal again")],
                },
            ]),
            ..empty_conditional(ConditionSource::TextualBlockOptions)
        };
        let ctx = RenderContext::section("ch1");
        let out = render(&mut renderer, &cond, 0, &ctx);
        assert!(out.contains("• If you got the drop:"));
        assert!(out.contains("• If you did not:"));
    }

    #[test]
    fn missing_slots_render_nothing() {
        let settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = empty_conditional(ConditionSource::TextualInlineIfThen);
        let ctx = RenderContext::section("ch1");
        assert_eq!(render(&mut renderer, &cond, 0, &ctx), "");
    }

    #[test]
    fn pending_blitz_outcome_shows_win_route_with_marker() {
        let mut settings = plain_settings();
        settings.show_condition_markers = true;
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            win_content: Some(vec![ContentNode::text("win route")]),
            loss_content: Some(vec![ContentNode::text("loss route")]),
            ..empty_conditional(ConditionSource::IfthenelseBlitzresult)
        };
        let ctx = RenderContext::section("ch1");
        let out = render(&mut renderer, &cond, 0, &ctx);
        assert!(out.contains("pending"));
        assert!(out.contains("win route"));
        assert!(!out.contains("loss route"));
    }

    #[test]
    fn recorded_loss_shows_loss_route_only() {
        let settings = plain_settings();
        let mut tracker = Tracker::new();
        tracker.set_flag(BLITZ_FLAG, false);
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let cond = Conditional {
            win_content: Some(vec![ContentNode::text("win route")]),
            loss_content: Some(vec![ContentNode::text("loss route")]),
            both_content: Some(vec![ContentNode::text("either way")]),
            ..empty_conditional(ConditionSource::Blitzballdetermination)
        };
        let ctx = RenderContext::section("ch1");
        let out = render(&mut renderer, &cond, 0, &ctx);
        assert!(!out.contains("win route"));
        assert!(out.contains("loss route"));
        assert!(out.contains("either way"));
    }

    #[test]
    fn inactive_branch_does_not_touch_parent_numbering() {
        use routebook_data::{InstructionList, ListItem};

        let settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);

        let branch_list = |text: &str| {
            vec![ContentNode::InstructionList(InstructionList {
                ordered: true,
                resume: None,
                items: vec![ContentNode::ListItem(ListItem {
                    content: vec![ContentNode::text(text)],
                    ..ListItem::default()
                })],
            })]
        };
        let cond = Conditional {
            flag_name: Some("GotItem".into()),
            content_to_show_if_true: Some(branch_list("have it")),
            content_to_show_if_false: Some(branch_list("missing it")),
            ..empty_conditional(ConditionSource::AcquiredItemFlagCheck)
        };
        let ctx = RenderContext::section("ch1");
        render(&mut renderer, &cond, 1, &ctx);
        // The conditional's branch numbered under its own slot scope.
        assert_eq!(numbering.last_number(&ctx.scope_key), 0);
        assert_eq!(numbering.last_number("section_ch1_level0.block1.else"), 1);
    }
}
