//! Rendering of block-level content nodes.
//!
//! Block nodes own their layout: headers, hanging indents for list items,
//! boxed emphasis paragraphs, and the annotation lines that surface tracked
//! resources and acquisition flags next to the content that carries them.

use colored::Colorize;
use routebook_data::{
    AcquiredItemFlag, Battle, BlitzballGame, CsrBehavior, Encounters, Equip, Image,
    InstructionList, ListItem, ResourceUpdateType, Shop, SphereGrid, SphereGridCharacterActions,
    TextParagraph, TrackedResource, Trial,
};
use textwrap::{Options, fill};

use super::{RenderContext, Renderer, inline};
use crate::scope;
use crate::settings::Settings;
use crate::style::GuideStyle;

/// Wrap `text` to `width` with a uniform indent.
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> String {
    let opts = Options::new(width.max(20))
        .initial_indent(indent)
        .subsequent_indent(indent);
    fill(text, opts)
}

/// Wrap `text` with a marker on the first line and a hanging indent after.
fn wrap_hanging(text: &str, width: usize, first: &str, hang: &str) -> String {
    let opts = Options::new(width.max(20))
        .initial_indent(first)
        .subsequent_indent(hang);
    fill(text, opts)
}

/// Center each line of `text` within `width`.
pub fn centered(text: &str, width: usize) -> String {
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let line_width = textwrap::core::display_width(line);
        let pad = width.saturating_sub(line_width) / 2;
        out.push_str(&" ".repeat(pad));
        out.push_str(line);
    }
    out
}

/// Draw a simple box around already-wrapped `text`.
fn boxed(text: &str, indent: &str) -> String {
    let lines: Vec<&str> = if text.is_empty() { vec![""] } else { text.lines().collect() };
    let inner = lines
        .iter()
        .map(|line| textwrap::core::display_width(line))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(indent);
    out.push('┌');
    out.push_str(&"─".repeat(inner + 2));
    out.push_str("┐\n");
    for line in &lines {
        let pad = inner - textwrap::core::display_width(line);
        out.push_str(indent);
        out.push_str("│ ");
        out.push_str(line);
        out.push_str(&" ".repeat(pad));
        out.push_str(" │\n");
    }
    out.push_str(indent);
    out.push('└');
    out.push_str(&"─".repeat(inner + 2));
    out.push('┘');
    out
}

pub fn paragraph(
    renderer: &mut Renderer,
    para: &TextParagraph,
    index: usize,
    ctx: &RenderContext,
) -> String {
    let child_scope = scope::child(&ctx.scope_key, "block", index);
    let body = renderer.render_nodes(&para.content, &ctx.nested(child_scope));
    if para.display_hint.as_deref() == Some("emphasizedBlock") {
        // Re-wrap narrower so the frame still fits the text width.
        let inner: String = body
            .lines()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n");
        let inner = wrap_indented(&inner, renderer.width().saturating_sub(4), "");
        boxed(&inner, &ctx.indent())
    } else {
        body
    }
}

/// Whether a list item is shown under the current CSR setting.
fn csr_visible(item: &ListItem, settings: &Settings) -> bool {
    match item.csr_behavior {
        None | Some(CsrBehavior::AlwaysRelevant) => true,
        Some(CsrBehavior::StandardOnly) => !settings.csr_mode,
        Some(CsrBehavior::CsrOnly) => settings.csr_mode,
    }
}

pub fn instruction_list(
    renderer: &mut Renderer,
    list: &InstructionList,
    index: usize,
    ctx: &RenderContext,
) -> String {
    let base_scope = scope::child(&ctx.scope_key, "block", index);
    let visible: Vec<(usize, &ListItem)> = list
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, node)| node.as_list_item().map(|item| (i, item)))
        .filter(|(_, item)| csr_visible(item, renderer.settings))
        .collect();

    if list.ordered {
        // Numbering continues across sibling fragments: the counter lives
        // under the surrounding array's scope, not the list's own.
        if list.resume == Some(false) {
            renderer.numbering.reset_scope(&ctx.scope_key);
        }
        let start = renderer.numbering.last_number(&ctx.scope_key);
        let mut parts = Vec::new();
        for (offset, (item_index, item)) in visible.iter().copied().enumerate() {
            let marker = format!("{}. ", start + offset + 1);
            parts.push(list_item(renderer, item, item_index, &marker, &base_scope, ctx));
        }
        renderer.numbering.set_last_number(&ctx.scope_key, start + visible.len());
        parts.join("\n")
    } else {
        let mut parts = Vec::new();
        for (item_index, item) in visible.iter().copied() {
            parts.push(list_item(renderer, item, item_index, "• ", &base_scope, ctx));
        }
        parts.join("\n")
    }
}

pub fn list_item(
    renderer: &mut Renderer,
    item: &ListItem,
    index: usize,
    marker: &str,
    base_scope: &str,
    ctx: &RenderContext,
) -> String {
    let indent = ctx.indent();
    let hang = format!("{indent}{}", " ".repeat(textwrap::core::display_width(marker)));
    let first = format!("{indent}{marker}");

    // Leading inline nodes form the item's head line; any block nodes after
    // them render beneath with a deeper indent.
    let split = item.content.iter().position(|n| !n.is_inline()).unwrap_or(item.content.len());
    let head: String = item.content[..split]
        .iter()
        .map(|n| inline::render(n, renderer.settings))
        .collect();
    let mut out = if head.is_empty() {
        first.trim_end().to_string()
    } else {
        wrap_hanging(&head, renderer.width(), &first, &hang)
    };

    let content_scope = scope::item_part(base_scope, index, "content");
    if split < item.content.len() {
        let body_ctx = ctx.nested_in_item(content_scope);
        let body = renderer.render_nodes(&item.content[split..], &body_ctx);
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&body);
        }
    }

    if let Some(sub) = &item.sub_content {
        let sub_scope = scope::item_part(base_scope, index, "sub");
        let sub_ctx = ctx.nested_in_item(sub_scope);
        let rendered = renderer.render_nodes(sub, &sub_ctx);
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&rendered);
        }
    }

    if renderer.settings.show_condition_markers
        && let Some(note) = &item.csr_note
    {
        let note_scope = scope::item_part(base_scope, index, "csr");
        let note_ctx = ctx.nested_in_item(note_scope);
        let rendered = renderer.render_nodes(note, &note_ctx);
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&format!("{hang}{}", "CSR: ".condition_label_style()));
            out.push_str(rendered.trim_start());
        }
    }

    let notes = annotations(
        item.tracked_resource_updates.as_deref(),
        item.item_acquisition_flags.as_deref(),
        &hang,
    );
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

/// Annotation lines for tracked updates and acquisition flags.
pub fn annotations(
    updates: Option<&[TrackedResource]>,
    flags: Option<&[AcquiredItemFlag]>,
    indent: &str,
) -> String {
    let mut lines = Vec::new();
    for update in updates.unwrap_or_default() {
        let sign = if update.quantity >= 0 { "+" } else { "" };
        let head = format!("[{sign}{} {}]", inline::thousands(update.quantity), update.name);
        let head = if update.quantity >= 0 { head.gain_style() } else { head.spend_style() };
        let suffix = match update.update_type {
            ResourceUpdateType::AutoGuaranteed => "",
            ResourceUpdateType::UserConfirmRngGain | ResourceUpdateType::UserConfirmRngConsumption => {
                " (confirm)"
            },
            ResourceUpdateType::ConsumptionImplicitGrid => " (grid)",
            ResourceUpdateType::ConsumptionExplicitFixed => " (fixed)",
        };
        lines.push(format!("{indent}{head}{}", suffix.dim_style()));
    }
    for flag in flags.unwrap_or_default() {
        let label = format!("[flag] {} — {}", flag.item_name, flag.source_description);
        lines.push(format!("{indent}{}", label.flag_style()));
    }
    lines.join("\n")
}

pub fn image(image: &Image, ctx: &RenderContext) -> String {
    format!("{}{}", ctx.indent(), format!("[image: {}]", image.path).dim_style())
}

pub fn battle(renderer: &mut Renderer, battle: &Battle, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let hp = battle
        .hp
        .map(|hp| format!(" (HP {})", inline::thousands(hp.cast_signed())))
        .unwrap_or_default();
    let mut out = format!("{indent}{}", format!("BATTLE: {}{hp}", battle.enemy_name).battle_style());

    let strategy = renderer.render_nodes(&battle.strategy, &ctx.nested(scope::slot(&base, "strategy")));
    if !strategy.is_empty() {
        out.push('\n');
        out.push_str(&strategy);
    }
    if let Some(notes) = &battle.notes {
        let rendered = renderer.render_nodes(notes, &ctx.nested(scope::slot(&base, "notes")));
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&format!("{indent}  {}", "Note:".note_style()));
            out.push('\n');
            out.push_str(&rendered);
        }
    }
    let notes = annotations(
        battle.tracked_resource_updates.as_deref(),
        battle.item_acquisition_flags.as_deref(),
        &format!("{indent}  "),
    );
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

pub fn shop(renderer: &mut Renderer, shop: &Shop, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", format!("SHOP — {}", shop.gil_info).shop_style());
    for (i, section) in shop.sections.iter().enumerate() {
        let section_scope = scope::child(&base, "sec", i);
        out.push('\n');
        out.push_str(&format!("{indent}  {}", section.title.as_str().bold()));
        let items = renderer.render_nodes(&section.items, &ctx.nested(section_scope));
        if !items.is_empty() {
            out.push('\n');
            out.push_str(&items);
        }
    }
    out
}

pub fn sphere_grid(renderer: &mut Renderer, grid: &SphereGrid, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", "SPHERE GRID".grid_style());
    if let Some(info) = &grid.context_info {
        out.push_str(&format!(" {}", info.note_style()));
    }
    let body = renderer.render_nodes(&grid.content, &ctx.nested(scope::slot(&base, "grid")));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

pub fn grid_character_actions(
    renderer: &mut Renderer,
    actions: &SphereGridCharacterActions,
    index: usize,
    ctx: &RenderContext,
) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", actions.character.as_str().grid_style());
    if let Some(slvl) = &actions.slvl_info {
        out.push_str(&format!(" {}", format!("({slvl})").dim_style()));
    }
    if let Some(cond) = &actions.inline_condition {
        let rendered = renderer.render_nodes(cond, &ctx.nested(scope::slot(&base, "cond")));
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&rendered);
        }
    }
    let body = renderer.render_nodes(&actions.actions, &ctx.nested(scope::slot(&base, "actions")));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    if let Some(images) = &actions.associated_images {
        let rendered = renderer.render_nodes(images, &ctx.nested(scope::slot(&base, "images")));
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&rendered);
        }
    }
    let notes = annotations(actions.tracked_resource_updates.as_deref(), None, &format!("{indent}  "));
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

pub fn encounters(renderer: &mut Renderer, enc: &Encounters, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", "ENCOUNTERS".battle_style());
    let body = renderer.render_nodes(&enc.content, &ctx.nested(scope::slot(&base, "enc")));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    if let Some(notes) = &enc.notes {
        let rendered = renderer.render_nodes(notes, &ctx.nested(scope::slot(&base, "notes")));
        if !rendered.is_empty() {
            out.push('\n');
            out.push_str(&rendered);
        }
    }
    let notes = annotations(
        enc.tracked_resource_updates.as_deref(),
        enc.item_acquisition_flags.as_deref(),
        &format!("{indent}  "),
    );
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

pub fn trial(renderer: &mut Renderer, trial: &Trial, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", "CLOISTER TRIAL".grid_style());
    // Trial steps always number from 1; they never continue a sibling list.
    for (i, step) in trial.steps.iter().enumerate() {
        out.push('\n');
        if let Some(item) = step.as_list_item() {
            let marker = format!("{}. ", i + 1);
            out.push_str(&list_item(renderer, item, i, &marker, &scope::slot(&base, "steps"), ctx));
        } else {
            let step_ctx = ctx.nested(scope::child(&base, "step", i));
            out.push_str(&renderer.render_nodes(std::slice::from_ref(step), &step_ctx));
        }
    }
    let notes = annotations(
        trial.tracked_resource_updates.as_deref(),
        trial.item_acquisition_flags.as_deref(),
        &format!("{indent}  "),
    );
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

pub fn blitzball(renderer: &mut Renderer, game: &BlitzballGame, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", "BLITZBALL".banner_style());
    let body = renderer.render_nodes(&game.strategy, &ctx.nested(scope::slot(&base, "strategy")));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

pub fn equip(renderer: &mut Renderer, equip: &Equip, index: usize, ctx: &RenderContext) -> String {
    let base = scope::child(&ctx.scope_key, "block", index);
    let indent = ctx.indent();
    let mut out = format!("{indent}{}", "EQUIP".shop_style());
    let body = renderer.render_nodes(&equip.content, &ctx.nested(scope::slot(&base, "equip")));
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::ListNumbering;
    use crate::tracker::Tracker;
    use routebook_data::{ContentNode, PlainText};

    fn plain_settings() -> Settings {
        colored::control::set_override(false);
        Settings { text_width: 60, ..Settings::default() }
    }

    #[test]
    fn centered_pads_each_line() {
        assert_eq!(centered("hi", 10), "    hi");
    }

    #[test]
    fn boxed_frames_the_text() {
        let out = boxed("abc", "");
        assert_eq!(out, "┌─────┐\n│ abc │\n└─────┘");
    }

    #[test]
    fn csr_only_items_hidden_without_csr_mode() {
        let mut settings = plain_settings();
        let tracker = Tracker::new();
        let mut numbering = ListNumbering::new();

        let list = InstructionList {
            ordered: true,
            resume: None,
            items: vec![
                ContentNode::ListItem(ListItem {
                    content: vec![ContentNode::PlainText(PlainText { text: "always".into() })],
                    ..ListItem::default()
                }),
                ContentNode::ListItem(ListItem {
                    content: vec![ContentNode::PlainText(PlainText { text: "csr only".into() })],
                    csr_behavior: Some(CsrBehavior::CsrOnly),
                    ..ListItem::default()
                }),
            ],
        };
        let ctx = RenderContext::section("ch1");

        {
            let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);
            let out = instruction_list(&mut renderer, &list, 0, &ctx);
            assert!(out.contains("always"));
            assert!(!out.contains("csr only"));
        }

        settings.csr_mode = true;
        let mut numbering = ListNumbering::new();
        let mut renderer = Renderer::new(&mut numbering, &tracker, &settings);
        let out = instruction_list(&mut renderer, &list, 0, &ctx);
        assert!(out.contains("csr only"));
    }

    #[test]
    fn annotations_show_gain_and_flag_lines() {
        colored::control::set_override(false);
        let updates = vec![TrackedResource {
            name: "Power Sphere".into(),
            quantity: 2,
            update_type: ResourceUpdateType::AutoGuaranteed,
            id: "x".into(),
            description: None,
            condition: None,
        }];
        let flags = vec![AcquiredItemFlag {
            item_name: "Moon Crest".into(),
            set_type: routebook_data::FlagSetType::UserCheckboxOnPickupOrDrop,
            source_description: "chest in the cove".into(),
            id: "f".into(),
            prompt_text: None,
        }];
        let out = annotations(Some(&updates), Some(&flags), "  ");
        assert!(out.contains("[+2 Power Sphere]"));
        assert!(out.contains("Moon Crest"));
    }
}
