//! Recursive renderer for guide content trees.
//!
//! [`Renderer`] walks a section's nodes depth-first and produces styled
//! terminal text. Ordered-list numbering flows through the shared
//! [`ListNumbering`] store keyed by scope so that list fragments separated by
//! paragraphs or battles continue counting; everything else about a node
//! renders from the node itself plus the [`RenderContext`] it is given.

pub mod blocks;
pub mod conditional;
pub mod inline;

use log::warn;
use routebook_data::ContentNode;

use crate::numbering::ListNumbering;
use crate::scope;
use crate::settings::Settings;
use crate::style::GuideStyle;
use crate::tracker::Tracker;

/// Position information threaded through the recursive walk.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Scope key of the array this node sits in; ordered lists read and
    /// write their counter under this key.
    pub scope_key: String,
    /// Whether we are inside a list item. Carried explicitly rather than
    /// inferred from the scope key text.
    pub in_list_item: bool,
    /// Nesting depth, used for indentation.
    pub depth: usize,
}

impl RenderContext {
    /// Context for a section's top-level content array.
    pub fn section(section_id: &str) -> Self {
        Self {
            scope_key: scope::section_root(section_id),
            in_list_item: false,
            depth: 0,
        }
    }

    /// Derive a context for a nested array under `scope_key`.
    pub fn nested(&self, scope_key: String) -> Self {
        Self {
            scope_key,
            in_list_item: self.in_list_item,
            depth: self.depth + 1,
        }
    }

    /// Same as [`RenderContext::nested`] but marking list-item interior.
    pub fn nested_in_item(&self, scope_key: String) -> Self {
        Self {
            scope_key,
            in_list_item: true,
            depth: self.depth + 1,
        }
    }

    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

/// Stateful renderer over one guide session.
pub struct Renderer<'a> {
    pub(crate) numbering: &'a mut ListNumbering,
    pub(crate) tracker: &'a Tracker,
    pub(crate) settings: &'a Settings,
}

impl<'a> Renderer<'a> {
    pub fn new(numbering: &'a mut ListNumbering, tracker: &'a Tracker, settings: &'a Settings) -> Self {
        Self { numbering, tracker, settings }
    }

    pub(crate) fn width(&self) -> usize {
        self.settings.effective_width()
    }

    /// Render a content array under `ctx`, depth-first, left to right.
    ///
    /// Consecutive inline nodes coalesce into one wrapped paragraph line;
    /// block nodes each emit their own chunk separated by blank lines.
    pub fn render_nodes(&mut self, nodes: &[ContentNode], ctx: &RenderContext) -> String {
        let mut chunks: Vec<String> = Vec::new();
        let mut inline_run = String::new();

        for (index, node) in nodes.iter().enumerate() {
            // Centered headers break the inline flow and get their own line.
            if let ContentNode::FormattedText(ft) = node
                && ft.display_hint.as_deref() == Some("centeredHeader")
            {
                if !inline_run.is_empty() {
                    chunks.push(blocks::wrap_indented(&inline_run, self.width(), &ctx.indent()));
                    inline_run.clear();
                }
                chunks.push(blocks::centered(&inline::render(node, self.settings), self.width()));
                continue;
            }
            if node.is_inline() {
                inline_run.push_str(&inline::render(node, self.settings));
                continue;
            }
            if !inline_run.is_empty() {
                chunks.push(blocks::wrap_indented(&inline_run, self.width(), &ctx.indent()));
                inline_run.clear();
            }
            let rendered = self.render_block(node, index, ctx);
            if !rendered.is_empty() {
                chunks.push(rendered);
            }
        }
        if !inline_run.is_empty() {
            chunks.push(blocks::wrap_indented(&inline_run, self.width(), &ctx.indent()));
        }

        chunks.join("\n\n")
    }

    fn render_block(&mut self, node: &ContentNode, index: usize, ctx: &RenderContext) -> String {
        match node {
            ContentNode::TextParagraph(para) => blocks::paragraph(self, para, index, ctx),
            ContentNode::InstructionList(list) => blocks::instruction_list(self, list, index, ctx),
            ContentNode::ListItem(item) => {
                // A bare list item outside a list still renders as a bullet.
                let base = scope::child(&ctx.scope_key, "block", index);
                blocks::list_item(self, item, 0, "• ", &base, ctx)
            },
            ContentNode::Image(image) => blocks::image(image, ctx),
            ContentNode::Battle(battle) => blocks::battle(self, battle, index, ctx),
            ContentNode::Shop(shop) => blocks::shop(self, shop, index, ctx),
            ContentNode::SphereGrid(grid) => blocks::sphere_grid(self, grid, index, ctx),
            ContentNode::SphereGridCharacterActions(actions) => {
                blocks::grid_character_actions(self, actions, index, ctx)
            },
            ContentNode::Encounters(enc) => blocks::encounters(self, enc, index, ctx),
            ContentNode::Trial(trial) => blocks::trial(self, trial, index, ctx),
            ContentNode::BlitzballGame(game) => blocks::blitzball(self, game, index, ctx),
            ContentNode::Equip(equip) => blocks::equip(self, equip, index, ctx),
            ContentNode::Conditional(cond) => conditional::render(self, cond, index, ctx),
            ContentNode::Unknown(_) => {
                let tag = node.type_tag();
                warn!("unsupported content type '{tag}', rendering placeholder");
                format!(
                    "{}{}",
                    ctx.indent(),
                    format!("[unsupported block: {tag}]").placeholder_style()
                )
            },
            // Inline variants are handled by the caller.
            _ => inline::render(node, self.settings),
        }
    }
}
