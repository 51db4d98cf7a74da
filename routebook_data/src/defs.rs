//! Guide content definitions.
//!
//! Every content node serializes as a flat JSON object carrying a `type`
//! discriminator plus variant-specific fields; that shape is the wire format
//! shared with the guide's authoring pipeline and must survive a
//! load → mutate → save cycle without dropping fields. Optional fields are
//! therefore `Option` and skipped when absent, and nodes whose `type` is not
//! recognized are captured verbatim as [`ContentNode::Unknown`].

use serde::{Deserialize, Serialize};
use serde::de::Error as _;

/// Top-level guide document.
///
/// Chapters, the introduction, and acknowledgements may be given inline or as
/// references to separate JSON files; the loader resolves the file variants
/// and merges them into the inline fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDoc {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgements_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgements: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

/// A single chapter: a stable id, a display title, and its content tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub content: Vec<ContentNode>,
}

/// How the engine applies a tracked resource update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceUpdateType {
    /// Applied automatically, once, when the owning section is passed.
    AutoGuaranteed,
    /// User confirms/enters the quantity gained (steals, RNG drops).
    UserConfirmRngGain,
    /// User confirms/enters the quantity consumed (variable item use).
    UserConfirmRngConsumption,
    /// Deducted automatically for sphere use inferred from grid activation.
    ConsumptionImplicitGrid,
    /// Deducted automatically for fixed, explicit consumptions.
    ConsumptionExplicitFixed,
}

/// A consumable resource delta attached to a content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedResource {
    pub name: String,
    /// Positive for gains, negative for consumption.
    pub quantity: i64,
    pub update_type: ResourceUpdateType,
    /// Unique per update instance; the tracker uses it to prevent
    /// double-counting.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<ContentNode>>,
}

/// How an acquired-item flag gets resolved by the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagSetType {
    UserPromptAfterEvent,
    UserCheckboxOnPickupOrDrop,
    DerivedFromUserChoice,
}

/// A boolean milestone (item obtained, event outcome) tracked alongside
/// resource quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiredItemFlag {
    pub item_name: String,
    pub set_type: FlagSetType,
    pub source_description: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
}

/// Relevance of an instruction under the Cutscene Remover mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrBehavior {
    StandardOnly,
    CsrOnly,
    AlwaysRelevant,
}

/// Source driving which branch(es) of a conditional block are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSource {
    Blitzballdetermination,
    IfthenelseBlitzresult,
    TextualDirectChoice,
    TextualInlineIfThen,
    TextualBlockOptions,
    TrackedResourceCheck,
    AcquiredItemFlagCheck,
}

/// Comparison operator for `tracked_resource_check` conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThanOrEqualTo,
    Equals,
    NotEquals,
}

impl Comparison {
    /// Evaluate `current <op> target`.
    pub fn holds(self, current: i64, target: i64) -> bool {
        match self {
            Comparison::LessThan => current < target,
            Comparison::GreaterThanOrEqualTo => current >= target,
            Comparison::Equals => current == target,
            Comparison::NotEquals => current != target,
        }
    }
}

/// One choice within a textual-choice conditional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalOption {
    pub condition_text: String,
    pub content: Vec<ContentNode>,
}

/// A named section ("Sell", "Buy", ...) within a shop block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSection {
    pub title: String,
    pub items: Vec<ContentNode>,
}

// --- Node payload structs ---------------------------------------------------

/// Unformatted text run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainText {
    pub text: String,
}

/// Text run carrying explicit styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_large: Option<bool>,
    /// "centeredHeader" requests centered rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

/// Reference to a party member, enemy, or aeon by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterReference {
    pub character_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
}

/// An action performed by a named character ("Tidus: Attack").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCommand {
    pub character_name: String,
    pub action_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
}

/// Shorthand game macro (\sd, \cs, \save, \pickup ...).
///
/// The macro name set is open on the wire; unknown codes render as their raw
/// text rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMacro {
    pub macro_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Party formation: an ordered set of character references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub characters: Vec<ContentNode>,
}

/// Hyperlink whose display text is formatted-text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: Vec<ContentNode>,
}

/// Ordinal number kept verbatim ("1st", "2nd").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nth {
    pub value: String,
}

/// Numeric literal formatted with thousands separators for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Num {
    pub value: i64,
}

/// Math symbol, possibly raw LaTeX such as `\rightarrow`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathSymbol {
    pub symbol: String,
}

/// Paragraph of inline content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextParagraph {
    pub content: Vec<ContentNode>,
    /// "emphasizedBlock" requests boxed, attention-grabbing rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_hint: Option<String>,
}

/// Ordered or unordered instruction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionList {
    pub ordered: bool,
    /// When explicitly `false`, numbering for the surrounding scope restarts
    /// before this list; absent or `true` continues from the scope's cached
    /// last ordinal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<bool>,
    pub items: Vec<ContentNode>,
}

/// Single list item; may nest further blocks and sub-items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub content: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csr_behavior: Option<CsrBehavior>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csr_note: Option<Vec<ContentNode>>,
}

/// Image reference with optional layout widths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_column_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_column_width: Option<String>,
}

/// Boss or set-piece battle with an ordered strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub enemy_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u64>,
    pub strategy: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
}

/// Shop interaction, split into titled sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub gil_info: String,
    pub sections: Vec<ShopSection>,
}

/// Sphere grid segment; content mixes per-character actions, images,
/// conditionals and plain items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereGrid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<String>,
    pub content: Vec<ContentNode>,
}

/// Grid actions for one character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereGridCharacterActions {
    pub character: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slvl_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_condition: Option<Vec<ContentNode>>,
    pub actions: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_images: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
}

/// Area-encounter strategy block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounters {
    pub content: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
}

/// Cloister-of-trials puzzle: ordered solution steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub steps: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_resource_updates: Option<Vec<TrackedResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
}

/// Blitzball game strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlitzballGame {
    pub strategy: Vec<ContentNode>,
}

/// Equipment change block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equip {
    pub content: Vec<ContentNode>,
}

/// Branching content keyed by a condition source.
///
/// Which slot fields are meaningful depends on `condition_source`; slots the
/// source does not use stay `None` and absent slots render as nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub condition_source: ConditionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub both_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_as_itemized_condition: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ConditionalOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_condition: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_content: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_to_show_if_true: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_to_show_if_false: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then_content_for_all: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<ContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_acquisition_flags: Option<Vec<AcquiredItemFlag>>,
}

// --- The node union ---------------------------------------------------------

/// One element of the guide's structural tree.
///
/// The `type` discriminator is immutable once constructed; children are owned
/// exclusively by their parent (a tree, never a graph). Variants split into
/// an *inline* family (runs within text or list items) and a *block* family
/// (structural units).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentNode {
    // Inline elements
    PlainText(PlainText),
    FormattedText(FormattedText),
    CharacterReference(CharacterReference),
    CharacterCommand(CharacterCommand),
    GameMacro(GameMacro),
    Formation(Formation),
    Link(Link),
    Nth(Nth),
    Num(Num),
    MathSymbol(MathSymbol),
    // Block elements
    TextParagraph(TextParagraph),
    InstructionList(InstructionList),
    ListItem(ListItem),
    Image(Image),
    Battle(Battle),
    Shop(Shop),
    SphereGrid(SphereGrid),
    SphereGridCharacterActions(SphereGridCharacterActions),
    Encounters(Encounters),
    Trial(Trial),
    BlitzballGame(BlitzballGame),
    Equip(Equip),
    Conditional(Conditional),
    /// Any node whose `type` is not recognized, preserved verbatim so that a
    /// save re-emits exactly what was loaded. Renders as a placeholder.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

/// Internal mirror of [`ContentNode`] holding only the recognized variants;
/// deserialization tries this first and falls back to `Unknown`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum KnownNode {
    PlainText(PlainText),
    FormattedText(FormattedText),
    CharacterReference(CharacterReference),
    CharacterCommand(CharacterCommand),
    GameMacro(GameMacro),
    Formation(Formation),
    Link(Link),
    Nth(Nth),
    Num(Num),
    MathSymbol(MathSymbol),
    TextParagraph(TextParagraph),
    InstructionList(InstructionList),
    ListItem(ListItem),
    Image(Image),
    Battle(Battle),
    Shop(Shop),
    SphereGrid(SphereGrid),
    SphereGridCharacterActions(SphereGridCharacterActions),
    Encounters(Encounters),
    Trial(Trial),
    BlitzballGame(BlitzballGame),
    Equip(Equip),
    Conditional(Conditional),
}

impl From<KnownNode> for ContentNode {
    fn from(known: KnownNode) -> Self {
        match known {
            KnownNode::PlainText(n) => ContentNode::PlainText(n),
            KnownNode::FormattedText(n) => ContentNode::FormattedText(n),
            KnownNode::CharacterReference(n) => ContentNode::CharacterReference(n),
            KnownNode::CharacterCommand(n) => ContentNode::CharacterCommand(n),
            KnownNode::GameMacro(n) => ContentNode::GameMacro(n),
            KnownNode::Formation(n) => ContentNode::Formation(n),
            KnownNode::Link(n) => ContentNode::Link(n),
            KnownNode::Nth(n) => ContentNode::Nth(n),
            KnownNode::Num(n) => ContentNode::Num(n),
            KnownNode::MathSymbol(n) => ContentNode::MathSymbol(n),
            KnownNode::TextParagraph(n) => ContentNode::TextParagraph(n),
            KnownNode::InstructionList(n) => ContentNode::InstructionList(n),
            KnownNode::ListItem(n) => ContentNode::ListItem(n),
            KnownNode::Image(n) => ContentNode::Image(n),
            KnownNode::Battle(n) => ContentNode::Battle(n),
            KnownNode::Shop(n) => ContentNode::Shop(n),
            KnownNode::SphereGrid(n) => ContentNode::SphereGrid(n),
            KnownNode::SphereGridCharacterActions(n) => ContentNode::SphereGridCharacterActions(n),
            KnownNode::Encounters(n) => ContentNode::Encounters(n),
            KnownNode::Trial(n) => ContentNode::Trial(n),
            KnownNode::BlitzballGame(n) => ContentNode::BlitzballGame(n),
            KnownNode::Equip(n) => ContentNode::Equip(n),
            KnownNode::Conditional(n) => ContentNode::Conditional(n),
        }
    }
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Buffer the node as a Value so an unrecognized `type` can be kept
        // verbatim instead of aborting the whole document parse.
        let value = serde_json::Value::deserialize(deserializer)?;
        let recognized = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(known_type_tag);
        if recognized {
            let node: KnownNode = serde_json::from_value(value).map_err(D::Error::custom)?;
            Ok(node.into())
        } else {
            Ok(ContentNode::Unknown(value))
        }
    }
}

fn known_type_tag(tag: &str) -> bool {
    matches!(
        tag,
        "plainText"
            | "formattedText"
            | "characterReference"
            | "characterCommand"
            | "gameMacro"
            | "formation"
            | "link"
            | "nth"
            | "num"
            | "mathSymbol"
            | "textParagraph"
            | "instructionList"
            | "listItem"
            | "image"
            | "battle"
            | "shop"
            | "sphereGrid"
            | "sphereGridCharacterActions"
            | "encounters"
            | "trial"
            | "blitzballGame"
            | "equip"
            | "conditional"
    )
}

impl ContentNode {
    /// Wire-format `type` tag for this node, or the raw tag (or "unknown")
    /// for unrecognized nodes.
    pub fn type_tag(&self) -> &str {
        match self {
            ContentNode::PlainText(_) => "plainText",
            ContentNode::FormattedText(_) => "formattedText",
            ContentNode::CharacterReference(_) => "characterReference",
            ContentNode::CharacterCommand(_) => "characterCommand",
            ContentNode::GameMacro(_) => "gameMacro",
            ContentNode::Formation(_) => "formation",
            ContentNode::Link(_) => "link",
            ContentNode::Nth(_) => "nth",
            ContentNode::Num(_) => "num",
            ContentNode::MathSymbol(_) => "mathSymbol",
            ContentNode::TextParagraph(_) => "textParagraph",
            ContentNode::InstructionList(_) => "instructionList",
            ContentNode::ListItem(_) => "listItem",
            ContentNode::Image(_) => "image",
            ContentNode::Battle(_) => "battle",
            ContentNode::Shop(_) => "shop",
            ContentNode::SphereGrid(_) => "sphereGrid",
            ContentNode::SphereGridCharacterActions(_) => "sphereGridCharacterActions",
            ContentNode::Encounters(_) => "encounters",
            ContentNode::Trial(_) => "trial",
            ContentNode::BlitzballGame(_) => "blitzballGame",
            ContentNode::Equip(_) => "equip",
            ContentNode::Conditional(_) => "conditional",
            ContentNode::Unknown(value) => value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// True for the inline family (runs within text and list items).
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            ContentNode::PlainText(_)
                | ContentNode::FormattedText(_)
                | ContentNode::CharacterReference(_)
                | ContentNode::CharacterCommand(_)
                | ContentNode::GameMacro(_)
                | ContentNode::Formation(_)
                | ContentNode::Link(_)
                | ContentNode::Nth(_)
                | ContentNode::Num(_)
                | ContentNode::MathSymbol(_)
        )
    }

    pub fn as_list_item(&self) -> Option<&ListItem> {
        match self {
            ContentNode::ListItem(item) => Some(item),
            _ => None,
        }
    }

    /// Convenience constructor for a plain-text node.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::PlainText(PlainText { text: text.into() })
    }
}
