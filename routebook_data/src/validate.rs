//! Structural validation for loaded guide documents.
//!
//! Issues are advisory: the engine renders what it can and logs these as
//! warnings, so validation never rejects a guide outright.

use std::collections::HashSet;
use std::fmt;

use crate::defs::{
    Chapter, Conditional, ConditionSource, ContentNode, GuideDoc, TrackedResource,
};

/// Structural problem found in a guide document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideIssue {
    DuplicateChapterId { id: String },
    EmptyUpdateId { resource: String, context: String },
    EmptyOrderedList { context: String },
    MissingConditionSlot { source: &'static str, slot: &'static str, context: String },
}

impl fmt::Display for GuideIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuideIssue::DuplicateChapterId { id } => {
                write!(f, "duplicate chapter id '{id}'")
            },
            GuideIssue::EmptyUpdateId { resource, context } => {
                write!(f, "tracked update for '{resource}' has an empty id ({context})")
            },
            GuideIssue::EmptyOrderedList { context } => {
                write!(f, "ordered list with no items ({context})")
            },
            GuideIssue::MissingConditionSlot { source, slot, context } => {
                write!(f, "conditional '{source}' missing '{slot}' ({context})")
            },
        }
    }
}

impl std::error::Error for GuideIssue {}

/// Validate basic invariants across a loaded guide.
///
/// ```
/// use routebook_data::{Chapter, ContentNode, GuideDoc, validate_guide};
///
/// let doc = GuideDoc {
///     title: "Demo".into(),
///     chapters: Some(vec![Chapter {
///         id: "ch1".into(),
///         title: "Chapter 1".into(),
///         content: vec![ContentNode::text("hello")],
///     }]),
///     ..GuideDoc::default()
/// };
/// assert!(validate_guide(&doc).is_empty());
/// ```
pub fn validate_guide(doc: &GuideDoc) -> Vec<GuideIssue> {
    let mut issues = Vec::new();

    if let Some(chapters) = &doc.chapters {
        let mut seen = HashSet::new();
        for chapter in chapters {
            if !seen.insert(chapter.id.as_str()) {
                issues.push(GuideIssue::DuplicateChapterId { id: chapter.id.clone() });
            }
        }
        for chapter in chapters {
            check_chapter(chapter, &mut issues);
        }
    }
    if let Some(intro) = &doc.introduction {
        check_nodes(intro, "introduction", &mut issues);
    }
    if let Some(acks) = &doc.acknowledgements {
        check_nodes(acks, "acknowledgements", &mut issues);
    }

    issues
}

fn check_chapter(chapter: &Chapter, issues: &mut Vec<GuideIssue>) {
    let context = format!("chapter '{}'", chapter.id);
    check_nodes(&chapter.content, &context, issues);
}

fn check_nodes(nodes: &[ContentNode], context: &str, issues: &mut Vec<GuideIssue>) {
    for node in nodes {
        check_node(node, context, issues);
    }
}

fn check_node(node: &ContentNode, context: &str, issues: &mut Vec<GuideIssue>) {
    match node {
        ContentNode::InstructionList(list) => {
            if list.ordered && list.items.is_empty() {
                issues.push(GuideIssue::EmptyOrderedList { context: context.to_string() });
            }
            check_nodes(&list.items, context, issues);
        },
        ContentNode::ListItem(item) => {
            check_updates(item.tracked_resource_updates.as_deref(), context, issues);
            check_nodes(&item.content, context, issues);
            if let Some(sub) = &item.sub_content {
                check_nodes(sub, context, issues);
            }
        },
        ContentNode::TextParagraph(para) => check_nodes(&para.content, context, issues),
        ContentNode::CharacterCommand(cmd) => {
            check_updates(cmd.tracked_resource_updates.as_deref(), context, issues);
            if let Some(sub) = &cmd.sub_items {
                check_nodes(sub, context, issues);
            }
        },
        ContentNode::Battle(battle) => {
            check_updates(battle.tracked_resource_updates.as_deref(), context, issues);
            check_nodes(&battle.strategy, context, issues);
            if let Some(notes) = &battle.notes {
                check_nodes(notes, context, issues);
            }
        },
        ContentNode::Shop(shop) => {
            for section in &shop.sections {
                check_nodes(&section.items, context, issues);
            }
        },
        ContentNode::SphereGrid(grid) => check_nodes(&grid.content, context, issues),
        ContentNode::SphereGridCharacterActions(actions) => {
            check_updates(actions.tracked_resource_updates.as_deref(), context, issues);
            check_nodes(&actions.actions, context, issues);
        },
        ContentNode::Encounters(enc) => {
            check_updates(enc.tracked_resource_updates.as_deref(), context, issues);
            check_nodes(&enc.content, context, issues);
        },
        ContentNode::Trial(trial) => {
            check_updates(trial.tracked_resource_updates.as_deref(), context, issues);
            check_nodes(&trial.steps, context, issues);
        },
        ContentNode::BlitzballGame(game) => check_nodes(&game.strategy, context, issues),
        ContentNode::Equip(equip) => check_nodes(&equip.content, context, issues),
        ContentNode::Conditional(cond) => check_conditional(cond, context, issues),
        _ => {},
    }
}

fn check_updates(
    updates: Option<&[TrackedResource]>,
    context: &str,
    issues: &mut Vec<GuideIssue>,
) {
    let Some(updates) = updates else { return };
    for update in updates {
        if update.id.trim().is_empty() {
            issues.push(GuideIssue::EmptyUpdateId {
                resource: update.name.clone(),
                context: context.to_string(),
            });
        }
    }
}

fn check_conditional(cond: &Conditional, context: &str, issues: &mut Vec<GuideIssue>) {
    let mut require = |present: bool, slot: &'static str, source: &'static str| {
        if !present {
            issues.push(GuideIssue::MissingConditionSlot {
                source,
                slot,
                context: context.to_string(),
            });
        }
    };
    match cond.condition_source {
        ConditionSource::Blitzballdetermination | ConditionSource::IfthenelseBlitzresult => {
            // Win and loss branches are both expected for blitz outcomes.
            require(cond.win_content.is_some(), "winContent", "blitz outcome");
            require(cond.loss_content.is_some(), "lossContent", "blitz outcome");
        },
        ConditionSource::TextualDirectChoice | ConditionSource::TextualBlockOptions => {
            require(
                cond.options.as_ref().is_some_and(|o| !o.is_empty()),
                "options",
                "textual choice",
            );
        },
        ConditionSource::TextualInlineIfThen => {
            require(cond.then_content.is_some(), "thenContent", "textual_inline_if_then");
        },
        ConditionSource::TrackedResourceCheck => {
            require(cond.resource_name.is_some(), "resourceName", "tracked_resource_check");
            require(cond.comparison.is_some(), "comparison", "tracked_resource_check");
            require(cond.value.is_some(), "value", "tracked_resource_check");
        },
        ConditionSource::AcquiredItemFlagCheck => {
            require(cond.flag_name.is_some(), "flagName", "acquired_item_flag_check");
        },
    }

    for slot in [
        &cond.win_content,
        &cond.loss_content,
        &cond.both_content,
        &cond.then_content,
        &cond.else_content,
        &cond.content_to_show_if_true,
        &cond.content_to_show_if_false,
        &cond.then_content_for_all,
        &cond.notes,
        &cond.text_condition,
    ]
    .into_iter()
    .flatten()
    {
        check_nodes(slot, context, issues);
    }
    if let Some(options) = &cond.options {
        for option in options {
            check_nodes(&option.content, context, issues);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{Comparison, InstructionList, ResourceUpdateType};

    fn doc_with(content: Vec<ContentNode>) -> GuideDoc {
        GuideDoc {
            title: "Test".into(),
            chapters: Some(vec![Chapter {
                id: "ch1".into(),
                title: "One".into(),
                content,
            }]),
            ..GuideDoc::default()
        }
    }

    #[test]
    fn duplicate_chapter_ids_flagged() {
        let doc = GuideDoc {
            title: "Test".into(),
            chapters: Some(vec![
                Chapter { id: "ch1".into(), title: "A".into(), content: vec![] },
                Chapter { id: "ch1".into(), title: "B".into(), content: vec![] },
            ]),
            ..GuideDoc::default()
        };
        let issues = validate_guide(&doc);
        assert!(issues.iter().any(|i| matches!(i, GuideIssue::DuplicateChapterId { id } if id == "ch1")));
    }

    #[test]
    fn empty_ordered_list_flagged() {
        let doc = doc_with(vec![ContentNode::InstructionList(InstructionList {
            ordered: true,
            resume: None,
            items: vec![],
        })]);
        assert!(matches!(validate_guide(&doc)[0], GuideIssue::EmptyOrderedList { .. }));
    }

    #[test]
    fn tracked_update_with_blank_id_flagged() {
        let doc = doc_with(vec![ContentNode::ListItem(crate::defs::ListItem {
            content: vec![ContentNode::text("grab it")],
            tracked_resource_updates: Some(vec![TrackedResource {
                name: "Potion".into(),
                quantity: 1,
                update_type: ResourceUpdateType::AutoGuaranteed,
                id: "  ".into(),
                description: None,
                condition: None,
            }]),
            ..crate::defs::ListItem::default()
        })]);
        let issues = validate_guide(&doc);
        assert!(issues.iter().any(|i| matches!(i, GuideIssue::EmptyUpdateId { .. })));
    }

    #[test]
    fn resource_check_missing_comparison_flagged() {
        let doc = doc_with(vec![ContentNode::Conditional(Conditional {
            condition_source: ConditionSource::TrackedResourceCheck,
            resource_name: Some("Grenade".into()),
            comparison: None,
            value: Some(4),
            win_content: None,
            loss_content: None,
            both_content: None,
            display_as_itemized_condition: None,
            options: None,
            text_condition: None,
            then_content: None,
            else_content: None,
            content_to_show_if_true: None,
            content_to_show_if_false: None,
            flag_name: None,
            then_content_for_all: None,
            additional_note: None,
            notes: None,
            item_acquisition_flags: None,
        })]);
        let issues = validate_guide(&doc);
        assert!(issues.iter().any(
            |i| matches!(i, GuideIssue::MissingConditionSlot { slot, .. } if *slot == "comparison")
        ));
    }

    #[test]
    fn well_formed_textual_choice_passes() {
        let doc = doc_with(vec![ContentNode::Conditional(Conditional {
            condition_source: ConditionSource::TextualDirectChoice,
            options: Some(vec![crate::defs::ConditionalOption {
                condition_text: "If you got the drop".into(),
                content: vec![ContentNode::text("sell it")],
            }]),
            win_content: None,
            loss_content: None,
            both_content: None,
            display_as_itemized_condition: None,
            text_condition: None,
            then_content: None,
            else_content: None,
            resource_name: None,
            comparison: Some(Comparison::Equals),
            value: None,
            content_to_show_if_true: None,
            content_to_show_if_false: None,
            flag_name: None,
            then_content_for_all: None,
            additional_note: None,
            notes: None,
            item_acquisition_flags: None,
        })]);
        assert!(validate_guide(&doc).is_empty());
    }
}
