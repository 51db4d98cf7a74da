//! Collection of trackable annotations from a content subtree.
//!
//! When the runner passes a section, every `auto_guaranteed` update inside
//! it is applied once. This walk gathers the updates (and acquisition flags,
//! for the tracker pane) from all node variants that can carry them,
//! including both branches of conditionals: whether a branch is displayed is
//! a rendering question, while auto updates follow the route itself.

use routebook_data::{AcquiredItemFlag, ContentNode, TrackedResource};

/// All trackable annotations found in a subtree, in document order.
#[derive(Debug, Default, Clone)]
pub struct Trackables {
    pub updates: Vec<TrackedResource>,
    pub flags: Vec<AcquiredItemFlag>,
}

/// Walk `nodes` depth-first and gather every trackable annotation.
pub fn collect(nodes: &[ContentNode]) -> Trackables {
    let mut found = Trackables::default();
    walk(nodes, &mut found);
    found
}

fn walk(nodes: &[ContentNode], found: &mut Trackables) {
    for node in nodes {
        match node {
            ContentNode::CharacterCommand(cmd) => {
                push(found, cmd.tracked_resource_updates.as_deref(), cmd.item_acquisition_flags.as_deref());
                if let Some(sub) = &cmd.sub_items {
                    walk(sub, found);
                }
            },
            ContentNode::TextParagraph(para) => walk(&para.content, found),
            ContentNode::InstructionList(list) => walk(&list.items, found),
            ContentNode::ListItem(item) => {
                push(found, item.tracked_resource_updates.as_deref(), item.item_acquisition_flags.as_deref());
                walk(&item.content, found);
                if let Some(sub) = &item.sub_content {
                    walk(sub, found);
                }
            },
            ContentNode::Battle(battle) => {
                push(found, battle.tracked_resource_updates.as_deref(), battle.item_acquisition_flags.as_deref());
                walk(&battle.strategy, found);
                if let Some(notes) = &battle.notes {
                    walk(notes, found);
                }
            },
            ContentNode::Shop(shop) => {
                for section in &shop.sections {
                    walk(&section.items, found);
                }
            },
            ContentNode::SphereGrid(grid) => walk(&grid.content, found),
            ContentNode::SphereGridCharacterActions(actions) => {
                push(found, actions.tracked_resource_updates.as_deref(), None);
                walk(&actions.actions, found);
            },
            ContentNode::Encounters(enc) => {
                push(found, enc.tracked_resource_updates.as_deref(), enc.item_acquisition_flags.as_deref());
                walk(&enc.content, found);
            },
            ContentNode::Trial(trial) => {
                push(found, trial.tracked_resource_updates.as_deref(), trial.item_acquisition_flags.as_deref());
                walk(&trial.steps, found);
            },
            ContentNode::BlitzballGame(game) => walk(&game.strategy, found),
            ContentNode::Equip(equip) => walk(&equip.content, found),
            ContentNode::Conditional(cond) => {
                push(found, None, cond.item_acquisition_flags.as_deref());
                for slot in [
                    &cond.win_content,
                    &cond.loss_content,
                    &cond.both_content,
                    &cond.then_content,
                    &cond.else_content,
                    &cond.content_to_show_if_true,
                    &cond.content_to_show_if_false,
                    &cond.then_content_for_all,
                ]
                .into_iter()
                .flatten()
                {
                    walk(slot, found);
                }
                if let Some(options) = &cond.options {
                    for option in options {
                        walk(&option.content, found);
                    }
                }
            },
            _ => {},
        }
    }
}

fn push(
    found: &mut Trackables,
    updates: Option<&[TrackedResource]>,
    flags: Option<&[AcquiredItemFlag]>,
) {
    if let Some(updates) = updates {
        found.updates.extend_from_slice(updates);
    }
    if let Some(flags) = flags {
        found.flags.extend_from_slice(flags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebook_data::{
        Battle, Conditional, ConditionSource, InstructionList, ListItem, ResourceUpdateType,
    };

    fn update(id: &str) -> TrackedResource {
        TrackedResource {
            name: "Power Sphere".into(),
            quantity: 1,
            update_type: ResourceUpdateType::AutoGuaranteed,
            id: id.into(),
            description: None,
            condition: None,
        }
    }

    #[test]
    fn collects_from_nested_lists_and_battles() {
        let tree = vec![ContentNode::InstructionList(InstructionList {
            ordered: true,
            resume: None,
            items: vec![ContentNode::ListItem(ListItem {
                content: vec![ContentNode::text("fight")],
                tracked_resource_updates: Some(vec![update("a")]),
                sub_content: Some(vec![ContentNode::Battle(Battle {
                    enemy_name: "Klikk".into(),
                    hp: Some(1500),
                    strategy: vec![],
                    notes: None,
                    tracked_resource_updates: Some(vec![update("b")]),
                    item_acquisition_flags: None,
                })]),
                ..ListItem::default()
            })],
        })];
        let found = collect(&tree);
        let ids: Vec<_> = found.updates.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn collects_both_branches_of_conditionals() {
        let tree = vec![ContentNode::Conditional(Conditional {
            condition_source: ConditionSource::IfthenelseBlitzresult,
            win_content: Some(vec![ContentNode::ListItem(ListItem {
                content: vec![],
                tracked_resource_updates: Some(vec![update("win")]),
                ..ListItem::default()
            })]),
            loss_content: Some(vec![ContentNode::ListItem(ListItem {
                content: vec![],
                tracked_resource_updates: Some(vec![update("loss")]),
                ..ListItem::default()
            })]),
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
        })];
        let found = collect(&tree);
        assert_eq!(found.updates.len(), 2);
    }
}
