//! Validated moves of a component to a new parent and sibling position.
//!
//! A move only ever touches the moved record: its `parent_id` and
//! `order_index` change, siblings keep their order indices. The new order
//! index is derived from the neighbours at the requested slot, so an
//! insert between two siblings gets a fractional index.

use crate::constants::MAX_NESTING_DEPTH;
use crate::page::{ComponentRecord, Hierarchy};

/// Why a move was refused. The input collection is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReorderRejection {
    #[error("component '{0}' does not exist")]
    MissingComponent(String),
    #[error("parent '{0}' does not exist")]
    MissingParent(String),
    #[error("cannot move '{component}' into its own subtree at '{parent}'")]
    Cycle { component: String, parent: String },
    #[error("moving '{component}' would nest it {depth} levels deep (max {max})")]
    DepthExceeded {
        component: String,
        depth: usize,
        max: usize,
    },
    #[error("'{0}' is already at the edge of its siblings")]
    AtEdge(String),
}

/// Where among the destination siblings a component should land
#[derive(Debug, Clone, PartialEq)]
pub enum DropPosition {
    Start,
    End,
    /// Absolute slot among the siblings, not counting the moved component
    Slot(usize),
    /// Directly after the sibling with this id (end if it is not a sibling)
    After(String),
}

fn resolve_slot(siblings: &[&ComponentRecord], position: &DropPosition) -> usize {
    match position {
        DropPosition::Start => 0,
        DropPosition::End => siblings.len(),
        DropPosition::Slot(slot) => (*slot).min(siblings.len()),
        DropPosition::After(id) => siblings
            .iter()
            .position(|s| s.id == *id)
            .map(|pos| pos + 1)
            .unwrap_or(siblings.len()),
    }
}

/// Order index for `slot` within an ascending list of sibling indices
fn order_between(orders: &[f64], slot: usize) -> f64 {
    match (slot.checked_sub(1).and_then(|i| orders.get(i)), orders.get(slot)) {
        (None, None) => 0.0,
        (None, Some(&next)) => next - 1.0,
        (Some(&prev), None) => prev + 1.0,
        (Some(&prev), Some(&next)) => prev + (next - prev) / 2.0,
    }
}

/// Checks that `component_id` may become a child of `new_parent_id`
/// without creating a cycle or exceeding `max_depth` levels.
///
/// A subtree already nested past `max_depth` may still move as long as it
/// ends up no deeper than it is now.
pub fn can_drop(
    list: &[ComponentRecord],
    component_id: &str,
    new_parent_id: Option<&str>,
    max_depth: usize,
) -> Result<(), ReorderRejection> {
    let hierarchy = Hierarchy::new(list);
    if !hierarchy.contains(component_id) {
        return Err(ReorderRejection::MissingComponent(component_id.to_string()));
    }

    let parent_depth = match new_parent_id {
        None => 0,
        Some(parent) => {
            if !hierarchy.contains(parent) {
                return Err(ReorderRejection::MissingParent(parent.to_string()));
            }
            if hierarchy.is_self_or_descendant(component_id, parent) {
                return Err(ReorderRejection::Cycle {
                    component: component_id.to_string(),
                    parent: parent.to_string(),
                });
            }
            hierarchy.depth(parent)
        }
    };

    let height = hierarchy.subtree_height(component_id);
    let deepest = parent_depth + height;
    let current = hierarchy.depth(component_id) + height - 1;
    if deepest > max_depth && deepest > current {
        return Err(ReorderRejection::DepthExceeded {
            component: component_id.to_string(),
            depth: deepest,
            max: max_depth,
        });
    }
    Ok(())
}

/// Checks that a brand-new leaf may be created under `parent`
pub fn can_insert_under(
    list: &[ComponentRecord],
    parent: Option<&str>,
    max_depth: usize,
) -> Result<(), ReorderRejection> {
    let Some(parent) = parent else {
        return Ok(());
    };
    let hierarchy = Hierarchy::new(list);
    if !hierarchy.contains(parent) {
        return Err(ReorderRejection::MissingParent(parent.to_string()));
    }
    let depth = hierarchy.depth(parent) + 1;
    if depth > max_depth {
        return Err(ReorderRejection::DepthExceeded {
            component: parent.to_string(),
            depth,
            max: max_depth,
        });
    }
    Ok(())
}

/// Moves `component_id` to slot `new_index` under `new_parent_id`.
///
/// `new_index` counts the destination siblings without the moved
/// component; an index past the end appends.
pub fn reorder(
    list: &[ComponentRecord],
    component_id: &str,
    new_parent_id: Option<&str>,
    new_index: usize,
) -> Result<Vec<ComponentRecord>, ReorderRejection> {
    reorder_to(
        list,
        component_id,
        new_parent_id,
        &DropPosition::Slot(new_index),
        MAX_NESTING_DEPTH,
    )
}

/// [`reorder`] with an explicit drop position and depth limit
pub fn reorder_to(
    list: &[ComponentRecord],
    component_id: &str,
    new_parent_id: Option<&str>,
    position: &DropPosition,
    max_depth: usize,
) -> Result<Vec<ComponentRecord>, ReorderRejection> {
    can_drop(list, component_id, new_parent_id, max_depth)?;

    let hierarchy = Hierarchy::new(list);
    let siblings = hierarchy.siblings_excluding(new_parent_id, component_id);
    let slot = resolve_slot(&siblings, position);
    let orders: Vec<f64> = siblings.iter().map(|s| s.order_index).collect();
    let order_index = order_between(&orders, slot);

    // Neighbours decide where the record sits in the flat list, so that
    // equal order indices still sort it into the requested slot
    let prev_id = slot.checked_sub(1).map(|i| siblings[i].id.clone());
    let next_id = siblings.get(slot).map(|s| s.id.clone());

    let mut updated = list.to_vec();
    let Some(from) = updated.iter().position(|c| c.id == component_id) else {
        return Err(ReorderRejection::MissingComponent(component_id.to_string()));
    };
    let mut moved = updated.remove(from);
    moved.parent_id = new_parent_id.map(str::to_string);
    moved.order_index = order_index;

    let at = match (prev_id, next_id) {
        (Some(prev), _) => updated
            .iter()
            .position(|c| c.id == prev)
            .map(|pos| pos + 1),
        (None, Some(next)) => updated.iter().position(|c| c.id == next),
        (None, None) => None,
    }
    .unwrap_or(from.min(updated.len()));
    updated.insert(at, moved);

    Ok(updated)
}

/// Swaps `component_id` with its previous (`offset < 0`) or next sibling
pub fn move_among_siblings(
    list: &[ComponentRecord],
    component_id: &str,
    offset: isize,
    max_depth: usize,
) -> Result<Vec<ComponentRecord>, ReorderRejection> {
    let hierarchy = Hierarchy::new(list);
    if !hierarchy.contains(component_id) {
        return Err(ReorderRejection::MissingComponent(component_id.to_string()));
    }
    let parent = hierarchy.parent_id(component_id);
    let siblings = hierarchy.children(parent);
    let Some(current) = siblings.iter().position(|s| s.id == component_id) else {
        return Err(ReorderRejection::MissingComponent(component_id.to_string()));
    };

    let target = current as isize + offset;
    if target < 0 || target >= siblings.len() as isize || offset == 0 {
        return Err(ReorderRejection::AtEdge(component_id.to_string()));
    }
    // With the moved record left out, its target index is exactly the slot
    reorder_to(
        list,
        component_id,
        parent,
        &DropPosition::Slot(target as usize),
        max_depth,
    )
}
