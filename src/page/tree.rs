//! Nested view of the flat component collection.
//!
//! The forest is rebuilt from scratch after every change; nothing keeps an
//! incremental tree around.

use std::collections::HashMap;

use super::ComponentRecord;

/// A component together with its ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub record: ComponentRecord,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Number of nodes in this subtree, including the node itself
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Total number of nodes in a forest
pub fn forest_size(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::count).sum()
}

/// Builds an ordered forest from a flat list.
///
/// Records whose parent is missing become roots. Every sibling list is
/// sorted by `order_index`, ties keeping collection order. Malformed input
/// never fails: a record caught in a parent cycle is promoted to a root so
/// each input record appears exactly once in the output.
pub fn build_tree(list: &[ComponentRecord]) -> Vec<TreeNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(list.len());
    for (pos, record) in list.iter().enumerate() {
        index.entry(record.id.as_str()).or_insert(pos);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); list.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (pos, record) in list.iter().enumerate() {
        match record.parent_id.as_deref().and_then(|p| index.get(p)) {
            Some(&parent) if parent != pos => children[parent].push(pos),
            _ => roots.push(pos),
        }
    }

    // Anything not reachable from a root sits on a parent cycle
    let mut reached = vec![false; list.len()];
    for &root in &roots {
        mark_reached(root, &children, &mut reached);
    }
    for pos in 0..list.len() {
        if !reached[pos] {
            roots.push(pos);
            mark_reached(pos, &children, &mut reached);
        }
    }

    let mut emitted = vec![false; list.len()];
    sort_positions(&mut roots, list);
    roots
        .into_iter()
        .filter_map(|pos| build_node(pos, list, &children, &mut emitted))
        .collect()
}

fn mark_reached(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        if reached[pos] {
            continue;
        }
        reached[pos] = true;
        stack.extend(children[pos].iter().copied());
    }
}

fn sort_positions(positions: &mut [usize], list: &[ComponentRecord]) {
    positions.sort_by(|&a, &b| {
        list[a]
            .order_index
            .total_cmp(&list[b].order_index)
            .then(a.cmp(&b))
    });
}

fn build_node(
    pos: usize,
    list: &[ComponentRecord],
    children: &[Vec<usize>],
    emitted: &mut [bool],
) -> Option<TreeNode> {
    if emitted[pos] {
        return None;
    }
    emitted[pos] = true;

    let mut kids = children[pos].clone();
    sort_positions(&mut kids, list);
    let nodes = kids
        .into_iter()
        .filter_map(|child| build_node(child, list, children, emitted))
        .collect();

    Some(TreeNode {
        record: list[pos].clone(),
        children: nodes,
    })
}

/// One visible row of a depth-first walk over the forest
#[derive(Debug, Clone, Copy)]
pub struct FlatRow<'a> {
    pub record: &'a ComponentRecord,
    /// 0 for roots
    pub depth: usize,
    pub has_children: bool,
}

/// Depth-first, pre-order listing of a forest
pub fn flatten_tree(forest: &[TreeNode]) -> Vec<FlatRow<'_>> {
    fn walk<'a>(nodes: &'a [TreeNode], depth: usize, rows: &mut Vec<FlatRow<'a>>) {
        for node in nodes {
            rows.push(FlatRow {
                record: &node.record,
                depth,
                has_children: !node.children.is_empty(),
            });
            walk(&node.children, depth + 1, rows);
        }
    }

    let mut rows = Vec::with_capacity(forest_size(forest));
    walk(forest, 0, &mut rows);
    rows
}
