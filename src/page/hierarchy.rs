//! Parent/child queries over a flat component collection.
//!
//! A parent reference that does not resolve to a record in the same
//! collection is treated as "no parent", matching how the tree builder
//! degrades malformed input.

use std::collections::{HashMap, HashSet};

use super::ComponentRecord;

/// Indexed, read-only view over a flat component list
pub struct Hierarchy<'a> {
    list: &'a [ComponentRecord],
    /// id -> position of the first record carrying that id
    index: HashMap<&'a str, usize>,
    /// parent id -> child positions, in collection order
    children: HashMap<&'a str, Vec<usize>>,
    /// positions whose parent is missing, unresolvable or the record itself
    roots: Vec<usize>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(list: &'a [ComponentRecord]) -> Self {
        let mut index = HashMap::with_capacity(list.len());
        for (pos, record) in list.iter().enumerate() {
            index.entry(record.id.as_str()).or_insert(pos);
        }

        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (pos, record) in list.iter().enumerate() {
            match record.parent_id.as_deref() {
                Some(parent) if parent != record.id && index.contains_key(parent) => {
                    children.entry(parent).or_default().push(pos);
                }
                _ => roots.push(pos),
            }
        }

        Self {
            list,
            index,
            children,
            roots,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a ComponentRecord> {
        self.index.get(id).map(|&pos| &self.list[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Parent id after resolution; dangling references resolve to `None`
    pub fn parent_id(&self, id: &str) -> Option<&'a str> {
        self.get(id)?
            .parent_id
            .as_deref()
            .filter(|parent| self.index.contains_key(parent))
    }

    /// Children of `parent` (`None` = roots), sorted by order index.
    ///
    /// The sort is stable, so equal order indices keep collection order.
    pub fn children(&self, parent: Option<&str>) -> Vec<&'a ComponentRecord> {
        self.sorted_children(parent, None)
    }

    /// Like [`Hierarchy::children`] but leaves out `exclude`
    pub fn siblings_excluding(
        &self,
        parent: Option<&str>,
        exclude: &str,
    ) -> Vec<&'a ComponentRecord> {
        self.sorted_children(parent, Some(exclude))
    }

    fn sorted_children(
        &self,
        parent: Option<&str>,
        exclude: Option<&str>,
    ) -> Vec<&'a ComponentRecord> {
        let positions: &[usize] = match parent {
            None => &self.roots,
            Some(parent) => self.children.get(parent).map(Vec::as_slice).unwrap_or(&[]),
        };

        let mut records: Vec<&ComponentRecord> = positions
            .iter()
            .map(|&pos| &self.list[pos])
            .filter(|record| Some(record.id.as_str()) != exclude)
            .collect();
        records.sort_by(|a, b| a.order_index.total_cmp(&b.order_index));
        records
    }

    /// Ids of every record below `id`. Safe on cyclic input.
    pub fn descendants(&self, id: &str) -> Vec<&'a str> {
        let mut found = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let Some(record) = self.get(id) else {
            return found;
        };
        seen.insert(record.id.as_str());

        let mut queue = vec![record.id.as_str()];
        while let Some(current) = queue.pop() {
            for &pos in self.children.get(current).map(Vec::as_slice).unwrap_or(&[]) {
                let child = self.list[pos].id.as_str();
                if seen.insert(child) {
                    found.push(child);
                    queue.push(child);
                }
            }
        }
        found
    }

    /// True when `candidate` is `ancestor` itself or anywhere in its subtree
    pub fn is_self_or_descendant(&self, ancestor: &str, candidate: &str) -> bool {
        ancestor == candidate || self.descendants(ancestor).contains(&candidate)
    }

    /// Nesting level of `id`: roots are level 1. Returns 0 for unknown ids.
    pub fn depth(&self, id: &str) -> usize {
        if !self.contains(id) {
            return 0;
        }
        let mut depth = 1;
        let mut current = id;
        while let Some(parent) = self.parent_id(current) {
            depth += 1;
            // A loop in the parent chain can never be deeper than the list
            if depth > self.list.len() {
                break;
            }
            current = parent;
        }
        depth
    }

    /// Number of levels in the subtree rooted at `id` (a leaf is 1)
    pub fn subtree_height(&self, id: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        self.height_inner(id, &mut seen)
    }

    fn height_inner<'s>(&'s self, id: &'s str, seen: &mut HashSet<&'s str>) -> usize {
        if !seen.insert(id) {
            return 0;
        }
        let below = self
            .children
            .get(id)
            .map(|kids| {
                kids.iter()
                    .map(|&pos| self.height_inner(self.list[pos].id.as_str(), seen))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        below + 1
    }

    /// True when walking up from `id` leads back to `id`
    pub fn in_parent_cycle(&self, id: &str) -> bool {
        let mut steps = 0;
        let mut current = id;
        while let Some(parent) = self.parent_id(current) {
            if parent == id {
                return true;
            }
            steps += 1;
            if steps > self.list.len() {
                return false;
            }
            current = parent;
        }
        false
    }
}

/// A structural problem found in a flat collection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityIssue {
    #[error("duplicate component id '{id}'")]
    DuplicateId { id: String },
    #[error("component '{id}' references missing parent '{parent_id}'")]
    DanglingParent { id: String, parent_id: String },
    #[error("component '{id}' is its own ancestor")]
    Cycle { id: String },
}

/// Lists every invariant violation in `list`
pub fn check_integrity(list: &[ComponentRecord]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in list {
        if !seen.insert(record.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateId {
                id: record.id.clone(),
            });
        }
    }

    let hierarchy = Hierarchy::new(list);
    for record in list {
        if let Some(parent) = record.parent_id.as_deref()
            && !hierarchy.contains(parent)
        {
            issues.push(IntegrityIssue::DanglingParent {
                id: record.id.clone(),
                parent_id: parent.to_string(),
            });
        }
    }
    for id in seen {
        if hierarchy.in_parent_cycle(id) {
            issues.push(IntegrityIssue::Cycle { id: id.to_string() });
        }
    }
    issues
}

/// Returns a copy of `list` that satisfies the collection invariants.
///
/// Later duplicates of an id are dropped, and records with a dangling or
/// cyclic parent reference become roots.
pub fn repair_collection(list: &[ComponentRecord]) -> Vec<ComponentRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut repaired: Vec<ComponentRecord> = list
        .iter()
        .filter(|record| seen.insert(record.id.as_str()))
        .cloned()
        .collect();

    loop {
        let hierarchy = Hierarchy::new(&repaired);
        let broken: Option<usize> = repaired.iter().position(|record| {
            let dangling = record
                .parent_id
                .as_deref()
                .is_some_and(|parent| !hierarchy.contains(parent));
            dangling || hierarchy.in_parent_cycle(&record.id)
        });
        match broken {
            Some(pos) => repaired[pos].parent_id = None,
            None => break,
        }
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Props;

    fn record(id: &str, parent: Option<&str>, order: f64) -> ComponentRecord {
        ComponentRecord {
            id: id.to_string(),
            component_type: "section".to_string(),
            props: Props::new(),
            parent_id: parent.map(str::to_string),
            order_index: order,
            locked: false,
        }
    }

    fn sample() -> Vec<ComponentRecord> {
        vec![
            record("a", None, 0.0),
            record("b", Some("a"), 0.0),
            record("c", None, 1.0),
            record("d", Some("b"), 0.0),
            record("e", Some("a"), 1.0),
        ]
    }

    #[test]
    fn test_children_sorted_by_order_index() {
        let list = vec![
            record("x", None, 2.0),
            record("y", None, 0.5),
            record("z", None, 1.0),
        ];
        let hierarchy = Hierarchy::new(&list);
        let ids: Vec<&str> = hierarchy.children(None).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_children_ties_keep_collection_order() {
        let list = vec![
            record("first", None, 1.0),
            record("second", None, 1.0),
            record("zero", None, 0.0),
        ];
        let hierarchy = Hierarchy::new(&list);
        let ids: Vec<&str> = hierarchy.children(None).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_dangling_parent_counts_as_root() {
        let list = vec![record("a", None, 0.0), record("orphan", Some("gone"), 1.0)];
        let hierarchy = Hierarchy::new(&list);
        assert_eq!(hierarchy.children(None).len(), 2);
        assert_eq!(hierarchy.parent_id("orphan"), None);
        assert_eq!(hierarchy.depth("orphan"), 1);
    }

    #[test]
    fn test_descendants() {
        let list = sample();
        let hierarchy = Hierarchy::new(&list);
        let mut below = hierarchy.descendants("a");
        below.sort();
        assert_eq!(below, vec!["b", "d", "e"]);
        assert!(hierarchy.descendants("c").is_empty());
        assert!(hierarchy.descendants("missing").is_empty());
    }

    #[test]
    fn test_is_self_or_descendant() {
        let list = sample();
        let hierarchy = Hierarchy::new(&list);
        assert!(hierarchy.is_self_or_descendant("a", "a"));
        assert!(hierarchy.is_self_or_descendant("a", "d"));
        assert!(!hierarchy.is_self_or_descendant("b", "a"));
        assert!(!hierarchy.is_self_or_descendant("a", "c"));
    }

    #[test]
    fn test_depth_and_height() {
        let list = sample();
        let hierarchy = Hierarchy::new(&list);
        assert_eq!(hierarchy.depth("a"), 1);
        assert_eq!(hierarchy.depth("b"), 2);
        assert_eq!(hierarchy.depth("d"), 3);
        assert_eq!(hierarchy.depth("missing"), 0);

        assert_eq!(hierarchy.subtree_height("a"), 3);
        assert_eq!(hierarchy.subtree_height("b"), 2);
        assert_eq!(hierarchy.subtree_height("c"), 1);
    }

    #[test]
    fn test_cyclic_input_terminates() {
        let list = vec![record("a", Some("b"), 0.0), record("b", Some("a"), 0.0)];
        let hierarchy = Hierarchy::new(&list);
        assert!(hierarchy.in_parent_cycle("a"));
        assert!(hierarchy.depth("a") <= list.len() + 1);
        assert_eq!(hierarchy.subtree_height("a"), 2);
        assert_eq!(hierarchy.descendants("a"), vec!["b"]);
    }

    #[test]
    fn test_check_integrity_clean_collection() {
        assert!(check_integrity(&sample()).is_empty());
    }

    #[test]
    fn test_check_integrity_reports_problems() {
        let list = vec![
            record("a", None, 0.0),
            record("a", None, 1.0),
            record("b", Some("missing"), 0.0),
            record("c", Some("d"), 0.0),
            record("d", Some("c"), 0.0),
        ];
        let issues = check_integrity(&list);

        assert!(issues.contains(&IntegrityIssue::DuplicateId { id: "a".to_string() }));
        assert!(issues.contains(&IntegrityIssue::DanglingParent {
            id: "b".to_string(),
            parent_id: "missing".to_string(),
        }));
        assert!(issues.contains(&IntegrityIssue::Cycle { id: "c".to_string() }));
        assert!(issues.contains(&IntegrityIssue::Cycle { id: "d".to_string() }));
    }

    #[test]
    fn test_repair_collection() {
        let list = vec![
            record("a", None, 0.0),
            record("a", None, 1.0),
            record("b", Some("missing"), 0.0),
            record("c", Some("d"), 0.0),
            record("d", Some("c"), 0.0),
            record("e", Some("a"), 0.0),
        ];
        let repaired = repair_collection(&list);

        assert_eq!(repaired.len(), 5);
        assert!(check_integrity(&repaired).is_empty());
        let b = repaired.iter().find(|r| r.id == "b").unwrap();
        assert!(b.parent_id.is_none());
        let e = repaired.iter().find(|r| r.id == "e").unwrap();
        assert_eq!(e.parent_id.as_deref(), Some("a"));
    }
}
