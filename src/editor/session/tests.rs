use serde_json::json;

use super::*;
use crate::config::EditorSettings;
use crate::constants::MAX_HISTORY_ENTRIES;
use crate::editor::notifications::Severity;
use crate::editor::reorder::DropPosition;
use crate::page::{build_tree, ComponentRecord, Hierarchy, Props};
use crate::registry::ComponentRegistry;

fn record(id: &str, component_type: &str, parent: Option<&str>, order: f64) -> ComponentRecord {
    ComponentRecord {
        id: id.to_string(),
        component_type: component_type.to_string(),
        props: Props::new(),
        parent_id: parent.map(str::to_string),
        order_index: order,
        locked: false,
    }
}

fn text(id: &str, content: &str, parent: Option<&str>, order: f64) -> ComponentRecord {
    let mut record = record(id, "text", parent, order);
    record.props.insert("content".to_string(), json!(content));
    record
}

fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}

struct Fixture {
    session: EditorSession,
    registry: ComponentRegistry,
    settings: EditorSettings,
}

impl Fixture {
    fn new(components: Vec<ComponentRecord>) -> Self {
        Self {
            session: EditorSession::new(components),
            registry: ComponentRegistry::default(),
            settings: EditorSettings::default(),
        }
    }

    fn apply(&mut self, action: EditorAction) -> ActionOutcome {
        self.session.apply(action, &self.registry, &self.settings)
    }

    fn select(&mut self, id: &str) {
        assert!(self.apply(EditorAction::Select(Some(id.to_string()))).is_applied());
    }

    fn root_ids(&self) -> Vec<String> {
        self.session
            .tree()
            .iter()
            .map(|node| node.id().to_string())
            .collect()
    }

    fn ids(&self) -> Vec<&str> {
        self.session
            .components()
            .iter()
            .map(|c| c.id.as_str())
            .collect()
    }

    fn lock(&mut self, id: &str) {
        let outcome = self.apply(EditorAction::ToggleLock { id: id.to_string() });
        assert!(outcome.is_applied());
        assert!(self.session.get(id).unwrap().locked);
    }
}

/// section "a" > section "b" > text "c", plus a root text "d"
fn nested() -> Vec<ComponentRecord> {
    vec![
        record("a", "section", None, 0.0),
        record("b", "section", Some("a"), 0.0),
        text("c", "Deep", Some("b"), 0.0),
        text("d", "Root", None, 1.0),
    ]
}

#[test]
fn test_new_session_has_initial_history_entry() {
    let session = EditorSession::new(nested());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().current_index(), 0);
    assert!(session.selected_id().is_none());
    assert_eq!(session.components().len(), 4);
}

#[test]
fn test_select_unknown_id_is_ignored() {
    let mut fixture = Fixture::new(nested());
    let outcome = fixture.apply(EditorAction::Select(Some("missing".to_string())));
    assert_eq!(outcome, ActionOutcome::Unchanged);

    fixture.select("d");
    assert_eq!(fixture.session.selected().unwrap().id, "d");

    assert!(fixture.apply(EditorAction::Select(None)).is_applied());
    assert!(fixture.session.selected_id().is_none());
}

#[test]
fn test_add_uses_registry_defaults_and_selects() {
    let mut fixture = Fixture::new(Vec::new());
    let outcome = fixture.apply(EditorAction::add("hero"));

    let notice = outcome.notice().unwrap();
    assert_eq!(notice.title, "Component Added");
    assert_eq!(notice.description, "Hero has been added to the page");

    let added = fixture.session.selected().unwrap();
    assert_eq!(added.component_type, "hero");
    assert_eq!(added.props["title"], "Build something great");
    assert!(added.parent_id.is_none());
    assert_eq!(fixture.session.history().len(), 2);
    assert_eq!(fixture.session.history().current().unwrap().label, "Added Hero");
}

#[test]
fn test_add_appends_after_existing_roots() {
    let mut fixture = Fixture::new(nested());
    fixture.apply(EditorAction::add("button"));

    let roots = fixture.root_ids();
    assert_eq!(roots.len(), 3);
    assert_eq!(&roots[..2], &["a".to_string(), "d".to_string()]);
    assert_eq!(Some(roots[2].as_str()), fixture.session.selected_id());
}

#[test]
fn test_add_into_container_at_position() {
    let mut fixture = Fixture::new(nested());
    let outcome = fixture.apply(EditorAction::Add {
        component_type: "heading".to_string(),
        props: Some(props(json!({ "content": "Intro" }))),
        parent_id: Some("a".to_string()),
        position: DropPosition::Start,
    });
    assert!(outcome.is_applied());

    let tree = fixture.session.tree();
    let children: Vec<&str> = tree[0].children.iter().map(|n| n.id()).collect();
    assert_eq!(children.len(), 2);
    assert_eq!(Some(children[0]), fixture.session.selected_id());
    assert_eq!(children[1], "b");
}

#[test]
fn test_add_rejects_leaf_parent_and_depth_overflow() {
    let mut fixture = Fixture::new(nested());

    let into_leaf = fixture.apply(EditorAction::Add {
        component_type: "text".to_string(),
        props: None,
        parent_id: Some("d".to_string()),
        position: DropPosition::End,
    });
    assert_eq!(into_leaf, ActionOutcome::Unchanged);

    // "b" is level 2, so its children are level 3: allowed
    let under_b = fixture.apply(EditorAction::Add {
        component_type: "section".to_string(),
        props: None,
        parent_id: Some("b".to_string()),
        position: DropPosition::End,
    });
    assert!(under_b.is_applied());
    let level_three = fixture.session.selected_id().unwrap().to_string();

    let too_deep = fixture.apply(EditorAction::Add {
        component_type: "text".to_string(),
        props: None,
        parent_id: Some(level_three),
        position: DropPosition::End,
    });
    assert_eq!(too_deep, ActionOutcome::Unchanged);
    assert_eq!(fixture.session.history().len(), 2);
}

#[test]
fn test_update_props_replaces_props() {
    let mut fixture = Fixture::new(nested());
    let outcome = fixture.apply(EditorAction::UpdateProps {
        id: "d".to_string(),
        props: props(json!({ "content": "Changed" })),
    });
    assert!(outcome.is_applied());
    assert_eq!(fixture.session.get("d").unwrap().text_prop("content"), Some("Changed"));

    let same = fixture.apply(EditorAction::UpdateProps {
        id: "d".to_string(),
        props: props(json!({ "content": "Changed" })),
    });
    assert_eq!(same, ActionOutcome::Unchanged);
}

#[test]
fn test_locked_record_denies_edits_and_keeps_history() {
    let mut fixture = Fixture::new(nested());
    fixture.lock("d");
    let before = fixture.session.components().to_vec();
    let history_len = fixture.session.history().len();

    let denials = [
        (
            EditorAction::UpdateProps {
                id: "d".to_string(),
                props: Props::new(),
            },
            "Cannot edit locked component",
        ),
        (
            EditorAction::Delete { id: "d".to_string() },
            "Cannot delete locked component",
        ),
        (
            EditorAction::Duplicate { id: "d".to_string() },
            "Cannot duplicate locked component",
        ),
        (
            EditorAction::MoveUp { id: "d".to_string() },
            "Cannot move locked component",
        ),
        (
            EditorAction::Reorder {
                id: "d".to_string(),
                new_parent_id: Some("a".to_string()),
                new_index: 0,
            },
            "Cannot move locked component",
        ),
    ];

    for (action, reason) in denials {
        let outcome = fixture.apply(action);
        assert_eq!(outcome, ActionOutcome::Denied(reason.to_string()));
        assert_eq!(outcome.notice().unwrap().severity, Severity::Error);
    }

    assert_eq!(fixture.session.components(), before.as_slice());
    assert_eq!(fixture.session.history().len(), history_len);
}

#[test]
fn test_toggle_lock_is_always_allowed() {
    let mut fixture = Fixture::new(nested());
    fixture.lock("a");
    let outcome = fixture.apply(EditorAction::ToggleLock { id: "a".to_string() });
    assert_eq!(outcome.notice().unwrap().description, "Component unlocked");
    assert!(!fixture.session.get("a").unwrap().locked);
}

#[test]
fn test_delete_cascades_through_subtree() {
    let mut fixture = Fixture::new(nested());
    fixture.select("c");

    let outcome = fixture.apply(EditorAction::Delete { id: "a".to_string() });
    assert_eq!(
        outcome.notice().unwrap().description,
        "Section and 2 nested components have been removed"
    );
    assert_eq!(fixture.ids(), vec!["d"]);
    assert!(fixture.session.selected_id().is_none());
}

#[test]
fn test_delete_keeps_unrelated_selection() {
    let mut fixture = Fixture::new(nested());
    fixture.select("d");
    fixture.apply(EditorAction::Delete { id: "b".to_string() });

    assert_eq!(fixture.ids(), vec!["a", "d"]);
    assert_eq!(fixture.session.selected_id(), Some("d"));
}

#[test]
fn test_delete_denied_when_descendant_locked() {
    let mut fixture = Fixture::new(nested());
    fixture.lock("c");

    let outcome = fixture.apply(EditorAction::Delete { id: "a".to_string() });
    assert_eq!(
        outcome,
        ActionOutcome::Denied("Cannot delete locked component".to_string())
    );
    assert_eq!(fixture.session.components().len(), 4);
}

#[test]
fn test_duplicate_marks_copy_and_places_it_after_original() {
    let mut heading = record("h", "heading", None, 0.0);
    heading.props = props(json!({ "content": "Welcome", "level": 1 }));
    let mut fixture = Fixture::new(vec![heading, text("t", "Body", None, 1.0)]);

    let outcome = fixture.apply(EditorAction::Duplicate { id: "h".to_string() });
    assert_eq!(outcome.notice().unwrap().title, "Component Duplicated");

    let copy = fixture.session.selected().unwrap();
    assert_ne!(copy.id, "h");
    assert_eq!(copy.text_prop("content"), Some("Welcome (copy)"));
    assert_eq!(copy.props["level"], 1);
    assert!(!copy.locked);

    let copy_id = copy.id.clone();
    assert_eq!(fixture.root_ids(), vec!["h".to_string(), copy_id, "t".to_string()]);
    assert_eq!(fixture.session.get("h").unwrap().text_prop("content"), Some("Welcome"));
}

#[test]
fn test_duplicate_uses_primary_text_field() {
    let mut button = record("btn", "button", None, 0.0);
    button.props = props(json!({ "label": "Buy", "content": "unused" }));
    let mut fixture = Fixture::new(vec![button]);
    fixture.settings.duplicate_suffix = " 2".to_string();

    fixture.apply(EditorAction::Duplicate { id: "btn".to_string() });
    let copy = fixture.session.selected().unwrap();
    assert_eq!(copy.text_prop("label"), Some("Buy 2"));
    assert_eq!(copy.text_prop("content"), Some("unused"));
}

#[test]
fn test_duplicate_unknown_type_falls_back_to_content() {
    let mut carousel = record("x", "carousel", None, 0.0);
    carousel.props = props(json!({ "content": "Slides" }));
    let mut fixture = Fixture::new(vec![carousel]);

    fixture.apply(EditorAction::Duplicate { id: "x".to_string() });
    let copy = fixture.session.selected().unwrap();
    assert_eq!(copy.text_prop("content"), Some("Slides (copy)"));
}

#[test]
fn test_duplicate_does_not_copy_children() {
    let mut fixture = Fixture::new(nested());
    fixture.apply(EditorAction::Duplicate { id: "b".to_string() });

    let copy = fixture.session.selected().unwrap();
    assert_eq!(copy.parent_id.as_deref(), Some("a"));
    assert_eq!(fixture.session.components().len(), 5);

    let tree = fixture.session.tree();
    let under_a: Vec<usize> = tree[0].children.iter().map(|n| n.children.len()).collect();
    assert_eq!(under_a, vec![1, 0]);
}

#[test]
fn test_move_up_and_down() {
    let mut fixture = Fixture::new(vec![
        text("a", "A", None, 0.0),
        text("b", "B", None, 1.0),
        text("c", "C", None, 2.0),
    ]);

    assert!(fixture.apply(EditorAction::MoveUp { id: "c".to_string() }).is_applied());
    assert_eq!(fixture.root_ids(), vec!["a", "c", "b"]);

    assert!(fixture.apply(EditorAction::MoveDown { id: "a".to_string() }).is_applied());
    assert_eq!(fixture.root_ids(), vec!["c", "a", "b"]);

    let at_top = fixture.apply(EditorAction::MoveUp { id: "c".to_string() });
    assert_eq!(at_top, ActionOutcome::Unchanged);
    assert_eq!(fixture.session.history().len(), 3);
}

/// Four levels: a > b > d > {f1, f2}, one more than the default limit
fn too_deep() -> Vec<ComponentRecord> {
    vec![
        record("a", "section", None, 0.0),
        record("b", "section", Some("a"), 0.0),
        record("d", "section", Some("b"), 0.0),
        text("f1", "First", Some("d"), 0.0),
        text("f2", "Second", Some("d"), 1.0),
        text("r", "Root", None, 1.0),
    ]
}

fn child_ids(fixture: &Fixture, parent: &str) -> Vec<String> {
    let hierarchy = Hierarchy::new(fixture.session.components());
    hierarchy
        .children(Some(parent))
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

#[test]
fn test_overly_deep_page_still_allows_level_preserving_edits() {
    let mut fixture = Fixture::new(too_deep());

    assert!(fixture.apply(EditorAction::MoveUp { id: "f2".to_string() }).is_applied());
    assert_eq!(child_ids(&fixture, "d"), vec!["f2", "f1"]);

    assert!(fixture.apply(EditorAction::MoveDown { id: "f2".to_string() }).is_applied());
    assert_eq!(child_ids(&fixture, "d"), vec!["f1", "f2"]);

    assert!(fixture.apply(EditorAction::Duplicate { id: "f1".to_string() }).is_applied());
    let copy = fixture.session.selected_id().unwrap().to_string();
    assert_eq!(
        child_ids(&fixture, "d"),
        vec!["f1".to_string(), copy.clone(), "f2".to_string()]
    );
    assert_eq!(fixture.session.get(&copy).unwrap().text_prop("content"), Some("First (copy)"));

    fixture.select("f2");
    let beside = fixture.apply(EditorAction::Add {
        component_type: "button".to_string(),
        props: None,
        parent_id: Some("d".to_string()),
        position: DropPosition::After("f2".to_string()),
    });
    assert!(beside.is_applied());
    assert_eq!(child_ids(&fixture, "d").len(), 4);
    assert_eq!(fixture.session.history().len(), 5);
}

#[test]
fn test_overly_deep_page_refuses_deeper_placements() {
    let mut fixture = Fixture::new(too_deep());

    let appended = fixture.apply(EditorAction::Add {
        component_type: "text".to_string(),
        props: None,
        parent_id: Some("d".to_string()),
        position: DropPosition::End,
    });
    assert_eq!(appended, ActionOutcome::Unchanged);

    let sunk = fixture.apply(EditorAction::Reorder {
        id: "r".to_string(),
        new_parent_id: Some("d".to_string()),
        new_index: 0,
    });
    assert_eq!(sunk, ActionOutcome::Unchanged);
    assert_eq!(fixture.session.history().len(), 1);
}

#[test]
fn test_reorder_rejections_are_silent() {
    let mut fixture = Fixture::new(nested());

    let cycle = fixture.apply(EditorAction::Reorder {
        id: "a".to_string(),
        new_parent_id: Some("b".to_string()),
        new_index: 0,
    });
    assert_eq!(cycle, ActionOutcome::Unchanged);
    assert!(cycle.notice().is_none());

    let into_leaf = fixture.apply(EditorAction::Reorder {
        id: "a".to_string(),
        new_parent_id: Some("d".to_string()),
        new_index: 0,
    });
    assert_eq!(into_leaf, ActionOutcome::Unchanged);
    assert_eq!(fixture.session.history().len(), 1);
}

#[test]
fn test_reorder_moves_to_root() {
    let mut fixture = Fixture::new(nested());
    let outcome = fixture.apply(EditorAction::Reorder {
        id: "c".to_string(),
        new_parent_id: None,
        new_index: 0,
    });
    assert!(outcome.is_applied());
    assert_eq!(fixture.root_ids(), vec!["c", "a", "d"]);
    assert_eq!(fixture.session.history().current().unwrap().label, "Moved");
}

#[test]
fn test_undo_redo_restores_snapshots() {
    let mut fixture = Fixture::new(nested());
    fixture.apply(EditorAction::Delete { id: "d".to_string() });
    assert_eq!(fixture.session.components().len(), 3);

    let undo = fixture.apply(EditorAction::Undo);
    assert_eq!(undo.notice().unwrap().description, "Undid: Deleted Text");
    assert_eq!(fixture.session.components(), nested().as_slice());

    let redo = fixture.apply(EditorAction::Redo);
    assert_eq!(redo.notice().unwrap().description, "Redid: Deleted Text");
    assert_eq!(fixture.session.components().len(), 3);

    assert_eq!(fixture.apply(EditorAction::Redo), ActionOutcome::Unchanged);
}

#[test]
fn test_undo_clears_selection_of_vanished_record() {
    let mut fixture = Fixture::new(Vec::new());
    fixture.apply(EditorAction::add("text"));
    assert!(fixture.session.selected_id().is_some());

    fixture.apply(EditorAction::Undo);
    assert!(fixture.session.components().is_empty());
    assert!(fixture.session.selected_id().is_none());
}

#[test]
fn test_redo_clears_selection_of_deleted_record() {
    let mut fixture = Fixture::new(nested());
    fixture.apply(EditorAction::Delete { id: "d".to_string() });
    fixture.apply(EditorAction::Undo);

    fixture.select("d");
    assert_eq!(fixture.apply(EditorAction::Undo), ActionOutcome::Unchanged);
    assert_eq!(fixture.session.selected_id(), Some("d"));

    // Redo returns to the state without "d"
    fixture.apply(EditorAction::Redo);
    assert!(fixture.session.selected_id().is_none());
}

#[test]
fn test_jump_to_history_entry() {
    let mut fixture = Fixture::new(Vec::new());
    for tag in ["heading", "text", "button"] {
        fixture.apply(EditorAction::add(tag));
    }
    assert_eq!(fixture.session.history().len(), 4);

    assert!(fixture.apply(EditorAction::JumpTo(1)).is_applied());
    assert_eq!(fixture.session.components().len(), 1);
    assert!(fixture.session.history().can_redo());

    assert_eq!(fixture.apply(EditorAction::JumpTo(1)), ActionOutcome::Unchanged);
    assert_eq!(fixture.apply(EditorAction::JumpTo(99)), ActionOutcome::Unchanged);

    // A new edit discards the entries after the cursor
    fixture.apply(EditorAction::add("image"));
    assert_eq!(fixture.session.history().len(), 3);
    assert!(!fixture.session.history().can_redo());
}

#[test]
fn test_history_is_bounded() {
    let mut fixture = Fixture::new(Vec::new());
    for _ in 0..MAX_HISTORY_ENTRIES + 5 {
        fixture.apply(EditorAction::add("text"));
    }
    assert_eq!(fixture.session.history().len(), MAX_HISTORY_ENTRIES);
    assert_eq!(fixture.session.components().len(), MAX_HISTORY_ENTRIES + 5);
}

#[test]
fn test_shortcuts_resolve_against_selection() {
    let mut fixture = Fixture::new(nested());
    assert_eq!(
        fixture.session.action_for_shortcut(EditorShortcut::Undo),
        Some(EditorAction::Undo)
    );
    assert!(fixture
        .session
        .action_for_shortcut(EditorShortcut::DeleteSelected)
        .is_none());

    fixture.select("d");
    assert_eq!(
        fixture
            .session
            .action_for_shortcut(EditorShortcut::DuplicateSelected),
        Some(EditorAction::Duplicate { id: "d".to_string() })
    );
    assert_eq!(
        fixture
            .session
            .action_for_shortcut(EditorShortcut::MoveSelectedUp),
        Some(EditorAction::MoveUp { id: "d".to_string() })
    );
}

#[test]
fn test_reset_replaces_everything() {
    let mut fixture = Fixture::new(nested());
    fixture.select("a");
    fixture.apply(EditorAction::add("hero"));
    let revision = fixture.session.revision();

    fixture.session.reset(vec![text("z", "Fresh", None, 0.0)]);
    assert_eq!(fixture.ids(), vec!["z"]);
    assert!(fixture.session.selected_id().is_none());
    assert_eq!(fixture.session.history().len(), 1);
    assert!(fixture.session.revision() > revision);
    assert_eq!(build_tree(fixture.session.components()).len(), 1);
}
