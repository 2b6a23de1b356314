use std::collections::HashSet;

use bevy::prelude::*;
use serde_json::Value;

use crate::config::EditorSettings;
use crate::editor::history::HistoryStack;
use crate::editor::notifications::Notice;
use crate::editor::reorder::{
    can_insert_under, move_among_siblings, reorder_to, DropPosition, ReorderRejection,
};
use crate::page::{build_tree, generate_component_id, ComponentRecord, Hierarchy, Props, TreeNode};
use crate::registry::ComponentRegistry;

use super::action::{ActionOutcome, EditorAction, EditorShortcut};

/// Resource holding the page being edited
#[derive(Resource)]
pub struct EditorSession {
    components: Vec<ComponentRecord>,
    selected: Option<String>,
    history: HistoryStack,
    /// Bumped every time `components` is replaced
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl EditorSession {
    pub fn new(components: Vec<ComponentRecord>) -> Self {
        Self {
            history: HistoryStack::new(components.clone()),
            components,
            selected: None,
            revision: 0,
        }
    }

    /// Starts over with `components`: fresh history, nothing selected
    pub fn reset(&mut self, components: Vec<ComponentRecord>) {
        self.history.reset(components.clone());
        self.components = components;
        self.selected = None;
        self.revision += 1;
    }

    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub fn get(&self, id: &str) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&ComponentRecord> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.components)
    }

    /// Resolves a shortcut against the current selection.
    ///
    /// Returns `None` when the shortcut needs a selection and there is none.
    pub fn action_for_shortcut(&self, shortcut: EditorShortcut) -> Option<EditorAction> {
        let selected = || self.selected.clone();
        Some(match shortcut {
            EditorShortcut::Undo => EditorAction::Undo,
            EditorShortcut::Redo => EditorAction::Redo,
            EditorShortcut::DeleteSelected => EditorAction::Delete { id: selected()? },
            EditorShortcut::DuplicateSelected => EditorAction::Duplicate { id: selected()? },
            EditorShortcut::ToggleLockSelected => EditorAction::ToggleLock { id: selected()? },
            EditorShortcut::MoveSelectedUp => EditorAction::MoveUp { id: selected()? },
            EditorShortcut::MoveSelectedDown => EditorAction::MoveDown { id: selected()? },
        })
    }

    pub fn apply(
        &mut self,
        action: EditorAction,
        registry: &ComponentRegistry,
        settings: &EditorSettings,
    ) -> ActionOutcome {
        match action {
            EditorAction::Select(id) => self.select(id),
            EditorAction::Add {
                component_type,
                props,
                parent_id,
                position,
            } => self.add(component_type, props, parent_id, &position, registry, settings),
            EditorAction::UpdateProps { id, props } => self.update_props(&id, props, registry),
            EditorAction::Delete { id } => self.delete(&id, registry),
            EditorAction::Duplicate { id } => self.duplicate(&id, registry, settings),
            EditorAction::ToggleLock { id } => self.toggle_lock(&id, registry),
            EditorAction::MoveUp { id } => self.move_by(&id, -1, settings),
            EditorAction::MoveDown { id } => self.move_by(&id, 1, settings),
            EditorAction::Reorder {
                id,
                new_parent_id,
                new_index,
            } => self.reorder(&id, new_parent_id.as_deref(), new_index, registry, settings),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::JumpTo(index) => self.jump_to(index),
        }
    }

    fn commit(&mut self, components: Vec<ComponentRecord>, label: impl Into<String>) {
        self.history.push(components.clone(), label);
        self.components = components;
        self.revision += 1;
    }

    /// Makes a history snapshot current and drops a selection it no longer holds
    fn restore(&mut self, snapshot: Vec<ComponentRecord>) {
        self.components = snapshot;
        self.revision += 1;
        let still_present = self
            .selected
            .as_ref()
            .is_none_or(|selected| self.components.iter().any(|c| &c.id == selected));
        if !still_present {
            self.selected = None;
        }
    }

    /// Looks up `id` for a mutation, refusing locked records
    fn unlocked(&self, id: &str, denial: &str) -> Result<&ComponentRecord, ActionOutcome> {
        match self.get(id) {
            None => {
                debug!("Ignoring action on unknown component {}", id);
                Err(ActionOutcome::Unchanged)
            }
            Some(record) if record.locked => Err(ActionOutcome::Denied(denial.to_string())),
            Some(record) => Ok(record),
        }
    }

    fn select(&mut self, id: Option<String>) -> ActionOutcome {
        if let Some(ref id) = id
            && self.get(id).is_none()
        {
            debug!("Cannot select unknown component {}", id);
            return ActionOutcome::Unchanged;
        }
        if self.selected == id {
            return ActionOutcome::Unchanged;
        }
        self.selected = id;
        ActionOutcome::quiet()
    }

    fn add(
        &mut self,
        component_type: String,
        props: Option<Props>,
        parent_id: Option<String>,
        position: &DropPosition,
        registry: &ComponentRegistry,
        settings: &EditorSettings,
    ) -> ActionOutcome {
        if let Some(ref parent) = parent_id {
            match self.get(parent) {
                None => {
                    debug!("Cannot add into unknown parent {}", parent);
                    return ActionOutcome::Unchanged;
                }
                Some(record) if !registry.accepts_children(&record.component_type) => {
                    debug!("{} does not accept children", record.component_type);
                    return ActionOutcome::Unchanged;
                }
                Some(_) => {}
            }
        }

        // Placing next to an existing sibling keeps that sibling's level
        let beside_sibling = match position {
            DropPosition::After(sibling) => self
                .get(sibling)
                .is_some_and(|s| s.parent_id == parent_id),
            _ => false,
        };
        if !beside_sibling
            && let Err(rejection) = can_insert_under(
                &self.components,
                parent_id.as_deref(),
                settings.max_nesting_depth,
            )
        {
            debug!("Add rejected: {}", rejection);
            return ActionOutcome::Unchanged;
        }

        let definition = registry.resolve(&component_type);
        let props = props.unwrap_or_else(definition.default_props);
        let record =
            ComponentRecord::new(component_type.clone(), props).with_parent(parent_id.clone());
        let id = record.id.clone();

        // Appended first, then slotted like any other move
        let mut staged = self.components.clone();
        staged.push(record);
        let updated = match reorder_to(
            &staged,
            &id,
            parent_id.as_deref(),
            position,
            settings.max_nesting_depth,
        ) {
            Ok(updated) => updated,
            Err(rejection) => {
                debug!("Add rejected: {}", rejection);
                return ActionOutcome::Unchanged;
            }
        };

        let display_name = definition.display_name;
        self.commit(updated, format!("Added {}", display_name));
        self.selected = Some(id);
        info!("Added {} component", component_type);
        ActionOutcome::with_notice(Notice::success(
            "Component Added",
            format!("{} has been added to the page", display_name),
        ))
    }

    fn update_props(&mut self, id: &str, props: Props, registry: &ComponentRegistry) -> ActionOutcome {
        let record = match self.unlocked(id, "Cannot edit locked component") {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };
        if record.props == props {
            return ActionOutcome::Unchanged;
        }
        let label = format!("Edited {}", registry.resolve(&record.component_type).display_name);

        let mut updated = self.components.clone();
        if let Some(target) = updated.iter_mut().find(|c| c.id == id) {
            target.props = props;
        }
        self.commit(updated, label);
        ActionOutcome::with_notice(Notice::success(
            "Component Updated",
            "Properties have been saved",
        ))
    }

    fn delete(&mut self, id: &str, registry: &ComponentRegistry) -> ActionOutcome {
        let Some(record) = self.get(id) else {
            debug!("Ignoring delete of unknown component {}", id);
            return ActionOutcome::Unchanged;
        };
        let display_name = registry.resolve(&record.component_type).display_name;

        let hierarchy = Hierarchy::new(&self.components);
        let mut removed: HashSet<String> = hierarchy
            .descendants(id)
            .into_iter()
            .map(str::to_string)
            .collect();
        removed.insert(id.to_string());

        if self
            .components
            .iter()
            .any(|c| c.locked && removed.contains(&c.id))
        {
            return ActionOutcome::Denied("Cannot delete locked component".to_string());
        }

        let updated: Vec<ComponentRecord> = self
            .components
            .iter()
            .filter(|c| !removed.contains(&c.id))
            .cloned()
            .collect();
        let nested = self.components.len() - updated.len() - 1;

        self.commit(updated, format!("Deleted {}", display_name));
        if self.selected.as_ref().is_some_and(|s| removed.contains(s)) {
            self.selected = None;
        }

        let description = match nested {
            0 => format!("{} has been removed", display_name),
            1 => format!("{} and 1 nested component have been removed", display_name),
            n => format!("{} and {} nested components have been removed", display_name, n),
        };
        ActionOutcome::with_notice(Notice::success("Component Deleted", description))
    }

    fn duplicate(
        &mut self,
        id: &str,
        registry: &ComponentRegistry,
        settings: &EditorSettings,
    ) -> ActionOutcome {
        let original = match self.unlocked(id, "Cannot duplicate locked component") {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };
        let definition = registry.resolve(&original.component_type);
        let parent = Hierarchy::new(&self.components)
            .parent_id(id)
            .map(str::to_string);

        let mut copy = original.clone();
        copy.id = generate_component_id();
        copy.parent_id = parent.clone();
        if let Some(Value::String(text)) = copy.props.get_mut(definition.copy_marker_field()) {
            text.push_str(&settings.duplicate_suffix);
        }
        let copy_id = copy.id.clone();

        let mut staged = self.components.clone();
        staged.push(copy);
        let updated = match reorder_to(
            &staged,
            &copy_id,
            parent.as_deref(),
            &DropPosition::After(id.to_string()),
            settings.max_nesting_depth,
        ) {
            Ok(updated) => updated,
            Err(rejection) => {
                debug!("Duplicate rejected: {}", rejection);
                return ActionOutcome::Unchanged;
            }
        };

        let display_name = definition.display_name;
        self.commit(updated, format!("Duplicated {}", display_name));
        self.selected = Some(copy_id);
        ActionOutcome::with_notice(Notice::success(
            "Component Duplicated",
            format!("{} has been duplicated", display_name),
        ))
    }

    fn toggle_lock(&mut self, id: &str, registry: &ComponentRegistry) -> ActionOutcome {
        let Some(record) = self.get(id) else {
            debug!("Ignoring lock toggle of unknown component {}", id);
            return ActionOutcome::Unchanged;
        };
        let locked = !record.locked;
        let display_name = registry.resolve(&record.component_type).display_name;

        let mut updated = self.components.clone();
        if let Some(target) = updated.iter_mut().find(|c| c.id == id) {
            target.locked = locked;
        }
        let (label, description) = if locked {
            (format!("Locked {}", display_name), "Component locked")
        } else {
            (format!("Unlocked {}", display_name), "Component unlocked")
        };
        self.commit(updated, label);
        ActionOutcome::with_notice(Notice::info("Component Updated", description))
    }

    fn move_by(&mut self, id: &str, offset: isize, settings: &EditorSettings) -> ActionOutcome {
        if let Err(outcome) = self.unlocked(id, "Cannot move locked component") {
            return outcome;
        }
        match move_among_siblings(&self.components, id, offset, settings.max_nesting_depth) {
            Ok(updated) => {
                let label = if offset < 0 { "Moved up" } else { "Moved down" };
                self.commit(updated, label);
                ActionOutcome::quiet()
            }
            Err(ReorderRejection::AtEdge(_)) => ActionOutcome::Unchanged,
            Err(rejection) => {
                debug!("Move rejected: {}", rejection);
                ActionOutcome::Unchanged
            }
        }
    }

    fn reorder(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
        new_index: usize,
        registry: &ComponentRegistry,
        settings: &EditorSettings,
    ) -> ActionOutcome {
        if let Err(outcome) = self.unlocked(id, "Cannot move locked component") {
            return outcome;
        }
        if let Some(parent) = new_parent_id.and_then(|p| self.get(p))
            && !registry.accepts_children(&parent.component_type)
        {
            debug!("{} does not accept children", parent.component_type);
            return ActionOutcome::Unchanged;
        }

        match reorder_to(
            &self.components,
            id,
            new_parent_id,
            &DropPosition::Slot(new_index),
            settings.max_nesting_depth,
        ) {
            Ok(updated) if updated == self.components => ActionOutcome::Unchanged,
            Ok(updated) => {
                self.commit(updated, "Moved");
                ActionOutcome::quiet()
            }
            Err(rejection) => {
                debug!("Reorder rejected: {}", rejection);
                ActionOutcome::Unchanged
            }
        }
    }

    fn undo(&mut self) -> ActionOutcome {
        let undone = self.history.current().map(|entry| entry.label.clone());
        let Some(snapshot) = self.history.undo().map(<[ComponentRecord]>::to_vec) else {
            return ActionOutcome::Unchanged;
        };
        self.restore(snapshot);
        ActionOutcome::with_notice(Notice::info(
            "Undo",
            format!("Undid: {}", undone.unwrap_or_default()),
        ))
    }

    fn redo(&mut self) -> ActionOutcome {
        let Some(snapshot) = self.history.redo().map(<[ComponentRecord]>::to_vec) else {
            return ActionOutcome::Unchanged;
        };
        self.restore(snapshot);
        let redone = self
            .history
            .current()
            .map(|entry| entry.label.clone())
            .unwrap_or_default();
        ActionOutcome::with_notice(Notice::info("Redo", format!("Redid: {}", redone)))
    }

    fn jump_to(&mut self, index: usize) -> ActionOutcome {
        if index == self.history.current_index() {
            return ActionOutcome::Unchanged;
        }
        let Some(snapshot) = self.history.jump_to(index).map(<[ComponentRecord]>::to_vec) else {
            return ActionOutcome::Unchanged;
        };
        self.restore(snapshot);
        let time = self
            .history
            .current()
            .map(|entry| entry.time_label())
            .unwrap_or_default();
        ActionOutcome::with_notice(Notice::info(
            "History",
            format!("Restored the page as of {}", time),
        ))
    }
}
