use crate::editor::notifications::Notice;
use crate::editor::reorder::DropPosition;
use crate::page::Props;

/// Everything a user can do to the page, applied through
/// [`EditorSession::apply`](super::EditorSession::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Select a component, or clear the selection with `None`
    Select(Option<String>),
    /// Place a new component; `props: None` uses the registry defaults
    Add {
        component_type: String,
        props: Option<Props>,
        parent_id: Option<String>,
        position: DropPosition,
    },
    UpdateProps {
        id: String,
        props: Props,
    },
    /// Remove a component together with everything nested inside it
    Delete {
        id: String,
    },
    Duplicate {
        id: String,
    },
    ToggleLock {
        id: String,
    },
    MoveUp {
        id: String,
    },
    MoveDown {
        id: String,
    },
    /// Move to slot `new_index` among the siblings under `new_parent_id`
    Reorder {
        id: String,
        new_parent_id: Option<String>,
        new_index: usize,
    },
    Undo,
    Redo,
    JumpTo(usize),
}

impl EditorAction {
    /// Add a root component of `component_type` with default props at the end
    pub fn add(component_type: impl Into<String>) -> Self {
        Self::Add {
            component_type: component_type.into(),
            props: None,
            parent_id: None,
            position: DropPosition::End,
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Add { .. } => "add",
            Self::UpdateProps { .. } => "update props",
            Self::Delete { .. } => "delete",
            Self::Duplicate { .. } => "duplicate",
            Self::ToggleLock { .. } => "toggle lock",
            Self::MoveUp { .. } => "move up",
            Self::MoveDown { .. } => "move down",
            Self::Reorder { .. } => "reorder",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::JumpTo(_) => "jump to",
        }
    }
}

/// Result of applying an [`EditorAction`]
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The session changed; `message` is an optional confirmation toast
    Applied { message: Option<Notice> },
    /// Nothing to do: unknown id, edge of the sibling list, invalid move
    Unchanged,
    /// Refused by an editing rule, e.g. the target is locked
    Denied(String),
}

impl ActionOutcome {
    pub(super) fn quiet() -> Self {
        Self::Applied { message: None }
    }

    pub(super) fn with_notice(notice: Notice) -> Self {
        Self::Applied {
            message: Some(notice),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Toast to show for this outcome, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Applied { message } => message.clone(),
            Self::Unchanged => None,
            Self::Denied(reason) => Some(Notice::denied(reason.clone())),
        }
    }
}

/// Keyboard-triggered actions. Most target the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorShortcut {
    Undo,
    Redo,
    DeleteSelected,
    DuplicateSelected,
    ToggleLockSelected,
    MoveSelectedUp,
    MoveSelectedDown,
}
