//! Page state management: starting a new blank page.

use bevy::prelude::*;

use crate::editor::EditorSession;
use crate::page::PageData;

use super::messages::NewPageRequest;
use super::resources::{CurrentPageFile, PageDirtyState};

pub fn new_page_system(
    mut events: MessageReader<NewPageRequest>,
    mut session: ResMut<EditorSession>,
    mut page_data: ResMut<PageData>,
    mut current_page_file: ResMut<CurrentPageFile>,
    mut dirty_state: ResMut<PageDirtyState>,
) {
    for _ in events.read() {
        session.reset(Vec::new());
        *page_data = PageData::default();

        // New page has no file yet
        current_page_file.path = None;
        dirty_state.mark_saved(session.revision(), page_data.clone());

        info!("Created new page");
    }
}
