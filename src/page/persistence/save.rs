//! Page save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::{AddRecentPageRequest, UpdateLastPagePathRequest};
use crate::editor::{EditorSession, Notice, Notifications};
use crate::page::{PageData, SavedPage};

use super::file::write_page;
use super::messages::SavePageRequest;
use super::resources::{AsyncPageOperation, CurrentPageFile, PageDirtyState, PageSaveError, SavePageTask};
use super::results::SaveResult;

/// Starts an async save operation
pub fn save_page_system(
    mut commands: Commands,
    mut events: MessageReader<SavePageRequest>,
    session: Res<EditorSession>,
    page_data: Res<PageData>,
    mut async_op: ResMut<AsyncPageOperation>,
) {
    for event in events.read() {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("Save operation already in progress");
            continue;
        }

        let saved_page = SavedPage::new(page_data.clone(), session.components().to_vec());
        let revision = session.revision();
        let page = page_data.clone();

        let path = event.path.clone();
        let page_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("page")
            .to_string();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", page_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let outcome = write_page(&path, &saved_page);
            SaveResult {
                path,
                revision,
                page,
                outcome,
            }
        });

        commands.spawn(SavePageTask(task));
    }
}

/// Polls save tasks and handles completion
#[allow(clippy::too_many_arguments)]
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SavePageTask)>,
    mut async_op: ResMut<AsyncPageOperation>,
    mut current_page_file: ResMut<CurrentPageFile>,
    mut last_path_events: MessageWriter<UpdateLastPagePathRequest>,
    mut recent_events: MessageWriter<AddRecentPageRequest>,
    mut dirty_state: ResMut<PageDirtyState>,
    mut save_error: ResMut<PageSaveError>,
    mut notifications: ResMut<Notifications>,
    time: Res<Time>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_saving = false;
            async_op.operation_description = None;

            match result.outcome {
                Ok(()) => {
                    info!("Page saved to {:?}", result.path);
                    save_error.message = None;

                    current_page_file.path = Some(result.path.clone());
                    last_path_events.write(UpdateLastPagePathRequest {
                        path: result.path.clone(),
                    });
                    recent_events.write(AddRecentPageRequest {
                        path: result.path.clone(),
                    });

                    dirty_state.mark_saved(result.revision, result.page);
                    notifications.push(
                        Notice::success("Page Saved", current_page_file.display_name()),
                        time.elapsed_secs_f64(),
                    );
                }
                Err(e) => {
                    error!("{}", e);
                    save_error.message = Some(e.to_string());
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
