//! Page load system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::{AddRecentPageRequest, AppConfig, UpdateLastPagePathRequest};
use crate::editor::{EditorSession, Notice, Notifications};
use crate::page::PageData;

use super::file::{read_page, repair_loaded_page};
use super::messages::LoadPageRequest;
use super::resources::{
    AsyncPageOperation, CurrentPageFile, LoadPageTask, LoadValidationWarning, PageDirtyState,
    PageLoadError,
};
use super::results::LoadResult;

/// Startup system that queues the last opened page, if it is still on disk
pub fn reopen_last_page(config: Res<AppConfig>, mut load_events: MessageWriter<LoadPageRequest>) {
    if let Some(ref path) = config.data.last_page_path
        && path.exists()
    {
        info!("Reopening last page: {:?}", path);
        load_events.write(LoadPageRequest { path: path.clone() });
    }
}

/// Starts an async load operation (file I/O only)
pub fn load_page_system(
    mut commands: Commands,
    mut events: MessageReader<LoadPageRequest>,
    mut async_op: ResMut<AsyncPageOperation>,
) {
    for event in events.read() {
        // Don't start a new load if one is already in progress
        if async_op.is_busy() {
            warn!("Load operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let page_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("page")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", page_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let outcome = read_page(&path);
            LoadResult { path, outcome }
        });

        commands.spawn(LoadPageTask(task));
    }
}

/// Polls load tasks and swaps the loaded page into the session
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadPageTask)>,
    mut async_op: ResMut<AsyncPageOperation>,
    mut session: ResMut<EditorSession>,
    mut page_data: ResMut<PageData>,
    mut load_error: ResMut<PageLoadError>,
    mut load_warning: ResMut<LoadValidationWarning>,
    mut current_page_file: ResMut<CurrentPageFile>,
    mut last_path_events: MessageWriter<UpdateLastPagePathRequest>,
    mut recent_events: MessageWriter<AddRecentPageRequest>,
    mut dirty_state: ResMut<PageDirtyState>,
    mut notifications: ResMut<Notifications>,
    time: Res<Time>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;
            load_error.message = None;
            commands.entity(entity).despawn();

            let mut saved_page = match result.outcome {
                Ok(saved_page) => saved_page,
                Err(e) => {
                    error!("{}", e);
                    load_error.message = Some(e.to_string());
                    continue;
                }
            };

            let issues = repair_loaded_page(&mut saved_page);
            if !issues.is_empty() {
                warn!(
                    "Repaired {} integrity issues in {:?}",
                    issues.len(),
                    result.path
                );
                load_warning.show = true;
                load_warning.issues = issues.iter().map(ToString::to_string).collect();
                load_warning.page_path = Some(result.path.clone());
            }

            session.reset(saved_page.components);
            *page_data = saved_page.page;
            dirty_state.mark_saved(session.revision(), page_data.clone());

            info!("Page loaded from {:?}", result.path);

            current_page_file.path = Some(result.path.clone());
            last_path_events.write(UpdateLastPagePathRequest {
                path: result.path.clone(),
            });
            recent_events.write(AddRecentPageRequest {
                path: result.path.clone(),
            });
            notifications.push(
                Notice::info("Page Loaded", current_page_file.display_name()),
                time.elapsed_secs_f64(),
            );
        }
    }
}
