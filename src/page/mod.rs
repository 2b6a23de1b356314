mod component;
mod hierarchy;
mod page_data;
pub mod persistence;
mod tree;

pub use component::{generate_component_id, ComponentRecord, Props};
pub use hierarchy::{check_integrity, repair_collection, Hierarchy, IntegrityIssue};
pub use page_data::{PageData, SavedPage};
pub use persistence::{
    AsyncPageOperation, CurrentPageFile, LoadPageRequest, LoadValidationWarning, NewPageRequest,
    PageDirtyState, PageLoadError, PageSaveError, SavePageRequest,
};
pub use tree::{build_tree, flatten_tree, forest_size, FlatRow, TreeNode};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageData>()
            .init_resource::<PageLoadError>()
            .init_resource::<PageSaveError>()
            .init_resource::<LoadValidationWarning>()
            .init_resource::<CurrentPageFile>()
            .init_resource::<PageDirtyState>()
            .init_resource::<AsyncPageOperation>()
            .add_message::<SavePageRequest>()
            .add_message::<LoadPageRequest>()
            .add_message::<NewPageRequest>()
            .add_systems(Startup, persistence::ensure_pages_directory)
            .add_systems(Startup, persistence::reopen_last_page.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    persistence::save_page_system.run_if(on_message::<SavePageRequest>),
                    persistence::load_page_system.run_if(on_message::<LoadPageRequest>),
                    persistence::new_page_system.run_if(on_message::<NewPageRequest>),
                    persistence::poll_save_tasks,
                    persistence::poll_load_tasks,
                ),
            );
    }
}
