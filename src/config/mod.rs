use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_DUPLICATE_SUFFIX, MAX_NESTING_DEPTH, MAX_RECENT_PAGES};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Editing behaviour that users may tune
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Appended to the primary text of a duplicated component
    #[serde(default = "default_duplicate_suffix")]
    pub duplicate_suffix: String,

    /// Deepest allowed nesting level, roots being level 1
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_duplicate_suffix() -> String {
    DEFAULT_DUPLICATE_SUFFIX.to_string()
}

fn default_max_nesting_depth() -> usize {
    MAX_NESTING_DEPTH
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            duplicate_suffix: default_duplicate_suffix(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Directory the open/save dialogs start in
    #[serde(default)]
    pub pages_dir: Option<PathBuf>,

    /// Recently opened page files for quick access
    #[serde(default)]
    pub recent_pages: Vec<PathBuf>,

    /// Last opened page file path (not auto-loaded, just remembered for quick access)
    #[serde(default)]
    pub last_page_path: Option<PathBuf>,

    #[serde(default)]
    pub editor: EditorSettings,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Resource to warn the user when the last opened page file is gone
#[derive(Resource, Default)]
pub struct MissingPageWarning {
    pub show: bool,
    pub path: Option<PathBuf>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to add a page file to the recent list
#[derive(Message)]
pub struct AddRecentPageRequest {
    pub path: PathBuf,
}

/// Message to update the last page path in config
#[derive(Message)]
pub struct UpdateLastPagePathRequest {
    pub path: PathBuf,
}

/// Parsed config plus the reason it was reset, if it was
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str::<AppConfigData>(json) {
        Ok(mut data) => {
            if data.editor.max_nesting_depth == 0 {
                warn!("max_nesting_depth of 0 in config, using 1");
                data.editor.max_nesting_depth = 1;
            }
            (data, None)
        }
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &PathBuf) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.1.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Moves `path` to the front of `recent`, keeping at most `MAX_RECENT_PAGES`
fn push_recent(recent: &mut Vec<PathBuf>, path: &PathBuf) {
    recent.retain(|p| p != path);
    recent.insert(0, path.clone());
    recent.truncate(MAX_RECENT_PAGES);
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let config_path = config.config_path.clone();
    let (data, reset_reason) = load_config(&config_path);
    config.data = data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to check if last page exists
fn check_last_page_exists(config: Res<AppConfig>, mut warning: ResMut<MissingPageWarning>) {
    if let Some(ref path) = config.data.last_page_path
        && !path.exists()
    {
        warning.show = true;
        warning.path = Some(path.clone());
        info!("Last opened page no longer exists: {:?}", path);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add a page to the recent list
fn add_recent_page_system(
    mut events: MessageReader<AddRecentPageRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        push_recent(&mut config.data.recent_pages, &event.path);
        if let Some(dir) = event.path.parent() {
            config.data.pages_dir = Some(dir.to_path_buf());
        }
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update last page path
fn update_last_page_path_system(
    mut events: MessageReader<UpdateLastPagePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_page_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .init_resource::<MissingPageWarning>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentPageRequest>()
            .add_message::<UpdateLastPagePathRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(Startup, check_last_page_exists.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    add_recent_page_system.run_if(on_message::<AddRecentPageRequest>),
                    update_last_page_path_system.run_if(on_message::<UpdateLastPagePathRequest>),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.pages_dir.is_none());
        assert!(data.recent_pages.is_empty());
        assert!(data.last_page_path.is_none());
        assert_eq!(data.editor.duplicate_suffix, " (copy)");
        assert_eq!(data.editor.max_nesting_depth, MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            pages_dir: Some(PathBuf::from("/path/to/pages")),
            recent_pages: vec![PathBuf::from("/path/one.json"), PathBuf::from("/path/two.json")],
            last_page_path: Some(PathBuf::from("/path/to/page.json")),
            editor: EditorSettings {
                duplicate_suffix: " - Copy".to_string(),
                max_nesting_depth: 4,
            },
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.pages_dir, data.pages_dir);
        assert_eq!(parsed.recent_pages, data.recent_pages);
        assert_eq!(parsed.last_page_path, data.last_page_path);
        assert_eq!(parsed.editor, data.editor);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (data, reason) = parse_config(r#"{ "editor": { "max_nesting_depth": 5 } }"#);
        assert!(reason.is_none());
        assert_eq!(data.editor.max_nesting_depth, 5);
        assert_eq!(data.editor.duplicate_suffix, DEFAULT_DUPLICATE_SUFFIX);
    }

    #[test]
    fn test_zero_nesting_depth_is_clamped() {
        let (data, reason) = parse_config(r#"{ "editor": { "max_nesting_depth": 0 } }"#);
        assert!(reason.is_none());
        assert_eq!(data.editor.max_nesting_depth, 1);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let (data, reason) = parse_config("{ not json");
        assert!(data.recent_pages.is_empty());
        assert!(reason.unwrap().starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_push_recent_moves_to_front_and_caps() {
        let mut recent = Vec::new();
        for i in 0..MAX_RECENT_PAGES + 2 {
            push_recent(&mut recent, &PathBuf::from(format!("{}.json", i)));
        }
        assert_eq!(recent.len(), MAX_RECENT_PAGES);

        let again = PathBuf::from("3.json");
        push_recent(&mut recent, &again);
        assert_eq!(recent[0], again);
        assert_eq!(recent.iter().filter(|p| **p == again).count(), 1);
    }

    #[test]
    fn test_config_reset_notification_default() {
        let notification = ConfigResetNotification::default();
        assert!(!notification.show);
        assert!(notification.reason.is_none());
    }

    #[test]
    fn test_missing_last_page_raises_warning() {
        let missing = std::env::temp_dir().join(format!(
            "pageforge-gone-{}.json",
            uuid::Uuid::new_v4().simple()
        ));
        let mut config = AppConfig::default();
        config.data.last_page_path = Some(missing.clone());

        let mut app = App::new();
        app.insert_resource(config)
            .init_resource::<MissingPageWarning>()
            .add_systems(Update, check_last_page_exists);
        app.update();

        let warning = app.world().resource::<MissingPageWarning>();
        assert!(warning.show);
        assert_eq!(warning.path.as_ref(), Some(&missing));
    }
}
