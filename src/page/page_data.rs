use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::PAGE_FILE_VERSION;

use super::ComponentRecord;

/// Page-level metadata edited alongside the component tree
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl Default for PageData {
    fn default() -> Self {
        Self {
            title: "Untitled Page".to_string(),
            slug: String::new(),
            description: String::new(),
        }
    }
}

impl PageData {
    /// URL slug derived from the title: lowercase ascii words joined by `-`
    pub fn slug_from_title(title: &str) -> String {
        title
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// The explicit slug, or one derived from the title
    pub fn effective_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            Self::slug_from_title(&self.title)
        } else {
            self.slug.trim().to_string()
        }
    }
}

/// On-disk page file: metadata plus the flat component collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPage {
    #[serde(default = "default_version")]
    pub version: u32,
    pub page: PageData,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

fn default_version() -> u32 {
    PAGE_FILE_VERSION
}

impl SavedPage {
    pub fn new(page: PageData, components: Vec<ComponentRecord>) -> Self {
        Self {
            version: PAGE_FILE_VERSION,
            page,
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Props;

    #[test]
    fn test_page_data_default_title() {
        let page = PageData::default();
        assert_eq!(page.title, "Untitled Page");
        assert!(page.slug.is_empty());
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(PageData::slug_from_title("About Us"), "about-us");
        assert_eq!(PageData::slug_from_title("  Pricing & Plans 2025! "), "pricing-plans-2025");
        assert_eq!(PageData::slug_from_title("***"), "");
    }

    #[test]
    fn test_effective_slug_prefers_explicit_slug() {
        let page = PageData {
            title: "Landing Page".to_string(),
            slug: " home ".to_string(),
            description: String::new(),
        };
        assert_eq!(page.effective_slug(), "home");

        let derived = PageData {
            slug: String::new(),
            ..page
        };
        assert_eq!(derived.effective_slug(), "landing-page");
    }

    #[test]
    fn test_saved_page_defaults_on_deserialize() {
        // Older files may carry neither a version nor a component list
        let json = r#"{ "page": { "title": "Old Page" } }"#;
        let saved: SavedPage = serde_json::from_str(json).unwrap();

        assert_eq!(saved.version, PAGE_FILE_VERSION);
        assert_eq!(saved.page.title, "Old Page");
        assert!(saved.components.is_empty());
    }

    #[test]
    fn test_saved_page_keeps_components() {
        let saved = SavedPage::new(
            PageData::default(),
            vec![ComponentRecord::new("hero", Props::new())],
        );
        let json = serde_json::to_string(&saved).unwrap();
        let parsed: SavedPage = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.components, saved.components);
    }
}
