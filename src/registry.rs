//! Lookup table from component type tags to their definitions.
//!
//! Every place that needs to know something about a component type (its
//! display name, whether it can hold children, which prop carries its
//! primary text) asks the registry once instead of matching on the tag.

use std::collections::HashMap;

use bevy::prelude::*;
use serde_json::json;

use crate::constants::FALLBACK_TEXT_FIELD;
use crate::page::{ComponentRecord, Props};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Layout,
    Content,
    Marketing,
}

impl ComponentCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentCategory::Layout => "Layout",
            ComponentCategory::Content => "Content",
            ComponentCategory::Marketing => "Marketing",
        }
    }

    pub fn all() -> &'static [ComponentCategory] {
        &[
            ComponentCategory::Layout,
            ComponentCategory::Content,
            ComponentCategory::Marketing,
        ]
    }
}

/// Everything the editor knows about one component type
#[derive(Clone)]
pub struct ComponentDefinition {
    pub type_tag: &'static str,
    pub display_name: &'static str,
    pub category: ComponentCategory,
    /// Whether other components may be nested inside this one
    pub accepts_children: bool,
    /// Prop that receives the copy marker when the component is duplicated
    pub primary_text_field: Option<&'static str>,
    pub default_props: fn() -> Props,
    /// Short text shown for a placed component in the tree view
    pub label: fn(&ComponentDefinition, &ComponentRecord) -> String,
}

impl ComponentDefinition {
    /// Prop that should carry the copy marker for this type
    pub fn copy_marker_field(&self) -> &'static str {
        self.primary_text_field.unwrap_or(FALLBACK_TEXT_FIELD)
    }

    pub fn label_for(&self, record: &ComponentRecord) -> String {
        (self.label)(self, record)
    }
}

/// Resource holding all known component definitions
#[derive(Resource)]
pub struct ComponentRegistry {
    definitions: Vec<ComponentDefinition>,
    by_tag: HashMap<&'static str, usize>,
    fallback: ComponentDefinition,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_definitions(builtin_definitions())
    }
}

impl ComponentRegistry {
    pub fn with_definitions(definitions: Vec<ComponentDefinition>) -> Self {
        let mut registry = Self {
            definitions: Vec::new(),
            by_tag: HashMap::new(),
            fallback: ComponentDefinition {
                type_tag: "unknown",
                display_name: "Unknown",
                category: ComponentCategory::Content,
                accepts_children: false,
                primary_text_field: None,
                default_props: Props::new,
                label: type_tag_label,
            },
        };
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Adds a definition, replacing any existing one with the same tag
    pub fn register(&mut self, definition: ComponentDefinition) {
        if let Some(&existing) = self.by_tag.get(definition.type_tag) {
            self.definitions[existing] = definition;
        } else {
            self.by_tag
                .insert(definition.type_tag, self.definitions.len());
            self.definitions.push(definition);
        }
    }

    pub fn get(&self, type_tag: &str) -> Option<&ComponentDefinition> {
        self.by_tag.get(type_tag).map(|&i| &self.definitions[i])
    }

    /// Definition for `type_tag`, or a generic leaf definition when unknown
    pub fn resolve(&self, type_tag: &str) -> &ComponentDefinition {
        self.get(type_tag).unwrap_or(&self.fallback)
    }

    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    /// Case-insensitive search over tags and display names
    pub fn search(&self, query: &str) -> Vec<&ComponentDefinition> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.definitions.iter().collect();
        }
        self.definitions
            .iter()
            .filter(|d| {
                d.type_tag.contains(&query) || d.display_name.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn accepts_children(&self, type_tag: &str) -> bool {
        self.resolve(type_tag).accepts_children
    }

    /// Tree view label for a placed component
    pub fn label_for(&self, record: &ComponentRecord) -> String {
        self.resolve(&record.component_type).label_for(record)
    }
}

fn type_tag_label(_definition: &ComponentDefinition, record: &ComponentRecord) -> String {
    record.component_type.clone()
}

fn display_name_label(definition: &ComponentDefinition, _record: &ComponentRecord) -> String {
    definition.display_name.to_string()
}

/// Display name followed by a short excerpt of the primary text
fn text_excerpt_label(definition: &ComponentDefinition, record: &ComponentRecord) -> String {
    match record.text_prop(definition.copy_marker_field()) {
        Some(text) if !text.trim().is_empty() => {
            let excerpt: String = text.chars().take(24).collect();
            if excerpt.len() < text.len() {
                format!("{}: {}…", definition.display_name, excerpt)
            } else {
                format!("{}: {}", definition.display_name, excerpt)
            }
        }
        _ => definition.display_name.to_string(),
    }
}

fn props(value: serde_json::Value) -> Props {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Props::new(),
    }
}

/// Component types shipped with the editor
pub fn builtin_definitions() -> Vec<ComponentDefinition> {
    vec![
        ComponentDefinition {
            type_tag: "section",
            display_name: "Section",
            category: ComponentCategory::Layout,
            accepts_children: true,
            primary_text_field: None,
            default_props: || props(json!({ "padding": "md", "background": "none" })),
            label: display_name_label,
        },
        ComponentDefinition {
            type_tag: "container",
            display_name: "Container",
            category: ComponentCategory::Layout,
            accepts_children: true,
            primary_text_field: None,
            default_props: || props(json!({ "maxWidth": "lg" })),
            label: display_name_label,
        },
        ComponentDefinition {
            type_tag: "columns",
            display_name: "Columns",
            category: ComponentCategory::Layout,
            accepts_children: true,
            primary_text_field: None,
            default_props: || props(json!({ "count": 2, "gap": "md" })),
            label: display_name_label,
        },
        ComponentDefinition {
            type_tag: "heading",
            display_name: "Heading",
            category: ComponentCategory::Content,
            accepts_children: false,
            primary_text_field: Some("content"),
            default_props: || props(json!({ "content": "Heading", "level": 2 })),
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "text",
            display_name: "Text",
            category: ComponentCategory::Content,
            accepts_children: false,
            primary_text_field: Some("content"),
            default_props: || props(json!({ "content": "Write something here." })),
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "button",
            display_name: "Button",
            category: ComponentCategory::Content,
            accepts_children: false,
            primary_text_field: Some("label"),
            default_props: || props(json!({ "label": "Click me", "href": "#" })),
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "image",
            display_name: "Image",
            category: ComponentCategory::Content,
            accepts_children: false,
            primary_text_field: Some("alt"),
            default_props: || props(json!({ "src": "", "alt": "" })),
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "hero",
            display_name: "Hero",
            category: ComponentCategory::Marketing,
            accepts_children: false,
            primary_text_field: Some("title"),
            default_props: || {
                props(json!({
                    "title": "Build something great",
                    "subtitle": "A short supporting sentence.",
                    "ctaLabel": "Get started",
                }))
            },
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "features",
            display_name: "Features",
            category: ComponentCategory::Marketing,
            accepts_children: false,
            primary_text_field: Some("title"),
            default_props: || props(json!({ "title": "Features", "items": [] })),
            label: text_excerpt_label,
        },
        ComponentDefinition {
            type_tag: "cta",
            display_name: "Call to Action",
            category: ComponentCategory::Marketing,
            accepts_children: false,
            primary_text_field: Some("title"),
            default_props: || {
                props(json!({ "title": "Ready to start?", "buttonLabel": "Contact us" }))
            },
            label: text_excerpt_label,
        },
    ]
}
