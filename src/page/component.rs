use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key/value bag owned by whatever renders the component
pub type Props = Map<String, Value>;

/// One placed element of a page.
///
/// Records live in a flat list; the tree is derived from `parent_id` and
/// `order_index` on demand (see [`crate::page::build_tree`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub order_index: f64,
    #[serde(default)]
    pub locked: bool,
}

impl ComponentRecord {
    /// Creates an unlocked record with a freshly generated id
    pub fn new(component_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: generate_component_id(),
            component_type: component_type.into(),
            props,
            parent_id: None,
            order_index: 0.0,
            locked: false,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// String value of a prop, if present and a string
    pub fn text_prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

/// Generates a new unique component id (`comp_<uuid>`)
pub fn generate_component_id() -> String {
    format!("comp_{}", uuid::Uuid::new_v4().simple())
}
