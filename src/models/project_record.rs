use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `projects.json`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    /// Unique key, compared case-insensitively
    pub slug: String,
    pub title: String,
    pub category: String,
    /// Filter categories used by the portfolio grid
    pub data_category: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    /// Cover image, relative URL
    pub image: String,
}

/// Loosely-typed `meta` object sent by the editor on save.
///
/// Every field is kept as raw JSON because the editor sends whatever the form
/// produced: strings, lists, numbers or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMeta {
    pub title: Option<Value>,
    pub category: Option<Value>,
    pub data_category: Option<Value>,
    pub description: Option<Value>,
    pub tags: Option<Value>,
    pub image: Option<Value>,
}

impl ProjectRecord {
    /// Create a record carrying only its slug and title
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Build a normalized record for `slug` from editor metadata
    pub fn from_meta(slug: &str, meta: &ProjectMeta) -> Self {
        Self {
            slug: slug.to_string(),
            title: text_or_empty(meta.title.as_ref()).unwrap_or_else(|| slug.to_string()),
            category: text_or_empty(meta.category.as_ref()).unwrap_or_default(),
            data_category: normalize_list(meta.data_category.as_ref()),
            description: text_or_empty(meta.description.as_ref()).unwrap_or_default(),
            tags: normalize_list(meta.tags.as_ref()),
            image: text_or_empty(meta.image.as_ref()).unwrap_or_default(),
        }
    }

    /// Case-insensitive slug comparison
    pub fn has_slug(&self, slug: &str) -> bool {
        self.slug.to_lowercase() == slug.to_lowercase()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A scalar field as text; `None` for absent, falsy or structured values
fn text_or_empty(value: Option<&Value>) -> Option<String> {
    match value? {
        v @ (Value::String(_) | Value::Number(_) | Value::Bool(_)) if is_truthy(v) => Some(value_to_text(v)),
        _ => None,
    }
}

/// Scalar-or-list normalization: lists are kept, non-empty scalars become a
/// one-element list, everything else an empty list
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        Some(v @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) if is_truthy(v) => {
            vec![value_to_text(v)]
        }
        _ => Vec::new(),
    }
}
