use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::text_utils::parse_created;

pub mod content_file;
pub mod frontmatter;

/// A frontmatter value. The header never nests deeper than one level, so a
/// value is either a plain string or a flat list of strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Scalar view of the value. Lists are joined with ", ".
    pub fn as_scalar(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// List view of the value. A scalar is read as a one-element list.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
        }
    }
}

pub type Frontmatter = BTreeMap<String, FieldValue>;

/// Where a post lives, relative to the blog root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostIdentity {
    pub file_name: String,
    /// Always `/` separated, usable as a markdown link target.
    pub relative_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    #[serde(flatten)]
    pub identity: PostIdentity,
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub created_raw: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub fields: Frontmatter,
}

impl PostRecord {
    pub fn new(identity: PostIdentity, fields: Frontmatter) -> PostRecord {
        let scalar = |key: &str| {
            fields.get(key)
                .map(|v| v.as_scalar())
                .filter(|s| !s.is_empty())
        };
        let list = |key: &str| {
            fields.get(key)
                .map(|v| v.as_list())
                .unwrap_or_default()
        };

        let created_raw = scalar("created");
        let created = created_raw.as_deref().and_then(parse_created);

        PostRecord {
            identity,
            title: scalar("title"),
            status: scalar("status"),
            description: scalar("description"),
            slug: scalar("slug"),
            created_raw,
            created,
            categories: list("categories"),
            tags: list("tags"),
            fields,
        }
    }

    pub fn link(&self) -> &str {
        &self.identity.relative_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> PostIdentity {
        PostIdentity {
            file_name: "hello.md".to_string(),
            relative_path: "posts/hello.md".to_string(),
        }
    }

    #[test]
    fn test_record_from_fields() {
        let mut fields = Frontmatter::new();
        fields.insert("title".to_string(), FieldValue::Scalar("Hello".to_string()));
        fields.insert("created".to_string(), FieldValue::Scalar("2025-06-14".to_string()));
        fields.insert("tags".to_string(), FieldValue::List(vec!["a".to_string(), "b".to_string()]));
        fields.insert("author".to_string(), FieldValue::Scalar("me".to_string()));

        let record = PostRecord::new(identity(), fields);
        assert_eq!(record.title.as_deref(), Some("Hello"));
        assert_eq!(record.created_raw.as_deref(), Some("2025-06-14"));
        assert!(record.created.is_some());
        assert_eq!(record.tags, ["a", "b"]);
        assert!(record.categories.is_empty());
        assert!(record.status.is_none());
        assert_eq!(record.link(), "posts/hello.md");
        assert!(record.fields.contains_key("author"));
    }

    #[test]
    fn test_scalar_list_coercion() {
        let mut fields = Frontmatter::new();
        fields.insert("categories".to_string(), FieldValue::Scalar("rust".to_string()));
        fields.insert("title".to_string(), FieldValue::List(vec!["a".to_string(), "b".to_string()]));
        fields.insert("status".to_string(), FieldValue::Scalar("".to_string()));

        let record = PostRecord::new(identity(), fields);
        assert_eq!(record.categories, ["rust"]);
        assert_eq!(record.title.as_deref(), Some("a, b"));
        assert!(record.status.is_none());
    }

    #[test]
    fn test_invalid_created() {
        let mut fields = Frontmatter::new();
        fields.insert("created".to_string(), FieldValue::Scalar("yesterday".to_string()));

        let record = PostRecord::new(identity(), fields);
        assert_eq!(record.created_raw.as_deref(), Some("yesterday"));
        assert!(record.created.is_none());
    }
}
