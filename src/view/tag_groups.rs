use serde::Deserialize;

/// A named set of tags clustered under one heading of the index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagGroup {
    pub label: String,
    pub tags: Vec<String>,
}

impl TagGroup {
    pub fn new(label: &str, tags: &[&str]) -> TagGroup {
        TagGroup {
            label: label.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn matches(&self, post_tags: &[String]) -> bool {
        post_tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Groups used when the configuration doesn't declare any.
pub fn default_tag_groups() -> Vec<TagGroup> {
    vec![
        TagGroup::new("Troubleshooting and Debugging", &["troubleshooting", "debugging", "errors", "fix", "performance"]),
        TagGroup::new("DevOps and Automation", &["devops", "ci-cd", "github-actions", "automation", "docker"]),
        TagGroup::new("Cloud and Infrastructure", &["cloud", "aws", "kubernetes", "terraform", "networking"]),
        TagGroup::new("Programming Languages", &["rust", "python", "go", "javascript", "typescript"]),
        TagGroup::new("Tools and Productivity", &["git", "vim", "tooling", "productivity", "linux"]),
    ]
}
