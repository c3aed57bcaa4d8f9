use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{FieldValue, Frontmatter, PostIdentity, PostRecord};

const FENCE: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The document does not begin with `---`.
    MissingFrontmatter,
    /// The opening `---` was found but no closing one.
    UnterminatedFrontmatter,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingFrontmatter => write!(f, "no frontmatter, post must begin with `---`"),
            ExtractError::UnterminatedFrontmatter => write!(f, "malformed frontmatter, missing closing `---`"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Parses the frontmatter of a post and builds its record.
///
/// Example of post
/// ---
/// title: "Fixing a flaky CI job"
/// created: 2025-06-14
/// categories: [DevOps]
/// tags: [debugging, github-actions]
/// ---
///
/// # Fixing a flaky CI job
pub fn extract(input: &str, identity: PostIdentity) -> Result<PostRecord, ExtractError> {
    let header = split_header(input)?;
    Ok(PostRecord::new(identity, parse_header(header)))
}

/// Returns the text strictly between the opening fence and the next one.
/// A leading byte order mark is ignored.
pub fn split_header(input: &str) -> Result<&str, ExtractError> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    if !input.starts_with(FENCE) {
        return Err(ExtractError::MissingFrontmatter);
    }

    let rest = &input[FENCE.len()..];
    match rest.find(FENCE) {
        None => Err(ExtractError::UnterminatedFrontmatter),
        Some(end) => Ok(&rest[..end]),
    }
}

pub fn parse_header(header: &str) -> Frontmatter {
    let mut fields = Frontmatter::new();

    for line in header.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = extract_key_val(line) {
            // Last one wins
            fields.insert(key.to_string(), parse_value(value));
        }
    }

    fields
}

fn extract_key_val(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref KEY_VAL_REGEX: Regex = Regex::new(r"^(?P<key>[\w.-]+)\s*:(?P<value>.*)$").unwrap();
    }

    KEY_VAL_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str().trim());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}

pub fn parse_value(value: &str) -> FieldValue {
    if let Some(unquoted) = strip_quotes(value) {
        return FieldValue::Scalar(unquoted.to_string());
    }

    if value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        let items = inner.split(',')
            .map(|item| item.trim())
            .map(|item| strip_quotes(item).unwrap_or(item))
            .filter(|item| !item.is_empty())
            .map(|item| item.to_string())
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Scalar(value.to_string())
}

/// Strips a single matching pair of `"` or `'` around `value`.
fn strip_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }

    ['"', '\''].iter().find_map(|&quote| {
        value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote))
    })
}
