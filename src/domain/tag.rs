// src/domain/tag.rs
use crate::domain::{id, DomainError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A topic grouping questions. Fetched from the server, never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

fn slug_regex() -> &'static Regex {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("valid slug regex"))
}

/// Check that a slug can be placed in a URL path as-is.
///
/// ```
/// use tech_interviewer::domain::tag::validate_slug;
///
/// assert!(validate_slug("binary-trees").is_ok());
/// assert!(validate_slug("../admin").is_err());
/// ```
pub fn validate_slug(slug: &str) -> Result<&str, DomainError> {
    if slug_regex().is_match(slug) {
        Ok(slug)
    } else {
        Err(DomainError::InvalidSlug(slug.to_string()))
    }
}
