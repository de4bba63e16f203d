//! Posts document model.
//!
//! The posts document is authored JSON of the form
//! `{ "site": { "title", "description" }, "posts": [ ... ] }`. It is loaded
//! once and never mutated.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::date::parse_date;
use crate::error::SiteError;

/// Optional site metadata carried by the posts document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct SiteMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single blog post.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Identifier: any non-empty text, unique within the document.
    pub id: String,
    pub title: String,
    /// Publication date, ISO-8601 expected.
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub content_md: String,
}

/// The authored posts document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct PostsDocument {
    #[serde(default)]
    pub site: Option<SiteMeta>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl PostsDocument {
    /// Parse and validate a posts document.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Json` for malformed JSON and
    /// `SiteError::Validation` for empty or duplicate post ids.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Read, parse and validate a posts document from disk.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` if the file does not exist, otherwise
    /// the errors of [`from_json`](Self::from_json).
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        if !path.exists() {
            return Err(SiteError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let document = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), posts = document.posts.len(), "Loaded posts");
        Ok(document)
    }

    /// Check that post ids are non-empty and unique.
    fn validate(&self) -> Result<(), SiteError> {
        let mut seen = HashSet::new();
        for post in &self.posts {
            if post.id.is_empty() {
                return Err(SiteError::Validation("post id cannot be empty".to_owned()));
            }
            if !seen.insert(post.id.as_str()) {
                return Err(SiteError::Validation(format!(
                    "duplicate post id '{}'",
                    post.id
                )));
            }
        }
        Ok(())
    }

    /// Title from the document, if set and non-empty.
    #[must_use]
    pub fn site_title(&self) -> Option<&str> {
        self.site
            .as_ref()
            .and_then(|site| site.title.as_deref())
            .filter(|title| !title.trim().is_empty())
    }

    /// Description from the document, if set and non-empty.
    #[must_use]
    pub fn site_description(&self) -> Option<&str> {
        self.site
            .as_ref()
            .and_then(|site| site.description.as_deref())
            .filter(|description| !description.trim().is_empty())
    }

    /// Find the post to show for a requested id.
    ///
    /// An exact id match wins; otherwise (no id, or an unknown one) the first
    /// post in document order is shown. Returns `None` only when the document
    /// has no posts.
    #[must_use]
    pub fn resolve_post(&self, id: Option<&str>) -> Option<&Post> {
        if let Some(id) = id {
            if let Some(post) = self.posts.iter().find(|post| post.id == id) {
                return Some(post);
            }
            tracing::warn!(id, "Unknown post id, showing first post");
        }
        self.posts.first()
    }

    /// Posts in index order: newest first.
    ///
    /// Posts with unrecognized dates go last. Ties keep document order.
    #[must_use]
    pub fn posts_by_date_desc(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by_key(|post| std::cmp::Reverse(parse_date(&post.date)));
        posts
    }
}

/// All distinct tags across `posts`, sorted.
#[must_use]
pub fn unique_tags<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<&'a str> {
    posts
        .into_iter()
        .flat_map(|post| post.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
