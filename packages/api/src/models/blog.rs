//! # Blog posts
//!
//! [`BlogPost`] is keyed publicly by its unique `slug`. Admin writes use
//! [`BlogPostDraft`], built from the editor's [`BlogPostForm`]: the tag string is
//! split on commas and trimmed, and an empty featured image is omitted.

use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::models::{non_empty, split_list};

/// A blog post as stored by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Page metadata attached to paginated list responses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Validated write payload for `POST /admin/blog` and `PUT /admin/blog/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

impl BlogPostDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.excerpt.trim().is_empty() {
            return Err(DraftError::MissingField("excerpt"));
        }
        if self.content.trim().is_empty() {
            return Err(DraftError::MissingField("content"));
        }
        Ok(())
    }
}

/// Raw blog editor fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// Comma-separated list, e.g. `"react, ts"`.
    pub tags: String,
    pub published: bool,
    pub featured_image: String,
}

impl BlogPostForm {
    /// Pre-fill the editor from an existing post.
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.join(", "),
            published: post.published,
            featured_image: post.featured_image.clone().unwrap_or_default(),
        }
    }

    pub fn to_draft(&self) -> Result<BlogPostDraft, DraftError> {
        let draft = BlogPostDraft {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            excerpt: self.excerpt.trim().to_string(),
            tags: split_list(&self.tags),
            published: self.published,
            featured_image: non_empty(&self.featured_image),
        };
        draft.validate()?;
        Ok(draft)
    }
}
