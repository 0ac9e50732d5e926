use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog article owned by its author.
///
/// `updated_at` stays `None` until the first successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insertable post record. The id and creation timestamp are assigned by the
/// persistence gateway; the slug is computed by the caller beforehand.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub author_id: i32,
    pub category_id: Option<i32>,
}

/// Partial update applied to an existing post. `None` leaves a field
/// untouched; the nested option on `category_id` distinguishes "leave
/// unchanged" (`None`) from "clear the category" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub category_id: Option<Option<i32>>,
}

impl PostChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.published.is_none()
            && self.category_id.is_none()
    }
}
