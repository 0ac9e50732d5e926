use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - a label zero or more posts may reference.
///
/// Unlike post slugs, a category slug is supplied by the caller and stored
/// verbatim once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable category record.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}
