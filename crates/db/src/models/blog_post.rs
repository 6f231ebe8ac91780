//! Blog content model and DTOs.

use serde::{Deserialize, Serialize};
use sofra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for authoring a post.
#[derive(Debug, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: String,
    pub body: String,
}

/// DTO for editing a post. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub is_published: Option<bool>,
}
