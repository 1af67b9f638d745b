//! Post domain models: posts, likes and comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A like left on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    /// Liking user
    pub user: Uuid,
}

/// A comment on a post; author name and avatar are copied at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Owning user
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Post with embedded likes and comments, newest entries first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Owning user
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &Uuid) -> bool {
        self.likes.iter().any(|like| like.user == *user_id)
    }

    pub fn find_comment(&self, comment_id: &Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *comment_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

/// Create post request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Create comment request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}
