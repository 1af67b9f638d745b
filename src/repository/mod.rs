//! Database repository layer
//!
//! Handlers and services only see the store traits below. `Pg*Store` types back
//! them with PostgreSQL, `Memory*Store` types with in-process maps.

pub mod memory;
pub mod post_repo;
pub mod profile_repo;
pub mod user_repo;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    post::{Comment, Like, NewComment, NewPost, Post},
    profile::Profile,
    user::{NewUser, User},
};

pub use memory::{MemoryPostStore, MemoryProfileStore, MemoryUserStore};
pub use post_repo::PgPostStore;
pub use profile_repo::PgProfileStore;
pub use user_repo::PgUserStore;

/// Errors reported by a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Parses a client-supplied record identifier
pub fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidIdentifier(raw.to_string()))
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<User>>;

    /// Fails with `Conflict` when the email is already registered
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn delete(&self, id: &Uuid) -> StoreResult<bool>;

    /// Connectivity probe used by the readiness endpoint
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, post: NewPost) -> StoreResult<Post>;

    /// All posts, newest first
    async fn list(&self) -> StoreResult<Vec<Post>>;

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<Post>>;

    async fn delete(&self, id: &Uuid) -> StoreResult<bool>;

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<u64>;

    /// Prepends a like; `Conflict` if the user already liked the post
    async fn add_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>>;

    /// `NotFound` if the post does not exist or the user has not liked it
    async fn remove_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>>;

    async fn add_comment(&self, post_id: &Uuid, comment: NewComment) -> StoreResult<Vec<Comment>>;

    async fn remove_comment(&self, post_id: &Uuid, comment_id: &Uuid) -> StoreResult<Vec<Comment>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user(&self, user_id: &Uuid) -> StoreResult<Option<Profile>>;

    async fn list(&self) -> StoreResult<Vec<Profile>>;

    /// Inserts or replaces the profile owned by `profile.user`
    async fn save(&self, profile: &Profile) -> StoreResult<Profile>;

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<bool>;
}

/// Store handles shared by the services
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            posts: Arc::new(PgPostStore::new(pool.clone())),
            profiles: Arc::new(PgProfileStore::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            posts: Arc::new(MemoryPostStore::new()),
            profiles: Arc::new(MemoryProfileStore::new()),
        }
    }
}
