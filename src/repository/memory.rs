//! 内存存储
//! 基于 DashMap 的进程内实现，用于开发环境与测试；单条记录的读改写在分片锁内完成

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use super::{PostStore, ProfileStore, StoreError, StoreResult, UserStore};
use crate::models::{
    post::{Comment, Like, NewComment, NewPost, Post},
    profile::Profile,
    user::{NewUser, User},
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    /// email -> user id
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        // 邮箱索引的 entry 锁保证唯一性检查与插入是原子的
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "email already registered: {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let record = User {
                    id: Uuid::new_v4(),
                    name: user.name,
                    email: user.email,
                    password_hash: user.password_hash,
                    avatar: user.avatar,
                    created_at: Utc::now(),
                };
                slot.insert(record.id);
                self.users.insert(record.id, record.clone());
                Ok(record)
            }
        }
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        match self.users.remove(id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    posts: DashMap<Uuid, Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let record = Post {
            id: Uuid::new_v4(),
            user: post.user,
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        };
        self.posts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> StoreResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<Post>> {
        Ok(self.posts.get(id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        Ok(self.posts.remove(id).is_some())
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<u64> {
        // 在 retain 内计数，并发插入不影响结果
        let mut removed = 0u64;
        self.posts.retain(|_, post| {
            let keep = post.user != *user_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn add_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>> {
        let mut post = self.posts.get_mut(post_id).ok_or(StoreError::NotFound)?;
        if post.is_liked_by(user_id) {
            return Err(StoreError::Conflict("post already liked".to_string()));
        }
        post.likes.insert(
            0,
            Like {
                id: Uuid::new_v4(),
                user: *user_id,
            },
        );
        Ok(post.likes.clone())
    }

    async fn remove_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>> {
        let mut post = self.posts.get_mut(post_id).ok_or(StoreError::NotFound)?;
        let index = post
            .likes
            .iter()
            .position(|like| like.user == *user_id)
            .ok_or(StoreError::NotFound)?;
        post.likes.remove(index);
        Ok(post.likes.clone())
    }

    async fn add_comment(&self, post_id: &Uuid, comment: NewComment) -> StoreResult<Vec<Comment>> {
        let mut post = self.posts.get_mut(post_id).ok_or(StoreError::NotFound)?;
        post.comments.insert(
            0,
            Comment {
                id: Uuid::new_v4(),
                user: comment.user,
                text: comment.text,
                name: comment.name,
                avatar: comment.avatar,
                date: Utc::now(),
            },
        );
        Ok(post.comments.clone())
    }

    async fn remove_comment(&self, post_id: &Uuid, comment_id: &Uuid) -> StoreResult<Vec<Comment>> {
        let mut post = self.posts.get_mut(post_id).ok_or(StoreError::NotFound)?;
        let index = post
            .comments
            .iter()
            .position(|c| c.id == *comment_id)
            .ok_or(StoreError::NotFound)?;
        post.comments.remove(index);
        Ok(post.comments.clone())
    }
}

#[derive(Default)]
pub struct MemoryProfileStore {
    /// user id -> profile
    profiles: DashMap<Uuid, Profile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_user(&self, user_id: &Uuid) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> =
            self.profiles.iter().map(|entry| entry.value().clone()).collect();
        profiles.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(profiles)
    }

    async fn save(&self, profile: &Profile) -> StoreResult<Profile> {
        let stored = match self.profiles.entry(profile.user) {
            Entry::Occupied(mut existing) => {
                // 与 upsert 语义一致：保留原有 id 与创建时间
                let mut updated = profile.clone();
                updated.id = existing.get().id;
                updated.date = existing.get().date;
                existing.insert(updated.clone());
                updated
            }
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                profile.clone()
            }
        };
        Ok(stored)
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<bool> {
        Ok(self.profiles.remove(user_id).is_some())
    }
}
