//! Post repository (数据库访问层)
//! 帖子、点赞、评论分表存储，读取时组装为完整的 Post

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{PostStore, StoreError, StoreResult};
use crate::models::post::{Comment, Like, NewComment, NewPost, Post};

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    date: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    date: DateTime<Utc>,
}

impl From<LikeRow> for Like {
    fn from(row: LikeRow) -> Self {
        Like {
            id: row.id,
            user: row.user_id,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            date: row.date,
        }
    }
}

pub struct PgPostStore {
    db: PgPool,
}

impl PgPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn post_exists(&self, post_id: &Uuid) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&self.db)
            .await?;

        Ok(exists)
    }

    async fn likes_for(&self, post_ids: &[Uuid]) -> StoreResult<Vec<LikeRow>> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT id, post_id, user_id FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn comments_for(&self, post_ids: &[Uuid]) -> StoreResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, text, name, avatar, date FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY date DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// 将帖子行与点赞、评论组装为完整帖子，保持 rows 的顺序
    async fn assemble(&self, rows: Vec<PostRow>) -> StoreResult<Vec<Post>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let mut likes: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for row in self.likes_for(&ids).await? {
            likes.entry(row.post_id).or_default().push(row.into());
        }

        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in self.comments_for(&ids).await? {
            comments.entry(row.post_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| Post {
                likes: likes.remove(&row.id).unwrap_or_default(),
                comments: comments.remove(&row.id).unwrap_or_default(),
                id: row.id,
                user: row.user_id,
                text: row.text,
                name: row.name,
                avatar: row.avatar,
                date: row.date,
            })
            .collect())
    }

    async fn likes_of(&self, post_id: &Uuid) -> StoreResult<Vec<Like>> {
        Ok(self
            .likes_for(std::slice::from_ref(post_id))
            .await?
            .into_iter()
            .map(Like::from)
            .collect())
    }

    async fn comments_of(&self, post_id: &Uuid) -> StoreResult<Vec<Comment>> {
        Ok(self
            .comments_for(std::slice::from_ref(post_id))
            .await?
            .into_iter()
            .map(Comment::from)
            .collect())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, name, avatar, date
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.user)
        .bind(&post.text)
        .bind(&post.name)
        .bind(&post.avatar)
        .fetch_one(&self.db)
        .await?;

        Ok(Post {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            date: row.date,
        })
    }

    async fn list(&self) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, user_id, text, name, avatar, date FROM posts ORDER BY date DESC",
        )
        .fetch_all(&self.db)
        .await?;

        self.assemble(rows).await
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, user_id, text, name, avatar, date FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    async fn add_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>> {
        if !self.post_exists(post_id).await? {
            return Err(StoreError::NotFound);
        }

        // (post_id, user_id) 唯一约束保证并发下不会重复点赞
        sqlx::query("INSERT INTO post_likes (id, post_id, user_id) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(post_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        self.likes_of(post_id).await
    }

    async fn remove_like(&self, post_id: &Uuid, user_id: &Uuid) -> StoreResult<Vec<Like>> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.likes_of(post_id).await
    }

    async fn add_comment(&self, post_id: &Uuid, comment: NewComment) -> StoreResult<Vec<Comment>> {
        if !self.post_exists(post_id).await? {
            return Err(StoreError::NotFound);
        }

        sqlx::query(
            r#"
            INSERT INTO post_comments (id, post_id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(comment.user)
        .bind(&comment.text)
        .bind(&comment.name)
        .bind(&comment.avatar)
        .execute(&self.db)
        .await?;

        self.comments_of(post_id).await
    }

    async fn remove_comment(&self, post_id: &Uuid, comment_id: &Uuid) -> StoreResult<Vec<Comment>> {
        let result = sqlx::query("DELETE FROM post_comments WHERE post_id = $1 AND id = $2")
            .bind(post_id)
            .bind(comment_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.comments_of(post_id).await
    }
}
