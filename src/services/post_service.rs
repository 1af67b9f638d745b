//! 帖子服务：发帖、点赞、评论
//! 删除类操作先确认资源存在，再校验所有权

use crate::{
    auth::{ensure_owner, AuthContext},
    error::AppError,
    models::{
        post::{Comment, CreateCommentRequest, CreatePostRequest, Like, NewComment, NewPost, Post},
        user::User,
    },
    repository::{parse_id, PostStore, StoreError, UserStore},
};
use std::sync::Arc;

const POST_NOT_FOUND: &str = "Post not found";
const COMMENT_NOT_FOUND: &str = "Comment not found";

pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// 发帖，作者名与头像取自当前用户
    pub async fn create(
        &self,
        identity: &AuthContext,
        req: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let author = self.author(identity).await?;

        let post = self
            .posts
            .create(NewPost {
                user: author.id,
                text: req.text,
                name: author.name,
                avatar: author.avatar,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %post.user, "Post created");
        Ok(post)
    }

    /// 所有帖子，最新的在前
    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.posts.list().await?)
    }

    pub async fn get(&self, post_id: &str) -> Result<Post, AppError> {
        let id = parse_id(post_id).map_err(|e| AppError::from_store(e, POST_NOT_FOUND))?;
        self.posts
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))
    }

    /// 删除帖子，仅作者本人可操作
    pub async fn delete(&self, identity: &AuthContext, post_id: &str) -> Result<(), AppError> {
        let post = self.find(post_id).await?;
        let post = ensure_owner(identity, post, POST_NOT_FOUND)?;

        self.posts.delete(&post.id).await?;

        tracing::info!(post_id = %post.id, "Post removed");
        Ok(())
    }

    pub async fn like(&self, identity: &AuthContext, post_id: &str) -> Result<Vec<Like>, AppError> {
        let id = parse_id(post_id).map_err(|e| AppError::from_store(e, POST_NOT_FOUND))?;

        self.posts
            .add_like(&id, &identity.user_id)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::bad_request("Post already liked"),
                other => AppError::from_store(other, POST_NOT_FOUND),
            })
    }

    pub async fn unlike(
        &self,
        identity: &AuthContext,
        post_id: &str,
    ) -> Result<Vec<Like>, AppError> {
        let post = self
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;

        if !post.is_liked_by(&identity.user_id) {
            return Err(AppError::bad_request("Post has not been liked"));
        }

        // 检查与删除之间被并发取消时，存储层返回 NotFound
        self.posts
            .remove_like(&post.id, &identity.user_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppError::bad_request("Post has not been liked"),
                other => AppError::Store(other),
            })
    }

    pub async fn comment(
        &self,
        identity: &AuthContext,
        post_id: &str,
        req: CreateCommentRequest,
    ) -> Result<Vec<Comment>, AppError> {
        let author = self.author(identity).await?;
        let id = parse_id(post_id).map_err(|e| AppError::from_store(e, POST_NOT_FOUND))?;

        self.posts
            .add_comment(
                &id,
                NewComment {
                    user: author.id,
                    text: req.text,
                    name: author.name,
                    avatar: author.avatar,
                },
            )
            .await
            .map_err(|e| AppError::from_store(e, POST_NOT_FOUND))
    }

    /// 删除评论，仅评论作者本人可操作
    pub async fn delete_comment(
        &self,
        identity: &AuthContext,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Vec<Comment>, AppError> {
        let post = self
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;

        let comment = match parse_id(comment_id) {
            Ok(id) => post.find_comment(&id),
            Err(_) => None,
        };
        let comment = ensure_owner(identity, comment, COMMENT_NOT_FOUND)?;

        self.posts
            .remove_comment(&post.id, &comment.id)
            .await
            .map_err(|e| AppError::from_store(e, COMMENT_NOT_FOUND))
    }

    /// 按路径参数查找帖子，非法 ID 视为不存在
    async fn find(&self, post_id: &str) -> Result<Option<Post>, AppError> {
        match parse_id(post_id) {
            Ok(id) => Ok(self.posts.find_by_id(&id).await?),
            Err(_) => Ok(None),
        }
    }

    async fn author(&self, identity: &AuthContext) -> Result<User, AppError> {
        self.users
            .find_by_id(&identity.user_id)
            .await?
            .ok_or_else(|| AppError::bad_request("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::user::NewUser,
        repository::{MemoryPostStore, MemoryUserStore},
    };
    use uuid::Uuid;

    fn identity(user_id: Uuid) -> AuthContext {
        AuthContext { user_id }
    }

    async fn setup() -> (PostService, AuthContext, AuthContext) {
        let users = Arc::new(MemoryUserStore::new());
        let mut ids = Vec::new();
        for email in ["a@x.com", "b@x.com"] {
            let user = users
                .create(NewUser {
                    name: email.to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    avatar: String::new(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }

        let service = PostService::new(Arc::new(MemoryPostStore::new()), users);
        (service, identity(ids[0]), identity(ids[1]))
    }

    fn text(t: &str) -> CreatePostRequest {
        CreatePostRequest {
            text: t.to_string(),
        }
    }

    #[tokio::test]
    async fn test_only_owner_can_delete_post() {
        let (service, ana, bob) = setup().await;
        let post = service.create(&ana, text("hello")).await.unwrap();
        let id = post.id.to_string();

        let err = service.delete(&bob, &id).await.unwrap_err();
        assert_eq!(err.code(), 401);

        service.delete(&ana, &id).await.unwrap();

        let err = service.delete(&ana, &id).await.unwrap_err();
        assert_eq!(err.code(), 404);
        assert_eq!(err.user_message(), POST_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_post_id_is_not_found() {
        let (service, ana, _) = setup().await;

        assert_eq!(service.get("not-a-uuid").await.unwrap_err().code(), 404);
        assert_eq!(service.delete(&ana, "not-a-uuid").await.unwrap_err().code(), 404);
        assert_eq!(service.like(&ana, "not-a-uuid").await.unwrap_err().code(), 404);
    }

    #[tokio::test]
    async fn test_like_twice_and_unlike_unliked() {
        let (service, ana, bob) = setup().await;
        let id = service.create(&ana, text("hello")).await.unwrap().id.to_string();

        let likes = service.like(&bob, &id).await.unwrap();
        assert_eq!(likes.len(), 1);

        let err = service.like(&bob, &id).await.unwrap_err();
        assert_eq!(err.user_message(), "Post already liked");

        let err = service.unlike(&ana, &id).await.unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.user_message(), "Post has not been liked");

        assert!(service.unlike(&bob, &id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comment_ownership() {
        let (service, ana, bob) = setup().await;
        let id = service.create(&ana, text("hello")).await.unwrap().id.to_string();

        let comments = service
            .comment(
                &bob,
                &id,
                CreateCommentRequest {
                    text: "nice".to_string(),
                },
            )
            .await
            .unwrap();
        let comment_id = comments[0].id.to_string();
        assert_eq!(comments[0].name, "b@x.com");

        // 帖子作者也不能删除他人的评论
        let err = service.delete_comment(&ana, &id, &comment_id).await.unwrap_err();
        assert_eq!(err.code(), 401);

        let err = service
            .delete_comment(&bob, &id, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code(), 404);
        assert_eq!(err.user_message(), COMMENT_NOT_FOUND);

        assert!(service
            .delete_comment(&bob, &id, &comment_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_existing_author() {
        let (service, _, _) = setup().await;
        let ghost = identity(Uuid::new_v4());

        let err = service.create(&ghost, text("hello")).await.unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.user_message(), "User not found");
    }
}
