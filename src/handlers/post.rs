//! 帖子的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::post::{Comment, CreateCommentRequest, CreatePostRequest, Like, Post},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::validated;

/// 发帖
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let req = validated(body)?;
    let post = state.post_service.create(&auth_context, req).await?;
    Ok(Json(post))
}

/// 帖子列表
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.post_service.list().await?))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(state.post_service.get(&id).await?))
}

/// 删除帖子
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.post_service.delete(&auth_context, &id).await?;
    Ok(Json(json!({"msg": "Post removed"})))
}

pub async fn like_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, AppError> {
    Ok(Json(state.post_service.like(&auth_context, &id).await?))
}

pub async fn unlike_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, AppError> {
    Ok(Json(state.post_service.unlike(&auth_context, &id).await?))
}

/// 评论帖子
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<String>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let req = validated(body)?;
    let comments = state.post_service.comment(&auth_context, &id, req).await?;
    Ok(Json(comments))
}

/// 删除评论
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state
        .post_service
        .delete_comment(&auth_context, &id, &comment_id)
        .await?;
    Ok(Json(comments))
}
