//! 认证相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::{
        auth::{LoginRequest, TokenResponse},
        user::UserResponse,
    },
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::validated;

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let req = validated(body)?;

    let token = state.auth_service.login(req).await?;

    Ok(Json(TokenResponse { token }))
}

/// 获取当前用户
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .auth_service
        .current_user(&auth_context.user_id)
        .await?;

    Ok(Json(user))
}
