//! 用户注册的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{auth::TokenResponse, user::RegisterRequest},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::validated;

/// 注册用户，成功后返回令牌
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let req = validated(body)?;

    let token = state.auth_service.register(req).await?;

    Ok(Json(TokenResponse { token }))
}
