//! JWT 认证中间件
//! 令牌通过 `x-auth-token` 请求头传递，不带 `Bearer` 前缀

use crate::{auth::jwt::JwtService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// 认证令牌请求头
pub const AUTH_HEADER: &str = "x-auth-token";

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 未经过认证中间件的路由上提取视为缺少令牌
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AppError::MissingToken)
    }
}

/// 从 x-auth-token 头提取令牌，缺失、为空或非 ASCII 时返回 MissingToken
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers.get(AUTH_HEADER).ok_or(AppError::MissingToken)?;

    // 非 ASCII 的头部值按缺少令牌处理
    let token = value.to_str().map_err(|_| AppError::MissingToken)?.trim();
    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    Ok(token.to_string())
}

/// JWT 认证中间件 - 必须认证
pub async fn auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let user_id = jwt_service.verify_identity(&token)?;

    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}
