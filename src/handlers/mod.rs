//! HTTP 处理器模块

pub mod auth;
pub mod health;
pub mod post;
pub mod profile;
pub mod user;

use axum::{extract::rejection::JsonRejection, Json};
use validator::Validate;

use crate::error::AppError;

/// 解析并校验 JSON 请求体
///
/// 无法解析的请求体统一返回 400 "Invalid request body"
pub(crate) fn validated<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::bad_request("Invalid request body")
    })?;

    req.validate()?;
    Ok(req)
}
