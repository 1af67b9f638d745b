//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 字段级校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }

    pub fn for_param(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("No token supplied")]
    MissingToken,

    #[error("Token rejected")]
    InvalidToken,

    #[error("User not authorized")]
    NotAuthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingToken | AppError::InvalidToken | AppError::NotAuthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.msg.clone())
                .unwrap_or_else(|| "Invalid request".to_string()),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::MissingToken => "No token, authorization denied".to_string(),
            AppError::InvalidToken => "Token is not valid".to_string(),
            AppError::NotAuthorized => "User not authorized".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Server Error".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    /// 构造响应体
    ///
    /// 400 使用 `{ "errors": [{ "msg": .. }] }`，其余使用 `{ "msg": .. }`
    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::Validation(errors) => ErrorBody::Errors {
                errors: errors.clone(),
            },
            AppError::BadRequest(msg) => ErrorBody::Errors {
                errors: vec![FieldError::new(msg.clone())],
            },
            _ => ErrorBody::Message {
                msg: self.user_message(),
            },
        }
    }

    // 便捷方法
    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }

    pub fn bad_request(msg: &str) -> Self {
        AppError::BadRequest(msg.to_string())
    }

    /// 将存储层的 NotFound / InvalidIdentifier 映射为具体资源的 404
    pub fn from_store(err: StoreError, not_found_msg: &str) -> Self {
        match err {
            StoreError::NotFound | StoreError::InvalidIdentifier(_) => {
                AppError::NotFound(not_found_msg.to_string())
            }
            other => AppError::Store(other),
        }
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Errors { errors: Vec<FieldError> },
    Message { msg: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 记录错误日志（详细信息只写日志，不返回客户端）
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Application error");
        } else {
            tracing::warn!(code = self.code(), error = %self, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// 从 validator::ValidationErrors 转换，字段按名称排序以保证输出稳定
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let errors = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::for_param(field.to_string(), msg)
                })
            })
            .collect();

        AppError::Validation(errors)
    }
}
