//! 数据模型模块
//! 用户、认证、帖子与个人资料

pub mod auth;
pub mod post;
pub mod profile;
pub mod user;

use std::borrow::Cow;
use validator::ValidationError;

pub(crate) fn required(message: &'static str) -> ValidationError {
    ValidationError::new("required").with_message(Cow::Borrowed(message))
}

/// 必填文本字段：去除首尾空白后不能为空
pub(crate) fn require_text(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required(message));
    }
    Ok(())
}
