//! 个人资料的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::profile::{
        EducationRequest, ExperienceRequest, Profile, ProfileRequest, ProfileResponse,
    },
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::validated;

/// 当前用户的资料
pub async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(state.profile_service.me(&auth_context).await?))
}

/// 创建或更新资料
pub async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, AppError> {
    let req = validated(body)?;
    Ok(Json(state.profile_service.upsert(&auth_context, req).await?))
}

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    Ok(Json(state.profile_service.list().await?))
}

pub async fn get_profile_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(state.profile_service.by_user(&user_id).await?))
}

/// 注销账户（帖子、资料、用户）
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<Json<Value>, AppError> {
    state.profile_service.delete_account(&auth_context).await?;
    Ok(Json(json!({"msg": "User deleted"})))
}

pub async fn add_experience(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    body: Result<Json<ExperienceRequest>, JsonRejection>,
) -> Result<Json<Profile>, AppError> {
    let req = validated(body)?;
    Ok(Json(
        state.profile_service.add_experience(&auth_context, req).await?,
    ))
}

pub async fn delete_experience(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(
        state
            .profile_service
            .delete_experience(&auth_context, &exp_id)
            .await?,
    ))
}

pub async fn add_education(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    body: Result<Json<EducationRequest>, JsonRejection>,
) -> Result<Json<Profile>, AppError> {
    let req = validated(body)?;
    Ok(Json(
        state.profile_service.add_education(&auth_context, req).await?,
    ))
}

pub async fn delete_education(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(
        state
            .profile_service
            .delete_education(&auth_context, &edu_id)
            .await?,
    ))
}
