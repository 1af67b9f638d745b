//! 认证服务：注册、登录、当前用户

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    gravatar,
    models::{
        auth::LoginRequest,
        user::{normalize_email, NewUser, RegisterRequest, UserResponse},
    },
    repository::{StoreError, UserStore},
};
use std::sync::Arc;
use uuid::Uuid;

/// 登录失败统一返回的消息，不区分邮箱不存在与密码错误
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const USER_EXISTS: &str = "User already exists";

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            hasher,
            jwt_service,
        }
    }

    /// 用户注册，成功后直接签发令牌
    pub async fn register(&self, req: RegisterRequest) -> Result<String, AppError> {
        let email = normalize_email(&req.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request(USER_EXISTS));
        }

        let password_hash = self.hash_password(req.password).await?;

        let user = self
            .users
            .create(NewUser {
                name: req.name.trim().to_string(),
                avatar: gravatar::url(&email),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // 并发注册同一邮箱时由存储层的唯一约束兜底
                StoreError::Conflict(_) => AppError::bad_request(USER_EXISTS),
                other => AppError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");

        self.jwt_service.issue_token(&user.id)
    }

    /// 用户登录
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        let email = normalize_email(&req.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_CREDENTIALS))?;

        if !self.verify_password(req.password, user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::bad_request(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.jwt_service.issue_token(&user.id)
    }

    /// 获取当前用户（不含密码哈希）
    pub async fn current_user(&self, user_id: &Uuid) -> Result<UserResponse, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    // Argon2 计算为 CPU 密集型，放到阻塞线程池执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
    }
}
