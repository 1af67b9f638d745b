//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{auth::middleware::auth_middleware, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/users", post(handlers::user::register))
        .route("/api/auth", post(handlers::auth::login))
        .route("/api/profile", get(handlers::profile::list_profiles))
        .route(
            "/api/profile/user/{user_id}",
            get(handlers::profile::get_profile_by_user),
        );

    // 需要 x-auth-token 的端点
    let authenticated_routes = Router::new()
        .route("/api/auth", get(handlers::auth::get_current_user))
        // 帖子
        .route(
            "/api/posts",
            post(handlers::post::create_post).get(handlers::post::list_posts),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::post::get_post).delete(handlers::post::delete_post),
        )
        .route("/api/posts/like/{id}", put(handlers::post::like_post))
        .route("/api/posts/unlike/{id}", put(handlers::post::unlike_post))
        .route("/api/posts/comment/{id}", post(handlers::post::add_comment))
        .route(
            "/api/posts/comment/{id}/{comment_id}",
            delete(handlers::post::delete_comment),
        )
        // 个人资料
        .route("/api/profile/me", get(handlers::profile::get_my_profile))
        .route(
            "/api/profile",
            post(handlers::profile::upsert_profile).delete(handlers::profile::delete_account),
        )
        .route(
            "/api/profile/experience",
            put(handlers::profile::add_experience),
        )
        .route(
            "/api/profile/experience/{exp_id}",
            delete(handlers::profile::delete_experience),
        )
        .route(
            "/api/profile/education",
            put(handlers::profile::add_education),
        )
        .route(
            "/api/profile/education/{edu_id}",
            delete(handlers::profile::delete_education),
        )
        // route_layer 只作用于已匹配的路由，与公开路由合并同一路径时互不影响
        .route_layer(from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
