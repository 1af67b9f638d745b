//! 社交网络后端库
//! 注册登录、令牌认证、帖子与个人资料

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gravatar;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
