//! Business logic services layer

pub mod auth_service;
pub mod post_service;
pub mod profile_service;

pub use auth_service::AuthService;
pub use post_service::PostService;
pub use profile_service::ProfileService;
