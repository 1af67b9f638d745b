//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{auth_middleware, extract_token, AuthContext, AUTH_HEADER};
pub use ownership::{authorize, ensure_owner, Owned};
pub use password::PasswordHasher;
