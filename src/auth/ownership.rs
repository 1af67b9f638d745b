//! Ownership checks for mutating operations

use uuid::Uuid;

use crate::{
    auth::AuthContext,
    error::AppError,
    models::post::{Comment, Post},
};

/// A resource that belongs to exactly one user
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.user
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.user
    }
}

impl<T: Owned + ?Sized> Owned for &T {
    fn owner_id(&self) -> Uuid {
        (**self).owner_id()
    }
}

/// True when the authenticated user owns the resource
///
/// Identifiers are compared as parsed UUIDs, so casing or hyphenation
/// differences in their textual forms never matter.
pub fn authorize<R: Owned + ?Sized>(identity: &AuthContext, resource: &R) -> bool {
    resource.owner_id() == identity.user_id
}

/// Existence first, then ownership
///
/// Absent resources yield 404 with `not_found_msg`; resources owned by
/// someone else yield 401 "User not authorized".
pub fn ensure_owner<R: Owned>(
    identity: &AuthContext,
    resource: Option<R>,
    not_found_msg: &str,
) -> Result<R, AppError> {
    let resource = resource.ok_or_else(|| AppError::not_found(not_found_msg))?;

    if !authorize(identity, &resource) {
        tracing::warn!(
            user_id = %identity.user_id,
            owner_id = %resource.owner_id(),
            "Ownership check failed"
        );
        return Err(AppError::NotAuthorized);
    }

    Ok(resource)
}
