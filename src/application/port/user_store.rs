// SPDX-License-Identifier: MPL-2.0
//! User persistence port.

use crate::domain::user::{NewUser, User, UserChanges};
use crate::error::Result;

/// Persistence of registered users.
///
/// Implementations serialize their own writes; callers may share one store
/// between threads. Lookups by email compare the stored (normalized) value
/// exactly.
pub trait UserStore: Send + Sync {
    /// All users in registration order.
    fn find_all(&self) -> Result<Vec<User>>;

    fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Stores a new user and returns it with its id and timestamp.
    fn create(&self, new: NewUser) -> Result<User>;

    /// Applies `changes` and returns the updated user, or `None` if `id` is
    /// unknown.
    fn update(&self, id: &str, changes: &UserChanges) -> Result<Option<User>>;

    /// Removes the user and returns it, or `None` if `id` is unknown.
    fn delete(&self, id: &str) -> Result<Option<User>>;

    /// Removes every user. Returns how many were removed.
    fn clear(&self) -> Result<usize>;
}

impl<S: UserStore + ?Sized> UserStore for std::sync::Arc<S> {
    fn find_all(&self) -> Result<Vec<User>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        (**self).find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        (**self).find_by_email(email)
    }

    fn create(&self, new: NewUser) -> Result<User> {
        (**self).create(new)
    }

    fn update(&self, id: &str, changes: &UserChanges) -> Result<Option<User>> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: &str) -> Result<Option<User>> {
        (**self).delete(id)
    }

    fn clear(&self) -> Result<usize> {
        (**self).clear()
    }
}
