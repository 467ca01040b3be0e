// SPDX-License-Identifier: MPL-2.0
//! Registration use cases.
//!
//! [`UserService`] validates input, enforces email uniqueness and turns
//! store results into typed [`ServiceError`]s that the REST layer maps onto
//! status codes.

use crate::application::port::UserStore;
use crate::domain::user::validation::{
    normalize_email, validate_create, validate_update, validate_user_id,
};
use crate::domain::user::{
    CreateUserInput, FieldError, UpdateUserInput, User, UserList, UserStats,
};
use crate::error::Error;
use chrono::{DateTime, Local, TimeZone};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Reported when a registration reuses an email.
pub const EMAIL_TAKEN: &str = "This email is already registered, please use another one";

/// Reported when an update moves a user onto someone else's email.
pub const EMAIL_IN_USE: &str = "This email is already used by another user";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Input validation failed")]
    Validation(Vec<FieldError>),

    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] Error),
}

impl From<FieldError> for ServiceError {
    fn from(err: FieldError) -> Self {
        ServiceError::Validation(vec![err])
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// User registration service over any [`UserStore`].
#[derive(Debug)]
pub struct UserService<S> {
    store: S,
    // Held across check-then-write sequences so two registrations with the
    // same email cannot both pass the uniqueness check.
    writes: Mutex<()>,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            writes: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_guard(&self) -> ServiceResult<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| ServiceError::Storage(Error::Storage("write lock poisoned".into())))
    }

    pub fn get_all(&self) -> ServiceResult<UserList> {
        Ok(self.store.find_all()?.into())
    }

    pub fn get_by_id(&self, id: &str) -> ServiceResult<User> {
        let id = validate_user_id(id)?;
        self.store.find_by_id(id)?.ok_or(ServiceError::NotFound)
    }

    /// Registers a new user.
    pub fn create(&self, input: &CreateUserInput) -> ServiceResult<User> {
        let new = validate_create(input).map_err(ServiceError::Validation)?;

        let _guard = self.write_guard()?;
        if self.store.find_by_email(&new.email)?.is_some() {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }
        let user = self.store.create(new)?;
        tracing::debug!(user = %user.id, "user registered");
        Ok(user)
    }

    /// Updates the fields present in `input`.
    pub fn update(&self, id: &str, input: &UpdateUserInput) -> ServiceResult<User> {
        let id = validate_user_id(id)?;
        let changes = validate_update(input).map_err(ServiceError::Validation)?;

        let _guard = self.write_guard()?;
        if let Some(email) = &changes.email {
            if let Some(owner) = self.store.find_by_email(email)? {
                if owner.id != id {
                    return Err(ServiceError::Conflict(EMAIL_IN_USE.to_string()));
                }
            }
        }
        self.store
            .update(id, &changes)?
            .ok_or(ServiceError::NotFound)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<User> {
        let id = validate_user_id(id)?;
        let _guard = self.write_guard()?;
        self.store.delete(id)?.ok_or(ServiceError::NotFound)
    }

    /// Returns whether no user is registered with `email` (after
    /// normalization).
    pub fn is_email_available(&self, email: &str) -> ServiceResult<bool> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ServiceError::BadRequest("Missing email parameter".into()));
        }
        Ok(self.store.find_by_email(&email)?.is_none())
    }

    /// Registration counts relative to the local clock.
    pub fn stats(&self) -> ServiceResult<UserStats> {
        self.stats_at(&Local::now())
    }

    pub fn stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ServiceResult<UserStats> {
        let users = self.store.find_all()?;
        Ok(UserStats::compute(&users, now))
    }

    /// Case-insensitive search over name, email and message. A blank query
    /// returns every user.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<User>> {
        let users = self.store.find_all()?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(users);
        }
        Ok(users.into_iter().filter(|u| u.matches(&needle)).collect())
    }

    /// Removes every user.
    pub fn clear(&self) -> ServiceResult<usize> {
        let _guard = self.write_guard()?;
        Ok(self.store.clear()?)
    }
}
