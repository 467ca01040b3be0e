// SPDX-License-Identifier: MPL-2.0
//! In-memory [`UserStore`], for tests and throwaway sessions.

use crate::application::port::UserStore;
use crate::domain::user::{NewUser, User, UserChanges};
use crate::error::{Error, Result};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    /// Store pre-filled with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| Error::Storage("store lock poisoned".into()))
    }
}

impl UserStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users()?.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users()?.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users()?.iter().find(|u| u.email == email).cloned())
    }

    fn create(&self, new: NewUser) -> Result<User> {
        let user = User::register(new, Utc::now());
        self.users()?.push(user.clone());
        Ok(user)
    }

    fn update(&self, id: &str, changes: &UserChanges) -> Result<Option<User>> {
        let mut users = self.users()?;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    fn delete(&self, id: &str) -> Result<Option<User>> {
        let mut users = self.users()?;
        Ok(users
            .iter()
            .position(|u| u.id == id)
            .map(|index| users.remove(index)))
    }

    fn clear(&self) -> Result<usize> {
        let mut users = self.users()?;
        let count = users.len();
        users.clear();
        Ok(count)
    }
}
