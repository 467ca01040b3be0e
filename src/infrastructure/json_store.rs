// SPDX-License-Identifier: MPL-2.0
//! JSON file adapter for [`UserStore`].
//!
//! All users live in one pretty-printed JSON array. Every operation reads
//! the file, and every mutation rewrites it atomically (temporary file, then
//! rename). A missing file is created as `[]`; a file that does not parse is
//! reported as [`Error::Storage`] and left untouched.

use crate::application::port::UserStore;
use crate::config::paths;
use crate::domain::user::{NewUser, User, UserChanges};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Users stored in a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store backed by `users.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(paths::users_file(data_dir))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Storage("store lock poisoned".into()))
    }

    fn read(&self) -> Result<Vec<User>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.write(&[])?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| Error::Storage(format!("{}: {e}", self.path.display())))
    }

    fn write(&self, users: &[User]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(users)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), count = users.len(), "users saved");
        Ok(())
    }

    /// Copies the current users to `users-backup-<timestamp>.json` next to
    /// the data file and returns the backup path.
    pub fn backup(&self, now: DateTime<Utc>) -> Result<PathBuf> {
        let _guard = self.guard()?;
        let users = self.read()?;
        let name = format!("users-backup-{}.json", now.format("%Y-%m-%dT%H-%M-%S-%3fZ"));
        let target = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name));

        let content = serde_json::to_string_pretty(&users)?;
        write_atomic(&target, &content)?;
        tracing::info!(path = %target.display(), count = users.len(), "users backed up");
        Ok(target)
    }
}

/// Writes `content` to a sibling temporary file, then renames it over `path`.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

impl UserStore for JsonFileStore {
    fn find_all(&self) -> Result<Vec<User>> {
        let _guard = self.guard()?;
        self.read()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.find_all()?.into_iter().find(|u| u.id == id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_all()?.into_iter().find(|u| u.email == email))
    }

    fn create(&self, new: NewUser) -> Result<User> {
        let _guard = self.guard()?;
        let mut users = self.read()?;
        let user = User::register(new, Utc::now());
        users.push(user.clone());
        self.write(&users)?;
        Ok(user)
    }

    fn update(&self, id: &str, changes: &UserChanges) -> Result<Option<User>> {
        let _guard = self.guard()?;
        let mut users = self.read()?;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.apply(changes);
        let updated = user.clone();
        self.write(&users)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> Result<Option<User>> {
        let _guard = self.guard()?;
        let mut users = self.read()?;
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        let removed = users.remove(index);
        self.write(&users)?;
        Ok(Some(removed))
    }

    fn clear(&self) -> Result<usize> {
        let _guard = self.guard()?;
        let count = self.read()?.len();
        self.write(&[])?;
        Ok(count)
    }
}
