// SPDX-License-Identifier: MPL-2.0
//! Location of the config and data directories.
//!
//! Both directories are resolved with the same precedence:
//! 1. **Explicit override** passed to the `_with_override()` functions (tests)
//! 2. **CLI arguments** (`--config-dir`, `--data-dir`) set via [`init_cli_overrides`]
//! 3. **Environment variables** ([`ENV_CONFIG_DIR`], [`ENV_DATA_DIR`]), when non-empty
//! 4. **Platform default** from the `dirs` crate, with [`APP_NAME`] appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory name used under the platform config/data directories.
pub const APP_NAME: &str = "SignupDesk";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "SIGNUP_DESK_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SIGNUP_DESK_CONFIG_DIR";

/// File holding the registered users, inside the data directory.
pub const USERS_FILE: &str = "users.json";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` flags.
///
/// Must be called once at startup, before any path is resolved. Later calls
/// are ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    if !(data_set && config_set) {
        tracing::warn!("CLI directory overrides were already initialized");
    }
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    if override_path.is_some() {
        return override_path;
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => return Some(PathBuf::from(value)),
        _ => {}
    }

    platform.map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the data directory, where `users.json` and its backups live.
///
/// Returns `None` only when the platform has no data directory.
pub fn data_dir() -> Option<PathBuf> {
    data_dir_with_override(None)
}

pub fn data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the config directory, where `settings.toml` lives.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}

pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        &CLI_CONFIG_DIR,
        ENV_CONFIG_DIR,
        dirs::config_dir(),
    )
}

/// Full path of the users file for a given data directory.
#[must_use]
pub fn users_file(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(USERS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching env vars must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn data_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn override_path_takes_precedence() {
        let data = PathBuf::from("/custom/data/path");
        let config = PathBuf::from("/custom/config/path");
        assert_eq!(data_dir_with_override(Some(data.clone())), Some(data));
        assert_eq!(config_dir_with_override(Some(config.clone())), Some(config));
    }

    #[test]
    fn env_var_overrides_platform_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/test/data/dir");
        std::env::set_var(ENV_CONFIG_DIR, "/test/config/dir");

        assert_eq!(data_dir(), Some(PathBuf::from("/test/data/dir")));
        assert_eq!(config_dir(), Some(PathBuf::from("/test/config/dir")));

        std::env::remove_var(ENV_DATA_DIR);
        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(path) = data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn override_path_beats_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/env/path");

        let override_path = PathBuf::from("/override/path");
        assert_eq!(
            data_dir_with_override(Some(override_path.clone())),
            Some(override_path)
        );

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn users_file_is_inside_data_dir() {
        let path = users_file(std::path::Path::new("/tmp/desk"));
        assert_eq!(path, PathBuf::from("/tmp/desk/users.json"));
    }
}
