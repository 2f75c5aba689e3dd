//! Shared helpers for integration tests that touch process-wide state.

use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

/// Variables read by `AppConfig::load`.
pub const CONFIG_ENV_KEYS: [&str; 5] = ["CRM_CONFIG", "HOST", "PORT", "CRM_SEED", "RUST_LOG"];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with exactly the given config variables set; every other key in
/// `CONFIG_ENV_KEYS` is unset for the duration.
///
/// Calls are serialized because the environment is shared by all test
/// threads. Previous values are restored even if `f` panics.
pub fn with_config_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::capture();

    for key in CONFIG_ENV_KEYS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    f()
}

struct EnvRestore {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvRestore {
    fn capture() -> Self {
        let saved = CONFIG_ENV_KEYS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Write `contents` to `crm.toml` inside a fresh temporary directory.
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("crm.toml");
    std::fs::write(&path, contents).expect("write config file");
    (dir, path)
}
