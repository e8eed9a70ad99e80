use std::ffi::OsString;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use tern_config::{discover_config_path, load_for_workspace, TernConfig, TERN_CONFIG_ENV_VAR};

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn missing_config_yields_defaults() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(TERN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config, TernConfig::default());
    assert_eq!(path, None);
}

#[test]
fn tern_toml_wins_over_dot_tern_toml() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(TERN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let primary = dir.path().join("tern.toml");
    std::fs::write(&primary, "[code_actions]\nvar_declaration = false\n").unwrap();
    std::fs::write(dir.path().join(".tern.toml"), "[logging]\njson = true\n").unwrap();

    let discovered = discover_config_path(dir.path()).expect("tern.toml should be discovered");
    assert_eq!(discovered, primary.canonicalize().unwrap_or(primary));

    let (config, _) = load_for_workspace(dir.path()).unwrap();
    assert!(!config.code_actions.var_declaration);
    assert!(!config.logging.json);
}

#[test]
fn hidden_config_is_used_as_fallback() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(TERN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(".tern.toml"), "[logging]\nlevel = \"debug\"\n").unwrap();

    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert!(path.is_some());
}

#[test]
fn env_override_wins_over_workspace_file() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tern.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
    let override_path = dir.path().join("override.toml");
    std::fs::write(
        &override_path,
        "[logging]\nlevel = \"trace\"\n[code_actions]\nvar_declaration = false\n",
    )
    .unwrap();
    let _env = EnvVarGuard::set(TERN_CONFIG_ENV_VAR, &override_path);

    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config.logging.level, "trace");
    assert!(!config.code_actions.var_declaration);
    assert_eq!(
        path,
        Some(override_path.canonicalize().unwrap_or(override_path))
    );
}

#[test]
fn invalid_config_is_an_error() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(TERN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tern.toml"), "[logging]\ncolour = true\n").unwrap();

    let err = load_for_workspace(dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse toml config"), "{err}");
}
