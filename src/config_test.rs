use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_lock()` so no other test mutates the environment.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("PORT");
        std::env::remove_var("UPLOAD_DIR");
        std::env::remove_var("MAX_UPLOAD_BYTES");
        std::env::remove_var("DB_MAX_CONNECTIONS");
    }
}

#[test]
fn from_env_applies_defaults() {
    let _guard = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/pdfqa");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.database_url, "postgres://localhost/pdfqa");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("DATABASE_URL", "postgres://db/pdfqa");
        std::env::set_var("PORT", "9100");
        std::env::set_var("UPLOAD_DIR", "/var/lib/pdfqa");
        std::env::set_var("MAX_UPLOAD_BYTES", " 1024 ");
        std::env::set_var("DB_MAX_CONNECTIONS", "12");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.upload_dir, PathBuf::from("/var/lib/pdfqa"));
    assert_eq!(cfg.max_upload_bytes, 1024);
    assert_eq!(cfg.db_max_connections, 12);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_requires_database_url() {
    let _guard = env_lock();
    unsafe { clear_server_env() };
    assert_eq!(ServerConfig::from_env(), Err(ConfigError::Missing("DATABASE_URL")));
}

#[test]
fn from_env_rejects_bad_port() {
    let _guard = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/pdfqa");
        std::env::set_var("PORT", "eighty");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });
    assert_eq!(err.to_string(), "invalid PORT: eighty");

    unsafe { clear_server_env() };
}
