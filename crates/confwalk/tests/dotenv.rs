//! Fallbacks read from a `.env` file.

#![allow(clippy::pedantic)]
#![cfg(feature = "dotenv")]

use std::fs;

use confwalk::{DotenvEnv, Environment, Error, MemoryBackend, Populate, Populator};
use serial_test::serial;

#[derive(Debug, Default, Populate)]
struct Api {
    #[config(key = "Port", env = "CONFWALK_TEST_PORT")]
    port: i32,

    #[config(key = "Host", env = "CONFWALK_TEST_HOST")]
    host: String,
}

fn cleanup_env(vars: &[&str]) {
    unsafe {
        for k in vars {
            std::env::remove_var(*k);
        }
    }
}

fn write_dotenv(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, content).expect("Failed to write .env file");
    path
}

#[test]
#[serial]
fn test_fallback_from_dotenv_file() {
    cleanup_env(&["CONFWALK_TEST_PORT", "CONFWALK_TEST_HOST"]);

    let dir = tempfile::tempdir().unwrap();
    let path = write_dotenv(
        &dir,
        "CONFWALK_TEST_PORT=8080\nCONFWALK_TEST_HOST=\"from-file\"\n",
    );

    let env = DotenvEnv::from_path(&path).unwrap();
    assert_eq!(env.path(), path.as_path());

    let mut api = Api::default();
    Populator::new(&MemoryBackend::new())
        .with_env(&env)
        .populate(&mut api)
        .unwrap();

    assert_eq!(api.port, 8080);
    assert_eq!(api.host, "from-file");

    // The process environment is not modified.
    assert!(std::env::var("CONFWALK_TEST_PORT").is_err());
}

#[test]
#[serial]
fn test_process_env_wins_over_file() {
    cleanup_env(&["CONFWALK_TEST_PORT", "CONFWALK_TEST_HOST"]);

    let dir = tempfile::tempdir().unwrap();
    let path = write_dotenv(&dir, "CONFWALK_TEST_PORT=8080\n");

    unsafe {
        std::env::set_var("CONFWALK_TEST_PORT", "9090");
    }

    let env = DotenvEnv::from_path(&path).unwrap();
    assert_eq!(env.var("CONFWALK_TEST_PORT").as_deref(), Some("9090"));

    cleanup_env(&["CONFWALK_TEST_PORT"]);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.env");

    let err = DotenvEnv::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Dotenv { .. }));
    assert!(err.to_string().contains("absent.env"));

    let env = DotenvEnv::from_path_optional(&path).unwrap();
    assert_eq!(env.var("CONFWALK_TEST_SURELY_UNSET"), None);
}
