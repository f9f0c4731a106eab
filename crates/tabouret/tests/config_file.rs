//! Tests for loading the application config from disk.

mod common;
use common::*;

use std::io::Write;

use tabouret::{App, AppConfig, AppError, Request};

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BLOG_CONFIG.as_bytes()).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.routes.len(), 5);
    assert_eq!(config.routes[2].name(), "post");
    assert_eq!(config.routes[2].target(), "blog.posts.show");

    let app = App::from_file(file.path()).unwrap();
    let matched = app.routes().resolve(&Request::new("/posts/x").urn()).unwrap();
    assert_eq!(matched.name, "post");
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo.json");
    assert!(matches!(
        AppConfig::load(&path),
        Err(AppError::ConfigNotFound(p)) if p == path
    ));
}

#[test]
fn invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    assert!(matches!(AppConfig::load(file.path()), Err(AppError::Config(_))));
}

#[test]
fn malformed_target_fails_app_creation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"routes": [["home", "^$", "main.site"]]}"#)
        .unwrap();
    assert!(matches!(App::from_file(file.path()), Err(AppError::Router(_))));
}
