//! Layered configuration: defaults, user file, explicit file, environment.

use crate::integration::test_utils::with_isolated_env;
use docview::config::{user_config_path, ConfigLoader};
use docview::error::DocviewError;
use docview::SortDirection;
use tempfile::TempDir;

fn write_user_config(contents: &str) {
    let path = user_config_path().unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.refresh.interval_ms, 2000);
        assert_eq!(config.listing.default_sort_field, "name");
        assert_eq!(config.listing.default_sort_direction, SortDirection::Asc);
        assert_eq!(config.listing.default_limit, 30);
    });
}

#[test]
fn test_user_file_is_picked_up() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let path = user_config_path().unwrap();
        assert!(path.starts_with(test_dir.path()));

        write_user_config("[refresh]\ninterval_ms = 1000\n");
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.refresh.interval_ms, 1000);
    });
}

#[test]
fn test_explicit_file_overrides_user_file() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        write_user_config("[refresh]\ninterval_ms = 1000\n\n[listing]\ndefault_limit = 10\n");

        let explicit = test_dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[refresh]\ninterval_ms = 250\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.refresh.interval_ms, 250);
        assert_eq!(config.listing.default_limit, 10);
    });
}

#[test]
fn test_environment_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        write_user_config("[refresh]\ninterval_ms = 1000\n");
        std::env::set_var("DOCVIEW_REFRESH__INTERVAL_MS", "400");
        std::env::set_var("DOCVIEW_LISTING__DEFAULT_SORT_FIELD", "created_at");

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.refresh.interval_ms, 400);
        assert_eq!(config.listing.default_sort_field, "created_at");
    });
}

#[test]
fn test_invalid_environment_value_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        std::env::set_var("DOCVIEW_LISTING__DEFAULT_LIMIT", "0");

        let result = ConfigLoader::load();
        assert!(matches!(result, Err(DocviewError::ConfigError(_))));
    });
}
