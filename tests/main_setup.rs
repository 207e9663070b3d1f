use serial_test::serial;
use std::{env, panic};
use storefront_shell::{AppConfig, config::Env};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

const CONFIG_VARS: [&str; 3] = ["APP_ENV", "IDENTITY_SERVICE_URL", "BIND_ADDR"];

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(
        || {
            panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("IDENTITY_SERVICE_URL");
                }
                AppConfig::load()
            })
        },
        CONFIG_VARS.to_vec(),
    );

    assert!(
        result.is_err(),
        "Production config loading should panic without IDENTITY_SERVICE_URL"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::remove_var("IDENTITY_SERVICE_URL");
                env::remove_var("BIND_ADDR");
            }
            AppConfig::load()
        },
        CONFIG_VARS.to_vec(),
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.identity_service_url, "http://localhost:8081");
    assert_eq!(config.bind_addr, "0.0.0.0:8082");
}

#[test]
#[serial]
fn test_app_config_production_reads_identity_url() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("IDENTITY_SERVICE_URL", "https://identity.example.com/");
                env::set_var("BIND_ADDR", "127.0.0.1:9000");
            }
            AppConfig::load()
        },
        CONFIG_VARS.to_vec(),
    );

    assert_eq!(config.env, Env::Production);
    // Trailing slash is trimmed so endpoint paths join cleanly.
    assert_eq!(config.identity_service_url, "https://identity.example.com");
    assert_eq!(config.bind_addr, "127.0.0.1:9000");
}

#[test]
fn test_endpoints_are_derived_from_identity_url() {
    let config = AppConfig {
        identity_service_url: "http://identity:8081".to_string(),
        ..AppConfig::default()
    };

    let endpoints = config.endpoints();
    assert_eq!(endpoints.identity, "http://identity:8081/users/authenticated");
    assert_eq!(endpoints.registration, "http://identity:8081/users/registr");
    assert_eq!(endpoints.logout, "http://identity:8081/logout");
    assert_eq!(endpoints.login_action, "http://identity:8081/login");
    assert_eq!(endpoints.login_page, "/login");
    assert_eq!(endpoints.register_page, "/register");
}
