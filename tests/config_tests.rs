//! Configuration loading tests.
//!
//! These mutate process environment variables, so they run serially.

use marquee::config::{SiteConfig, INSECURE_SESSION_SECRET};
use serial_test::serial;

fn clear_env() {
    for var in [
        "MARQUEE_SERVER_HOST",
        "MARQUEE_SERVER_PORT",
        "MARQUEE_DATABASE_URL",
        "MARQUEE_ADMIN_USERNAME",
        "MARQUEE_ADMIN_PASSWORD",
        "MARQUEE_SESSION_SECRET",
        "MARQUEE_SESSION_TTL_SECS",
        "MARQUEE_LOG_LEVEL",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    clear_env();

    let config = SiteConfig::load().expect("load failed");
    config.validate().expect("defaults should validate");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert!(!config.database.is_configured());
    assert_eq!(config.auth.admin_username, "admin");
    assert!(config.auth.admin_password.is_empty());
    assert_eq!(config.auth.session_secret, INSECURE_SESSION_SECRET);
    assert!(config.auth.uses_fallback_secret());
    assert_eq!(config.auth.session_ttl_secs, 86_400);
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    clear_env();
    std::env::set_var("MARQUEE_SERVER_PORT", "10000");
    std::env::set_var("MARQUEE_DATABASE_URL", "sqlite://site.db");
    std::env::set_var("MARQUEE_ADMIN_USERNAME", "agency");
    std::env::set_var("MARQUEE_ADMIN_PASSWORD", "s3cret");
    std::env::set_var("MARQUEE_SESSION_SECRET", "deployment-secret");
    std::env::set_var("MARQUEE_SESSION_TTL_SECS", "7200");

    let config = SiteConfig::load().expect("load failed");
    config.validate().expect("config should validate");

    assert_eq!(config.server.port, 10000);
    assert!(config.database.is_configured());
    assert_eq!(config.database.url, "sqlite://site.db");
    assert_eq!(config.auth.admin_username, "agency");
    assert_eq!(config.auth.admin_password, "s3cret");
    assert!(!config.auth.uses_fallback_secret());
    assert_eq!(config.auth.session_ttl_secs, 7200);

    clear_env();
}

#[test]
#[serial]
fn unparseable_port_falls_back_to_default() {
    clear_env();
    std::env::set_var("MARQUEE_SERVER_PORT", "not-a-port");

    let config = SiteConfig::load().expect("load failed");
    assert_eq!(config.server.port, 8080);

    clear_env();
}
