use std::collections::HashMap;

use freelink_backend::config::{AppConfig, ConfigError};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

const REQUIRED: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/freelink"),
    ("SUPABASE_URL", "https://abcd.supabase.co/"),
    ("SUPABASE_ANON_KEY", "anon"),
];

#[test]
fn test_defaults_apply_when_only_required_vars_are_set() {
    let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();

    assert_eq!(config.supabase_url, "https://abcd.supabase.co");
    assert_eq!(config.supabase_service_key, "anon");
    assert_eq!(config.jwt_secret, None);
    assert_eq!(config.screenshot_access_key, None);
    assert_eq!(config.screenshot_endpoint, "https://api.apiflash.com/v1/urltoimage");
    assert_eq!(config.profile_image_bucket, "profile-images");
    assert_eq!(config.portfolio_bucket, "portfolio-screenshots");
    assert_eq!(config.page_size, 6);
    assert!(!config.run_migrations);
    assert_eq!(config.port, 8080);
}

#[test]
fn test_overrides_are_read() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("SUPABASE_SERVICE_KEY", "service"),
        ("SUPABASE_JWT_SECRET", "secret"),
        ("SCREENSHOT_ACCESS_KEY", "flash"),
        ("FREELANCER_PAGE_SIZE", "9"),
        ("RUN_MIGRATIONS", "true"),
        ("PORT", "3000"),
    ]);

    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.supabase_service_key, "service");
    assert_eq!(config.jwt_secret.as_deref(), Some("secret"));
    assert_eq!(config.screenshot_access_key.as_deref(), Some("flash"));
    assert_eq!(config.page_size, 9);
    assert!(config.run_migrations);
    assert_eq!(config.port, 3000);
}

#[test]
fn test_missing_required_var_is_named() {
    let result = AppConfig::from_lookup(lookup(&REQUIRED[1..]));
    assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));

    // Blank counts as missing.
    let mut vars = REQUIRED.to_vec();
    vars[2] = ("SUPABASE_ANON_KEY", "  ");
    let result = AppConfig::from_lookup(lookup(&vars));
    assert!(matches!(result, Err(ConfigError::Missing("SUPABASE_ANON_KEY"))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("PORT", "eighty"));
    let result = AppConfig::from_lookup(lookup(&vars));
    assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));

    let mut vars = REQUIRED.to_vec();
    vars[1] = ("SUPABASE_URL", "abcd.supabase.co");
    let result = AppConfig::from_lookup(lookup(&vars));
    assert!(matches!(result, Err(ConfigError::Invalid { name: "SUPABASE_URL", .. })));
}

#[test]
fn test_page_size_is_at_least_one() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("FREELANCER_PAGE_SIZE", "0"));
    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.page_size, 1);
}
