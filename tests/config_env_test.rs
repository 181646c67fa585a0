use doxref::Settings;
use std::env;
use tempfile::TempDir;

#[test]
fn test_env_overrides_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &config_path,
        r#"
[resolver]
primary_namespace = "ofx"
short_alias = "of"

[logging]
default = "info"
"#,
    )
    .unwrap();

    unsafe {
        // Double underscore separates nested levels, single underscore stays
        env::set_var("DOXREF_RESOLVER__SHORT_ALIAS", "o");
        env::set_var("DOXREF_RESOLVER__GROUP_NAMESPACE", "ofMath");
        env::set_var("DOXREF_LOGGING__DEFAULT", "debug");
    }

    let settings = Settings::load_from(&config_path).unwrap();

    unsafe {
        env::remove_var("DOXREF_RESOLVER__SHORT_ALIAS");
        env::remove_var("DOXREF_RESOLVER__GROUP_NAMESPACE");
        env::remove_var("DOXREF_LOGGING__DEFAULT");
    }

    // From the file
    assert_eq!(settings.resolver.primary_namespace, "ofx");
    // Env wins over the file
    assert_eq!(settings.resolver.short_alias, "o");
    assert_eq!(settings.resolver.group_namespace, "ofMath");
    assert_eq!(settings.logging.default, "debug");
    // Untouched fields keep their defaults
    assert_eq!(settings.resolver.default_owner_namespace, "cinder");

    assert_eq!(settings.resolver.normalize("o::Foo"), "ofx::Foo");
}
