use super::*;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert!(config.defaults.variant.is_none());
    assert!(config.defaults.format.is_none());
    assert!(config.analyzer.timeout_secs.is_none());
    assert!(!config.has_weight_overrides());
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
[defaults]
variant = "brand"
format = "markdown"
fail_under = 70

[analyzer]
user_agent = "TestBot/1.0"
timeout_secs = 5

[weights]
technical = 30
social = 0
"#;

    let config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");

    assert_eq!(config.defaults.variant.as_deref(), Some("brand"));
    assert_eq!(config.defaults.format.as_deref(), Some("markdown"));
    assert_eq!(config.defaults.fail_under, Some(70));
    assert_eq!(config.analyzer.user_agent.as_deref(), Some("TestBot/1.0"));
    assert_eq!(config.analyzer.timeout_secs, Some(5));
    assert!((config.weights["technical"] - 30.0).abs() < 0.001);
    assert_eq!(config.weights["social"], 0.0);
}

#[test]
fn test_example_config_parses() {
    let config: ProjectConfig =
        toml::from_str(EXAMPLE_PROJECT_CONFIG).expect("parse example config");
    assert_eq!(config.defaults.variant.as_deref(), Some("general"));
    assert!(config.weights.is_empty());
}

#[test]
fn test_fail_under_out_of_range_is_error() {
    let result = toml::from_str::<ProjectConfig>("[defaults]\nfail_under = 300\n");
    assert!(result.is_err());
}

#[test]
fn test_load_from_directory_prefers_toml() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join(PROJECT_CONFIG_TOML),
        "[defaults]\nformat = \"json\"\nchecklist = \"lists/custom.toml\"\n",
    )
    .expect("write toml");
    std::fs::write(
        dir.path().join(PROJECT_CONFIG_JSON),
        r#"{"defaults": {"format": "csv"}}"#,
    )
    .expect("write json");

    let config = load_project_config(dir.path());
    assert_eq!(config.defaults.format.as_deref(), Some("json"));
    assert_eq!(
        config.defaults.checklist,
        Some(dir.path().join("lists/custom.toml"))
    );
    assert_eq!(
        find_project_config(dir.path()),
        Some(dir.path().join(PROJECT_CONFIG_TOML))
    );
}

#[test]
fn test_broken_toml_falls_back_to_json() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join(PROJECT_CONFIG_TOML), "[defaults\nformat = ").expect("write");
    std::fs::write(
        dir.path().join(PROJECT_CONFIG_JSON),
        r#"{"defaults": {"variant": "brand"}, "weights": {"brand": 40}}"#,
    )
    .expect("write json");

    let config = load_project_config(dir.path());
    assert_eq!(config.defaults.variant.as_deref(), Some("brand"));
    assert_eq!(config.weights.get("brand"), Some(&40.0));
}

#[test]
fn test_missing_config_gives_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    assert_eq!(find_project_config(dir.path()), None);
}

#[test]
fn test_analyzer_settings_or() {
    let project = AnalyzerSettings {
        user_agent: Some("Project/1.0".into()),
        timeout_secs: None,
    };
    let user = AnalyzerSettings {
        user_agent: Some("User/1.0".into()),
        timeout_secs: Some(30),
    };
    let merged = project.or(&user);
    assert_eq!(merged.user_agent.as_deref(), Some("Project/1.0"));
    assert_eq!(merged.timeout_secs, Some(30));
}
