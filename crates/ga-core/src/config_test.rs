use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.host, "localhost");
    assert_eq!(config.blazegraph.namespace, "kb");
    assert_eq!(config.readiness.interval(), Duration::from_secs(2));
    assert_eq!(config.readiness.timeout(), Duration::from_secs(120));
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
host: 127.0.0.1
blazegraph:
  image: "lyrasis/blazegraph:2.1.4"
  namespace: biodata
agraph:
  repository: facts
  user: curator
  password: secret
yasgui:
  image: "erikap/yasgui:1.0"
readiness:
  interval_secs: 1
  timeout_secs: 30
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.image_for(GraphBackend::Blazegraph), "lyrasis/blazegraph:2.1.4");
    assert_eq!(config.image_for(GraphBackend::AGraph), "franzinc/agraph:v7.3.0");
    assert_eq!(config.blazegraph.namespace, "biodata");
    assert_eq!(config.agraph.repository, "facts");
    assert_eq!(config.agraph.user, "curator");
    assert_eq!(config.yasgui.image, "erikap/yasgui:1.0");
    assert_eq!(config.readiness.timeout_secs, 30);
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("hots: localhost");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_dir_reads_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "host: graphs.internal\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.host, "graphs.internal");
}

#[test]
fn test_validation_rejects_bad_readiness() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    std::fs::write(&path, "readiness:\n  interval_secs: 0\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));

    std::fs::write(&path, "readiness:\n  interval_secs: 10\n  timeout_secs: 5\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}

#[test]
fn test_validation_rejects_empty_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "yasgui:\n  image: \"\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("yasgui.image"));
}

#[test]
fn test_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "host: [unclosed\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigParseError(_)
    ));
}

#[test]
fn test_sparql_path() {
    let config = Config::default();
    assert_eq!(
        config.sparql_path(GraphBackend::Blazegraph),
        "/bigdata/namespace/kb/sparql"
    );
    assert_eq!(config.sparql_path(GraphBackend::AGraph), "/repositories/kb");
}
