use super::*;
use crate::source::SourceKind;
use tempfile::TempDir;

#[test]
fn test_license_round_trip() {
    let dir = TempDir::new().unwrap();
    let manifest =
        LoadManifest::parse("data/foo.nq\thttps://license.example/\n", "test", dir.path())
            .unwrap();

    assert_eq!(manifest.len(), 1);
    let entry = &manifest.entries()[0];
    assert_eq!(entry.location(), "data/foo.nq");
    assert_eq!(entry.kind(), SourceKind::LocalFile);
    assert_eq!(entry.license(), Some("https://license.example/"));
}

#[test]
fn test_skips_blank_and_comment_lines() {
    let dir = TempDir::new().unwrap();
    let content = "# providers\n\n   \ngs://bucket/a/\n  # indented comment\ngs://bucket/b.nq\r\n";
    let manifest = LoadManifest::parse(content, "test", dir.path()).unwrap();

    let locations: Vec<&str> = manifest.iter().map(|e| e.location()).collect();
    assert_eq!(locations, vec!["gs://bucket/a/", "gs://bucket/b.nq"]);
    assert_eq!(manifest.entries()[0].kind(), SourceKind::CloudDir);
    assert_eq!(manifest.entries()[1].kind(), SourceKind::CloudFile);
}

#[test]
fn test_preserves_manifest_order() {
    let dir = TempDir::new().unwrap();
    let content = "gs://b/z\ngs://b/a\ngs://b/m\n";
    let manifest = LoadManifest::parse(content, "test", dir.path()).unwrap();
    let locations: Vec<&str> = (&manifest).into_iter().map(|e| e.location()).collect();
    assert_eq!(locations, vec!["gs://b/z", "gs://b/a", "gs://b/m"]);
}

#[test]
fn test_trailing_empty_license_is_absent() {
    let dir = TempDir::new().unwrap();
    let manifest = LoadManifest::parse("gs://b/x\t\n", "test", dir.path()).unwrap();
    assert_eq!(manifest.entries()[0].license(), None);
}

#[test]
fn test_empty_location_is_malformed() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::parse("gs://b/ok\n\thttps://l.example/\n", "graph_data.txt", dir.path())
        .unwrap_err();
    match err {
        ManifestError::Malformed { origin, line, .. } => {
            assert_eq!(origin, "graph_data.txt");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_too_many_fields_is_malformed() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::parse("a.nq\thttps://l.example/\textra\n", "m", dir.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed { line: 1, .. }));
}

#[test]
fn test_invalid_license_is_malformed() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::parse("a.nq\tnot a url\n", "m", dir.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed { .. }));

    let err = LoadManifest::parse("a.nq\tftp://l.example/\n", "m", dir.path()).unwrap_err();
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn test_bucketless_cloud_location_is_malformed() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::parse("gs:///prefix\n", "m", dir.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Malformed { .. }));
}

#[test]
fn test_empty_manifest() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::parse("# nothing here\n\n", "m", dir.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Empty { .. }));
}

#[test]
fn test_missing_manifest_file() {
    let dir = TempDir::new().unwrap();
    let err = LoadManifest::from_file(&dir.path().join("graph_data.txt"), dir.path()).unwrap_err();
    assert!(matches!(err, ManifestError::NotFound { .. }));
    assert!(err.to_string().starts_with("[M001]"));
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("quads")).unwrap();
    let path = dir.path().join(DEFAULT_MANIFEST_FILE);
    std::fs::write(&path, "quads\thttps://l.example/\ngs://b/p/\n").unwrap();

    let manifest = LoadManifest::from_file(&path, dir.path()).unwrap();
    assert_eq!(manifest.entries()[0].kind(), SourceKind::LocalDir);
    assert_eq!(manifest.entries()[1].kind(), SourceKind::CloudDir);
}

#[test]
fn test_from_items() {
    let dir = TempDir::new().unwrap();
    let items = vec![
        "gs://b/one/".to_string(),
        "gs://b/two.nq\thttps://l.example/two".to_string(),
    ];
    let manifest = LoadManifest::from_items(&items, dir.path()).unwrap();
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.entries()[1].license(), Some("https://l.example/two"));

    let err = LoadManifest::from_items(&["\tx"], dir.path()).unwrap_err();
    assert!(err.to_string().contains("--data_list:1"));
}
