use super::*;

#[test]
fn save_then_load_roundtrips_and_keeps_other_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[suggest]\nendpoint = \"http://localhost:3400\"\n").unwrap();

    save_string(&path, "database", "path", Some("/tmp/games.db".to_string())).unwrap();

    assert_eq!(
        load_string(&path, "database", "path").as_deref(),
        Some("/tmp/games.db")
    );
    assert_eq!(
        load_string(&path, "suggest", "endpoint").as_deref(),
        Some("http://localhost:3400")
    );
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn save_none_removes_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    save_string(&path, "database", "path", Some("a.db".to_string())).unwrap();
    save_string(&path, "database", "path", None).unwrap();

    assert_eq!(load_string(&path, "database", "path"), None);
}

#[test]
fn blank_and_missing_values_are_unset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    assert_eq!(load_string(&path, "database", "path"), None);

    std::fs::write(&path, "[database]\npath = \"  \"\n").unwrap();
    assert_eq!(load_string(&path, "database", "path"), None);
}

#[test]
fn year_slack_reads_catalog_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    assert_eq!(year_slack_from(&path), DEFAULT_YEAR_SLACK);

    std::fs::write(&path, "[catalog]\nyear_slack = 2\n").unwrap();
    assert_eq!(year_slack_from(&path), 2);

    std::fs::write(&path, "[catalog]\nyear_slack = -3\n").unwrap();
    assert_eq!(year_slack_from(&path), DEFAULT_YEAR_SLACK);
}

#[test]
fn cli_override_wins() {
    let p = resolve_db_path(Some(PathBuf::from("/explicit/catalog.db")));
    assert_eq!(p, PathBuf::from("/explicit/catalog.db"));
}

#[test]
fn default_db_path_ends_with_catalog_db() {
    let p = default_db_path();
    assert!(p.ends_with(Path::new("cpc-vault").join(DEFAULT_DB_FILE)));
}
