use nimbot::config::Config;
use nimbot::NimError;
use std::fs;
use std::path::Path;

fn invalid(text: &str) -> bool { matches!(Config::from_json_str(text), Err(NimError::InvalidConfiguration(_))) }

#[test]
fn full_config_is_read() {
    let cfg = Config::from_json_str(r#"{ "port": 8080, "apiRoot": "/nim/", "startSituation": [2, 0, 9] }"#).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_root, "/nim");
    assert_eq!(cfg.start_situation, vec![2, 0, 9]);
}

#[test]
fn missing_keys_use_defaults() {
    let cfg = Config::from_json_str("{}").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.start_situation, vec![1, 3, 5, 7]);
}

#[test]
fn bad_values_are_rejected() {
    assert!(invalid(r#"{ "port": 70000 }"#));
    assert!(invalid(r#"{ "port": -1 }"#));
    assert!(invalid(r#"{ "port": "3000" }"#));
    assert!(invalid(r#"{ "apiRoot": "api" }"#));
    assert!(invalid(r#"{ "startSituation": [] }"#));
    assert!(invalid(r#"{ "startSituation": [1, -3] }"#));
    assert!(invalid(r#"{ "startSituation": [1, 2.5] }"#));
    assert!(invalid(r#"{ "startSituation": [0, 0, 0] }"#));
    assert!(invalid("not json"));
}

#[test]
fn overrides_win_and_are_validated() {
    let cfg = Config::default().with_overrides(Some(9000), Some("/play".into()), Some(vec![4, 4])).unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.api_root, "/play");
    assert_eq!(cfg.start_situation, vec![4, 4]);

    assert!(Config::default().with_overrides(None, None, Some(vec![0])).is_err());
    assert!(Config::default().with_overrides(Some(65536), None, None).is_err());
    assert_eq!(Config::default().with_overrides(None, None, None).unwrap(), Config::default());
}

#[test]
fn load_from_disk_and_fall_back_when_missing() {
    let dir = Path::new("target/config_test");
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("nim.json");
    fs::write(&path, r#"{ "startSituation": [3, 4, 5] }"#).unwrap();
    assert_eq!(Config::load(&path).unwrap().start_situation, vec![3, 4, 5]);

    let missing = dir.join("does_not_exist.json");
    assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
    assert!(Config::load(&missing).is_err());
}

#[test]
fn shipped_default_config_is_valid() {
    let cfg = Config::load(Path::new("config/default.json")).unwrap();
    assert_eq!(cfg, Config::default());
}
