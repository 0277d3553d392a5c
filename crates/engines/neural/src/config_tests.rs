use super::*;

#[test]
fn test_empty_file_gives_defaults() {
    let config = SelectorConfig::parse("").unwrap();
    assert_eq!(config, SelectorConfig::default());
    assert_eq!(config.candidate_limit, 500);
    assert_eq!(config.eval_scale, 100.0);
    assert_eq!(config.promotion_delay_ms, 800);
    assert_eq!(config.seed, None);
}

#[test]
fn test_partial_override() {
    let config = SelectorConfig::parse(
        r#"
model_path = "models/v002/model.onnx"
seed = 42
"#,
    )
    .unwrap();
    assert_eq!(config.model_path, PathBuf::from("models/v002/model.onnx"));
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.candidate_limit, 500);
}

#[test]
fn test_bad_type_is_rejected() {
    assert!(SelectorConfig::parse("candidate_limit = \"many\"").is_err());
}

#[test]
fn test_load_missing_file() {
    let err = SelectorConfig::load(Path::new("no/such/selector.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_toml_round_trip() {
    let config = SelectorConfig {
        seed: Some(7),
        promotion_delay_ms: 0,
        ..SelectorConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(SelectorConfig::parse(&text).unwrap(), config);
}
