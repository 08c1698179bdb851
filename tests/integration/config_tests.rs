//! Configuration loading

use biohub_rs::Config;
use biohub_rs::config::ApiConfig;
use std::collections::HashMap;

#[tokio::test]
async fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/api.yaml.example");
    let config = Config::from_file(path).await.unwrap();

    assert_eq!(config.object_storage().storage_type, "local");
    assert!(config.database().url.starts_with("postgres"));
}

#[test]
fn test_environment_overrides_win() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("API_PORT", "7000"),
        ("DATABASE_URL", "postgresql://db.internal/biohub"),
        ("JWT_SECRET", "an-override-secret-that-is-long-enough"),
        ("OBJECT_STORE_TYPE", "s3"),
        ("OBJECT_STORE_BUCKET_NAME", "biohub-attachments"),
    ]);

    let mut api = ApiConfig::default();
    api.apply_overrides(|key| env.get(key).map(|value| value.to_string()))
        .unwrap();

    assert_eq!(api.server.port, 7000);
    assert_eq!(api.database.url, "postgresql://db.internal/biohub");
    assert_eq!(api.object_storage.storage_type, "s3");
    assert_eq!(
        api.object_storage.s3.as_ref().map(|s3| s3.bucket.as_str()),
        Some("biohub-attachments")
    );
}

#[test]
fn test_unparsable_override_is_rejected() {
    let mut api = ApiConfig::default();
    let result = api.apply_overrides(|key| (key == "API_PORT").then(|| "not-a-port".to_string()));
    assert!(result.is_err());
}
