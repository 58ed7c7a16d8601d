//! Configuration loading tests

#[cfg(test)]
mod tests {
    use gtin_loader::Config;
    use gtin_loader::config::SourceKind;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
dispatch:
  workers: 8
  num_chunks: 5
endpoint:
  api_url: "https://loader.example.com/api/v1/product/description/generate"
auth:
  token_url: "https://auth.example.com/oauth/token"
  username: "loader@example.com"
  password: "secret"
source:
  kind:
    type: file
    path: "batches.yaml"
    batches: ["batch_1", "batch_2"]
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_from_file_with_defaults() {
        let file = write_config(YAML);
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.dispatch.workers, 8);
        assert_eq!(config.dispatch.num_chunks, 5);
        assert_eq!(config.dispatch.max_retries, 4);
        assert_eq!(config.dispatch.total_cap, 100);
        assert_eq!(config.endpoint.secondary_key, "0000000000000");
        assert!(config.endpoint.reprocess);
        match config.source.kind {
            SourceKind::File { batches, .. } => assert_eq!(batches.len(), 2),
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let file = write_config("dispatch:\n  workers: 0\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let result = Config::from_file("/nonexistent/gtin-loader.yaml").await;
        assert!(result.unwrap_err().to_string().contains("config"));
    }

    #[tokio::test]
    async fn test_env_overrides_file() {
        let file = write_config(YAML);
        let mut config = Config::from_file(file.path()).await.unwrap();
        let env: HashMap<&str, &str> = [("GTIN_WORKERS", "2"), ("GTIN_AUTH_TOKEN", "static")]
            .into_iter()
            .collect();

        config
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.dispatch.workers, 2);
        assert_eq!(config.auth.static_token.as_deref(), Some("static"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_show_config_masks_secrets() {
        let config = Config::from_yaml_str(YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(!yaml.contains("password: secret"));
        assert!(yaml.contains("***"));
    }
}
