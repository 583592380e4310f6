use caption_curator::config::ClientConfig;
use std::env;
use std::io::Write;
use std::path::PathBuf;

// Env overrides are process-global, so this file keeps everything in a single
// test to avoid races between parallel test threads.
#[test]
fn config_defaults_file_values_and_env_overrides() {
    for key in [
        "CONTENT_API_URL",
        "CONTENT_API_TIMEOUT_MS",
        "CURATOR_PLATFORM",
        "CURATOR_SESSION_PATH",
    ] {
        env::remove_var(key);
    }

    // Defaults when the config file does not exist.
    let (config, _) = ClientConfig::load(Some(PathBuf::from("does-not-exist.toml"))).unwrap();
    assert_eq!(config.backend.base_url, "http://localhost:5000/api");
    assert_eq!(config.backend.timeout_ms, 60_000);
    assert_eq!(config.platform, "instagram");
    assert_eq!(config.session.path, PathBuf::from("data/session.json"));

    // Values from a partial config file, untouched sections defaulted.
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("curator.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "platform = \"linkedin\"").unwrap();
    writeln!(file, "[backend]").unwrap();
    writeln!(file, "base_url = \"http://example.test/api\"").unwrap();
    writeln!(file, "timeout_ms = 1000").unwrap();
    drop(file);

    let (config, loaded_path) = ClientConfig::load(Some(path.clone())).unwrap();
    assert_eq!(loaded_path, Some(path));
    assert_eq!(config.backend.base_url, "http://example.test/api");
    assert_eq!(config.backend.timeout_ms, 1000);
    assert_eq!(config.platform, "linkedin");
    assert_eq!(config.session.path, PathBuf::from("data/session.json"));

    // Env overrides beat the file.
    env::set_var("CONTENT_API_URL", "http://override.test/api");
    env::set_var("CONTENT_API_TIMEOUT_MS", "250");
    env::set_var("CURATOR_PLATFORM", "facebook");
    env::set_var("CURATOR_SESSION_PATH", "/tmp/override-session.json");

    let (config, _) = ClientConfig::load(Some(PathBuf::from("does-not-exist.toml"))).unwrap();
    assert_eq!(config.backend.base_url, "http://override.test/api");
    assert_eq!(config.backend.timeout_ms, 250);
    assert_eq!(config.platform, "facebook");
    assert_eq!(
        config.session.path,
        PathBuf::from("/tmp/override-session.json")
    );

    for key in [
        "CONTENT_API_URL",
        "CONTENT_API_TIMEOUT_MS",
        "CURATOR_PLATFORM",
        "CURATOR_SESSION_PATH",
    ] {
        env::remove_var(key);
    }
}
