use pagecast_client::PagecastConfig;
use pagecast_error::PagecastErrorKind;
use std::io::Write;

#[test]
fn from_file_reads_sections_and_defaults_the_rest() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[api]
base_url = "https://console.example.com/api"
timeout_secs = 10

[fallback]
enabled = true
"#
    )
    .unwrap();

    let config = PagecastConfig::from_file(file.path()).unwrap();

    assert_eq!(config.api().base_url(), "https://console.example.com/api");
    assert_eq!(*config.api().timeout_secs(), 10);
    assert_eq!(config.api().login_url(), "/login");
    assert!(*config.fallback().enabled());
    assert_eq!(*config.publish().progress_cap(), 90);
    assert!(*config.cache().enabled());
}

#[test]
fn from_file_without_api_section_is_a_config_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[cache]\nttl_secs = 5").unwrap();

    let err = PagecastConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PagecastConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Config(_)));
}

fn publish_config(publish: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[api]\nbase_url = \"http://localhost:5000/api\"\n\n[publish]\n{}",
        publish
    )
    .unwrap();
    file
}

#[test]
fn zero_progress_tick_is_rejected() {
    let file = publish_config("progress_tick_ms = 0");

    let err = PagecastConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Config(_)));
    assert!(err.to_string().contains("progress_tick_ms"));
}

#[test]
fn progress_cap_of_100_is_rejected() {
    let file = publish_config("progress_cap = 100");

    let err = PagecastConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Config(_)));
    assert!(err.to_string().contains("progress_cap"));
}

#[test]
fn progress_cap_of_99_is_accepted() {
    let file = publish_config("progress_cap = 99\nprogress_tick_ms = 1");

    let config = PagecastConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.publish().progress_cap(), 99);
    assert_eq!(config.publish().tick().as_millis(), 1);
}
