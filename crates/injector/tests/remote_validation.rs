//! Remote validation against a mock account registry

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ucinjector::cli::{NamesLocation, RunConfig};
use ucinjector::config::ValidationConfig;
use ucinjector::identity::{HttpIdentityValidator, Identifier, IdentityValidator, Lookup};
use ucinjector::model::RecordSet;
use ucinjector::store::{RecordStore, UsercacheFile};
use ucinjector::InjectorConfig;

fn validation_config(server: &MockServer) -> ValidationConfig {
    ValidationConfig {
        enabled: true,
        name_endpoint: format!("{}/users/profiles/minecraft/{{}}", server.uri()),
        identifier_endpoint: format!("{}/user/profiles/{{}}/names", server.uri()),
        timeout_secs: 1,
        ..Default::default()
    }
}

async fn name_returns(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/users/profiles/minecraft/{name}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_present_and_absent_names() {
    let server = MockServer::start().await;
    name_returns(&server, "Notch", 200).await;
    name_returns(&server, "Nobody_123", 204).await;

    let validator = HttpIdentityValidator::new(&validation_config(&server)).unwrap();

    assert_eq!(validator.lookup_name("Notch").await, Lookup::ConfirmedPresent);
    assert_eq!(
        validator.lookup_name("Nobody_123").await,
        Lookup::ConfirmedAbsent
    );
    assert!(validator.name_exists("Notch").await);
    assert!(!validator.name_exists("Nobody_123").await);
}

#[tokio::test]
async fn test_unexpected_status_is_unknown() {
    let server = MockServer::start().await;
    name_returns(&server, "Missing", 404).await;
    name_returns(&server, "Broken", 500).await;
    name_returns(&server, "Limited", 429).await;

    let validator = HttpIdentityValidator::new(&validation_config(&server)).unwrap();

    for name in ["Missing", "Broken", "Limited"] {
        assert_eq!(validator.lookup_name(name).await, Lookup::Unknown, "{name}");
        assert!(!validator.name_exists(name).await, "{name}");
    }
}

#[tokio::test]
async fn test_slow_registry_times_out_as_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let validator = HttpIdentityValidator::new(&validation_config(&server)).unwrap();

    assert_eq!(validator.lookup_name("Slowpoke").await, Lookup::Unknown);
}

#[tokio::test]
async fn test_identifier_lookup_uses_hyphenated_form() {
    let server = MockServer::start().await;
    let identifier = Identifier::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
    Mock::given(method("GET"))
        .and(path(
            "/user/profiles/01234567-89ab-cdef-0123-456789abcdef/names",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let validator = HttpIdentityValidator::new(&validation_config(&server)).unwrap();

    assert_eq!(
        validator.lookup_identifier(&identifier).await,
        Lookup::ConfirmedPresent
    );
}

#[tokio::test]
async fn test_configured_status_codes() {
    let server = MockServer::start().await;
    name_returns(&server, "Found", 302).await;
    name_returns(&server, "Gone", 404).await;

    let config = ValidationConfig {
        present_status: 302,
        absent_status: vec![204, 404],
        ..validation_config(&server)
    };
    let validator = HttpIdentityValidator::new(&config).unwrap();

    assert_eq!(validator.lookup_name("Found").await, Lookup::ConfirmedPresent);
    assert_eq!(validator.lookup_name("Gone").await, Lookup::ConfirmedAbsent);
}

#[tokio::test]
async fn test_run_skips_registered_names() {
    let server = MockServer::start().await;
    name_returns(&server, "Notch", 200).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/users/profiles/minecraft/[A-Za-z0-9_]+$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/user/profiles/[0-9a-f-]{36}/names$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let usercache = dir.path().join("usercache.json");
    let names = dir.path().join("fakenames.txt");
    fs::write(&usercache, "[]").unwrap();
    fs::write(&names, "Notch\nFakePlayer\n").unwrap();

    let mut config = InjectorConfig::default();
    config.validation = validation_config(&server);
    let run = RunConfig {
        usercache: usercache.clone(),
        names: NamesLocation::Explicit(names),
    };

    let summary = ucinjector::run(&run, &config).await.unwrap();

    assert_eq!(summary.skipped, vec!["Notch"]);
    assert_eq!(summary.created, vec!["FakePlayer"]);
    assert_eq!(summary.unverified_lookups, 0);

    let records: RecordSet = UsercacheFile::open(&usercache).unwrap().load().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records.find("Notch").is_none());
    assert!(records.find("FakePlayer").is_some());
}

#[tokio::test]
async fn test_run_fails_open_when_registry_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let usercache = dir.path().join("usercache.json");
    let names = dir.path().join("fakenames.txt");
    fs::write(&usercache, "[]").unwrap();
    fs::write(&names, "Alice\nBobby_99\n").unwrap();

    let mut config = InjectorConfig::default();
    config.validation = validation_config(&server);
    let run = RunConfig {
        usercache,
        names: NamesLocation::Explicit(names),
    };

    let summary = ucinjector::run(&run, &config).await.unwrap();

    assert_eq!(summary.created, vec!["Alice", "Bobby_99"]);
    assert!(summary.skipped.is_empty());
    // One name lookup and one identifier lookup per created record
    assert_eq!(summary.unverified_lookups, 4);
}
