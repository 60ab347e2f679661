//! End-to-end tests of an injection run over real files
//!
//! Each test works in its own temporary directory with a usercache.json and
//! a name list, runs the full load / reconcile / persist pass and inspects
//! the rewritten file.

use chrono::Utc;
use common::config::ConfigValidation;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ucinjector::cli::{NamesLocation, RunConfig};
use ucinjector::identity::is_valid_identifier;
use ucinjector::model::{parse_expiry, Record, RecordSet};
use ucinjector::store::{RecordStore, UsercacheFile, NAMES_FILE_TEMPLATE};
use ucinjector::InjectorConfig;

const ALICE_CACHE: &str = r#"[{"name":"Alice","uuid":"11111111-1111-1111-1111-111111111111","expiresOn":"2020-01-01 00:00:00 +00"}]"#;

struct Fixture {
    dir: TempDir,
    usercache: PathBuf,
    names: PathBuf,
}

impl Fixture {
    fn new(usercache: &str, names: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let usercache_path = dir.path().join("usercache.json");
        let names_path = dir.path().join("fakenames.txt");
        fs::write(&usercache_path, usercache).expect("Failed to write usercache");
        fs::write(&names_path, names).expect("Failed to write name list");

        Self {
            dir,
            usercache: usercache_path,
            names: names_path,
        }
    }

    fn run_config(&self) -> RunConfig {
        RunConfig {
            usercache: self.usercache.clone(),
            names: NamesLocation::Explicit(self.names.clone()),
        }
    }

    fn records(&self) -> Vec<Record> {
        UsercacheFile::open(&self.usercache)
            .expect("usercache should open")
            .load()
            .expect("usercache should parse")
            .into_records()
    }
}

#[tokio::test]
async fn test_refresh_existing_and_create_new() {
    let fixture = Fixture::new(ALICE_CACHE, "Alice\nBobby_99\n");

    let summary = ucinjector::run(&fixture.run_config(), &InjectorConfig::default())
        .await
        .expect("Run should succeed");

    let records = fixture.records();
    assert_eq!(records.len(), 2);

    let alice = &records[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.uuid, "11111111-1111-1111-1111-111111111111");
    assert!(parse_expiry(&alice.expires_on).unwrap() > Utc::now());

    let bobby = &records[1];
    assert_eq!(bobby.name, "Bobby_99");
    assert!(is_valid_identifier(&bobby.uuid));
    assert_eq!(bobby.expires_on, alice.expires_on);

    assert_eq!(summary.refreshed, vec!["Alice"]);
    assert_eq!(summary.created, vec!["Bobby_99"]);
    assert_eq!(summary.expires_on, alice.expires_on);
}

#[tokio::test]
async fn test_rerun_keeps_identifiers_and_adds_nothing() {
    let fixture = Fixture::new(ALICE_CACHE, "Alice\nBobby_99\nCarol\n");
    let config = InjectorConfig::default();

    ucinjector::run(&fixture.run_config(), &config).await.unwrap();
    let first = fixture.records();

    let summary = ucinjector::run(&fixture.run_config(), &config).await.unwrap();
    let second = fixture.records();

    assert_eq!(second.len(), 3);
    for (before, after) in first.iter().zip(&second) {
        assert_eq!(before.name, after.name);
        assert_eq!(before.uuid, after.uuid);
        assert_eq!(after.expires_on, summary.expires_on);
    }
    assert!(summary.created.is_empty());
    assert_eq!(summary.refreshed.len(), 3);

    let names: HashSet<_> = second.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), second.len());
}

#[tokio::test]
async fn test_empty_name_list_leaves_file_unchanged() {
    let content = r#"[{"name":"Alice","uuid":"11111111-1111-1111-1111-111111111111","expiresOn":"2020-01-01 00:00:00 +0000"},{"name":"Bob","uuid":"22222222-2222-2222-2222-222222222222","expiresOn":"2024-05-06 07:08:09 -0400"}]"#;
    let fixture = Fixture::new(content, "# nobody yet\n\n");

    let summary = ucinjector::run(&fixture.run_config(), &InjectorConfig::default())
        .await
        .unwrap();

    assert_eq!(summary.touched(), 0);
    let rewritten: Value =
        serde_json::from_str(&fs::read_to_string(&fixture.usercache).unwrap()).unwrap();
    let original: Value = serde_json::from_str(content).unwrap();
    assert_eq!(rewritten, original);
}

#[tokio::test]
async fn test_invalid_names_are_dropped() {
    let fixture = Fixture::new("[]", "ok_name\nx\nnot valid\nAnother1\n");

    let summary = ucinjector::run(&fixture.run_config(), &InjectorConfig::default())
        .await
        .unwrap();

    assert_eq!(summary.created, vec!["ok_name", "Another1"]);
    let names: Vec<_> = fixture.records().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["ok_name", "Another1"]);
}

#[tokio::test]
async fn test_configured_validity_is_applied() {
    let fixture = Fixture::new("[]", "Longlived\n");
    let mut config = InjectorConfig::default();
    config.expiry.validity_years = 10;

    ucinjector::run(&fixture.run_config(), &config).await.unwrap();

    let expiry = parse_expiry(&fixture.records()[0].expires_on).unwrap();
    let years_ahead = expiry.signed_duration_since(Utc::now()).num_days() / 365;
    assert!((9..=10).contains(&years_ahead));
}

#[tokio::test]
async fn test_out_of_range_validity_fails_without_writing() {
    let fixture = Fixture::new(ALICE_CACHE, "Alice\nBobby_99\n");
    let mut config = InjectorConfig::default();
    config.expiry.validity_years = 300_000;

    assert!(config.validate().is_err());
    let err = ucinjector::run(&fixture.run_config(), &config)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("expiry.validity_years"));
    assert_eq!(fs::read_to_string(&fixture.usercache).unwrap(), ALICE_CACHE);
}

#[tokio::test]
async fn test_default_name_list_is_created() {
    let fixture = Fixture::new(ALICE_CACHE, "");
    let default_path = fixture.dir.path().join("generated.txt");
    let run = RunConfig {
        usercache: fixture.usercache.clone(),
        names: NamesLocation::Default(default_path.clone()),
    };

    let summary = ucinjector::run(&run, &InjectorConfig::default())
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&default_path).unwrap(), NAMES_FILE_TEMPLATE);
    assert_eq!(summary.touched(), 0);
    assert_eq!(fixture.records()[0].expires_on, "2020-01-01 00:00:00 +00");
}

#[tokio::test]
async fn test_missing_explicit_name_list_fails_before_writing() {
    let fixture = Fixture::new(ALICE_CACHE, "");
    let run = RunConfig {
        usercache: fixture.usercache.clone(),
        names: NamesLocation::Explicit(fixture.dir.path().join("missing.txt")),
    };

    let err = ucinjector::run(&run, &InjectorConfig::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("does not exist"));
    assert_eq!(fs::read_to_string(&fixture.usercache).unwrap(), ALICE_CACHE);
}

#[tokio::test]
async fn test_missing_usercache_fails() {
    let fixture = Fixture::new("[]", "Alice\n");
    let run = RunConfig {
        usercache: fixture.dir.path().join("nope").join("usercache.json"),
        names: NamesLocation::Explicit(fixture.names.clone()),
    };

    assert!(ucinjector::run(&run, &InjectorConfig::default()).await.is_err());
}

#[tokio::test]
async fn test_malformed_usercache_is_not_overwritten() {
    let fixture = Fixture::new("{ broken", "Alice\n");

    let err = ucinjector::run(&fixture.run_config(), &InjectorConfig::default())
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Deserialization"));
    assert_eq!(fs::read_to_string(&fixture.usercache).unwrap(), "{ broken");
}

#[tokio::test]
async fn test_inject_with_in_memory_collaborators() {
    use std::sync::Mutex;
    use ucinjector::model::DesiredName;
    use ucinjector::store::NameSource;
    use ucinjector::{ReconcileOptions, Reconciler};
    use common::error::PersistenceError;

    struct MemoryStore(Mutex<RecordSet>);

    impl RecordStore for MemoryStore {
        fn load(&self) -> Result<RecordSet, PersistenceError> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn persist(&self, records: &RecordSet) -> Result<(), PersistenceError> {
            *self.0.lock().unwrap() = records.clone();
            Ok(())
        }
    }

    struct FixedNames(Vec<DesiredName>);

    impl NameSource for FixedNames {
        fn load_names(&self) -> Result<Vec<DesiredName>, PersistenceError> {
            Ok(self.0.clone())
        }
    }

    let store = MemoryStore(Mutex::new(RecordSet::new()));
    let source = FixedNames(vec![DesiredName::new("Memory").unwrap()]);

    let summary = ucinjector::inject(
        &store,
        &source,
        &mut Reconciler::new(),
        &ReconcileOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.created, vec!["Memory"]);
    assert!(store.0.lock().unwrap().find("Memory").is_some());
}
