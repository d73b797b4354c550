//! Snapshot-file tests for the `storage-migrate` driver.
//!
//! Every test writes a JSON snapshot (and sometimes a TOML config) into a
//! temporary directory, runs [`mig_cli::migrate`] and inspects the output
//! file.

use mig_cli::{load_config, migrate, read_snapshot, write_snapshot, MigrateOptions};
use mig_core::{MigrationConfig, StorageSnapshot};
use mig_statictypes::{AUTH_ACCOUNT_REFERENCE_TYPE, UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE};
use mig_test_utils::{test_address, type_value_array};
use mig_types::{Address, PrimitiveStaticType};
use mig_values::{PathDomain, Value};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Two accounts, each holding one legacy account type
fn legacy_snapshot() -> StorageSnapshot {
    let mut snapshot = StorageSnapshot::new();
    snapshot.write(
        test_address(),
        PathDomain::Storage,
        "foo",
        Value::some(type_value_array([PrimitiveStaticType::AuthAccount.into()])),
    );
    snapshot.write(
        Address::from_u64(0x2),
        PathDomain::Public,
        "bar",
        Value::type_value(PrimitiveStaticType::PublicAccount.into()),
    );
    snapshot
}

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let input = dir.path().join("input.json");
    write_snapshot(&input, &legacy_snapshot()).unwrap();
    input
}

/// Every account is migrated and the persisted snapshot is written.
#[test]
fn migrates_every_account_into_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("output.json");

    let outcome = migrate(&MigrateOptions::new(&input).with_output(&output)).unwrap();

    assert_eq!(outcome.summary.accounts, 2);
    assert_eq!(outcome.summary.migrated, 2);
    assert_eq!(outcome.entries.len(), 2);

    let written = read_snapshot(&output).unwrap();
    assert_eq!(written, outcome.snapshot);
    assert_eq!(
        written.read(test_address(), PathDomain::Storage, "foo"),
        Some(&Value::some(type_value_array([
            AUTH_ACCOUNT_REFERENCE_TYPE.clone()
        ])))
    );
    assert_eq!(
        written.read(Address::from_u64(0x2), PathDomain::Public, "bar"),
        Some(&Value::type_value(UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE.clone()))
    );
}

/// An explicit address list limits the run; the zero address is skipped.
#[test]
fn explicit_addresses_limit_the_run() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    let outcome = migrate(
        &MigrateOptions::new(&input).with_addresses([Address::ZERO, Address::from_u64(0x2)]),
    )
    .unwrap();

    assert_eq!(outcome.summary.accounts, 1);
    assert_eq!(
        outcome
            .snapshot
            .read(test_address(), PathDomain::Storage, "foo"),
        legacy_snapshot().read(test_address(), PathDomain::Storage, "foo")
    );
}

/// A config file restricting domains and disabling persistence is honored.
#[test]
fn config_file_controls_domains_and_persistence() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config_path = dir.path().join("migrate.toml");
    fs::write(&config_path, "persist = false\ndomains = [\"public\"]\n").unwrap();

    let config = load_config(Some(&config_path)).unwrap();
    assert_eq!(
        config,
        MigrationConfig::new()
            .with_persist(false)
            .with_domains([PathDomain::Public])
    );

    let outcome = migrate(&MigrateOptions::new(&input).with_config(config)).unwrap();

    assert_eq!(outcome.summary.values, 1);
    assert_eq!(outcome.summary.migrated, 1);
    // nothing persisted
    assert_eq!(outcome.snapshot, legacy_snapshot());
}

/// The JSON summary names every report's location.
#[test]
fn json_summary_lists_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    let outcome = migrate(&MigrateOptions::new(&input)).unwrap();
    let json = outcome.to_json();

    assert_eq!(json["accounts"], 2);
    assert_eq!(json["reports"][0]["kind"], "migrated");
    assert_eq!(json["reports"][0]["storage_key"], "0x0000000000000001/storage");
    assert_eq!(json["reports"][0]["storage_map_key"], "foo");
    assert_eq!(json["reports"][1]["migration"], "StaticTypeMigration");
}

/// Missing inputs surface as errors with the offending path.
#[test]
fn missing_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let err = migrate(&MigrateOptions::new(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

/// Malformed config files are rejected.
#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "domains = [\"temp\"]").unwrap();

    assert!(load_config(Some(&config_path)).is_err());
    assert_eq!(load_config(None).unwrap(), MigrationConfig::default());
}
