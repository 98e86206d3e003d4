//! Unit tests for the configuration model and its persisted form.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

fn v(text: &str) -> SemanticVersion {
    text.parse().expect("valid version")
}

#[fixture]
fn three_installed() -> Configuration {
    Configuration::default()
        .with_installed(InstalledVersion::new(v("1.0.0")))
        .with_installed(InstalledVersion::new(v("2.0.0")))
        .with_installed(InstalledVersion::new(v("1.5.0")))
}

#[test]
fn default_configuration_matches_fresh_install() {
    let config = Configuration::default();
    assert_eq!(config.active_version(), ActiveVersion::Latest);
    assert_eq!(config.auto_update_check_frequency_days().get(), 7);
    assert!(config.installed_versions().is_empty());
    assert_eq!(config.latest_installed_version(), None);
    assert_eq!(config.resolved_active_version(), None);
    assert_eq!(config.last_update_check(), None);
}

#[rstest]
fn latest_tracks_highest_installed(three_installed: Configuration) {
    assert_eq!(three_installed.latest_installed_version(), Some(v("2.0.0")));
    assert_eq!(three_installed.resolved_active_version(), Some(v("2.0.0")));
}

#[rstest]
fn reinstalling_replaces_rather_than_duplicates(three_installed: Configuration) {
    let config = three_installed.with_installed(InstalledVersion::new(v("1.5.0")));
    assert_eq!(config.installed_versions().len(), 3);
}

#[rstest]
fn removing_latest_moves_resolution_down(three_installed: Configuration) {
    let config = three_installed.without_installed(v("2.0.0"));
    assert_eq!(config.latest_installed_version(), Some(v("1.5.0")));
    assert_eq!(config.resolved_active_version(), Some(v("1.5.0")));
}

#[rstest]
fn pinning_keeps_latest_pointer_independent(three_installed: Configuration) {
    let config = three_installed.with_active_version(ActiveVersion::Concrete(v("1.0.0")));
    assert_eq!(config.resolved_active_version(), Some(v("1.0.0")));
    assert_eq!(config.latest_installed_version(), Some(v("2.0.0")));
}

#[test]
fn removing_everything_clears_latest() {
    let config = Configuration::default()
        .with_installed(InstalledVersion::new(v("1.0.0")))
        .without_installed(v("1.0.0"));
    assert_eq!(config.latest_installed_version(), None);
    assert_eq!(config.resolved_active_version(), None);
}

#[rstest]
fn installed_descending_orders_newest_first(three_installed: Configuration) {
    assert_eq!(
        three_installed.installed_descending(),
        vec![v("2.0.0"), v("1.5.0"), v("1.0.0")]
    );
}

#[rstest]
fn serialized_form_uses_pascal_case_and_empty_strings() {
    let json = serde_json::to_value(Configuration::default()).expect("serialize");
    assert_eq!(json["ActiveVersion"], "latest");
    assert_eq!(json["ResolvedActiveVersion"], "");
    assert_eq!(json["LatestInstalledVersion"], "");
    assert_eq!(json["AutoUpdateCheckFrequencyDays"], 7);
    assert!(json["LastUpdateCheck"].is_null());
    assert_eq!(json["InstalledVersions"], serde_json::json!([]));
}

#[rstest]
fn round_trips_every_field(three_installed: Configuration) {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).single().expect("valid time");
    let config = three_installed
        .with_active_version(ActiveVersion::Concrete(v("1.5.0")))
        .with_check_frequency(NonZeroU32::new(3).expect("non-zero"))
        .with_update_check_at(at);

    let json = serde_json::to_string_pretty(&config).expect("serialize");
    let back: Configuration = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.resolved(), config);
}

#[test]
fn derived_fields_are_not_trusted_on_read() {
    let json = r#"{
        "ActiveVersion": "latest",
        "ResolvedActiveVersion": "9.9.9",
        "LatestInstalledVersion": "garbage",
        "InstalledVersions": [{ "Version": "1.0.0", "Path": "versions/1.0.0" }]
    }"#;
    let config: Configuration = serde_json::from_str(json).expect("deserialize");
    let config = config.resolved();
    assert_eq!(config.resolved_active_version(), Some(v("1.0.0")));
    assert_eq!(config.latest_installed_version(), Some(v("1.0.0")));
}

#[test]
fn unknown_fields_are_ignored_and_missing_fields_default() {
    let json = r#"{ "ActiveVersion": "2.0.0", "SomethingNew": true }"#;
    let config: Configuration = serde_json::from_str(json).expect("deserialize");
    assert_eq!(config.active_version(), ActiveVersion::Concrete(v("2.0.0")));
    assert_eq!(config.auto_update_check_frequency_days().get(), 7);
    assert!(config.installed_versions().is_empty());
}

#[rstest]
#[case::zero_frequency(r#"{ "AutoUpdateCheckFrequencyDays": 0 }"#)]
#[case::bad_selector(r#"{ "ActiveVersion": "1.2" }"#)]
#[case::bad_timestamp(r#"{ "LastUpdateCheck": "yesterday" }"#)]
fn invalid_values_are_rejected(#[case] json: &str) {
    assert!(serde_json::from_str::<Configuration>(json).is_err());
}

#[rstest]
#[case::rfc3339_utc("2025-01-02T03:04:05Z")]
#[case::rfc3339_offset("2025-01-02T04:04:05+01:00")]
#[case::offsetless("2025-01-02T03:04:05")]
#[case::offsetless_fraction("2025-01-02T03:04:05.0000000")]
fn timestamps_accept_common_forms(#[case] text: &str) {
    let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).single().expect("valid time");
    assert_eq!(timestamp::parse(text).expect("parse"), expected);
}
