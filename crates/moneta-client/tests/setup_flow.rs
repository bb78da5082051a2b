mod support;

use moneta_client::setup;
use support::ledger_testkit::{expense, temp_home};

#[test]
fn first_initialization_creates_the_ledger_file() {
    let temp = temp_home("moneta-setup");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let context = setup::ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(value) = context {
            assert_eq!(value.schema_version, "v1".to_string());
            assert!(value.db_path.ends_with("ledger.db"));
            assert!(std::path::Path::new(&value.db_path).exists());
            assert!(value.data_range.earliest.is_none());
            assert!(value.data_range.latest.is_none());
        }
    }
}

#[test]
fn data_range_tracks_recorded_transactions() {
    let temp = temp_home("moneta-setup-range");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        expense(&home, "cat_system_food", 10.0, "2026-05-04");
        expense(&home, "cat_system_food", 10.0, "2026-08-02");

        let context = setup::ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(value) = context {
            assert_eq!(value.data_range.earliest, Some("2026-05-04".to_string()));
            assert_eq!(value.data_range.latest, Some("2026-08-02".to_string()));
        }
    }
}

#[test]
fn reinitialization_is_safe_on_an_existing_ledger() {
    let temp = temp_home("moneta-setup-rerun");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let first = setup::ensure_initialized_at(&home);
        assert!(first.is_ok());
        let second = setup::ensure_initialized_at(&home);
        assert!(second.is_ok());
    }
}
