mod support;

use std::fs;

use moneta_client::commands::export::{self, ExportRunOptions};
use support::ledger_testkit::{envelope_data, expense, income, temp_home};

#[test]
fn export_writes_header_and_one_line_per_transaction() {
    let temp = temp_home("moneta-export");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        income(&home, "cat_system_salary", 2_500.0, "2026-08-01");
        expense(&home, "cat_system_food", 600.0, "2026-08-02");

        let out_path = home.join("ledger.csv");
        let result = export::run_with_options(ExportRunOptions {
            path: out_path.display().to_string(),
            owner: None,
            home_override: Some(&home),
        });
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            let data = envelope_data(&envelope);
            assert_eq!(data["rows_written"].as_i64(), Some(2));
        }

        let contents = fs::read_to_string(&out_path);
        assert!(contents.is_ok());
        if let Ok(text) = contents {
            let lines = text.lines().collect::<Vec<&str>>();
            assert_eq!(lines.len(), 3);
            assert_eq!(lines[0], "txn_id,date,kind,category,amount,name,note");
            assert!(text.contains("2026-08-02,expense,Food & Dining,600.00"));
            assert!(text.contains("2026-08-01,income,Salary,2500.00"));
        }
    }
}

#[test]
fn empty_ledger_exports_header_only() {
    let temp = temp_home("moneta-export-empty");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let out_path = home.join("empty.csv");
        let result = export::run_with_options(ExportRunOptions {
            path: out_path.display().to_string(),
            owner: None,
            home_override: Some(&home),
        });
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            let data = envelope_data(&envelope);
            assert_eq!(data["rows_written"].as_i64(), Some(0));
        }

        let contents = fs::read_to_string(&out_path);
        assert!(contents.is_ok());
        if let Ok(text) = contents {
            assert_eq!(text.lines().count(), 1);
        }
    }
}

#[test]
fn unwritable_destination_reports_export_failed() {
    let temp = temp_home("moneta-export-bad-path");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let out_path = home.join("no-such-dir").join("ledger.csv");
        let result = export::run_with_options(ExportRunOptions {
            path: out_path.display().to_string(),
            owner: None,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "export_failed".to_string());
        }
    }
}
