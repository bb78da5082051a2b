mod support;

use moneta_client::commands::transactions::{
    self, AddTransactionOptions, ListTransactionsOptions, RemoveTransactionOptions,
};
use moneta_client::store::rows::TxnKind;
use serde_json::Value;
use support::ledger_testkit::{envelope_data, expense, field_str, rows_of, temp_home};

fn add(
    home: &std::path::Path,
    amount: f64,
    kind: TxnKind,
    category_id: &str,
    date: &str,
    name: &str,
    note: Option<&str>,
) -> Result<Value, moneta_client::ClientError> {
    transactions::add_with_options(AddTransactionOptions {
        amount,
        kind,
        category_id: category_id.to_string(),
        date: date.to_string(),
        name: name.to_string(),
        note: note.map(str::to_string),
        owner: None,
        home_override: Some(home),
    })
    .map(|envelope| envelope_data(&envelope))
}

fn list(home: &std::path::Path, options: ListTransactionsOptions<'_>) -> Value {
    let result = transactions::list_with_options(options);
    assert!(result.is_ok());
    result.map(|envelope| envelope_data(&envelope)).unwrap_or(Value::Null)
}

#[test]
fn add_rejects_unknown_category() {
    let temp = temp_home("moneta-crud-unknown-cat");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = add(
            &home,
            10.0,
            TxnKind::Expense,
            "cat_missing",
            "2026-08-02",
            "x",
            None,
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "category_not_found".to_string());
        }
    }
}

#[test]
fn add_rejects_kind_mismatch_between_category_and_transaction() {
    let temp = temp_home("moneta-crud-mismatch");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = add(
            &home,
            10.0,
            TxnKind::Expense,
            "cat_system_salary",
            "2026-08-02",
            "x",
            None,
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "category_kind_mismatch".to_string());
        }
    }
}

#[test]
fn add_validates_amount_name_and_note() {
    let temp = temp_home("moneta-crud-validate");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let zero = add(&home, 0.0, TxnKind::Expense, "cat_system_food", "2026-08-02", "x", None);
        assert!(zero.is_err());

        let negative =
            add(&home, -5.0, TxnKind::Expense, "cat_system_food", "2026-08-02", "x", None);
        assert!(negative.is_err());

        let too_large = add(
            &home,
            10_000_000_001.0,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-02",
            "x",
            None,
        );
        assert!(too_large.is_err());

        let blank_name = add(
            &home,
            10.0,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-02",
            "   ",
            None,
        );
        assert!(blank_name.is_err());

        let long_note = "n".repeat(201);
        let oversized_note = add(
            &home,
            10.0,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-02",
            "ok",
            Some(&long_note),
        );
        assert!(oversized_note.is_err());

        let bad_date = add(&home, 10.0, TxnKind::Expense, "cat_system_food", "2026-2-3", "ok", None);
        assert!(bad_date.is_err());
    }
}

#[test]
fn added_transaction_round_trips_through_list() {
    let temp = temp_home("moneta-crud-roundtrip");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let added = add(
            &home,
            42.5,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-02",
            "Groceries",
            Some("weekly run"),
        );
        assert!(added.is_ok());
        if let Ok(data) = added {
            assert!(field_str(&data, "txn_id").starts_with("txn_"));
            assert_eq!(
                field_str(&data["transaction"], "category_name"),
                "Food & Dining"
            );
        }

        let listed = list(
            &home,
            ListTransactionsOptions {
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        let rows = rows_of(&listed);
        assert_eq!(rows.len(), 1);
        assert_eq!(field_str(&rows[0], "name"), "Groceries");
        assert_eq!(field_str(&rows[0], "note"), "weekly run");
        assert_eq!(field_str(&rows[0], "kind"), "expense");
    }
}

#[test]
fn pagination_reports_totals_and_has_more() {
    let temp = temp_home("moneta-crud-pages");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        for day in 1..=25 {
            expense(
                &home,
                "cat_system_food",
                f64::from(day),
                &format!("2026-07-{day:02}"),
            );
        }

        let first = list(
            &home,
            ListTransactionsOptions {
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(first["total_count"].as_i64(), Some(25));
        assert_eq!(rows_of(&first).len(), 20);
        assert_eq!(first["has_more"].as_bool(), Some(true));

        let second = list(
            &home,
            ListTransactionsOptions {
                page: Some(2),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&second).len(), 5);
        assert_eq!(second["has_more"].as_bool(), Some(false));
    }
}

#[test]
fn search_matches_literally_without_wildcards() {
    let temp = temp_home("moneta-crud-search");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let coffee = add(
            &home,
            4.5,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-01",
            "Coffee shop",
            None,
        );
        assert!(coffee.is_ok());
        let cotton = add(
            &home,
            25.0,
            TxnKind::Expense,
            "cat_system_shopping",
            "2026-08-02",
            "100% cotton shirt",
            None,
        );
        assert!(cotton.is_ok());

        let by_name = list(
            &home,
            ListTransactionsOptions {
                search: Some("coffee".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&by_name).len(), 1);

        // `%` is a literal character, not a wildcard.
        let by_percent = list(
            &home,
            ListTransactionsOptions {
                search: Some("100%".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        let rows = rows_of(&by_percent);
        assert_eq!(rows.len(), 1);
        assert_eq!(field_str(&rows[0], "name"), "100% cotton shirt");

        let wildcard_only = list(
            &home,
            ListTransactionsOptions {
                search: Some("%".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&wildcard_only).len(), 1);
    }
}

#[test]
fn filters_combine_kind_category_and_date_bounds() {
    let temp = temp_home("moneta-crud-filters");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        expense(&home, "cat_system_food", 10.0, "2026-08-01");
        expense(&home, "cat_system_shopping", 20.0, "2026-08-02");
        let salary = add(
            &home,
            900.0,
            TxnKind::Income,
            "cat_system_salary",
            "2026-08-03",
            "Payday",
            None,
        );
        assert!(salary.is_ok());

        let incomes = list(
            &home,
            ListTransactionsOptions {
                kind: Some(TxnKind::Income),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&incomes).len(), 1);

        let food_only = list(
            &home,
            ListTransactionsOptions {
                category_id: Some("cat_system_food".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&food_only).len(), 1);

        let from_aug_2 = list(
            &home,
            ListTransactionsOptions {
                from: Some("2026-08-02".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&from_aug_2).len(), 2);

        let inverted = transactions::list_with_options(ListTransactionsOptions {
            from: Some("2026-08-05".to_string()),
            to: Some("2026-08-01".to_string()),
            home_override: Some(&home),
            ..ListTransactionsOptions::default()
        });
        assert!(inverted.is_err());
    }
}

#[test]
fn list_validates_page_and_limit() {
    let temp = temp_home("moneta-crud-limits");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let bad_page = transactions::list_with_options(ListTransactionsOptions {
            page: Some(0),
            home_override: Some(&home),
            ..ListTransactionsOptions::default()
        });
        assert!(bad_page.is_err());

        let bad_limit = transactions::list_with_options(ListTransactionsOptions {
            limit: Some(101),
            home_override: Some(&home),
            ..ListTransactionsOptions::default()
        });
        assert!(bad_limit.is_err());
    }
}

#[test]
fn remove_deletes_once_then_reports_not_found() {
    let temp = temp_home("moneta-crud-remove");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let added = add(
            &home,
            10.0,
            TxnKind::Expense,
            "cat_system_food",
            "2026-08-02",
            "one-off",
            None,
        );
        assert!(added.is_ok());
        let txn_id = added
            .map(|data| field_str(&data, "txn_id").to_string())
            .unwrap_or_default();

        let removed = transactions::remove_with_options(RemoveTransactionOptions {
            txn_id: txn_id.clone(),
            owner: None,
            home_override: Some(&home),
        });
        assert!(removed.is_ok());

        let again = transactions::remove_with_options(RemoveTransactionOptions {
            txn_id,
            owner: None,
            home_override: Some(&home),
        });
        assert!(again.is_err());
        if let Err(error) = again {
            assert_eq!(error.code, "transaction_not_found".to_string());
        }
    }
}

#[test]
fn owners_cannot_see_each_others_rows() {
    let temp = temp_home("moneta-crud-owners");
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let alice = transactions::add_with_options(AddTransactionOptions {
            amount: 10.0,
            kind: TxnKind::Expense,
            category_id: "cat_system_food".to_string(),
            date: "2026-08-02".to_string(),
            name: "alice lunch".to_string(),
            note: None,
            owner: Some("alice".to_string()),
            home_override: Some(&home),
        });
        assert!(alice.is_ok());

        let bob_view = list(
            &home,
            ListTransactionsOptions {
                owner: Some("bob".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert!(rows_of(&bob_view).is_empty());

        let alice_view = list(
            &home,
            ListTransactionsOptions {
                owner: Some("alice".to_string()),
                home_override: Some(&home),
                ..ListTransactionsOptions::default()
            },
        );
        assert_eq!(rows_of(&alice_view).len(), 1);
    }
}
