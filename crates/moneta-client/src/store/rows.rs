use chrono::NaiveDate;
use serde::Serialize;

/// Transaction direction. Stored as lowercase text and constrained by a
/// CHECK at the schema level; parsing here is the second line of defense
/// for rows read back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// One ledger transaction joined with its category's display fields.
/// This is the typed shape every analytics computation consumes; raw
/// SQLite rows never travel past the store boundary.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub txn_id: String,
    pub owner_id: String,
    pub category_id: String,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub amount: f64,
    pub kind: TxnKind,
    pub occurred_on: NaiveDate,
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecord {
    pub category_id: String,
    pub owner_id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub kind: TxnKind,
    pub is_system: bool,
    pub display_order: i64,
}

#[cfg(test)]
mod tests {
    use super::TxnKind;

    #[test]
    fn kind_round_trips_through_text() {
        assert_eq!(TxnKind::parse("income"), Some(TxnKind::Income));
        assert_eq!(TxnKind::parse("expense"), Some(TxnKind::Expense));
        assert_eq!(TxnKind::Income.as_str(), "income");
        assert_eq!(TxnKind::Expense.as_str(), "expense");
    }

    #[test]
    fn unknown_kind_text_is_rejected() {
        assert_eq!(TxnKind::parse("transfer"), None);
        assert_eq!(TxnKind::parse("INCOME"), None);
    }
}
