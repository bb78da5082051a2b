pub mod categories;
pub mod rows;
pub mod transactions;

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}
