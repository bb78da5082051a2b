use std::path::Path;

use crate::ClientResult;
use crate::commands::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryAddedData, CategoryListData, CategoryRemovedData};
use crate::error::ClientError;
use crate::state::resolve_owner;
use crate::store::categories::{
    NewCategory, delete_category, find_category, insert_category, query_categories,
};
use crate::store::rows::TxnKind;

const MAX_CATEGORY_NAME_CHARS: usize = 100;

#[derive(Debug, Default)]
pub struct ListCategoriesOptions<'a> {
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(ListCategoriesOptions::default())
}

pub fn list_with_options(options: ListCategoriesOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let rows = query_categories(&connection, &db_path, &owner)?;
    success("category list", CategoryListData { rows })
}

#[derive(Debug)]
pub struct AddCategoryOptions<'a> {
    pub name: String,
    pub kind: TxnKind,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn add_with_options(options: AddCategoryOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "`--name` must not be empty.",
            Some("category add"),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_CHARS {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--name` must be at most {MAX_CATEGORY_NAME_CHARS} characters."),
            Some("category add"),
        ));
    }
    if let Some(color) = options.color.as_deref()
        && !is_hex_color(color)
    {
        return Err(ClientError::invalid_argument_for_command(
            "`--color` must be a hex color like #4f46e5.",
            Some("category add"),
        ));
    }

    let (db_path, connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let input = NewCategory {
        name,
        icon: options.icon,
        color: options.color,
        kind: options.kind,
    };
    let category_id = insert_category(&connection, &db_path, &owner, &input)?;

    let category = find_category(&connection, &db_path, &owner, &category_id)?
        .ok_or_else(|| ClientError::category_not_found(&category_id))?;

    let data = CategoryAddedData {
        category_id,
        category,
    };
    success("category add", data)
}

#[derive(Debug)]
pub struct RemoveCategoryOptions<'a> {
    pub category_id: String,
    pub owner: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn remove_with_options(options: RemoveCategoryOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (db_path, mut connection) = open_ledger(options.home_override)?;
    let owner = resolve_owner(options.owner.as_deref());

    let reassigned = delete_category(&mut connection, &db_path, &owner, &options.category_id)?;

    let data = CategoryRemovedData {
        category_id: options.category_id,
        reassigned_transactions: reassigned,
    };
    success("category remove", data)
}

fn is_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}
