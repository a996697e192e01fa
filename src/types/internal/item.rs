use std::fmt;
use std::str::FromStr;

use crate::errors::InternalError;

/// Listing state; only ever moves ON_SALE -> SOLD_OUT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    OnSale,
    SoldOut,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::OnSale => "ON_SALE",
            ItemStatus::SoldOut => "SOLD_OUT",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ON_SALE" => Ok(ItemStatus::OnSale),
            "SOLD_OUT" => Ok(ItemStatus::SoldOut),
            other => Err(InternalError::parse("item_status", format!("unknown value {}", other))),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub owner_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller-supplied item content; the owner comes from the verified identity
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
}

/// Row the item store inserts
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub owner_id: String,
}

impl ItemDraft {
    pub fn on_sale(item: NewItem, owner_id: impl Into<String>) -> Self {
        Self {
            name: item.name,
            price: item.price,
            description: item.description,
            status: ItemStatus::OnSale,
            owner_id: owner_id.into(),
        }
    }
}

/// Change applied by a conditional update
///
/// `expected_status`, when set, joins the id/owner predicate so the write
/// only lands on a row still in that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPatch {
    pub status: ItemStatus,
    pub expected_status: Option<ItemStatus>,
}

impl ItemPatch {
    pub fn transition(from: ItemStatus, to: ItemStatus) -> Self {
        Self {
            status: to,
            expected_status: Some(from),
        }
    }
}
