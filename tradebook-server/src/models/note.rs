//! Notes and their composed line-item view
//!
//! A note is a dated purchase header for one buyer. Reads return the note
//! together with its line items, each priced from the referenced product.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{Validate, ValidationError};
use super::Keyed;

/// Row of `note`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    #[serde(default)]
    pub number: i32,
    pub date: DateTime<Utc>,
    pub buyer_id: i32,
}

/// Partial note update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NotePatch {
    #[serde(default)]
    pub number: i32,
    pub date: Option<DateTime<Utc>>,
    pub buyer_id: Option<i32>,
}

/// Product name, price and quantity as read through the `product_list` join
#[derive(Debug, Clone, FromRow)]
pub struct LineItemRow {
    pub name: String,
    pub price: Decimal,
    pub amount: i32,
}

/// Line item enriched with its computed total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub amount: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_count: Decimal,
}

impl LineItem {
    /// Build a line item, computing `total_count = price * amount`.
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use tradebook_server::models::LineItem;
    ///
    /// let item = LineItem::new("Tea", Decimal::new(1000, 2), 3);
    /// assert_eq!(item.total_count, Decimal::new(3000, 2));
    /// ```
    pub fn new(name: impl Into<String>, price: Decimal, amount: i32) -> Self {
        Self {
            name: name.into(),
            price,
            amount,
            total_count: price * Decimal::from(amount),
        }
    }
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        Self::new(row.name, row.price, row.amount)
    }
}

/// Note with its line items, as returned by note reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteWithProductLists {
    pub number: i32,
    pub date: DateTime<Utc>,
    pub buyer_id: i32,
    pub prd_lists: Vec<LineItem>,
}

impl NoteWithProductLists {
    pub fn new(note: Note, prd_lists: Vec<LineItem>) -> Self {
        Self {
            number: note.number,
            date: note.date,
            buyer_id: note.buyer_id,
            prd_lists,
        }
    }
}

impl Keyed for Note {
    fn key(&self) -> i32 {
        self.number
    }

    fn set_key(&mut self, key: i32) {
        self.number = key;
    }
}

impl Keyed for NotePatch {
    fn key(&self) -> i32 {
        self.number
    }

    fn set_key(&mut self, key: i32) {
        self.number = key;
    }
}

impl Validate for Note {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for NotePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
