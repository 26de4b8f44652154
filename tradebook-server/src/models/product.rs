//! Product records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{non_negative, Validate, ValidationError};
use super::Keyed;

/// Product row as stored in `product`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Generated on insert; ignored when supplied in a create body
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub amount: i32,
}

/// Partial product update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub amount: Option<i32>,
}

impl Keyed for Product {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Keyed for ProductPatch {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("price", self.price)?;
        non_negative("amount", self.amount)
    }
}

impl Validate for ProductPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            non_negative("price", price)?;
        }
        if let Some(amount) = self.amount {
            non_negative("amount", amount)?;
        }
        Ok(())
    }
}
