//! Product list rows: one product and quantity attached to a note

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{positive, Validate, ValidationError};
use super::Keyed;

/// Row of `product_list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductList {
    #[serde(default)]
    pub id: i32,
    pub note_id: i32,
    pub product_id: i32,
    pub amount: i32,
}

/// Partial product list update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductListPatch {
    #[serde(default)]
    pub id: i32,
    pub note_id: Option<i32>,
    pub product_id: Option<i32>,
    pub amount: Option<i32>,
}

impl Keyed for ProductList {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Keyed for ProductListPatch {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Validate for ProductList {
    fn validate(&self) -> Result<(), ValidationError> {
        positive("amount", self.amount)
    }
}

impl Validate for ProductListPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.amount {
            Some(amount) => positive("amount", amount),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_rejected() {
        let list = ProductList {
            id: 0,
            note_id: 1,
            product_id: 1,
            amount: 0,
        };
        assert_eq!(
            list.validate(),
            Err(ValidationError::NotPositive { field: "amount" })
        );
    }
}
