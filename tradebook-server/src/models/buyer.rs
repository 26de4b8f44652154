//! Buyer records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{Validate, ValidationError};
use super::Keyed;

/// Buyer row as stored in `buyer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Buyer {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub surname: String,
}

/// Partial buyer update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BuyerPatch {
    #[serde(default)]
    pub id: i32,
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl Keyed for Buyer {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Keyed for BuyerPatch {
    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

// Buyers carry no numeric invariants.
impl Validate for Buyer {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for BuyerPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
