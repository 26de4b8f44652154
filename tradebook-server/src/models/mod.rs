//! Domain models
//!
//! Records mirror table rows and double as request/response bodies.
//! Every record has a matching patch type for partial updates.

pub mod buyer;
pub mod note;
pub mod product;
pub mod product_list;
pub mod validation;

pub use buyer::{Buyer, BuyerPatch};
pub use note::{LineItem, LineItemRow, Note, NotePatch, NoteWithProductLists};
pub use product::{Product, ProductPatch};
pub use product_list::{ProductList, ProductListPatch};
pub use validation::{Validate, ValidationError};

/// Access to the generated integer key of a record or patch.
pub trait Keyed {
    fn key(&self) -> i32;
    fn set_key(&mut self, key: i32);
}
