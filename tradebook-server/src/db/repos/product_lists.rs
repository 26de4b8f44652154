//! Product list repository

use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use super::table::{Table, TableRepository};
use crate::models::{ProductList, ProductListPatch};

pub type ProductListRepository = TableRepository<ProductList>;

impl Table for ProductList {
    type Patch = ProductListPatch;

    const NAME: &'static str = "product_list";

    const INSERT: &'static str = r#"
        INSERT INTO product_list
            (note_id, product_id, amount)
        VALUES
            ($1, $2, $3)
        RETURNING id
    "#;

    const SELECT_ALL: &'static str = r#"
        SELECT id, note_id, product_id, amount
        FROM product_list
        ORDER BY id
    "#;

    const SELECT_ONE: &'static str = r#"
        SELECT id, note_id, product_id, amount
        FROM product_list
        WHERE id = $1
    "#;

    const UPDATE: &'static str = r#"
        UPDATE product_list
        SET note_id = COALESCE($1, note_id),
            product_id = COALESCE($2, product_id),
            amount = COALESCE($3, amount)
        WHERE id = $4
    "#;

    const DELETE: &'static str = "DELETE FROM product_list WHERE id = $1";

    fn insert_args(&self) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(self.note_id)?;
        args.add(self.product_id)?;
        args.add(self.amount)?;
        Ok(args)
    }

    fn update_args(patch: &ProductListPatch) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(patch.note_id)?;
        args.add(patch.product_id)?;
        args.add(patch.amount)?;
        args.add(patch.id)?;
        Ok(args)
    }
}
