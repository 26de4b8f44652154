//! Product repository

use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use super::table::{Table, TableRepository};
use crate::models::{Product, ProductPatch};

pub type ProductRepository = TableRepository<Product>;

impl Table for Product {
    type Patch = ProductPatch;

    const NAME: &'static str = "product";

    const INSERT: &'static str = r#"
        INSERT INTO product
            (name, description, price, amount)
        VALUES
            ($1, $2, $3, $4)
        RETURNING id
    "#;

    const SELECT_ALL: &'static str = r#"
        SELECT id, name, description, price, amount
        FROM product
        ORDER BY id
    "#;

    const SELECT_ONE: &'static str = r#"
        SELECT id, name, description, price, amount
        FROM product
        WHERE id = $1
    "#;

    const UPDATE: &'static str = r#"
        UPDATE product
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            amount = COALESCE($4, amount)
        WHERE id = $5
    "#;

    const DELETE: &'static str = "DELETE FROM product WHERE id = $1";

    fn insert_args(&self) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(self.name.clone())?;
        args.add(self.description.clone())?;
        args.add(self.price)?;
        args.add(self.amount)?;
        Ok(args)
    }

    fn update_args(patch: &ProductPatch) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(patch.name.clone())?;
        args.add(patch.description.clone())?;
        args.add(patch.price)?;
        args.add(patch.amount)?;
        args.add(patch.id)?;
        Ok(args)
    }
}
