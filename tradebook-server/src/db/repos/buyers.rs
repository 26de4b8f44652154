//! Buyer repository

use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use super::table::{Table, TableRepository};
use crate::models::{Buyer, BuyerPatch};

pub type BuyerRepository = TableRepository<Buyer>;

impl Table for Buyer {
    type Patch = BuyerPatch;

    const NAME: &'static str = "buyer";

    const INSERT: &'static str = r#"
        INSERT INTO buyer
            (name, surname)
        VALUES
            ($1, $2)
        RETURNING id
    "#;

    const SELECT_ALL: &'static str = r#"
        SELECT id, name, surname
        FROM buyer
        ORDER BY id
    "#;

    const SELECT_ONE: &'static str = r#"
        SELECT id, name, surname
        FROM buyer
        WHERE id = $1
    "#;

    const UPDATE: &'static str = r#"
        UPDATE buyer
        SET name = COALESCE($1, name),
            surname = COALESCE($2, surname)
        WHERE id = $3
    "#;

    const DELETE: &'static str = "DELETE FROM buyer WHERE id = $1";

    fn insert_args(&self) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(self.name.clone())?;
        args.add(self.surname.clone())?;
        Ok(args)
    }

    fn update_args(patch: &BuyerPatch) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(patch.name.clone())?;
        args.add(patch.surname.clone())?;
        args.add(patch.id)?;
        Ok(args)
    }
}
