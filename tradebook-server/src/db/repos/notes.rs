//! Note repository
//!
//! Writes go straight to `note`. Reads are two-stage: the note rows first,
//! then one line-item query per note joining `product_list` with `product`.
//! Totals are computed here, not in SQL.

use async_trait::async_trait;
use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use tracing::Span;

use super::table::{compact_sql, key_args, Table, TableRepository};
use super::{DbError, Repository};
use crate::db::client::StorageClient;
use crate::models::{LineItem, LineItemRow, Note, NotePatch, NoteWithProductLists};

const SELECT_LINE_ITEMS: &str = r#"
    SELECT product.name, product.price, product_list.amount
    FROM product_list
    INNER JOIN product ON product_list.product_id = product.id
    WHERE product_list.note_id = $1
    ORDER BY product_list.id
"#;

impl Table for Note {
    type Patch = NotePatch;

    const NAME: &'static str = "note";

    const INSERT: &'static str = r#"
        INSERT INTO note
            (date, buyer_id)
        VALUES
            ($1, $2)
        RETURNING number
    "#;

    const SELECT_ALL: &'static str = r#"
        SELECT number, date, buyer_id
        FROM note
        ORDER BY number
    "#;

    const SELECT_ONE: &'static str = r#"
        SELECT number, date, buyer_id
        FROM note
        WHERE number = $1
    "#;

    const UPDATE: &'static str = r#"
        UPDATE note
        SET date = COALESCE($1, date),
            buyer_id = COALESCE($2, buyer_id)
        WHERE number = $3
    "#;

    const DELETE: &'static str = "DELETE FROM note WHERE number = $1";

    fn insert_args(&self) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(self.date)?;
        args.add(self.buyer_id)?;
        Ok(args)
    }

    fn update_args(patch: &NotePatch) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        args.add(patch.date)?;
        args.add(patch.buyer_id)?;
        args.add(patch.number)?;
        Ok(args)
    }
}

/// Note repository returning notes with their line items
pub struct NoteRepository {
    notes: TableRepository<Note>,
    client: StorageClient,
    span: Span,
}

impl NoteRepository {
    pub fn new(client: StorageClient, span: Span) -> Self {
        Self {
            notes: TableRepository::new(client.clone(), span.clone()),
            client,
            span,
        }
    }

    /// Line items of one note, in insertion order.
    async fn line_items(&self, number: i32) -> Result<Vec<LineItem>, DbError> {
        tracing::debug!(parent: &self.span, note = number, sql = %compact_sql(SELECT_LINE_ITEMS), "SQL query");

        let args = key_args(number).map_err(|e| self.fail(sqlx::Error::Encode(e)))?;
        let rows: Vec<LineItemRow> = self
            .client
            .query(SELECT_LINE_ITEMS, args)
            .await
            .map_err(|e| self.fail(e))?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    async fn with_line_items(&self, note: Note) -> Result<NoteWithProductLists, DbError> {
        let items = self.line_items(note.number).await?;
        Ok(NoteWithProductLists::new(note, items))
    }

    fn fail(&self, err: impl Into<DbError>) -> DbError {
        let err = err.into();
        tracing::error!(parent: &self.span, table = "product_list", error = %err, "line item query failed");
        err
    }
}

#[async_trait]
impl Repository for NoteRepository {
    type Record = Note;
    type Patch = NotePatch;
    type View = NoteWithProductLists;

    async fn create(&self, record: &mut Note) -> Result<i32, DbError> {
        self.notes.create(record).await
    }

    async fn find_all(&self) -> Result<Vec<NoteWithProductLists>, DbError> {
        let notes = self.notes.find_all().await?;

        let mut views = Vec::with_capacity(notes.len());
        for note in notes {
            views.push(self.with_line_items(note).await?);
        }
        Ok(views)
    }

    async fn find_one(&self, key: i32) -> Result<NoteWithProductLists, DbError> {
        let note = self.notes.find_one(key).await?;
        self.with_line_items(note).await
    }

    async fn update(&self, patch: NotePatch) -> Result<(), DbError> {
        self.notes.update(patch).await
    }

    async fn delete(&self, key: i32) -> Result<(), DbError> {
        self.notes.delete(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{BuyerRepository, ProductListRepository, ProductRepository};
    use crate::models::{Buyer, Product, ProductList};
    use chrono::Utc;
    use rust_decimal::Decimal;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p tradebook-server -- --ignored

    async fn client() -> StorageClient {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = sqlx::PgPool::connect(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        StorageClient::from_pool(pool)
    }

    async fn product(client: &StorageClient, name: &str, price: Decimal) -> i32 {
        let mut product = Product {
            id: 0,
            name: name.into(),
            description: String::new(),
            price,
            amount: 100,
        };
        ProductRepository::new(client.clone(), Span::none())
            .create(&mut product)
            .await
            .expect("product create failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn find_one_computes_line_totals() {
        let client = client().await;

        let mut buyer = Buyer {
            id: 0,
            name: "Ada".into(),
            surname: "Byron".into(),
        };
        let buyer_id = BuyerRepository::new(client.clone(), Span::none())
            .create(&mut buyer)
            .await
            .expect("buyer create failed");

        let repo = NoteRepository::new(client.clone(), Span::none());
        let mut note = Note {
            number: 0,
            date: Utc::now(),
            buyer_id,
        };
        let number = repo.create(&mut note).await.expect("note create failed");

        let coffee = product(&client, "Coffee", Decimal::new(1000, 2)).await;
        let sugar = product(&client, "Sugar", Decimal::new(500, 2)).await;

        let lists = ProductListRepository::new(client.clone(), Span::none());
        for (product_id, amount) in [(coffee, 3), (sugar, 2)] {
            let mut list = ProductList {
                id: 0,
                note_id: number,
                product_id,
                amount,
            };
            lists.create(&mut list).await.expect("list create failed");
        }

        let view = repo.find_one(number).await.expect("find failed");
        let totals: Vec<Decimal> = view.prd_lists.iter().map(|i| i.total_count).collect();
        assert_eq!(totals, vec![Decimal::new(3000, 2), Decimal::new(1000, 2)]);

        let all = repo.find_all().await.expect("find_all failed");
        let listed = all
            .iter()
            .find(|n| n.number == number)
            .expect("note missing from find_all");
        assert_eq!(listed.prd_lists, view.prd_lists);
    }

    async fn note_with_items(
        client: &StorageClient,
        buyer_id: i32,
        items: &[(i32, i32)],
    ) -> i32 {
        let mut note = Note {
            number: 0,
            date: Utc::now(),
            buyer_id,
        };
        let number = NoteRepository::new(client.clone(), Span::none())
            .create(&mut note)
            .await
            .expect("note create failed");

        let lists = ProductListRepository::new(client.clone(), Span::none());
        for &(product_id, amount) in items {
            let mut list = ProductList {
                id: 0,
                note_id: number,
                product_id,
                amount,
            };
            lists.create(&mut list).await.expect("list create failed");
        }
        number
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn find_all_groups_line_items_per_note() {
        let client = client().await;

        let mut buyer = Buyer {
            id: 0,
            name: "Alan".into(),
            surname: "Turing".into(),
        };
        let buyer_id = BuyerRepository::new(client.clone(), Span::none())
            .create(&mut buyer)
            .await
            .expect("buyer create failed");

        let coffee = product(&client, "Coffee", Decimal::new(1000, 2)).await;
        let sugar = product(&client, "Sugar", Decimal::new(500, 2)).await;
        let tea = product(&client, "Tea", Decimal::new(400, 2)).await;

        // Inserted out of product order to pin ordering on product_list.id
        let first = note_with_items(&client, buyer_id, &[(sugar, 2), (coffee, 3)]).await;
        let second = note_with_items(&client, buyer_id, &[(tea, 1)]).await;

        let all = NoteRepository::new(client.clone(), Span::none())
            .find_all()
            .await
            .expect("find_all failed");

        let items_of = |number: i32| {
            all.iter()
                .find(|n| n.number == number)
                .map(|n| n.prd_lists.clone())
                .expect("note missing from find_all")
        };

        assert_eq!(
            items_of(first),
            vec![
                LineItem::new("Sugar", Decimal::new(500, 2), 2),
                LineItem::new("Coffee", Decimal::new(1000, 2), 3),
            ]
        );
        assert_eq!(
            items_of(second),
            vec![LineItem::new("Tea", Decimal::new(400, 2), 1)]
        );
        assert_eq!(items_of(first)[1].total_count, Decimal::new(3000, 2));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_buyer_is_storage_error() {
        let repo = NoteRepository::new(client().await, Span::none());
        let mut note = Note {
            number: 0,
            date: Utc::now(),
            buyer_id: -1,
        };

        let err = repo.create(&mut note).await.unwrap_err();
        match err {
            DbError::Storage(storage) => assert_eq!(storage.sql_state, "23503"),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
