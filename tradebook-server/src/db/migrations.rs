//! Schema migrations for the four tradebook tables

use sqlx::PgPool;

/// Run all migrations. Idempotent.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running tradebook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price NUMERIC NOT NULL CHECK (price >= 0),
            amount INTEGER NOT NULL CHECK (amount >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Tables created with a fixed precision would round or reject prices
    sqlx::query("ALTER TABLE product ALTER COLUMN price TYPE NUMERIC")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS buyer (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            surname TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS note (
            number SERIAL PRIMARY KEY,
            date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            buyer_id INTEGER NOT NULL REFERENCES buyer(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product_list (
            id SERIAL PRIMARY KEY,
            note_id INTEGER NOT NULL REFERENCES note(number),
            product_id INTEGER NOT NULL REFERENCES product(id),
            amount INTEGER NOT NULL CHECK (amount > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Line-item lookups filter on note_id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_list_note ON product_list(note_id)")
        .execute(pool)
        .await?;

    tracing::info!("tradebook migrations complete");
    Ok(())
}
