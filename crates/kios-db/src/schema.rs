//! # Embedded Schema
//!
//! The full DDL for Kios POS, applied at connect time.
//!
//! Every statement is idempotent (`IF NOT EXISTS`), so applying the
//! schema on every startup is safe - the same contract a migration
//! runner would give, without shipping SQL files next to the binary.
//!
//! ## Adding Columns
//! Never edit an existing CREATE in a way that breaks old databases;
//! append a new `ALTER TABLE ... ADD COLUMN` statement instead.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};

/// DDL statements, executed in order.
const STATEMENTS: &[&str] = &[
    // ---------------------------------------------------------------------
    // Catalog
    // ---------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id              TEXT PRIMARY KEY,
        sku             TEXT NOT NULL UNIQUE,
        name            TEXT NOT NULL,
        category        TEXT NOT NULL DEFAULT '',
        bks_per_slop    INTEGER NOT NULL DEFAULT 10,
        slop_per_bal    INTEGER NOT NULL DEFAULT 20,
        bal_per_karton  INTEGER NOT NULL DEFAULT 4,
        retail_rp       INTEGER NOT NULL DEFAULT 0,
        warung_rp       INTEGER NOT NULL DEFAULT 0,
        grosir_rp       INTEGER NOT NULL DEFAULT 0,
        agen_rp         INTEGER NOT NULL DEFAULT 0,
        stock_bks       INTEGER NOT NULL DEFAULT 0,
        is_active       INTEGER NOT NULL DEFAULT 1,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products (name)",
    // ---------------------------------------------------------------------
    // Customer directory
    // ---------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        address     TEXT,
        phone       TEXT,
        area        TEXT,
        notes       TEXT,
        is_active   INTEGER NOT NULL DEFAULT 1,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_customers_name ON customers (name)",
    // ---------------------------------------------------------------------
    // Ledger (append-only; deleted only by the administrative purge)
    // ---------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id              TEXT PRIMARY KEY,
        kind            TEXT NOT NULL,
        customer        TEXT NOT NULL DEFAULT '',
        payment         TEXT,
        amount_paid_rp  INTEGER,
        total_rp        INTEGER NOT NULL DEFAULT 0,
        items           TEXT NOT NULL DEFAULT '[]',
        occurred_at     TEXT NOT NULL,
        created_at      TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_transactions_customer ON transactions (customer)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_occurred_at ON transactions (occurred_at)",
    // ---------------------------------------------------------------------
    // Procurement receipts
    // ---------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS purchases (
        id           TEXT PRIMARY KEY,
        supplier     TEXT NOT NULL,
        total_rp     INTEGER NOT NULL DEFAULT 0,
        items        TEXT NOT NULL DEFAULT '[]',
        received_at  TEXT NOT NULL,
        reverted_at  TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_purchases_received_at ON purchases (received_at)",
];

/// Applies the embedded schema.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Ordered: statements run in declaration order
pub async fn apply_schema(pool: &SqlitePool) -> DbResult<()> {
    info!(statements = STATEMENTS.len(), "Applying embedded schema");

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }

    info!("Schema up to date");
    Ok(())
}
