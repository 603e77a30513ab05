//! # Purchase Repository
//!
//! Database operations for procurement receipts.
//!
//! Recording a receipt batch-increments stock for every line together
//! with the receipt row, in one database transaction. Reverting undoes
//! exactly the recorded base-unit quantities and marks the receipt, also
//! atomically; a receipt can be reverted at most once.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kios_core::validation::{validate_name, validate_price_rp, validate_quantity};
use kios_core::{Purchase, PurchaseItem, Unit, ValidationError};

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: String,
    supplier: String,
    total_rp: i64,
    items: String,
    received_at: DateTime<Utc>,
    reverted_at: Option<DateTime<Utc>>,
}

impl PurchaseRow {
    fn decode(self) -> Purchase {
        let items: Vec<PurchaseItem> = match serde_json::from_str(&self.items) {
            Ok(items) => items,
            Err(err) => {
                warn!(id = %self.id, error = %err, "Unreadable purchase items payload, treating as empty");
                Vec::new()
            }
        };

        Purchase {
            id: self.id,
            supplier: self.supplier,
            items,
            total_rp: self.total_rp,
            received_at: self.received_at,
            reverted_at: self.reverted_at,
        }
    }
}

const COLUMNS: &str = "id, supplier, total_rp, items, received_at, reverted_at";

// =============================================================================
// Input Types
// =============================================================================

/// A line of a procurement receipt as the caller enters it.
#[derive(Debug, Clone)]
pub struct PurchaseLine {
    pub product_id: String,
    pub quantity: i64,
    pub unit: Unit,
    pub unit_cost_rp: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for procurement database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Records a procurement receipt: inserts the receipt and increments
    /// stock for every line, in one database transaction.
    pub async fn record(&self, supplier: &str, lines: &[PurchaseLine]) -> DbResult<Purchase> {
        validate_name("supplier", supplier)?;
        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }
        for line in lines {
            validate_quantity(line.quantity)?;
            validate_price_rp(line.unit_cost_rp)?;
        }

        let products = crate::repository::product::ProductRepository::new(self.pool.clone());
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = products
                .get_by_id(&line.product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", &line.product_id))?;

            items.push(PurchaseItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: line.quantity,
                unit: line.unit,
                quantity_bks: product.packaging.to_base(line.quantity, line.unit),
                unit_cost_rp: line.unit_cost_rp,
            });
        }

        let total_rp: i64 = items.iter().map(PurchaseItem::line_total_rp).sum();
        let now = Utc::now();
        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            supplier: supplier.trim().to_string(),
            items,
            total_rp,
            received_at: now,
            reverted_at: None,
        };
        let items_json =
            serde_json::to_string(&purchase.items).map_err(|e| DbError::Internal(e.to_string()))?;

        debug!(id = %purchase.id, supplier = %purchase.supplier, lines = purchase.items.len(), "Recording purchase");

        let mut db_txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO purchases (id, supplier, total_rp, items, received_at, reverted_at)
            VALUES (?1, ?2, ?3, ?4, ?5, NULL)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.supplier)
        .bind(purchase.total_rp)
        .bind(&items_json)
        .bind(purchase.received_at)
        .execute(&mut *db_txn)
        .await?;

        for item in &purchase.items {
            sqlx::query(
                "UPDATE products SET stock_bks = stock_bks + ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(&item.product_id)
            .bind(item.quantity_bks)
            .bind(now)
            .execute(&mut *db_txn)
            .await?;
        }

        db_txn.commit().await?;

        info!(id = %purchase.id, supplier = %purchase.supplier, total = purchase.total_rp, "Purchase recorded");
        Ok(purchase)
    }

    /// Reverts a receipt: marks it reverted and takes the recorded
    /// base-unit quantities back out of stock, in one database
    /// transaction. A second revert is rejected.
    pub async fn revert(&self, id: &str) -> DbResult<Purchase> {
        let purchase = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Purchase", id))?;
        if purchase.is_reverted() {
            return Err(DbError::AlreadyReverted(id.to_string()));
        }

        let now = Utc::now();
        let mut db_txn = self.pool.begin().await?;

        // The IS NULL guard makes the marker the arbiter if two reverts
        // race past the check above.
        let result = sqlx::query(
            "UPDATE purchases SET reverted_at = ?2 WHERE id = ?1 AND reverted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *db_txn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::AlreadyReverted(id.to_string()));
        }

        for item in &purchase.items {
            let delta_bks = if item.quantity_bks > 0 {
                item.quantity_bks
            } else {
                // Receipts from before the base-quantity snapshot existed.
                item.quantity
            };
            let result = sqlx::query(
                "UPDATE products SET stock_bks = stock_bks - ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(&item.product_id)
            .bind(delta_bks)
            .bind(now)
            .execute(&mut *db_txn)
            .await?;

            if result.rows_affected() == 0 {
                warn!(product_id = %item.product_id, "Purchased product missing from catalog, stock not moved");
            }
        }

        db_txn.commit().await?;

        info!(id = %id, "Purchase reverted");
        Ok(Purchase {
            reverted_at: Some(now),
            ..purchase
        })
    }

    /// Gets a receipt by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let row: Option<PurchaseRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM purchases WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(PurchaseRow::decode))
    }

    /// Lists receipts, most recent first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Purchase>> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM purchases ORDER BY received_at DESC, id LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PurchaseRow::decode).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
