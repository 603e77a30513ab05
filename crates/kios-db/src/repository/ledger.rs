//! # Ledger Repository
//!
//! Database operations for the append-only transaction ledger, and the
//! write units that combine a ledger append with stock movement.
//!
//! ## Ledger Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ledger Lifecycle                            │
//! │                                                                 │
//! │  1. APPEND                                                      │
//! │     ├── record_sale()                → Sale + stock out         │
//! │     ├── record_consignment_payment() → ConsignmentPayment       │
//! │     └── record_consignment_return()  → Return + stock in        │
//! │         (append and stock movement commit together or not       │
//! │          at all - one database transaction)                     │
//! │                                                                 │
//! │  2. READ                                                        │
//! │     └── list_all() → kios_core::reduce_consignments()           │
//! │                                                                 │
//! │  3. (ADMIN ONLY) PURGE                                          │
//! │     └── purge_customer() → best-effort history delete           │
//! │                                                                 │
//! │  Records are never updated. There is no step 4.                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kios_core::validation::{validate_name, validate_quantity};
use kios_core::{
    settle_lines, LineItem, PaymentKind, PriceTier, SettlementLine, Transaction, TransactionKind,
    Unit, ValidationError,
};

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: String,
    kind: String,
    customer: String,
    payment: Option<String>,
    amount_paid_rp: Option<i64>,
    total_rp: i64,
    items: String,
    occurred_at: DateTime<Utc>,
}

impl TransactionRow {
    /// Decodes a stored row into a ledger record.
    ///
    /// Replay is permissive: an unreadable items payload becomes an empty
    /// list and an unknown kind tag skips the row (with a warning), so
    /// one bad record cannot take down every consignment view.
    fn decode(self) -> Option<Transaction> {
        let items: Vec<LineItem> = match serde_json::from_str(&self.items) {
            Ok(items) => items,
            Err(err) => {
                warn!(id = %self.id, error = %err, "Unreadable ledger items payload, treating as empty");
                Vec::new()
            }
        };

        let kind = match self.kind.as_str() {
            "sale" => TransactionKind::Sale {
                payment: PaymentKind::parse(self.payment.as_deref().unwrap_or("")),
                items,
            },
            "return" => TransactionKind::Return { items },
            "consignment_payment" => TransactionKind::ConsignmentPayment {
                amount_paid_rp: self.amount_paid_rp.unwrap_or(0),
                items,
            },
            other => {
                warn!(id = %self.id, kind = %other, "Skipping ledger row with unknown kind");
                return None;
            }
        };

        Some(Transaction {
            id: self.id,
            customer: self.customer,
            occurred_at: self.occurred_at,
            total_rp: self.total_rp,
            kind,
        })
    }
}

const COLUMNS: &str = "id, kind, customer, payment, amount_paid_rp, total_rp, items, occurred_at";

// =============================================================================
// Input Types
// =============================================================================

/// A line of a sale as the caller enters it: product reference, quantity
/// in any unit, and the tier to price it at. Name and price are
/// snapshotted from the catalog at record time.
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
    pub unit: Unit,
    pub tier: PriceTier,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for ledger database operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Appends one ledger record.
    pub async fn insert(&self, txn: &Transaction) -> DbResult<()> {
        debug!(id = %txn.id, kind = %txn.kind.tag(), customer = %txn.customer, "Appending ledger record");

        let (payment, amount_paid_rp) = match &txn.kind {
            TransactionKind::Sale { payment, .. } => (Some(payment.as_str()), None),
            TransactionKind::Return { .. } => (None, None),
            TransactionKind::ConsignmentPayment { amount_paid_rp, .. } => {
                (None, Some(*amount_paid_rp))
            }
        };
        let items = serde_json::to_string(txn.kind.items())
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO transactions (id, kind, customer, payment, amount_paid_rp, total_rp, items, occurred_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&txn.id)
        .bind(txn.kind.tag())
        .bind(&txn.customer)
        .bind(payment)
        .bind(amount_paid_rp)
        .bind(txn.total_rp)
        .bind(&items)
        .bind(txn.occurred_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the full ledger in insertion order.
    ///
    /// The consignment reducer re-sorts by `occurred_at` itself; this
    /// order only matters as its stable tie-break, so it must be the
    /// same on every read (created_at, then id).
    pub async fn list_all(&self) -> DbResult<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM transactions ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(TransactionRow::decode).collect())
    }

    /// Reads one customer's slice of the ledger, in insertion order.
    pub async fn list_for_customer(&self, customer: &str) -> DbResult<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE TRIM(customer) = ?1 ORDER BY created_at, id"
        ))
        .bind(customer.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(TransactionRow::decode).collect())
    }

    /// Records a sale: appends a `Sale` record and moves stock out, in
    /// one database transaction.
    ///
    /// ## Snapshot Pattern
    /// Name and unit price are copied from the catalog at record time,
    /// so the ledger stays stable under later catalog edits.
    ///
    /// Stock is decremented for every payment kind - consignment goods
    /// leave the warehouse too, they just aren't paid yet.
    pub async fn record_sale(
        &self,
        customer: &str,
        payment: PaymentKind,
        lines: &[SaleLine],
    ) -> DbResult<Transaction> {
        validate_name("customer", customer)?;
        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }
        for line in lines {
            validate_quantity(line.quantity)?;
        }

        // Snapshot catalog data before opening the write transaction.
        let mut items = Vec::with_capacity(lines.len());
        let mut stock_moves = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self
                .fetch_product(&line.product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", &line.product_id))?;

            items.push(LineItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: line.quantity,
                unit: line.unit,
                tier: line.tier,
                unit_price_rp: product.unit_price_for(line.tier, line.unit),
            });
            stock_moves.push((
                product.id.clone(),
                product.packaging.to_base(line.quantity, line.unit),
            ));
        }

        let total_rp: i64 = items.iter().map(LineItem::line_total_rp).sum();
        let now = Utc::now();
        let txn = Transaction {
            id: Uuid::new_v4().to_string(),
            customer: customer.trim().to_string(),
            occurred_at: now,
            total_rp,
            kind: TransactionKind::Sale { payment, items },
        };
        let items_json = serde_json::to_string(txn.kind.items())
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let mut db_txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, kind, customer, payment, amount_paid_rp, total_rp, items, occurred_at, created_at)
            VALUES (?1, 'sale', ?2, ?3, NULL, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.customer)
        .bind(payment.as_str())
        .bind(txn.total_rp)
        .bind(&items_json)
        .bind(txn.occurred_at)
        .execute(&mut *db_txn)
        .await?;

        for (product_id, delta_bks) in &stock_moves {
            sqlx::query(
                "UPDATE products SET stock_bks = stock_bks - ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(product_id)
            .bind(delta_bks)
            .bind(now)
            .execute(&mut *db_txn)
            .await?;
        }

        db_txn.commit().await?;

        info!(id = %txn.id, customer = %txn.customer, payment = %payment, total = txn.total_rp, "Sale recorded");
        Ok(txn)
    }

    /// Records a consignment payment: goods at the customer settled as
    /// sold and paid for. No stock movement - the goods already left with
    /// the original consignment sale.
    ///
    /// Returns `Ok(None)` without writing anything when the selection is
    /// empty or has no positive quantity (last-line defensive check; the
    /// UI disables the control in that state).
    pub async fn record_consignment_payment(
        &self,
        customer: &str,
        lines: &[SettlementLine],
        amount_paid_rp: i64,
    ) -> DbResult<Option<Transaction>> {
        let Some(items) = settle_lines(lines) else {
            debug!(customer = %customer, "Empty consignment payment selection, nothing recorded");
            return Ok(None);
        };

        let txn = Transaction {
            id: Uuid::new_v4().to_string(),
            customer: customer.trim().to_string(),
            occurred_at: Utc::now(),
            total_rp: amount_paid_rp,
            kind: TransactionKind::ConsignmentPayment {
                amount_paid_rp,
                items,
            },
        };

        self.insert(&txn).await?;

        info!(id = %txn.id, customer = %txn.customer, amount = amount_paid_rp, "Consignment payment recorded");
        Ok(Some(txn))
    }

    /// Records a consignment return: unsold goods come back from the
    /// customer. Appends a refund-signed `Return` record AND moves the
    /// returned quantities back into stock, in one database transaction -
    /// a partial application would corrupt the held-inventory derivation.
    ///
    /// Returns `Ok(None)` without writing anything when the selection is
    /// empty or has no positive quantity.
    pub async fn record_consignment_return(
        &self,
        customer: &str,
        lines: &[SettlementLine],
        refund_rp: i64,
    ) -> DbResult<Option<Transaction>> {
        let Some(items) = settle_lines(lines) else {
            debug!(customer = %customer, "Empty consignment return selection, nothing recorded");
            return Ok(None);
        };

        let now = Utc::now();
        let txn = Transaction {
            id: Uuid::new_v4().to_string(),
            customer: customer.trim().to_string(),
            occurred_at: now,
            total_rp: -refund_rp,
            kind: TransactionKind::Return {
                items: items.clone(),
            },
        };
        let items_json =
            serde_json::to_string(&items).map_err(|e| DbError::Internal(e.to_string()))?;

        let mut db_txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, kind, customer, payment, amount_paid_rp, total_rp, items, occurred_at, created_at)
            VALUES (?1, 'return', ?2, NULL, NULL, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.customer)
        .bind(txn.total_rp)
        .bind(&items_json)
        .bind(txn.occurred_at)
        .execute(&mut *db_txn)
        .await?;

        // Settlement lines are denominated in Bks, so the quantity is the
        // stock delta directly. A line whose product left the catalog has
        // no row to move; the refund itself still stands.
        for item in &items {
            let result = sqlx::query(
                "UPDATE products SET stock_bks = stock_bks + ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(now)
            .execute(&mut *db_txn)
            .await?;

            if result.rows_affected() == 0 {
                warn!(product_id = %item.product_id, "Returned product missing from catalog, stock not moved");
            }
        }

        db_txn.commit().await?;

        info!(id = %txn.id, customer = %txn.customer, refund = refund_rp, "Consignment return recorded");
        Ok(Some(txn))
    }

    /// Administrative purge of one customer's ledger history.
    ///
    /// Best effort by design: a single DELETE, not coordinated with
    /// anything else. Returns the number of records removed.
    pub async fn purge_customer(&self, customer: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM transactions WHERE TRIM(customer) = ?1")
            .bind(customer.trim())
            .execute(&self.pool)
            .await?;

        info!(customer = %customer.trim(), removed = result.rows_affected(), "Purged customer ledger");
        Ok(result.rows_affected())
    }

    /// Minimal product fetch for sale snapshotting.
    async fn fetch_product(&self, id: &str) -> DbResult<Option<kios_core::Product>> {
        crate::repository::product::ProductRepository::new(self.pool.clone())
            .get_by_id(id)
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
