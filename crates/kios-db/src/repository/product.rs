//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - CRUD with soft delete
//! - Name/SKU search
//! - Stock movements in base units (Bks): `increment_stock` for
//!   sales/returns/procurement, `set_stock` for manual counts
//!
//! Stock is a single INTEGER column updated relatively
//! (`stock_bks = stock_bks + ?`), so concurrent movements compose
//! instead of overwriting each other.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kios_core::validation::{validate_name, validate_packaging, validate_price_rp, validate_sku};
use kios_core::{Packaging, Product, TierPrices};

// =============================================================================
// Row Mapping
// =============================================================================

/// Flat row shape; nesting into `Packaging`/`TierPrices` happens in Rust.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    sku: String,
    name: String,
    category: String,
    bks_per_slop: i64,
    slop_per_bal: i64,
    bal_per_karton: i64,
    retail_rp: i64,
    warung_rp: i64,
    grosir_rp: i64,
    agen_rp: i64,
    stock_bks: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            category: row.category,
            packaging: Packaging {
                bks_per_slop: row.bks_per_slop,
                slop_per_bal: row.slop_per_bal,
                bal_per_karton: row.bal_per_karton,
            },
            prices: TierPrices {
                retail_rp: row.retail_rp,
                warung_rp: row.warung_rp,
                grosir_rp: row.grosir_rp,
                agen_rp: row.agen_rp,
            },
            stock_bks: row.stock_bks,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, sku, name, category, \
     bks_per_slop, slop_per_bal, bal_per_karton, \
     retail_rp, warung_rp, grosir_rp, agen_rp, \
     stock_bks, is_active, created_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

/// Fields for creating a catalog entry. Stock starts at zero; it only
/// moves through stock operations.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub packaging: Packaging,
    pub prices: TierPrices,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a catalog entry.
    pub async fn create(&self, new: NewProduct) -> DbResult<Product> {
        validate_sku(&new.sku)?;
        validate_name("name", &new.name)?;
        validate_packaging(&new.packaging)?;
        for price in [
            new.prices.retail_rp,
            new.prices.warung_rp,
            new.prices.grosir_rp,
            new.prices.agen_rp,
        ] {
            validate_price_rp(price)?;
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: new.sku.trim().to_string(),
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            packaging: new.packaging,
            prices: new.prices,
            stock_bks: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, sku = %product.sku, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, category,
                bks_per_slop, slop_per_bal, bal_per_karton,
                retail_rp, warung_rp, grosir_rp, agen_rp,
                stock_bks, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.packaging.bks_per_slop)
        .bind(product.packaging.slop_per_bal)
        .bind(product.packaging.bal_per_karton)
        .bind(product.prices.retail_rp)
        .bind(product.prices.warung_rp)
        .bind(product.prices.grosir_rp)
        .bind(product.prices.agen_rp)
        .bind(product.stock_bks)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Product::from))
    }

    /// Gets a product by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE sku = ?1"))
                .bind(sku.trim())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Product::from))
    }

    /// Lists active products sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM products WHERE is_active = 1 ORDER BY name LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Searches active products by name or SKU substring.
    ///
    /// An empty query falls through to [`Self::list_active`].
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();
        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{query}%");
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM products \
             WHERE is_active = 1 AND (name LIKE ?1 OR sku LIKE ?1) \
             ORDER BY name LIMIT ?2"
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Updates catalog fields (name, category, packaging, prices).
    ///
    /// Stock is deliberately NOT written here - it moves only through
    /// the stock operations below, so a stale catalog edit can never
    /// overwrite movements that happened in between.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_name("name", &product.name)?;
        validate_packaging(&product.packaging)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2, category = ?3,
                bks_per_slop = ?4, slop_per_bal = ?5, bal_per_karton = ?6,
                retail_rp = ?7, warung_rp = ?8, grosir_rp = ?9, agen_rp = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(product.name.trim())
        .bind(product.category.trim())
        .bind(product.packaging.bks_per_slop)
        .bind(product.packaging.slop_per_bal)
        .bind(product.packaging.bal_per_karton)
        .bind(product.prices.retail_rp)
        .bind(product.prices.warung_rp)
        .bind(product.prices.grosir_rp)
        .bind(product.prices.agen_rp)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();
        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products (active and inactive).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Moves stock by a delta in base units (negative for outgoing).
    pub async fn increment_stock(&self, id: &str, delta_bks: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta_bks, "Moving stock");

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE products SET stock_bks = stock_bks + ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(delta_bks)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Sets the absolute stock level (manual count adjustment).
    pub async fn set_stock(&self, id: &str, stock_bks: i64) -> DbResult<()> {
        debug!(id = %id, stock = %stock_bks, "Setting stock from manual count");

        let now = Utc::now();
        let result =
            sqlx::query("UPDATE products SET stock_bks = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(stock_bks)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
