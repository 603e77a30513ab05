//! # Customer Repository
//!
//! Database operations for the customer directory.
//!
//! Directory entries are contact data only. The ledger references
//! customers by the name on the slip, so renaming a directory entry does
//! not rewrite history - the consignment reducer keys on ledger names.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kios_core::validation::validate_name;
use kios_core::Customer;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    area: Option<String>,
    notes: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            address: row.address,
            phone: row.phone,
            area: row.area,
            notes: row.notes,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, address, phone, area, notes, is_active, created_at, updated_at";

/// Fields for creating a directory entry.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
    pub notes: Option<String>,
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Creates a directory entry.
    pub async fn create(&self, new: NewCustomer) -> DbResult<Customer> {
        validate_name("name", &new.name)?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            address: new.address,
            phone: new.phone,
            area: new.area,
            notes: new.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, name = %customer.name, "Creating customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, address, phone, area, notes, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.area)
        .bind(&customer.notes)
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM customers WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Customer::from))
    }

    /// Lists active customers sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM customers WHERE is_active = 1 ORDER BY name LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Updates contact fields.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        validate_name("name", &customer.name)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2, address = ?3, phone = ?4, area = ?5, notes = ?6, updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(customer.name.trim())
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.area)
        .bind(&customer.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Soft-deletes a customer.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();
        let result =
            sqlx::query("UPDATE customers SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> CustomerRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .customers()
    }

    #[tokio::test]
    async fn test_create_get_update() {
        let repo = repo().await;
        let mut customer = repo
            .create(NewCustomer {
                name: "  Warung Bu Sari ".to_string(),
                area: Some("Pasar Lama".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        // Name stored trimmed.
        assert_eq!(customer.name, "Warung Bu Sari");

        customer.phone = Some("0812-0000-0000".to_string());
        repo.update(&customer).await.unwrap();

        let current = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(current.phone.as_deref(), Some("0812-0000-0000"));
        assert_eq!(current.area.as_deref(), Some("Pasar Lama"));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let repo = repo().await;
        let err = repo
            .create(NewCustomer {
                name: "   ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_listing() {
        let repo = repo().await;
        let customer = repo
            .create(NewCustomer {
                name: "Toko Jaya".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(repo.list_active(10).await.unwrap().len(), 1);
        repo.deactivate(&customer.id).await.unwrap();
        assert!(repo.list_active(10).await.unwrap().is_empty());
    }
}
