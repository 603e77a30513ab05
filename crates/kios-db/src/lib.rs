//! # kios-db: Database Layer for Kios POS
//!
//! SQLite persistence for the Kios POS system, on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Kios POS Data Flow                         │
//! │                                                                 │
//! │  App shell (record_sale, settle consignment, ...)               │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                   kios-db (THIS CRATE)                    │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐   │  │
//! │  │  │  Database  │   │ Repositories │   │ Embedded Schema│   │  │
//! │  │  │ (pool.rs)  │◄──│ product      │   │  (schema.rs)   │   │  │
//! │  │  │ SqlitePool │   │ customer     │   │  idempotent    │   │  │
//! │  │  │ WAL mode   │   │ ledger       │   │  DDL           │   │  │
//! │  │  └────────────┘   │ purchase     │   └────────────────┘   │  │
//! │  │                   └──────────────┘                        │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (or :memory: in tests)                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The consignment state itself is never stored here: read the ledger
//! with [`LedgerRepository::list_all`] and derive it with
//! [`kios_core::reduce_consignments`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kios_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kios.db")).await?;
//! let products = db.products().list_active(100).await?;
//! let log = db.ledger().list_all().await?;
//! let titip = kios_core::reduce_consignments(&log, &products);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::{CustomerRepository, NewCustomer};
pub use repository::ledger::{LedgerRepository, SaleLine};
pub use repository::product::{NewProduct, ProductRepository};
pub use repository::purchase::{PurchaseLine, PurchaseRepository};
