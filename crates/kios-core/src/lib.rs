//! # kios-core: Pure Business Logic for Kios POS
//!
//! This crate is the heart of Kios POS, the inventory and point-of-sale
//! backend of a cigarette distributor. Everything here is a pure function
//! over plain data: no database, no network, no wall clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Kios POS Architecture                       │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 ★ kios-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────────┐ ┌────────────┐   │  │
//! │  │  │  types  │ │  units  │ │ consignment │ │ validation │   │  │
//! │  │  │ Product │ │ Bks/Slop│ │   reducer   │ │   rules    │   │  │
//! │  │  │ Ledger  │ │ Bal/Ktn │ │   (Titip)   │ │   checks   │   │  │
//! │  │  └─────────┘ └─────────┘ └─────────────┘ └────────────┘   │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS         │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼─────────────────────────────┐  │
//! │  │                 kios-db (Database Layer)                  │  │
//! │  │        SQLite repositories, atomic write units            │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Transaction, ...)
//! - [`units`] - Packaging units (Bks/Slop/Bal/Karton) and conversion
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`consignment`] - Consignment (Titip) reducer and settlement rules
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Integer Money**: all monetary values are whole rupiah (i64)
//! 3. **Exhaustive Matching**: ledger records are a tagged union; a new
//!    transaction kind cannot be silently mis-handled
//! 4. **Never Panic**: malformed ledger data degrades, it does not throw

// =============================================================================
// Module Declarations
// =============================================================================

pub mod consignment;
pub mod error;
pub mod money;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use consignment::{
    reduce_consignments, settle_lines, settlement_value, CustomerConsignment, HeldItem, ItemKey,
    SettlementLine,
};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;
pub use units::{Packaging, Unit};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default packs (Bks) per Slop when a product does not configure it.
pub const DEFAULT_BKS_PER_SLOP: i64 = 10;

/// Default Slop per Bal when a product does not configure it.
pub const DEFAULT_SLOP_PER_BAL: i64 = 20;

/// Default Bal per Karton when a product does not configure it.
pub const DEFAULT_BAL_PER_KARTON: i64 = 4;

/// Maximum quantity accepted on a single ledger line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g. typing 10000 instead of 100).
/// A Karton order of the largest product is still far below this.
pub const MAX_LINE_QUANTITY: i64 = 9_999;
