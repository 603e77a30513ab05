//! # Repository Pattern
//!
//! One repository per aggregate, each owning its SQL:
//!
//! - [`product`] - catalog CRUD, search, stock movements
//! - [`customer`] - directory CRUD
//! - [`ledger`] - append-only transaction log + atomic write units
//! - [`purchase`] - procurement receipts (record / revert)
//!
//! Repositories hold a cloned `SqlitePool` (cheap, shared) and are
//! handed out by [`crate::Database`]. They return domain types from
//! kios-core, never row structs.

pub mod customer;
pub mod ledger;
pub mod product;
pub mod purchase;
