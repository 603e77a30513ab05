//! # Domain Types
//!
//! Core domain types used throughout Kios POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌───────────────┐  ┌───────────────┐  ┌────────────────────┐   │
//! │  │    Product    │  │   Customer    │  │    Transaction     │   │
//! │  │  ───────────  │  │  ───────────  │  │  ────────────────  │   │
//! │  │  id (UUID)    │  │  id (UUID)    │  │  id (UUID)         │   │
//! │  │  sku          │  │  name         │  │  customer          │   │
//! │  │  packaging    │  │  area         │  │  kind (tagged)     │   │
//! │  │  tier prices  │  │  phone        │  │  ├── Sale          │   │
//! │  │  stock (Bks)  │  └───────────────┘  │  ├── Return        │   │
//! │  └───────────────┘                     │  └── Consignment   │   │
//! │                                        │      Payment       │   │
//! │                                        └────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ledger Invariant
//! `Transaction` records are append-only: never mutated after creation,
//! deleted only by the administrative per-customer purge. Everything the
//! UI shows about consignments is recomputed from the full log, so the
//! record shapes here must deserialize permissively (missing numeric
//! fields read as zero, missing lists as empty) - a malformed record
//! degrades, it never aborts a replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::units::{Packaging, Unit};

// =============================================================================
// Price Tier
// =============================================================================

/// One of the four price levels a line can be sold at.
///
/// Tiers are per-customer-class list prices, from walk-in retail down to
/// the agent rate for bulk resellers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Walk-in retail price.
    #[default]
    Retail,
    /// Small-shop (warung) price.
    Warung,
    /// Wholesale price.
    Grosir,
    /// Agent price for bulk resellers.
    Agen,
}

impl PriceTier {
    /// The stored/serialized tag for this tier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Retail => "retail",
            PriceTier::Warung => "warung",
            PriceTier::Grosir => "grosir",
            PriceTier::Agen => "agen",
        }
    }

    /// All tiers, in display order.
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Retail,
        PriceTier::Warung,
        PriceTier::Grosir,
        PriceTier::Agen,
    ];
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List prices per tier, in rupiah per Bks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TierPrices {
    pub retail_rp: i64,
    pub warung_rp: i64,
    pub grosir_rp: i64,
    pub agen_rp: i64,
}

impl TierPrices {
    /// The per-Bks list price for a tier.
    pub const fn price_for(&self, tier: PriceTier) -> i64 {
        match tier {
            PriceTier::Retail => self.retail_rp,
            PriceTier::Warung => self.warung_rp,
            PriceTier::Grosir => self.grosir_rp,
            PriceTier::Agen => self.agen_rp,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Catalog category (brand family, e.g. "kretek", "filter").
    pub category: String,

    /// Packaging factors for unit conversion.
    pub packaging: Packaging,

    /// List prices per tier, rupiah per Bks.
    pub prices: TierPrices,

    /// Current stock in base units (Bks).
    pub stock_bks: i64,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The per-Bks list price for a tier, as Money.
    #[inline]
    pub fn price_for(&self, tier: PriceTier) -> Money {
        Money::from_rp(self.prices.price_for(tier))
    }

    /// The list price for one `unit` of this product at `tier`.
    ///
    /// This is the "computed unit price" a sale line snapshots:
    /// tier price per Bks times the unit's base factor.
    pub fn unit_price_for(&self, tier: PriceTier, unit: Unit) -> i64 {
        self.prices.price_for(tier) * self.packaging.base_factor(unit)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer directory entry.
///
/// Ledger records reference customers by the name written on the slip,
/// not by id - the directory is contact data, the ledger is the truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Sales territory this customer belongs to.
    pub area: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Payment Kind
// =============================================================================

/// How a sale is paid.
///
/// `Consignment` defers payment: goods move to the customer, money moves
/// later through [`TransactionKind::ConsignmentPayment`] records. Unknown
/// tags parse to `Other` and are treated as immediate payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PaymentKind {
    Cash,
    Transfer,
    /// Titip - goods delivered now, paid as they resell.
    Consignment,
    /// Unrecognized payment tag, treated as immediate payment.
    Other,
}

impl PaymentKind {
    /// Parses a payment tag, case-insensitively.
    pub fn parse(tag: &str) -> PaymentKind {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentKind::Cash,
            "transfer" => PaymentKind::Transfer,
            "consignment" => PaymentKind::Consignment,
            _ => PaymentKind::Other,
        }
    }

    /// The stored/serialized tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Cash => "cash",
            PaymentKind::Transfer => "transfer",
            PaymentKind::Consignment => "consignment",
            PaymentKind::Other => "other",
        }
    }

    /// Whether this payment kind defers payment (Titip).
    #[inline]
    pub const fn is_consignment(&self) -> bool {
        matches!(self, PaymentKind::Consignment)
    }
}

impl From<String> for PaymentKind {
    fn from(s: String) -> Self {
        PaymentKind::parse(&s)
    }
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Ledger Line Item
// =============================================================================

/// A line on a ledger record.
///
/// Uses the snapshot pattern: product name and price are frozen at
/// transaction time, so history stays stable under catalog edits.
/// Every field defaults, so a partial record still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: String,

    /// Product name at transaction time (frozen).
    #[serde(default)]
    pub name: String,

    /// Quantity, denominated in `unit`.
    #[serde(default)]
    pub quantity: i64,

    /// The unit this line is denominated in.
    #[serde(default)]
    pub unit: Unit,

    /// Price tier applied to this line.
    #[serde(default)]
    pub tier: PriceTier,

    /// Price for one `unit` at transaction time (frozen).
    #[serde(default)]
    pub unit_price_rp: i64,
}

impl LineItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub const fn line_total_rp(&self) -> i64 {
        self.unit_price_rp * self.quantity
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The business event a ledger record describes, one variant per kind.
///
/// The reducer matches this exhaustively: adding a kind is a compile
/// error at every fold site until it is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    /// Goods sold. `payment: Consignment` defers payment.
    Sale {
        payment: PaymentKind,
        #[serde(default)]
        items: Vec<LineItem>,
    },
    /// Goods returned; the record's total is refund-signed (negative).
    Return {
        #[serde(default)]
        items: Vec<LineItem>,
    },
    /// Consignment goods settled: marked sold and paid for.
    ConsignmentPayment {
        #[serde(default)]
        amount_paid_rp: i64,
        #[serde(default)]
        items: Vec<LineItem>,
    },
}

impl TransactionKind {
    /// The stored tag for this kind.
    pub const fn tag(&self) -> &'static str {
        match self {
            TransactionKind::Sale { .. } => "sale",
            TransactionKind::Return { .. } => "return",
            TransactionKind::ConsignmentPayment { .. } => "consignment_payment",
        }
    }

    /// The line items of this record, whatever its kind.
    pub fn items(&self) -> &[LineItem] {
        match self {
            TransactionKind::Sale { items, .. }
            | TransactionKind::Return { items }
            | TransactionKind::ConsignmentPayment { items, .. } => items,
        }
    }
}

/// One immutable, append-only ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    /// Customer name as written on the slip.
    #[serde(default)]
    pub customer: String,

    /// When the business event happened. May coincide or lag for
    /// optimistically created records; the reducer re-sorts by this.
    pub occurred_at: DateTime<Utc>,

    /// Monetary total in rupiah. Negative for returns (refund-signed).
    #[serde(default)]
    pub total_rp: i64,

    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Whether this record is a consignment sale (defers payment).
    pub fn is_consignment_sale(&self) -> bool {
        matches!(
            &self.kind,
            TransactionKind::Sale { payment, .. } if payment.is_consignment()
        )
    }
}

// =============================================================================
// Procurement
// =============================================================================

/// A line on a procurement receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(default)]
    pub product_id: String,

    /// Product name at receipt time (frozen).
    #[serde(default)]
    pub name: String,

    /// Quantity received, denominated in `unit`.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub unit: Unit,

    /// Quantity received in base units, converted at receipt time.
    /// The revert uses this, so a later packaging edit cannot change
    /// how much stock comes back out.
    #[serde(default)]
    pub quantity_bks: i64,

    /// Cost for one `unit` at receipt time (frozen).
    #[serde(default)]
    pub unit_cost_rp: i64,
}

impl PurchaseItem {
    /// Line total (unit cost × quantity).
    #[inline]
    pub const fn line_total_rp(&self) -> i64 {
        self.unit_cost_rp * self.quantity
    }
}

/// A procurement receipt: goods received from a supplier.
///
/// Recording a receipt batch-increments stock; reverting it undoes those
/// increments. Both happen atomically with the receipt row, and a receipt
/// can be reverted at most once (`reverted_at` is the marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub supplier: String,
    pub items: Vec<PurchaseItem>,
    pub total_rp: i64,
    pub received_at: DateTime<Utc>,
    pub reverted_at: Option<DateTime<Utc>>,
}

impl Purchase {
    /// Whether this receipt's stock movement has been undone.
    #[inline]
    pub fn is_reverted(&self) -> bool {
        self.reverted_at.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            sku: "GG-SURYA-12".to_string(),
            name: "Gudang Garam Surya 12".to_string(),
            category: "kretek".to_string(),
            packaging: Packaging::default(),
            prices: TierPrices {
                retail_rp: 25_000,
                warung_rp: 24_000,
                grosir_rp: 23_000,
                agen_rp: 22_000,
            },
            stock_bks: 500,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_tier_price_selection() {
        let p = product();
        assert_eq!(p.price_for(PriceTier::Retail).rp(), 25_000);
        assert_eq!(p.price_for(PriceTier::Agen).rp(), 22_000);
    }

    #[test]
    fn test_unit_price_scales_with_packaging() {
        let p = product();
        // One slop at warung tier: 24_000 x 10.
        assert_eq!(p.unit_price_for(PriceTier::Warung, Unit::Slop), 240_000);
        // One karton at agen tier: 22_000 x 800.
        assert_eq!(p.unit_price_for(PriceTier::Agen, Unit::Karton), 17_600_000);
    }

    #[test]
    fn test_transaction_kind_tags() {
        let sale = TransactionKind::Sale {
            payment: PaymentKind::Consignment,
            items: vec![],
        };
        assert_eq!(sale.tag(), "sale");
        assert_eq!(
            TransactionKind::Return { items: vec![] }.tag(),
            "return"
        );
    }

    #[test]
    fn test_transaction_serde_tagging() {
        let txn = Transaction {
            id: "t-1".to_string(),
            customer: "Warung Bu Sari".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
            total_rp: 250_000,
            kind: TransactionKind::Sale {
                payment: PaymentKind::Consignment,
                items: vec![LineItem {
                    product_id: "p-1".to_string(),
                    name: "Gudang Garam Surya 12".to_string(),
                    quantity: 1,
                    unit: Unit::Slop,
                    tier: PriceTier::Warung,
                    unit_price_rp: 250_000,
                }],
            },
        };

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"sale\""));
        assert!(json.contains("\"payment\":\"consignment\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
        assert!(back.is_consignment_sale());
    }

    #[test]
    fn test_partial_line_item_deserializes_with_defaults() {
        // A malformed record with most fields missing must still parse.
        let line: LineItem = serde_json::from_str(r#"{"product_id":"p-9"}"#).unwrap();
        assert_eq!(line.product_id, "p-9");
        assert_eq!(line.quantity, 0);
        assert_eq!(line.unit, Unit::Bks);
        assert_eq!(line.tier, PriceTier::Retail);
        assert_eq!(line.line_total_rp(), 0);
    }

    #[test]
    fn test_unknown_payment_tag_is_not_consignment() {
        let kind: PaymentKind = serde_json::from_str("\"qris\"").unwrap();
        assert_eq!(kind, PaymentKind::Other);
        assert!(!kind.is_consignment());
    }
}
