//! # Consignment (Titip) Reduction
//!
//! Consignment state is never stored. The ledger is the single source of
//! truth, and this module folds it into per-customer state on every read:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Consignment Derivation                          │
//! │                                                                 │
//! │  Transaction log (append-only)                                  │
//! │   ├── Sale (consignment)  ── adds balance + held inventory      │
//! │   ├── Sale (cash/transfer) ─ ignored here                       │
//! │   ├── Return ─────────────── refunds balance, returns holding   │
//! │   └── ConsignmentPayment ─── settles balance, consumes holding  │
//! │        │                                                        │
//! │        ▼  reduce_consignments()                                 │
//! │  Map: customer → { balance, held (product, tier) → qty Bks }    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Deterministic: identical input → bit-identical output. The fold
//!   stable-sorts by `occurred_at` (ties keep input order), buckets and
//!   holdings live in `BTreeMap`s, output is sorted by customer name.
//! - Total: no input panics this function. Unknown products fall back to
//!   default packaging, unmatched settlement lines are dropped from the
//!   holding adjustment, balances and quantities are clamped at zero in
//!   a post-pass.
//! - Pure: no clock, no I/O, no state across calls. Safe to re-run
//!   concurrently from any number of readers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{LineItem, PriceTier, Product, Transaction, TransactionKind};
use crate::units::{Packaging, Unit};

// =============================================================================
// Output Types
// =============================================================================

/// Key of a held-inventory entry: the same product under two tiers is
/// held (and priced) separately.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemKey {
    pub product_id: String,
    pub tier: PriceTier,
}

/// One held-inventory entry: goods at the customer's premises, still
/// owned by the business until sold or returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldItem {
    pub product_id: String,
    pub tier: PriceTier,
    /// Product name as of the most recent consignment sale line.
    pub name: String,
    /// Quantity still held, in base units (Bks). Always positive in output.
    pub quantity_bks: i64,
    /// Price per Bks, normalized from the sale line's unit price.
    pub unit_price_rp: i64,
}

/// Derived consignment state for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerConsignment {
    /// Trimmed customer name (the bucket key).
    pub customer: String,
    /// Outstanding balance owed to the business. Never negative in output.
    pub balance_rp: i64,
    /// Held inventory, sorted by (product_id, tier).
    pub held: Vec<HeldItem>,
}

// =============================================================================
// Reducer
// =============================================================================

/// Mutable per-customer accumulator used during the fold.
#[derive(Default)]
struct Bucket {
    balance_rp: i64,
    held: BTreeMap<ItemKey, Holding>,
}

struct Holding {
    name: String,
    quantity_bks: i64,
    unit_price_rp: i64,
}

/// Folds the full transaction log into per-customer consignment state.
///
/// `products` supplies packaging factors for unit conversion; lines whose
/// product is no longer in the catalog convert with default factors.
///
/// ## Algorithm
/// 1. Stable-sort by `occurred_at` - the log's arrival order carries no
///    guarantee, and optimistically created records may share timestamps,
///    so ties must keep their original relative order.
/// 2. Bucket by trimmed customer name.
/// 3. Fold each record into its bucket (see module docs for the rules).
/// 4. Clamp balances and quantities at zero, drop empty entries, drop
///    customers with nothing outstanding and nothing held.
pub fn reduce_consignments(
    transactions: &[Transaction],
    products: &[Product],
) -> Vec<CustomerConsignment> {
    let packaging: HashMap<&str, Packaging> = products
        .iter()
        .map(|p| (p.id.as_str(), p.packaging))
        .collect();

    // sort_by_key is stable: equal timestamps keep input order.
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.occurred_at);

    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for txn in ordered {
        let customer = txn.customer.trim();
        let bucket = buckets.entry(customer.to_string()).or_default();

        match &txn.kind {
            TransactionKind::Sale { payment, items } => {
                if !payment.is_consignment() {
                    continue;
                }
                bucket.balance_rp += txn.total_rp;
                for line in items {
                    add_holding(bucket, line, pack_for(&packaging, line));
                }
            }
            TransactionKind::Return { items } => {
                // total_rp is refund-signed (negative), so adding reduces.
                bucket.balance_rp += txn.total_rp;
                for line in items {
                    subtract_holding(&mut bucket.held, line, pack_for(&packaging, line));
                }
            }
            TransactionKind::ConsignmentPayment {
                amount_paid_rp,
                items,
            } => {
                bucket.balance_rp -= amount_paid_rp;
                for line in items {
                    subtract_holding(&mut bucket.held, line, pack_for(&packaging, line));
                }
            }
        }
    }

    buckets
        .into_iter()
        .filter_map(|(customer, bucket)| {
            let balance_rp = Money::from_rp(bucket.balance_rp)
                .clamp_non_negative()
                .rp();
            let held: Vec<HeldItem> = bucket
                .held
                .into_iter()
                .filter(|(_, holding)| holding.quantity_bks > 0)
                .map(|(key, holding)| HeldItem {
                    product_id: key.product_id,
                    tier: key.tier,
                    name: holding.name,
                    quantity_bks: holding.quantity_bks,
                    unit_price_rp: holding.unit_price_rp,
                })
                .collect();

            // No active consignment: settled balance and nothing held.
            if balance_rp == 0 && held.is_empty() {
                None
            } else {
                Some(CustomerConsignment {
                    customer,
                    balance_rp,
                    held,
                })
            }
        })
        .collect()
}

fn pack_for(packaging: &HashMap<&str, Packaging>, line: &LineItem) -> Packaging {
    packaging
        .get(line.product_id.as_str())
        .copied()
        .unwrap_or_default()
}

fn add_holding(bucket: &mut Bucket, line: &LineItem, pack: Packaging) {
    let factor = pack.base_factor(line.unit);
    let entry = bucket
        .held
        .entry(ItemKey {
            product_id: line.product_id.clone(),
            tier: line.tier,
        })
        .or_insert(Holding {
            name: line.name.clone(),
            quantity_bks: 0,
            unit_price_rp: 0,
        });

    entry.quantity_bks += pack.to_base(line.quantity, line.unit);
    // Normalize the frozen unit price to per-Bks. Integer division: a
    // price not divisible by its factor loses the remainder, which is the
    // documented precision policy for all rupiah math in this crate.
    entry.unit_price_rp = line.unit_price_rp / factor;
    entry.name = line.name.clone();
}

/// Subtracts a settled/returned line from the holdings.
///
/// Matching: exact (product, tier) key first; otherwise the first key in
/// sorted order holding the same product (price-tier drift between the
/// sale and the settlement); otherwise the line is dropped from the
/// holding adjustment. The balance side of the record has already been
/// applied by the caller either way.
fn subtract_holding(held: &mut BTreeMap<ItemKey, Holding>, line: &LineItem, pack: Packaging) {
    let exact = ItemKey {
        product_id: line.product_id.clone(),
        tier: line.tier,
    };
    let key = if held.contains_key(&exact) {
        Some(exact)
    } else {
        held.keys()
            .find(|key| key.product_id == line.product_id)
            .cloned()
    };

    if let Some(key) = key {
        if let Some(holding) = held.get_mut(&key) {
            holding.quantity_bks -= pack.to_base(line.quantity, line.unit);
        }
    }
}

// =============================================================================
// Settlement Validation
// =============================================================================

/// A line the caller selected from a customer's held inventory, to be
/// settled by a payment or a return. Quantities are in Bks and prices
/// per Bks, exactly as [`HeldItem`] reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementLine {
    pub product_id: String,
    pub name: String,
    pub tier: PriceTier,
    pub quantity_bks: i64,
    pub unit_price_rp: i64,
}

/// Validates a settlement selection and converts it to ledger line items.
///
/// Returns `None` when the selection is empty or no line has a positive
/// quantity - the caller then records nothing (a silent no-op; the UI is
/// expected to disable the control, this is the last-line check).
/// Non-positive lines inside an otherwise valid selection are dropped.
///
/// Deliberately NOT enforced here: an upper bound against the quantity
/// currently held. That clamp belongs to the UI contract; the reducer's
/// zero floor is the backstop.
pub fn settle_lines(lines: &[SettlementLine]) -> Option<Vec<LineItem>> {
    let items: Vec<LineItem> = lines
        .iter()
        .filter(|line| line.quantity_bks > 0)
        .map(|line| LineItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity_bks,
            unit: Unit::Bks,
            tier: line.tier,
            unit_price_rp: line.unit_price_rp,
        })
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// The monetary value of a settlement selection (positive lines only).
pub fn settlement_value(lines: &[SettlementLine]) -> i64 {
    lines
        .iter()
        .filter(|line| line.quantity_bks > 0)
        .map(|line| line.unit_price_rp * line.quantity_bks)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentKind, TierPrices};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 9, minute, 0).unwrap()
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            category: "kretek".to_string(),
            packaging: Packaging {
                bks_per_slop: 10,
                slop_per_bal: 20,
                bal_per_karton: 4,
            },
            prices: TierPrices {
                retail_rp: 25_000,
                warung_rp: 24_000,
                grosir_rp: 23_000,
                agen_rp: 22_000,
            },
            stock_bks: 1_000,
            is_active: true,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn line(product_id: &str, quantity: i64, unit: Unit, tier: PriceTier, price: i64) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            quantity,
            unit,
            tier,
            unit_price_rp: price,
        }
    }

    fn consignment_sale(
        id: &str,
        customer: &str,
        at: DateTime<Utc>,
        total: i64,
        items: Vec<LineItem>,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer: customer.to_string(),
            occurred_at: at,
            total_rp: total,
            kind: TransactionKind::Sale {
                payment: PaymentKind::Consignment,
                items,
            },
        }
    }

    fn payment(
        id: &str,
        customer: &str,
        at: DateTime<Utc>,
        amount: i64,
        items: Vec<LineItem>,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer: customer.to_string(),
            occurred_at: at,
            total_rp: amount,
            kind: TransactionKind::ConsignmentPayment {
                amount_paid_rp: amount,
                items,
            },
        }
    }

    fn retur(
        id: &str,
        customer: &str,
        at: DateTime<Utc>,
        refund: i64,
        items: Vec<LineItem>,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer: customer.to_string(),
            occurred_at: at,
            total_rp: -refund,
            kind: TransactionKind::Return { items },
        }
    }

    // -------------------------------------------------------------------------
    // Conservation and settlement
    // -------------------------------------------------------------------------

    #[test]
    fn test_single_sale_conserves_total_and_quantity() {
        // One consignment sale of 2 Bal at grosir tier.
        // Price per Bal = 23_000 x 200; total = 2 lines worth 9_200_000.
        let products = vec![product("p-1")];
        let txns = vec![consignment_sale(
            "t-1",
            "Warung Bu Sari",
            ts(1),
            9_200_000,
            vec![line("p-1", 2, Unit::Bal, PriceTier::Grosir, 4_600_000)],
        )];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].customer, "Warung Bu Sari");
        assert_eq!(out[0].balance_rp, 9_200_000);
        assert_eq!(out[0].held.len(), 1);
        assert_eq!(out[0].held[0].quantity_bks, 400);
        // Unit price normalized to per-Bks: 4_600_000 / 200.
        assert_eq!(out[0].held[0].unit_price_rp, 23_000);
    }

    #[test]
    fn test_full_payment_settles_customer_out_of_output() {
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            payment(
                "t-2",
                "Toko Jaya",
                ts(2),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        // Fully settled: zero balance, nothing held, absent from output.
        let out = reduce_consignments(&txns, &products);
        assert!(out.is_empty());
    }

    #[test]
    fn test_partial_payment_keeps_remainder() {
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            payment(
                "t-2",
                "Toko Jaya",
                ts(2),
                100_000,
                vec![line("p-1", 4, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].balance_rp, 150_000);
        assert_eq!(out[0].held[0].quantity_bks, 6);
    }

    #[test]
    fn test_full_return_settles_without_negative_balance() {
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Kios Pak Budi",
                ts(1),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            retur(
                "t-2",
                "Kios Pak Budi",
                ts(2),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert!(out.is_empty());
    }

    // -------------------------------------------------------------------------
    // Determinism and ordering
    // -------------------------------------------------------------------------

    fn mixed_log() -> (Vec<Transaction>, Vec<Product>) {
        let products = vec![product("p-1"), product("p-2")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                500_000,
                vec![line("p-1", 2, Unit::Slop, PriceTier::Retail, 250_000)],
            ),
            consignment_sale(
                "t-2",
                "Warung Bu Sari",
                ts(2),
                240_000,
                vec![line("p-2", 1, Unit::Slop, PriceTier::Warung, 240_000)],
            ),
            payment(
                "t-3",
                "Toko Jaya",
                ts(3),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            retur(
                "t-4",
                "Warung Bu Sari",
                ts(4),
                48_000,
                vec![line("p-2", 2, Unit::Bks, PriceTier::Warung, 24_000)],
            ),
        ];
        (txns, products)
    }

    #[test]
    fn test_reducer_is_idempotent() {
        let (txns, products) = mixed_log();
        let first = reduce_consignments(&txns, &products);
        let second = reduce_consignments(&txns, &products);
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let (txns, products) = mixed_log();
        let expected = reduce_consignments(&txns, &products);

        let mut reversed = txns.clone();
        reversed.reverse();
        assert_eq!(reduce_consignments(&reversed, &products), expected);

        let mut rotated = txns.clone();
        rotated.rotate_left(2);
        assert_eq!(reduce_consignments(&rotated, &products), expected);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        // Sale and payment share a timestamp (optimistic-UI records).
        // Stable sort must apply the sale first, leaving nothing held;
        // an unstable order would instead drop the payment's line and
        // leave 10 Bks behind.
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(5),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            payment(
                "t-2",
                "Toko Jaya",
                ts(5),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert!(out.is_empty());
    }

    // -------------------------------------------------------------------------
    // Defensive behavior
    // -------------------------------------------------------------------------

    #[test]
    fn test_output_is_never_negative() {
        // Payment with no prior sale, and a return for more than held.
        let products = vec![product("p-1")];
        let txns = vec![
            payment(
                "t-1",
                "Toko Jaya",
                ts(1),
                999_000,
                vec![line("p-1", 50, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            consignment_sale(
                "t-2",
                "Toko Jaya",
                ts(2),
                125_000,
                vec![line("p-1", 5, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        for state in &out {
            assert!(state.balance_rp >= 0);
            for held in &state.held {
                assert!(held.quantity_bks >= 0);
            }
        }
        // The stray payment clamped to zero; the later sale still shows.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].held[0].quantity_bks, 5);
    }

    #[test]
    fn test_return_falls_back_to_same_product_other_tier() {
        // Sold under warung tier, returned referencing retail tier.
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                240_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Warung, 24_000)],
            ),
            retur(
                "t-2",
                "Toko Jaya",
                ts(2),
                96_000,
                vec![line("p-1", 4, Unit::Bks, PriceTier::Retail, 24_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out.len(), 1);
        // Decremented the warung holding via product-id fallback; no new
        // retail entry, no negative entry.
        assert_eq!(out[0].held.len(), 1);
        assert_eq!(out[0].held[0].tier, PriceTier::Warung);
        assert_eq!(out[0].held[0].quantity_bks, 6);
        assert_eq!(out[0].balance_rp, 144_000);
    }

    #[test]
    fn test_unmatched_settlement_line_is_dropped() {
        let products = vec![product("p-1"), product("p-2")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            // References a product this customer never held.
            payment(
                "t-2",
                "Toko Jaya",
                ts(2),
                50_000,
                vec![line("p-2", 2, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out.len(), 1);
        // Balance moved, holding of p-1 untouched, no p-2 entry appeared.
        assert_eq!(out[0].balance_rp, 200_000);
        assert_eq!(out[0].held.len(), 1);
        assert_eq!(out[0].held[0].product_id, "p-1");
        assert_eq!(out[0].held[0].quantity_bks, 10);
    }

    #[test]
    fn test_unknown_product_uses_default_packaging() {
        // Product deleted from the catalog after the sale: 1 Bal still
        // converts with the 10/20/4 defaults.
        let txns = vec![consignment_sale(
            "t-1",
            "Toko Jaya",
            ts(1),
            4_600_000,
            vec![line("ghost", 1, Unit::Bal, PriceTier::Grosir, 4_600_000)],
        )];

        let out = reduce_consignments(&txns, &[]);
        assert_eq!(out[0].held[0].quantity_bks, 200);
    }

    #[test]
    fn test_customer_names_are_trimmed_into_one_bucket() {
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "  Toko Jaya",
                ts(1),
                125_000,
                vec![line("p-1", 5, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            consignment_sale(
                "t-2",
                "Toko Jaya  ",
                ts(2),
                125_000,
                vec![line("p-1", 5, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].customer, "Toko Jaya");
        assert_eq!(out[0].balance_rp, 250_000);
        assert_eq!(out[0].held[0].quantity_bks, 10);
    }

    #[test]
    fn test_cash_sales_do_not_create_consignment_state() {
        let products = vec![product("p-1")];
        let txns = vec![Transaction {
            id: "t-1".to_string(),
            customer: "Toko Jaya".to_string(),
            occurred_at: ts(1),
            total_rp: 250_000,
            kind: TransactionKind::Sale {
                payment: PaymentKind::Cash,
                items: vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            },
        }];

        assert!(reduce_consignments(&txns, &products).is_empty());
    }

    #[test]
    fn test_same_product_two_tiers_held_separately() {
        let products = vec![product("p-1")];
        let txns = vec![
            consignment_sale(
                "t-1",
                "Toko Jaya",
                ts(1),
                250_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Retail, 25_000)],
            ),
            consignment_sale(
                "t-2",
                "Toko Jaya",
                ts(2),
                230_000,
                vec![line("p-1", 10, Unit::Bks, PriceTier::Grosir, 23_000)],
            ),
        ];

        let out = reduce_consignments(&txns, &products);
        assert_eq!(out[0].held.len(), 2);
        // BTreeMap order: tier enum order within the same product.
        assert_eq!(out[0].held[0].tier, PriceTier::Retail);
        assert_eq!(out[0].held[1].tier, PriceTier::Grosir);
    }

    // -------------------------------------------------------------------------
    // Settlement validation
    // -------------------------------------------------------------------------

    fn settlement(product_id: &str, qty: i64) -> SettlementLine {
        SettlementLine {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            tier: PriceTier::Retail,
            quantity_bks: qty,
            unit_price_rp: 25_000,
        }
    }

    #[test]
    fn test_settle_lines_rejects_empty_selection() {
        assert!(settle_lines(&[]).is_none());
    }

    #[test]
    fn test_settle_lines_rejects_all_non_positive() {
        let lines = vec![settlement("p-1", 0), settlement("p-2", -3)];
        assert!(settle_lines(&lines).is_none());
    }

    #[test]
    fn test_settle_lines_keeps_positive_lines_in_bks() {
        let lines = vec![
            settlement("p-1", 4),
            settlement("p-2", 0),
            settlement("p-3", 2),
        ];
        let items = settle_lines(&lines).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.unit == Unit::Bks));
        assert_eq!(items[0].product_id, "p-1");
        assert_eq!(items[0].quantity, 4);
        assert_eq!(items[1].product_id, "p-3");
    }

    #[test]
    fn test_settlement_value_ignores_non_positive_lines() {
        let lines = vec![settlement("p-1", 4), settlement("p-2", -10)];
        assert_eq!(settlement_value(&lines), 100_000);
    }
}
