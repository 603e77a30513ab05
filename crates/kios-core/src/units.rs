//! # Packaging Units
//!
//! Cigarettes move through four packaging levels, each a fixed per-product
//! multiple of the level below it:
//!
//! ```text
//! Karton ──► Bal ──► Slop ──► Bks (base unit, one pack)
//!   ×4       ×20      ×10          (catalog defaults)
//! ```
//!
//! Stock is tracked in Bks everywhere; ledger lines may be written in any
//! unit and are converted at the edge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DEFAULT_BAL_PER_KARTON, DEFAULT_BKS_PER_SLOP, DEFAULT_SLOP_PER_BAL};

// =============================================================================
// Unit
// =============================================================================

/// A packaging unit a ledger line can be denominated in.
///
/// `Other` is the catch-all for unit tags this build does not know
/// (a newer client, a hand-edited record). It converts with factor 1,
/// i.e. it is treated as base units, so old ledgers always replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Unit {
    /// Bungkus - a single pack, the base unit.
    Bks,
    /// Slop - a sleeve of packs.
    Slop,
    /// Bal - a bale of sleeves.
    Bal,
    /// Karton - a carton of bales.
    Karton,
    /// Unrecognized unit tag, treated as base units.
    Other,
}

impl Unit {
    /// Parses a unit tag, case-insensitively. Unknown tags map to `Other`.
    pub fn parse(tag: &str) -> Unit {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bks" => Unit::Bks,
            "slop" => Unit::Slop,
            "bal" => Unit::Bal,
            "karton" => Unit::Karton,
            _ => Unit::Other,
        }
    }

    /// The stored/serialized tag for this unit.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Bks => "bks",
            Unit::Slop => "slop",
            Unit::Bal => "bal",
            Unit::Karton => "karton",
            Unit::Other => "other",
        }
    }
}

impl Default for Unit {
    /// A line that doesn't say is in base units.
    fn default() -> Self {
        Unit::Bks
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Unit::parse(&s)
    }
}

impl FromStr for Unit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Unit::parse(s))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Packaging
// =============================================================================

/// Per-product packaging factors.
///
/// Factors are floored at 1 during conversion, so a malformed catalog row
/// (zero or negative factor) cannot zero out or invert a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packaging {
    /// Packs per Slop.
    pub bks_per_slop: i64,
    /// Slop per Bal.
    pub slop_per_bal: i64,
    /// Bal per Karton.
    pub bal_per_karton: i64,
}

impl Default for Packaging {
    fn default() -> Self {
        Packaging {
            bks_per_slop: DEFAULT_BKS_PER_SLOP,
            slop_per_bal: DEFAULT_SLOP_PER_BAL,
            bal_per_karton: DEFAULT_BAL_PER_KARTON,
        }
    }
}

impl Packaging {
    /// Creates packaging factors, keeping the catalog defaults for any
    /// factor passed as `None`.
    pub fn new(
        bks_per_slop: Option<i64>,
        slop_per_bal: Option<i64>,
        bal_per_karton: Option<i64>,
    ) -> Self {
        Packaging {
            bks_per_slop: bks_per_slop.unwrap_or(DEFAULT_BKS_PER_SLOP),
            slop_per_bal: slop_per_bal.unwrap_or(DEFAULT_SLOP_PER_BAL),
            bal_per_karton: bal_per_karton.unwrap_or(DEFAULT_BAL_PER_KARTON),
        }
    }

    /// How many Bks one `unit` of this product contains.
    ///
    /// ## Example
    /// ```rust
    /// use kios_core::units::{Packaging, Unit};
    ///
    /// let pack = Packaging { bks_per_slop: 10, slop_per_bal: 20, bal_per_karton: 4 };
    /// assert_eq!(pack.base_factor(Unit::Slop), 10);
    /// assert_eq!(pack.base_factor(Unit::Bal), 200);
    /// assert_eq!(pack.base_factor(Unit::Karton), 800);
    /// ```
    pub fn base_factor(&self, unit: Unit) -> i64 {
        let bks_per_slop = self.bks_per_slop.max(1);
        let slop_per_bal = self.slop_per_bal.max(1);
        let bal_per_karton = self.bal_per_karton.max(1);

        match unit {
            Unit::Bks | Unit::Other => 1,
            Unit::Slop => bks_per_slop,
            Unit::Bal => bks_per_slop * slop_per_bal,
            Unit::Karton => bks_per_slop * slop_per_bal * bal_per_karton,
        }
    }

    /// Converts a quantity in `unit` to base units (Bks).
    pub fn to_base(&self, quantity: i64, unit: Unit) -> i64 {
        quantity * self.base_factor(unit)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_factors_with_defaults() {
        let pack = Packaging::default();
        assert_eq!(pack.base_factor(Unit::Bks), 1);
        assert_eq!(pack.base_factor(Unit::Slop), 10);
        assert_eq!(pack.base_factor(Unit::Bal), 200);
        assert_eq!(pack.base_factor(Unit::Karton), 800);
    }

    #[test]
    fn test_two_bal_is_400_bks() {
        let pack = Packaging {
            bks_per_slop: 10,
            slop_per_bal: 20,
            bal_per_karton: 4,
        };
        assert_eq!(pack.to_base(2, Unit::Bal), 400);
    }

    #[test]
    fn test_unknown_unit_converts_one_to_one() {
        let pack = Packaging::default();
        assert_eq!(pack.to_base(7, Unit::Other), 7);
        assert_eq!(Unit::parse("lusin"), Unit::Other);
        assert_eq!(Unit::parse("KARTON"), Unit::Karton);
    }

    #[test]
    fn test_malformed_factors_floor_at_one() {
        let pack = Packaging {
            bks_per_slop: 0,
            slop_per_bal: -5,
            bal_per_karton: 4,
        };
        assert_eq!(pack.base_factor(Unit::Slop), 1);
        assert_eq!(pack.base_factor(Unit::Bal), 1);
        assert_eq!(pack.base_factor(Unit::Karton), 4);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let pack = Packaging::new(Some(12), None, None);
        assert_eq!(pack.bks_per_slop, 12);
        assert_eq!(pack.slop_per_bal, 20);
        assert_eq!(pack.bal_per_karton, 4);
    }

    #[test]
    fn test_serde_round_trip_and_fallback() {
        let unit: Unit = serde_json::from_str("\"bal\"").unwrap();
        assert_eq!(unit, Unit::Bal);

        // Unknown tags deserialize instead of failing, so old ledgers replay.
        let unit: Unit = serde_json::from_str("\"pallet\"").unwrap();
        assert_eq!(unit, Unit::Other);

        assert_eq!(serde_json::to_string(&Unit::Karton).unwrap(), "\"karton\"");
    }
}
