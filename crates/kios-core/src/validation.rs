//! # Validation Module
//!
//! Input validation for caller-supplied data, run before anything is
//! persisted. Database constraints (NOT NULL, UNIQUE) remain the last
//! layer behind these checks.
//!
//! Note this is a different concern from the consignment settlement
//! check: an empty or all-zero settlement is a silent no-op
//! ([`crate::consignment::settle_lines`] returns `None`), while the
//! failures here are reported to the caller as [`ValidationError`]s.

use crate::error::{ValidationError, ValidationResult};
use crate::units::Packaging;
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use kios_core::validation::validate_sku;
///
/// assert!(validate_sku("GG-SURYA-12").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or customer name: non-empty, at most 200 chars.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a ledger line quantity: positive and within the entry bound.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in rupiah: non-negative (zero allowed for promos).
pub fn validate_price_rp(rp: i64) -> ValidationResult<()> {
    if rp < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates packaging factors: every level at least 1, at most 1000.
///
/// The converter floors factors at 1 defensively, but catalog writes
/// should never store a malformed factor in the first place.
pub fn validate_packaging(packaging: &Packaging) -> ValidationResult<()> {
    for (field, value) in [
        ("bks_per_slop", packaging.bks_per_slop),
        ("slop_per_bal", packaging.slop_per_bal),
        ("bal_per_karton", packaging.bal_per_karton),
    ] {
        if !(1..=1000).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 1,
                max: 1000,
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("GG-SURYA-12").is_ok());
        assert!(validate_sku("DJARUM_76").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Gudang Garam Surya 12").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9_999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_price_rp() {
        assert!(validate_price_rp(0).is_ok());
        assert!(validate_price_rp(25_000).is_ok());
        assert!(validate_price_rp(-100).is_err());
    }

    #[test]
    fn test_validate_packaging() {
        assert!(validate_packaging(&Packaging::default()).is_ok());

        let bad = Packaging {
            bks_per_slop: 0,
            slop_per_bal: 20,
            bal_per_karton: 4,
        };
        assert!(validate_packaging(&bad).is_err());

        let huge = Packaging {
            bks_per_slop: 10,
            slop_per_bal: 2000,
            bal_per_karton: 4,
        };
        assert!(validate_packaging(&huge).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
