//! Value Objects for the Reloop Domain
//!
//! Immutable, validated domain primitives.
//! All value objects enforce invariants at construction time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Weight must be non-negative
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// Reference code must be non-empty
    #[error("Invalid reference code: {0}")]
    InvalidReferenceCode(String),

    /// Material code must be non-empty
    #[error("Invalid material code: {0}")]
    InvalidMaterialCode(String),

    /// Identifier must be a canonical ULID string
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

// =============================================================================
// WeightKg
// =============================================================================

/// WeightKg represents a material weight in kilograms
///
/// # Invariants
/// - Must be >= 0 (a processing step can lose the whole batch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeightKg(Decimal);

impl WeightKg {
    /// Create a new WeightKg with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWeight` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::InvalidWeight(
                "Weight must be non-negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Create a zero weight (for initialization only)
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }
}

impl fmt::Display for WeightKg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ReferenceCode
// =============================================================================

/// ReferenceCode is the external label of a campaign (e.g. RC-2024-018)
///
/// # Invariants
/// - Must be non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Create a ReferenceCode, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns `DomainError::InvalidReferenceCode` if empty
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidReferenceCode(
                "Reference code must be non-empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// MaterialCode
// =============================================================================

/// MaterialCode classifies the polymer in a campaign (e.g. ABS, PET)
///
/// # Invariants
/// - Must be non-empty after trimming
/// - Stored uppercased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialCode(String);

impl MaterialCode {
    /// Create a MaterialCode, trimming and uppercasing
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMaterialCode` if empty
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidMaterialCode(
                "Material code must be non-empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // WeightKg tests
    #[test]
    fn test_weight_validation() {
        assert!(WeightKg::new(dec!(100.0)).is_ok());
        assert!(WeightKg::new(dec!(0.0)).is_ok());
        assert!(WeightKg::new(dec!(-0.001)).is_err());
    }

    #[test]
    fn test_weight_as_decimal() {
        let weight = WeightKg::new(dec!(95.5)).unwrap();
        assert_eq!(weight.as_decimal(), dec!(95.5));
    }

    #[test]
    fn test_weight_serde_as_string() {
        let weight = WeightKg::new(dec!(95.5)).unwrap();
        let json = serde_json::to_string(&weight).unwrap();
        assert_eq!(json, "\"95.5\"");

        let back: WeightKg = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weight);
    }

    #[test]
    fn test_weight_ordering() {
        let lighter = WeightKg::new(dec!(95)).unwrap();
        let heavier = WeightKg::new(dec!(100)).unwrap();
        assert!(lighter < heavier);
    }

    // ReferenceCode tests
    #[test]
    fn test_reference_code_trims() {
        let code = ReferenceCode::new("  RC-2024-018  ").unwrap();
        assert_eq!(code.as_str(), "RC-2024-018");
    }

    #[test]
    fn test_reference_code_preserves_case() {
        let code = ReferenceCode::new("rc-2024-018b").unwrap();
        assert_eq!(code.as_str(), "rc-2024-018b");
    }

    #[test]
    fn test_reference_code_rejects_empty() {
        assert!(ReferenceCode::new("").is_err());
        assert!(ReferenceCode::new("   ").is_err());
    }

    // MaterialCode tests
    #[test]
    fn test_material_code_uppercases() {
        let code = MaterialCode::new("abs").unwrap();
        assert_eq!(code.as_str(), "ABS");
    }

    #[test]
    fn test_material_code_rejects_empty() {
        assert!(MaterialCode::new("").is_err());
        assert!(MaterialCode::new("  ").is_err());
    }
}
