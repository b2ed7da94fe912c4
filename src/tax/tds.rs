//! TDS (Tax Deducted at Source) computation for Indian withholding compliance

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Residency status of the deductee, which selects the applicable section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Residency {
    /// Resident deductee
    Resident,
    /// Non-resident deductee
    NonResident,
}

/// One section of the TDS section master, e.g. 194C or 194J
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdsSection {
    /// Section code, e.g. "194C"
    pub code: String,
    /// Section name/description
    pub name: String,
    /// Withholding rate percentage (e.g. 10.0 for 10%)
    pub rate: BigDecimal,
    /// Residency this section applies to
    pub residency: Residency,
}

impl TdsSection {
    /// Create a new section entry
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        rate: BigDecimal,
        residency: Residency,
    ) -> Result<Self, TdsError> {
        if rate < BigDecimal::from(0) || rate > BigDecimal::from(100) {
            return Err(TdsError::InvalidRate(format!(
                "TDS rate must be between 0 and 100, got {}",
                rate
            )));
        }
        Ok(Self {
            code: code.into(),
            name: name.into(),
            rate,
            residency,
        })
    }
}

/// Computed withholding breakdown for one payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdsDeduction {
    /// Payment amount before withholding
    pub base_amount: BigDecimal,
    /// Section code applied
    pub section_code: String,
    /// Rate percentage applied
    pub rate: BigDecimal,
    /// Amount withheld
    pub tds_amount: BigDecimal,
    /// Amount payable after withholding
    pub net_payable: BigDecimal,
}

/// TDS calculator over a static section master.
///
/// The section table is configuration fed in by the caller; the calculator
/// never looks rates up anywhere else.
#[derive(Debug, Default)]
pub struct TdsCalculator {
    sections: HashMap<String, TdsSection>,
}

impl TdsCalculator {
    /// Create an empty calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator preloaded with a section master
    pub fn with_sections(sections: Vec<TdsSection>) -> Self {
        let mut calculator = Self::new();
        for section in sections {
            calculator.register_section(section);
        }
        calculator
    }

    /// Register or replace a section, keyed by its code
    pub fn register_section(&mut self, section: TdsSection) {
        self.sections.insert(section.code.clone(), section);
    }

    /// Look up a section by code
    pub fn section(&self, code: &str) -> Option<&TdsSection> {
        self.sections.get(code)
    }

    /// Compute the deduction for a payment under the given section
    pub fn deduction_for(
        &self,
        code: &str,
        base_amount: BigDecimal,
    ) -> Result<TdsDeduction, TdsError> {
        let section = self
            .sections
            .get(code)
            .ok_or_else(|| TdsError::SectionNotFound(code.to_string()))?;

        let tds_amount = (&base_amount * &section.rate) / BigDecimal::from(100);
        let net_payable = &base_amount - &tds_amount;

        Ok(TdsDeduction {
            base_amount,
            section_code: section.code.clone(),
            rate: section.rate.clone(),
            tds_amount,
            net_payable,
        })
    }
}

/// TDS-related errors
#[derive(Debug, thiserror::Error)]
pub enum TdsError {
    #[error("TDS section not found: {0}")]
    SectionNotFound(String),
    #[error("Invalid TDS rate: {0}")]
    InvalidRate(String),
}
