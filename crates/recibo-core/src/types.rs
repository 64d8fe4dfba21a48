//! # Domain Types
//!
//! The warranty receipt record and the company profile stamped onto it.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │  NewWarrantyReceipt  │        │      WarrantyReceipt         │      │
//! │  │  ──────────────────  │  store │  ──────────────────────────  │      │
//! │  │  customer, device,   │ ─────► │  id (UUID, store-assigned)   │      │
//! │  │  sale, issuance,     │ create │  created_at (store-assigned) │      │
//! │  │  company fields      │        │  data: NewWarrantyReceipt    │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │           ▲                                                             │
//! │           │ flatten                                                     │
//! │  ┌────────┴─────────────┐                                               │
//! │  │   CompanyProfile     │  issuing shop, same on every receipt         │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Field names are camelCase and `saleValue` is a number of reais, matching
//! the backups produced by the web application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::warranty::{parse_canonical, DayConvention, ParsedWarranty};

// =============================================================================
// Company Profile
// =============================================================================

/// The issuing company, printed in the receipt header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyProfile {
    #[serde(rename = "companyName")]
    pub name: String,

    #[serde(rename = "companyLegalName")]
    pub legal_name: String,

    /// Masked CNPJ as printed (`06.227.875/0001-07`).
    #[serde(rename = "companyCNPJ")]
    pub cnpj: String,

    #[serde(rename = "companyStateRegistration")]
    pub state_registration: String,

    #[serde(rename = "companyAddress")]
    pub address: String,

    #[serde(rename = "companyPhone1")]
    pub phone1: String,

    #[serde(rename = "companyPhone2")]
    pub phone2: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Telecell Magazine".to_string(),
            legal_name: "E dos Santos Silva".to_string(),
            cnpj: "06.227.875/0001-07".to_string(),
            state_registration: "0311807-01".to_string(),
            address: "Galeria Eco Center – Loja 01, Centro, Petrolina – PE".to_string(),
            phone1: "(87) 3862-0240".to_string(),
            phone2: "(87) 9 8877-5727".to_string(),
        }
    }
}

// =============================================================================
// New Warranty Receipt
// =============================================================================

/// A receipt as submitted for storage: everything except the identifier and
/// the creation timestamp, which the store assigns.
///
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct NewWarrantyReceipt {
    // Customer
    pub customer_name: String,
    /// Masked CPF as typed.
    pub cpf: String,
    pub phone: String,
    pub city: String,
    pub state: String,

    // Device
    pub product_type: String,
    pub brand: String,
    pub model: String,
    pub rom_memory: String,
    pub ram_memory: String,
    pub imei1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub imei2: Option<String>,

    // Sale
    #[serde(with = "crate::money::as_reais")]
    #[ts(type = "number")]
    pub sale_value: Money,
    pub sale_value_in_words: String,
    /// Canonical `"<months> meses (<days> dias)"` string.
    pub warranty_duration: String,

    // Issuance
    pub issue_city: String,
    pub issue_date: String,
    pub signature_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub observations: Option<String>,

    #[serde(flatten)]
    pub company: CompanyProfile,
}

impl NewWarrantyReceipt {
    /// Trims text fields and turns blank optional fields into `None`.
    ///
    /// Applied by the store before every insert.
    pub fn sanitized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        for field in [
            &mut self.customer_name,
            &mut self.cpf,
            &mut self.phone,
            &mut self.city,
            &mut self.state,
            &mut self.product_type,
            &mut self.brand,
            &mut self.model,
            &mut self.rom_memory,
            &mut self.ram_memory,
            &mut self.imei1,
            &mut self.issue_city,
            &mut self.issue_date,
            &mut self.signature_name,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }

        self.imei2 = blank_to_none(self.imei2);
        self.observations = blank_to_none(self.observations);
        self
    }

    /// Months and disclaimer text for display, recomputed from the stored
    /// duration string.
    pub fn warranty(&self, convention: DayConvention) -> ParsedWarranty {
        parse_canonical(&self.warranty_duration, convention)
    }
}

// =============================================================================
// Warranty Receipt
// =============================================================================

/// A stored receipt.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarrantyReceipt {
    /// Store-assigned identifier (UUID v4).
    pub id: String,

    /// When the receipt was stored.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub data: NewWarrantyReceipt,
}

impl WarrantyReceipt {
    /// Whether any searchable field contains `term` (case-insensitive).
    ///
    /// Searches customer name, CPF (with or without mask), IMEIs, brand and
    /// model.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let term_digits: String = term.chars().filter(|c| c.is_ascii_digit()).collect();
        let cpf_digits: String = self.data.cpf.chars().filter(|c| c.is_ascii_digit()).collect();

        let text_fields = [
            &self.data.customer_name,
            &self.data.cpf,
            &self.data.brand,
            &self.data.model,
            &self.data.imei1,
        ];

        text_fields
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
            || self
                .data
                .imei2
                .as_deref()
                .is_some_and(|imei| imei.contains(&term))
            || (!term_digits.is_empty() && term_digits == term && cpf_digits.contains(&term_digits))
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A complete, valid receipt.
    pub fn sample_receipt() -> NewWarrantyReceipt {
        NewWarrantyReceipt {
            customer_name: "Maria da Silva".to_string(),
            cpf: "529.982.247-25".to_string(),
            phone: "(87) 98877-5727".to_string(),
            city: "Petrolina".to_string(),
            state: "PE".to_string(),
            product_type: "Smartphone".to_string(),
            brand: "Samsung".to_string(),
            model: "Galaxy S24".to_string(),
            rom_memory: "256GB".to_string(),
            ram_memory: "8GB".to_string(),
            imei1: "352099001761481".to_string(),
            imei2: None,
            sale_value: Money::from_cents(150050),
            sale_value_in_words: "mil e quinhentos reais e cinquenta centavos".to_string(),
            warranty_duration: "12 meses (360 dias)".to_string(),
            issue_city: "Petrolina – PE".to_string(),
            issue_date: "17/10/2026".to_string(),
            signature_name: "Telecell Magazine".to_string(),
            observations: None,
            company: CompanyProfile::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
