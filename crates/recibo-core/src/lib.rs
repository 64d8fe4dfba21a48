//! # recibo-core: Warranty Receipt Logic
//!
//! Everything about a warranty receipt that does not touch a disk or a
//! network: field masks and validators, the amount-in-words text, the
//! warranty duration string, the form state machine and the backup file
//! format.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Recibo de Garantia Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend / recibo CLI                        │   │
//! │  │   Cliente ──► Aparelho ──► Venda ──► Emissão ──► Documento     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ recibo-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ taxpayer │ │  words   │ │ warranty │ │   form   │          │   │
//! │  │   │ CPF/CNPJ │ │ por ext. │ │ meses /  │ │ 4 steps  │          │   │
//! │  │   │          │ │          │ │ dias     │ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │  phone   │ │  types   │ │  backup  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 recibo-db (Record Store)                        │   │
//! │  │        SQLite receipts, backup export/import, CLI               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`taxpayer`] - CPF/CNPJ check digits and display masks
//! - [`words`] - Amounts written out in Brazilian Portuguese
//! - [`warranty`] - `"12 meses (360 dias)"` strings, both directions
//! - [`money`] - Money in centavos
//! - [`phone`] - Phone display mask
//! - [`validation`] - Single-field rules
//! - [`form`] - Step-by-step form validation
//! - [`types`] - Receipt and company records
//! - [`backup`] - Backup file envelope
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use recibo_core::money::Money;
//! use recibo_core::taxpayer::{validate, TaxpayerKind};
//! use recibo_core::warranty::{to_canonical, DayConvention};
//!
//! assert!(validate(TaxpayerKind::Cnpj, "06.227.875/0001-07"));
//!
//! let value = Money::parse_brl("1.500,50").unwrap();
//! assert_eq!(value.to_words(), "mil e quinhentos reais e cinquenta centavos");
//!
//! assert_eq!(to_canonical(12, DayConvention::Commercial).unwrap(), "12 meses (360 dias)");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod form;
pub mod money;
pub mod phone;
pub mod taxpayer;
pub mod types;
pub mod validation;
pub mod warranty;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{BackupError, ValidationError};
pub use form::{FieldErrors, FormState, FormStep, ReceiptDraft};
pub use money::Money;
pub use taxpayer::{TaxpayerId, TaxpayerKind};
pub use types::*;
pub use warranty::{DayConvention, WarrantyDuration};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Warranty used when the form is opened and when a stored duration string
/// cannot be read.
pub const DEFAULT_WARRANTY_MONTHS: u32 = 12;

/// Longest warranty the form accepts (ten years).
pub const MAX_WARRANTY_MONTHS: u32 = 120;

/// `version` written into backup files.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";
