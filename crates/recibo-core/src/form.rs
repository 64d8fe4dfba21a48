//! # Receipt Form
//!
//! The four-step receipt form as a value-level state machine. A frontend
//! holds one [`FormState`], mutates the draft as the user types and asks the
//! state to move forward or back.
//!
//! ## Steps
//! ```text
//! ┌──────────────┐ advance ┌──────────────┐ advance ┌──────────────┐ advance ┌──────────────┐
//! │ 1. Customer  │ ──────► │ 2. Device    │ ──────► │ 3. Sale      │ ──────► │ 4. Issuance  │
//! │ name, CPF,   │ ◄────── │ brand, model │ ◄────── │ value,       │ ◄────── │ city, date,  │
//! │ phone, city  │  back   │ ROM, RAM,    │  back   │ warranty     │  back   │ signature    │
//! └──────────────┘         │ IMEIs        │         └──────────────┘         └──────┬───────┘
//!                          └──────────────┘                                         │ finalize
//!                                                                                   ▼
//!                                                                        NewWarrantyReceipt
//! ```
//!
//! `advance` only moves when the current step is valid. `back` always moves.
//! Both saturate at the ends.
//!
//! Error messages are in Portuguese and keyed by the camelCase field name,
//! ready to be shown next to the input.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::phone::{format_phone, is_complete_phone};
use crate::taxpayer::{format_cpf, validate_cpf};
use crate::types::{CompanyProfile, NewWarrantyReceipt};
use crate::validation::{
    sanitize_imei, validate_imei, validate_issue_date, validate_sale_value, validate_state,
    IMEI_DIGITS, ISSUE_DATE_FORMAT,
};
use crate::warranty::{to_canonical, DayConvention};
use crate::{DEFAULT_WARRANTY_MONTHS, MAX_WARRANTY_MONTHS};

// =============================================================================
// Field Errors
// =============================================================================

/// Per-field error messages, keyed by camelCase field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Moves every message of `other` into `self`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

// =============================================================================
// Form Step
// =============================================================================

/// One page of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FormStep {
    Customer,
    Device,
    Sale,
    Issuance,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Customer,
        FormStep::Device,
        FormStep::Sale,
        FormStep::Issuance,
    ];

    /// 1-based position shown in the progress stepper.
    pub fn number(self) -> u8 {
        match self {
            FormStep::Customer => 1,
            FormStep::Device => 2,
            FormStep::Sale => 3,
            FormStep::Issuance => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(FormStep::Customer),
            2 => Some(FormStep::Device),
            3 => Some(FormStep::Sale),
            4 => Some(FormStep::Issuance),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::Customer => "Dados do Cliente",
            FormStep::Device => "Dados do Aparelho",
            FormStep::Sale => "Dados da Venda",
            FormStep::Issuance => "Emissão",
        }
    }

    /// The following step, saturating at [`FormStep::Issuance`].
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(FormStep::Issuance)
    }

    /// The preceding step, saturating at [`FormStep::Customer`].
    pub fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(FormStep::Customer)
    }

    pub fn is_last(self) -> bool {
        self == FormStep::Issuance
    }
}

// =============================================================================
// Receipt Draft
// =============================================================================

/// Everything the form collects, as typed.
///
/// Text stays raw until [`ReceiptDraft::finalize`]; the `set_*` helpers
/// apply the same input masks the form applies on every keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ReceiptDraft {
    // Step 1
    pub customer_name: String,
    pub cpf: String,
    pub phone: String,
    pub city: String,
    pub state: String,

    // Step 2
    pub product_type: String,
    pub brand: String,
    pub model: String,
    pub rom_memory: String,
    pub ram_memory: String,
    pub imei1: String,
    pub imei2: String,

    // Step 3
    pub sale_value: String,
    pub warranty_months: u32,
    pub observations: String,

    // Step 4
    pub issue_city: String,
    pub issue_date: String,
    pub signature_name: String,
}

impl Default for ReceiptDraft {
    fn default() -> Self {
        ReceiptDraft {
            customer_name: String::new(),
            cpf: String::new(),
            phone: String::new(),
            city: String::new(),
            state: "PE".to_string(),
            product_type: "Smartphone".to_string(),
            brand: String::new(),
            model: String::new(),
            rom_memory: String::new(),
            ram_memory: String::new(),
            imei1: String::new(),
            imei2: String::new(),
            sale_value: String::new(),
            warranty_months: DEFAULT_WARRANTY_MONTHS,
            observations: String::new(),
            issue_city: "Petrolina – PE".to_string(),
            issue_date: String::new(),
            signature_name: "Telecell Magazine".to_string(),
        }
    }
}

impl ReceiptDraft {
    /// A fresh draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        ReceiptDraft {
            issue_date: today.format(ISSUE_DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn set_cpf(&mut self, raw: &str) {
        self.cpf = format_cpf(raw);
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    pub fn set_imei1(&mut self, raw: &str) {
        self.imei1 = sanitize_imei(raw);
    }

    pub fn set_imei2(&mut self, raw: &str) {
        self.imei2 = sanitize_imei(raw);
    }

    /// Validates every step and builds the record to store.
    ///
    /// Derives `saleValueInWords` from the sale value and the canonical
    /// `warrantyDuration` string from the month count with `convention`.
    pub fn finalize(
        &self,
        company: &CompanyProfile,
        convention: DayConvention,
    ) -> Result<NewWarrantyReceipt, FieldErrors> {
        let mut errors = FieldErrors::new();
        for step in FormStep::ALL {
            if let Err(step_errors) = validate_step(step, self) {
                errors.merge(step_errors);
            }
        }
        errors.into_result()?;

        let sale_value = validate_sale_value(&self.sale_value).map_err(|_| {
            single_error("saleValue", "Valor da venda inválido")
        })?;
        let warranty_duration = to_canonical(self.warranty_months, convention)
            .map_err(|_| single_error("warrantyMonths", warranty_range_message()))?;

        let receipt = NewWarrantyReceipt {
            customer_name: self.customer_name.clone(),
            cpf: format_cpf(&self.cpf),
            phone: self.phone.clone(),
            city: self.city.clone(),
            state: self.state.trim().to_ascii_uppercase(),
            product_type: self.product_type.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            rom_memory: self.rom_memory.clone(),
            ram_memory: self.ram_memory.clone(),
            imei1: sanitize_imei(&self.imei1),
            imei2: Some(sanitize_imei(&self.imei2)),
            sale_value,
            sale_value_in_words: sale_value.to_words(),
            warranty_duration,
            issue_city: self.issue_city.clone(),
            issue_date: self.issue_date.clone(),
            signature_name: self.signature_name.clone(),
            observations: Some(self.observations.clone()),
            company: company.clone(),
        };

        Ok(receipt.sanitized())
    }
}

fn single_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field, message);
    errors
}

fn imei_length_message(slot: u8) -> String {
    format!("IMEI {} deve ter {} dígitos", slot, IMEI_DIGITS)
}

fn warranty_range_message() -> String {
    format!("Garantia deve ser entre 1 e {} meses", MAX_WARRANTY_MONTHS)
}

// =============================================================================
// Step Validation
// =============================================================================

/// Checks the fields belonging to `step`.
pub fn validate_step(step: FormStep, draft: &ReceiptDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut require = |field: &str, value: &str, message: &str| {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    };

    match step {
        FormStep::Customer => {
            require("customerName", &draft.customer_name, "Nome é obrigatório");
            require("cpf", &draft.cpf, "CPF é obrigatório");
            require("phone", &draft.phone, "Telefone é obrigatório");
            require("city", &draft.city, "Cidade é obrigatória");

            if !draft.cpf.trim().is_empty() && !validate_cpf(&draft.cpf) {
                errors.insert("cpf", "CPF inválido");
            }
            if !draft.phone.trim().is_empty() && !is_complete_phone(&draft.phone) {
                errors.insert("phone", "Telefone inválido");
            }
            match validate_state(&draft.state) {
                Ok(_) => {}
                Err(ValidationError::Required { .. }) => {
                    errors.insert("state", "Estado é obrigatório")
                }
                Err(_) => errors.insert("state", "Estado inválido"),
            }
        }
        FormStep::Device => {
            require("brand", &draft.brand, "Marca é obrigatória");
            require("model", &draft.model, "Modelo é obrigatório");
            require("romMemory", &draft.rom_memory, "Memória ROM é obrigatória");
            require("ramMemory", &draft.ram_memory, "Memória RAM é obrigatória");

            match validate_imei("imei1", &draft.imei1) {
                Ok(_) => {}
                Err(ValidationError::Required { .. }) => {
                    errors.insert("imei1", "IMEI 1 é obrigatório")
                }
                Err(_) => errors.insert("imei1", imei_length_message(1)),
            }
            if !draft.imei2.trim().is_empty() && validate_imei("imei2", &draft.imei2).is_err() {
                errors.insert("imei2", imei_length_message(2));
            }
        }
        FormStep::Sale => {
            match validate_sale_value(&draft.sale_value) {
                Ok(_) => {}
                Err(ValidationError::Required { .. }) => {
                    errors.insert("saleValue", "Valor da venda é obrigatório")
                }
                Err(ValidationError::MustBePositive { .. })
                | Err(ValidationError::OutOfRange { .. }) => {
                    errors.insert("saleValue", "Valor deve ser maior que zero")
                }
                Err(_) => errors.insert("saleValue", "Valor da venda inválido"),
            }
            if !(1..=MAX_WARRANTY_MONTHS).contains(&draft.warranty_months) {
                errors.insert("warrantyMonths", warranty_range_message());
            }
        }
        FormStep::Issuance => {
            require("issueCity", &draft.issue_city, "Cidade de emissão é obrigatória");
            require("signatureName", &draft.signature_name, "Assinatura é obrigatória");

            match validate_issue_date(&draft.issue_date) {
                Ok(_) => {}
                Err(ValidationError::Required { .. }) => {
                    errors.insert("issueDate", "Data de emissão é obrigatória")
                }
                Err(_) => errors.insert("issueDate", "Data de emissão inválida"),
            }
        }
    }

    errors.into_result()
}

// =============================================================================
// Form State
// =============================================================================

/// Current step plus the draft being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormState {
    pub step: FormStep,
    pub draft: ReceiptDraft,
}

impl FormState {
    /// Starts at step 1.
    pub fn new(draft: ReceiptDraft) -> Self {
        FormState {
            step: FormStep::Customer,
            draft,
        }
    }

    /// Validates the current step and returns the state one step forward.
    /// On the last step a valid draft stays where it is.
    pub fn advance(&self) -> Result<FormState, FieldErrors> {
        validate_step(self.step, &self.draft)?;
        Ok(FormState {
            step: self.step.next(),
            draft: self.draft.clone(),
        })
    }

    /// The state one step back. Never validates.
    pub fn back(&self) -> FormState {
        FormState {
            step: self.step.previous(),
            draft: self.draft.clone(),
        }
    }

    /// Validates the current step, as done before showing the preview.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_step(self.step, &self.draft)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ReceiptDraft::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn complete_draft() -> ReceiptDraft {
        let mut draft = ReceiptDraft::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        draft.customer_name = "Maria da Silva".to_string();
        draft.set_cpf("52998224725");
        draft.set_phone("87988775727");
        draft.city = "Petrolina".to_string();
        draft.brand = "Samsung".to_string();
        draft.model = "Galaxy S24".to_string();
        draft.rom_memory = "256GB".to_string();
        draft.ram_memory = "8GB".to_string();
        draft.set_imei1("35-209900-176148-1");
        draft.sale_value = "1.500,50".to_string();
        draft
    }

    #[test]
    fn test_defaults() {
        let draft = ReceiptDraft::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(draft.state, "PE");
        assert_eq!(draft.product_type, "Smartphone");
        assert_eq!(draft.warranty_months, 12);
        assert_eq!(draft.issue_city, "Petrolina – PE");
        assert_eq!(draft.issue_date, "05/01/2026");
        assert_eq!(draft.signature_name, "Telecell Magazine");
    }

    #[test]
    fn test_step_one_messages() {
        let errors = validate_step(FormStep::Customer, &ReceiptDraft::default()).unwrap_err();
        assert_eq!(errors.get("customerName"), Some("Nome é obrigatório"));
        assert_eq!(errors.get("cpf"), Some("CPF é obrigatório"));
        assert_eq!(errors.get("phone"), Some("Telefone é obrigatório"));
        assert_eq!(errors.get("city"), Some("Cidade é obrigatória"));
        assert!(!errors.contains("state"));
    }

    #[test]
    fn test_invalid_cpf_and_state() {
        let mut draft = complete_draft();
        draft.cpf = "529.982.247-24".to_string();
        draft.state = "XX".to_string();

        let errors = validate_step(FormStep::Customer, &draft).unwrap_err();
        assert_eq!(errors.get("cpf"), Some("CPF inválido"));
        assert_eq!(errors.get("state"), Some("Estado inválido"));

        draft.state = String::new();
        let errors = validate_step(FormStep::Customer, &draft).unwrap_err();
        assert_eq!(errors.get("state"), Some("Estado é obrigatório"));
    }

    #[test]
    fn test_step_two_messages() {
        let errors = validate_step(FormStep::Device, &ReceiptDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("imei1"), Some("IMEI 1 é obrigatório"));
        assert_eq!(errors.get("romMemory"), Some("Memória ROM é obrigatória"));
    }

    #[test]
    fn test_imei_must_have_fifteen_digits() {
        let mut draft = complete_draft();
        assert!(validate_step(FormStep::Device, &draft).is_ok());

        draft.imei1 = "123".to_string();
        draft.imei2 = "3520990017614".to_string();
        let errors = validate_step(FormStep::Device, &draft).unwrap_err();
        assert_eq!(errors.get("imei1"), Some("IMEI 1 deve ter 15 dígitos"));
        assert_eq!(errors.get("imei2"), Some("IMEI 2 deve ter 15 dígitos"));

        draft.imei1 = "352099001761481".to_string();
        draft.imei2 = "  ".to_string();
        assert!(validate_step(FormStep::Device, &draft).is_ok());

        draft.imei1 = "123".to_string();
        assert!(draft.finalize(&CompanyProfile::default(), DayConvention::Commercial).is_err());
    }

    #[test]
    fn test_incomplete_phone_rejected() {
        let mut draft = complete_draft();
        draft.set_phone("8798877");
        let errors = validate_step(FormStep::Customer, &draft).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Telefone inválido"));

        draft.set_phone("8738620240");
        assert!(validate_step(FormStep::Customer, &draft).is_ok());
    }

    #[test]
    fn test_step_three_messages() {
        let mut draft = complete_draft();

        draft.sale_value = "  ".to_string();
        let errors = validate_step(FormStep::Sale, &draft).unwrap_err();
        assert_eq!(errors.get("saleValue"), Some("Valor da venda é obrigatório"));

        draft.sale_value = "0,00".to_string();
        let errors = validate_step(FormStep::Sale, &draft).unwrap_err();
        assert_eq!(errors.get("saleValue"), Some("Valor deve ser maior que zero"));

        draft.sale_value = "-10".to_string();
        let errors = validate_step(FormStep::Sale, &draft).unwrap_err();
        assert_eq!(errors.get("saleValue"), Some("Valor deve ser maior que zero"));

        draft.sale_value = "dez".to_string();
        let errors = validate_step(FormStep::Sale, &draft).unwrap_err();
        assert_eq!(errors.get("saleValue"), Some("Valor da venda inválido"));

        draft.sale_value = "100".to_string();
        draft.warranty_months = 0;
        let errors = validate_step(FormStep::Sale, &draft).unwrap_err();
        assert!(errors.contains("warrantyMonths"));
    }

    #[test]
    fn test_step_four_messages() {
        let mut draft = complete_draft();
        draft.issue_date = "2026-10-17".to_string();
        draft.signature_name = String::new();

        let errors = validate_step(FormStep::Issuance, &draft).unwrap_err();
        assert_eq!(errors.get("issueDate"), Some("Data de emissão inválida"));
        assert_eq!(errors.get("signatureName"), Some("Assinatura é obrigatória"));
    }

    #[test]
    fn test_advance_blocks_on_invalid_step() {
        let state = FormState::default();
        let errors = state.advance().unwrap_err();
        assert!(errors.contains("customerName"));
        assert_eq!(state.step, FormStep::Customer);
    }

    #[test]
    fn test_walk_forward_and_back() {
        let mut state = FormState::new(complete_draft());

        for expected in [FormStep::Device, FormStep::Sale, FormStep::Issuance, FormStep::Issuance] {
            state = state.advance().unwrap();
            assert_eq!(state.step, expected);
        }

        for expected in [FormStep::Sale, FormStep::Device, FormStep::Customer, FormStep::Customer] {
            state = state.back();
            assert_eq!(state.step, expected);
        }
    }

    #[test]
    fn test_back_does_not_validate() {
        let state = FormState {
            step: FormStep::Sale,
            draft: ReceiptDraft::default(),
        };
        assert_eq!(state.back().step, FormStep::Device);
    }

    #[test]
    fn test_step_numbers() {
        for step in FormStep::ALL {
            assert_eq!(FormStep::from_number(step.number()), Some(step));
        }
        assert_eq!(FormStep::from_number(0), None);
        assert_eq!(FormStep::from_number(5), None);
        assert!(FormStep::Issuance.is_last());
    }

    #[test]
    fn test_finalize_builds_receipt() {
        let receipt = complete_draft()
            .finalize(&CompanyProfile::default(), DayConvention::Commercial)
            .unwrap();

        assert_eq!(receipt.cpf, "529.982.247-25");
        assert_eq!(receipt.phone, "(87) 98877-5727");
        assert_eq!(receipt.imei1, "352099001761481");
        assert_eq!(receipt.imei2, None);
        assert_eq!(receipt.observations, None);
        assert_eq!(receipt.sale_value, Money::from_cents(150050));
        assert_eq!(
            receipt.sale_value_in_words,
            "mil e quinhentos reais e cinquenta centavos"
        );
        assert_eq!(receipt.warranty_duration, "12 meses (360 dias)");
        assert_eq!(receipt.company.cnpj, "06.227.875/0001-07");
    }

    #[test]
    fn test_finalize_uses_day_convention() {
        let mut draft = complete_draft();
        draft.warranty_months = 6;
        let receipt = draft
            .finalize(&CompanyProfile::default(), DayConvention::AverageMonth)
            .unwrap();
        assert_eq!(receipt.warranty_duration, "6 meses (182 dias)");
    }

    #[test]
    fn test_finalize_collects_every_step() {
        let errors = ReceiptDraft::default()
            .finalize(&CompanyProfile::default(), DayConvention::Commercial)
            .unwrap_err();

        assert!(errors.contains("customerName"));
        assert!(errors.contains("brand"));
        assert!(errors.contains("saleValue"));
        assert!(errors.contains("issueDate"));
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("cpf", "CPF inválido");
        errors.insert("cpf", "ignored");
        errors.insert("city", "Cidade é obrigatória");
        assert_eq!(errors.to_string(), "city: Cidade é obrigatória; cpf: CPF inválido");
    }
}
