//! Fail-fast rule sets for the bank and telecom forms.
//!
//! Rules run in a fixed order and stop at the first violation; only that
//! rule's message is reported. A successful run yields a typed `Valid*`
//! value, which is the only input the payload mapper accepts.

use serde::Serialize;
use thiserror::Error;

use super::accessor::{Parsed, Selection};
use super::snapshot::{BankSnapshot, FormSnapshot, TelecomSnapshot};

pub const ALL_FIELDS_REQUIRED: &str = "All fields must be filled out.";
pub const CREDIT_SCORE_RANGE: &str = "Credit Score must be between 300 and 850.";
pub const AGE_RANGE: &str = "Age must be between 18 and 100.";
pub const SALARY_NEGATIVE: &str = "Salary cannot be negative.";
pub const POINTS_NEGATIVE: &str = "Points Earned cannot be negative.";
pub const BALANCE_INVALID: &str = "Balance must be a valid number greater than or equal to 0.";
pub const TENURE_PRODUCTS_INVALID: &str = "Tenure and Number of Products must be valid numbers.";
pub const BANK_TOTAL_CHARGES_INVALID: &str =
    "Total Charges must be a valid number greater than or equal to 0.";
pub const YES_NO_REQUIRED: &str = "Please select an option for all Yes/No questions.";
pub const MONTHLY_CHARGES_INVALID: &str =
    "Monthly Charges must be a valid number and cannot be negative.";
pub const ACCOUNT_CALLS_INVALID: &str = "Account Length and Service Calls must be valid numbers.";
pub const TELECOM_TOTAL_CHARGES_INVALID: &str =
    "Total Charges must be a valid number and cannot be negative.";

/// A violated form rule, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Accept/reject summary of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub reason: Option<String>,
}

impl<T> From<&Result<T, ValidationError>> for ValidationResult {
    fn from(result: &Result<T, ValidationError>) -> Self {
        match result {
            Ok(_) => Self {
                ok: true,
                reason: None,
            },
            Err(err) => Self {
                ok: false,
                reason: Some(err.message.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidBank {
    pub credit_score: i64,
    pub age: i64,
    pub balance: f64,
    pub salary: f64,
    pub points_earned: i64,
    pub gender: String,
    pub tenure: i64,
    pub products: i64,
    pub card_type: String,
    pub satisfaction_score: i64,
    pub total_charges: Option<f64>,
    pub credit_card: String,
    pub active_member: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidTelecom {
    pub account_length: i64,
    pub service_type: String,
    pub contract_type: String,
    pub monthly_charges: f64,
    pub service_calls: i64,
    pub total_charges: f64,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub gender: String,
    pub senior_citizen: String,
    pub partner: String,
    pub dependents: String,
    pub paperless_billing: String,
    pub phone_service: String,
    pub multiple_lines: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidForm {
    Bank(ValidBank),
    Telecom(ValidTelecom),
}

pub fn validate(snapshot: &FormSnapshot) -> Result<ValidForm, ValidationError> {
    match snapshot {
        FormSnapshot::Bank(bank) => validate_bank(bank).map(ValidForm::Bank),
        FormSnapshot::Telecom(telecom) => validate_telecom(telecom).map(ValidForm::Telecom),
    }
}

pub fn validate_bank(s: &BankSnapshot) -> Result<ValidBank, ValidationError> {
    let filled = s.credit_score.is_filled()
        && s.age.is_filled()
        && s.balance.is_value()
        && s.salary.is_value()
        && s.points_earned.is_filled()
        && s.gender.is_some()
        && s.tenure.is_filled()
        && s.products.is_filled()
        && s.card_type.is_some()
        && s.satisfaction_score.is_filled()
        && s.credit_card.is_selected()
        && s.active_member.is_selected();
    if !filled {
        return Err(ValidationError::new(ALL_FIELDS_REQUIRED));
    }

    let credit_score = number(&s.credit_score, CREDIT_SCORE_RANGE)?;
    if !(300..=850).contains(&credit_score) {
        return Err(ValidationError::new(CREDIT_SCORE_RANGE));
    }

    let age = number(&s.age, AGE_RANGE)?;
    if !(18..=100).contains(&age) {
        return Err(ValidationError::new(AGE_RANGE));
    }

    let salary = number(&s.salary, SALARY_NEGATIVE)?;
    if salary < 0.0 {
        return Err(ValidationError::new(SALARY_NEGATIVE));
    }

    let points_earned = number(&s.points_earned, POINTS_NEGATIVE)?;
    if points_earned < 0 {
        return Err(ValidationError::new(POINTS_NEGATIVE));
    }

    let balance = number(&s.balance, BALANCE_INVALID)?;
    if balance < 0.0 {
        return Err(ValidationError::new(BALANCE_INVALID));
    }

    let tenure = number(&s.tenure, TENURE_PRODUCTS_INVALID)?;
    let products = number(&s.products, TENURE_PRODUCTS_INVALID)?;

    let total_charges = match s.total_charges {
        Parsed::Missing => None,
        Parsed::Value(value) if value >= 0.0 => Some(value),
        _ => return Err(ValidationError::new(BANK_TOTAL_CHARGES_INVALID)),
    };

    Ok(ValidBank {
        credit_score,
        age,
        balance,
        salary,
        points_earned,
        gender: text(&s.gender)?,
        tenure,
        products,
        card_type: text(&s.card_type)?,
        satisfaction_score: number(&s.satisfaction_score, ALL_FIELDS_REQUIRED)?,
        total_charges,
        credit_card: selected(&s.credit_card, ALL_FIELDS_REQUIRED)?,
        active_member: selected(&s.active_member, ALL_FIELDS_REQUIRED)?,
    })
}

pub fn validate_telecom(s: &TelecomSnapshot) -> Result<ValidTelecom, ValidationError> {
    let filled = s.account_length.is_filled()
        && s.service_type.is_some()
        && s.contract_type.is_some()
        && s.monthly_charges.is_value()
        && s.service_calls.is_filled()
        && s.gender.is_some();
    if !filled {
        return Err(ValidationError::new(ALL_FIELDS_REQUIRED));
    }

    let yes_no = [
        &s.online_security,
        &s.online_backup,
        &s.device_protection,
        &s.tech_support,
        &s.streaming_tv,
        &s.streaming_movies,
        &s.senior_citizen,
        &s.partner,
        &s.dependents,
    ];
    if !yes_no.iter().all(|group| group.is_selected()) {
        return Err(ValidationError::new(YES_NO_REQUIRED));
    }

    let monthly_charges = number(&s.monthly_charges, MONTHLY_CHARGES_INVALID)?;
    if monthly_charges < 0.0 {
        return Err(ValidationError::new(MONTHLY_CHARGES_INVALID));
    }

    let account_length = number(&s.account_length, ACCOUNT_CALLS_INVALID)?;
    let service_calls = number(&s.service_calls, ACCOUNT_CALLS_INVALID)?;

    let total_charges = number(&s.total_charges, TELECOM_TOTAL_CHARGES_INVALID)?;
    if total_charges < 0.0 {
        return Err(ValidationError::new(TELECOM_TOTAL_CHARGES_INVALID));
    }

    Ok(ValidTelecom {
        account_length,
        service_type: text(&s.service_type)?,
        contract_type: text(&s.contract_type)?,
        monthly_charges,
        service_calls,
        total_charges,
        online_security: selected(&s.online_security, YES_NO_REQUIRED)?,
        online_backup: selected(&s.online_backup, YES_NO_REQUIRED)?,
        device_protection: selected(&s.device_protection, YES_NO_REQUIRED)?,
        tech_support: selected(&s.tech_support, YES_NO_REQUIRED)?,
        streaming_tv: selected(&s.streaming_tv, YES_NO_REQUIRED)?,
        streaming_movies: selected(&s.streaming_movies, YES_NO_REQUIRED)?,
        gender: text(&s.gender)?,
        senior_citizen: selected(&s.senior_citizen, YES_NO_REQUIRED)?,
        partner: selected(&s.partner, YES_NO_REQUIRED)?,
        dependents: selected(&s.dependents, YES_NO_REQUIRED)?,
        paperless_billing: s.paperless_billing.clone(),
        phone_service: s.phone_service.clone(),
        multiple_lines: s.multiple_lines.clone(),
        payment_method: s.payment_method.clone(),
    })
}

fn number<T: Copy>(parsed: &Parsed<T>, message: &str) -> Result<T, ValidationError> {
    parsed.value().ok_or_else(|| ValidationError::new(message))
}

fn text(value: &Option<String>) -> Result<String, ValidationError> {
    value
        .clone()
        .ok_or_else(|| ValidationError::new(ALL_FIELDS_REQUIRED))
}

fn selected(selection: &Selection, message: &str) -> Result<String, ValidationError> {
    match selection {
        Selection::Selected(value) => Ok(value.clone()),
        Selection::NotSelected => Err(ValidationError::new(message)),
    }
}
