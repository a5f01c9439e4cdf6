//! Static field catalogs for the two churn forms.
//!
//! Each form owns its own identifier namespace: the telecom `gender` field is
//! unrelated to the bank `gender` field even though both share an id.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::format_number;

/// The two forms managed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormId {
    Bank,
    Telecom,
}

impl FormId {
    pub const ALL: [FormId; 2] = [FormId::Bank, FormId::Telecom];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormId::Bank => "bank",
            FormId::Telecom => "telecom",
        }
    }

    /// Human readable title used in headers and log lines.
    pub fn title(&self) -> &'static str {
        match self {
            FormId::Bank => "Bank Churn",
            FormId::Telecom => "Telecom Churn",
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self {
            FormId::Bank => BANK_FIELDS,
            FormId::Telecom => TELECOM_FIELDS,
        }
    }

    /// Looks up a field of this form by id.
    pub fn field(&self, id: &str) -> Option<&'static FormField> {
        let index = match self {
            FormId::Bank => &*BANK_INDEX,
            FormId::Telecom => &*TELECOM_INDEX,
        };
        index.get(id).map(|position| &self.fields()[*position])
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bank" | "form1" => Ok(FormId::Bank),
            "telecom" | "form2" => Ok(FormId::Telecom),
            other => Err(format!("Unknown form `{other}` (expected bank or telecom)")),
        }
    }
}

/// Inclusive numeric bounds declared on a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}..{}", format_number(min), format_number(max)),
            (Some(min), None) => write!(f, ">= {}", format_number(min)),
            (None, Some(max)) => write!(f, "<= {}", format_number(max)),
            (None, None) => f.write_str("any"),
        }
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Choice(&'static [&'static str]),
    YesNo,
}

impl FieldKind {
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Integer => "integer".into(),
            FieldKind::Decimal => "decimal".into(),
            FieldKind::Choice(options) => format!("one of: {}", options.join(", ")),
            FieldKind::YesNo => "Yes / No".into(),
        }
    }
}

/// Declarative description of a single form input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub bounds: Option<Bounds>,
    pub required: bool,
}

impl FormField {
    const fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            bounds: None,
            required: true,
        }
    }

    const fn bounded(self, bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..self
        }
    }

    const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

pub const YES: &str = "Yes";
pub const NO: &str = "No";

pub const GENDERS: &[&str] = &["Male", "Female"];
pub const CARD_TYPES: &[&str] = &["DIAMOND", "GOLD", "SILVER", "PLATINUM"];
pub const INTERNET_SERVICES: &[&str] = &["DSL", "Fiber optic", "No"];
pub const CONTRACTS: &[&str] = &["Month-to-month", "One year", "Two year"];
pub const PAYMENT_METHODS: &[&str] = &[
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

/// Readout element mirroring the satisfaction slider.
pub const SATISFACTION_READOUT: &str = "satisfactionValue";

pub static BANK_FIELDS: &[FormField] = &[
    FormField::new("creditScore", "Credit Score", FieldKind::Integer)
        .bounded(Bounds::between(300.0, 850.0)),
    FormField::new("age", "Age", FieldKind::Integer).bounded(Bounds::between(18.0, 100.0)),
    FormField::new("gender", "Gender", FieldKind::Choice(GENDERS)),
    FormField::new("tenure", "Tenure", FieldKind::Integer).bounded(Bounds::between(0.0, 10.0)),
    FormField::new("balance", "Balance", FieldKind::Decimal).bounded(Bounds::at_least(0.0)),
    FormField::new("products", "Number of Products", FieldKind::Integer)
        .bounded(Bounds::between(1.0, 4.0)),
    FormField::new("creditCard", "Has Credit Card", FieldKind::YesNo),
    FormField::new("activeMember", "Is Active Member", FieldKind::YesNo),
    FormField::new("salary", "Estimated Salary", FieldKind::Decimal)
        .bounded(Bounds::at_least(0.0)),
    FormField::new("satisfactionScore", "Satisfaction Score", FieldKind::Integer)
        .bounded(Bounds::between(1.0, 5.0)),
    FormField::new("cardType", "Card Type", FieldKind::Choice(CARD_TYPES)),
    FormField::new("pointsEarned", "Points Earned", FieldKind::Integer)
        .bounded(Bounds::at_least(0.0)),
    FormField::new("totalCharges", "Total Charges", FieldKind::Decimal)
        .bounded(Bounds::at_least(0.0))
        .optional(),
];

pub static TELECOM_FIELDS: &[FormField] = &[
    FormField::new("accountLength", "Account Length", FieldKind::Integer)
        .bounded(Bounds::between(0.0, 72.0)),
    FormField::new("serviceType", "Service Type", FieldKind::Choice(INTERNET_SERVICES)),
    FormField::new("contractType", "Contract Type", FieldKind::Choice(CONTRACTS)),
    FormField::new("monthlyCharges", "Monthly Charges", FieldKind::Decimal)
        .bounded(Bounds::at_least(0.0)),
    FormField::new("totalCharges", "Total Charges", FieldKind::Decimal)
        .bounded(Bounds::at_least(0.0)),
    FormField::new("serviceCalls", "Customer Service Calls", FieldKind::Integer)
        .bounded(Bounds::between(0.0, 20.0)),
    FormField::new("onlineSecurity", "Online Security", FieldKind::YesNo),
    FormField::new("onlineBackup", "Online Backup", FieldKind::YesNo),
    FormField::new("deviceProtection", "Device Protection", FieldKind::YesNo),
    FormField::new("techSupport", "Tech Support", FieldKind::YesNo),
    FormField::new("streamingTV", "Streaming TV", FieldKind::YesNo),
    FormField::new("streamingMovies", "Streaming Movies", FieldKind::YesNo),
    FormField::new("gender", "Gender", FieldKind::Choice(GENDERS)),
    FormField::new("seniorCitizen", "Senior Citizen", FieldKind::YesNo),
    FormField::new("partner", "Partner", FieldKind::YesNo),
    FormField::new("dependents", "Dependents", FieldKind::YesNo),
    FormField::new("paperlessBilling", "Paperless Billing", FieldKind::YesNo).optional(),
    FormField::new("phoneService", "Phone Service", FieldKind::YesNo).optional(),
    FormField::new("multipleLines", "Multiple Lines", FieldKind::YesNo).optional(),
    FormField::new("paymentMethod", "Payment Method", FieldKind::Choice(PAYMENT_METHODS))
        .optional(),
];

static BANK_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| index_of(BANK_FIELDS));
static TELECOM_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| index_of(TELECOM_FIELDS));

fn index_of(fields: &'static [FormField]) -> HashMap<&'static str, usize> {
    fields
        .iter()
        .enumerate()
        .map(|(position, field)| (field.id, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ids_are_unique_per_form() {
        for form in FormId::ALL {
            assert_eq!(
                form.fields().len(),
                index_of(form.fields()).len(),
                "duplicate field id in {form}"
            );
        }
    }

    #[test]
    fn gender_is_scoped_to_each_form() {
        let bank = FormId::Bank.field("gender").unwrap();
        let telecom = FormId::Telecom.field("gender").unwrap();
        assert_eq!(bank.label, telecom.label);
        assert!(FormId::Bank.field("serviceType").is_none());
    }

    #[test]
    fn bounds_are_inclusive_and_open_ended() {
        let bounds = Bounds::between(300.0, 850.0);
        assert!(bounds.contains(300.0));
        assert!(bounds.contains(850.0));
        assert!(!bounds.contains(851.0));
        assert!(Bounds::at_least(0.0).contains(1e12));
        assert_eq!(bounds.to_string(), "300..850");
        assert_eq!(Bounds::at_least(0.0).to_string(), ">= 0");
    }

    #[test]
    fn form_ids_parse_from_legacy_names() {
        assert_eq!("form1".parse::<FormId>().unwrap(), FormId::Bank);
        assert_eq!(" Telecom ".parse::<FormId>().unwrap(), FormId::Telecom);
        assert!("insurance".parse::<FormId>().is_err());
    }
}
