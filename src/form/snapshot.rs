//! Point-in-time copies of a form's inputs, taken once per submission.

use super::accessor::{FieldValues, Parsed, Selection};
use super::field::FormId;

#[derive(Debug, Clone, PartialEq)]
pub struct BankSnapshot {
    pub credit_score: Parsed<i64>,
    pub age: Parsed<i64>,
    pub balance: Parsed<f64>,
    pub salary: Parsed<f64>,
    pub points_earned: Parsed<i64>,
    pub gender: Option<String>,
    pub tenure: Parsed<i64>,
    pub products: Parsed<i64>,
    pub card_type: Option<String>,
    pub satisfaction_score: Parsed<i64>,
    pub total_charges: Parsed<f64>,
    pub credit_card: Selection,
    pub active_member: Selection,
}

impl BankSnapshot {
    pub fn capture(values: &FieldValues) -> Self {
        Self {
            credit_score: values.integer("creditScore"),
            age: values.integer("age"),
            balance: values.decimal("balance"),
            salary: values.decimal("salary"),
            points_earned: values.integer("pointsEarned"),
            gender: values.text("gender"),
            tenure: values.integer("tenure"),
            products: values.integer("products"),
            card_type: values.text("cardType"),
            satisfaction_score: values.integer("satisfactionScore"),
            total_charges: values.decimal("totalCharges"),
            credit_card: values.selection("creditCard"),
            active_member: values.selection("activeMember"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelecomSnapshot {
    pub account_length: Parsed<i64>,
    pub service_type: Option<String>,
    pub contract_type: Option<String>,
    pub monthly_charges: Parsed<f64>,
    pub service_calls: Parsed<i64>,
    pub total_charges: Parsed<f64>,
    pub online_security: Selection,
    pub online_backup: Selection,
    pub device_protection: Selection,
    pub tech_support: Selection,
    pub streaming_tv: Selection,
    pub streaming_movies: Selection,
    pub gender: Option<String>,
    pub senior_citizen: Selection,
    pub partner: Selection,
    pub dependents: Selection,
    pub paperless_billing: String,
    pub phone_service: String,
    pub multiple_lines: String,
    pub payment_method: String,
}

impl TelecomSnapshot {
    pub const DEFAULT_PAYMENT_METHOD: &'static str = "Electronic check";

    pub fn capture(values: &FieldValues) -> Self {
        Self {
            account_length: values.integer("accountLength"),
            service_type: values.text("serviceType"),
            contract_type: values.text("contractType"),
            monthly_charges: values.decimal("monthlyCharges"),
            service_calls: values.integer("serviceCalls"),
            total_charges: values.decimal("totalCharges"),
            online_security: values.selection("onlineSecurity"),
            online_backup: values.selection("onlineBackup"),
            device_protection: values.selection("deviceProtection"),
            tech_support: values.selection("techSupport"),
            streaming_tv: values.selection("streamingTV"),
            streaming_movies: values.selection("streamingMovies"),
            gender: values.text("gender"),
            senior_citizen: values.selection("seniorCitizen"),
            partner: values.selection("partner"),
            dependents: values.selection("dependents"),
            // Optional groups fall back to "Yes".
            paperless_billing: values.selection_or("paperlessBilling", super::field::YES),
            phone_service: values.selection_or("phoneService", super::field::YES),
            multiple_lines: values.selection_or("multipleLines", super::field::YES),
            payment_method: values.selection_or("paymentMethod", Self::DEFAULT_PAYMENT_METHOD),
        }
    }
}

/// Snapshot of whichever form is being submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSnapshot {
    Bank(BankSnapshot),
    Telecom(TelecomSnapshot),
}

impl FormSnapshot {
    pub fn capture(form: FormId, values: &FieldValues) -> Self {
        match form {
            FormId::Bank => FormSnapshot::Bank(BankSnapshot::capture(values)),
            FormId::Telecom => FormSnapshot::Telecom(TelecomSnapshot::capture(values)),
        }
    }

    pub fn form(&self) -> FormId {
        match self {
            FormSnapshot::Bank(_) => FormId::Bank,
            FormSnapshot::Telecom(_) => FormId::Telecom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telecom_optional_groups_default_to_yes() {
        let snapshot = TelecomSnapshot::capture(&FieldValues::new().with("phoneService", "No"));
        assert_eq!(snapshot.phone_service, "No");
        assert_eq!(snapshot.paperless_billing, "Yes");
        assert_eq!(snapshot.multiple_lines, "Yes");
        assert_eq!(snapshot.payment_method, "Electronic check");
        assert_eq!(snapshot.partner, Selection::NotSelected);
    }

    #[test]
    fn capture_dispatches_on_form() {
        let snapshot = FormSnapshot::capture(FormId::Bank, &FieldValues::new());
        assert_eq!(snapshot.form(), FormId::Bank);
        let FormSnapshot::Bank(bank) = snapshot else {
            panic!("expected bank snapshot");
        };
        assert_eq!(bank.total_charges, Parsed::Missing);
    }
}
