//! Mapping from validated form input to the prediction API contract.

use serde::{Deserialize, Serialize};

use super::field::{FormId, YES};
use super::validate::{ValidBank, ValidForm, ValidTelecom};

pub const BANK_ENDPOINT: &str = "/api/bank-churn-prediction";
pub const TELECOM_ENDPOINT: &str = "/api/telecom-churn-prediction";

/// Body of `POST /api/bank-churn-prediction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankChurnRequest {
    pub credit_score: i64,
    pub age: i64,
    pub tenure: i64,
    pub balance: f64,
    pub num_of_products: i64,
    pub has_cr_card: u8,
    pub is_active_member: u8,
    pub estimated_salary: f64,
    pub satisfaction_score: i64,
    pub point_earned: i64,
    pub gender: String,
    pub card_type: String,
    pub total_charges: f64,
}

/// Body of `POST /api/telecom-churn-prediction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelecomChurnRequest {
    pub tenure: i64,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub internet_service: String,
    pub contract: String,
    pub paperless_billing: u8,
    pub senior_citizen: u8,
    pub streaming_tv: u8,
    pub streaming_movies: u8,
    pub multiple_lines: u8,
    pub phone_service: u8,
    pub device_protection: u8,
    pub online_backup: u8,
    pub partner: u8,
    pub dependents: u8,
    pub tech_support: u8,
    pub online_security: u8,
    pub gender: String,
    pub payment_method: String,
}

/// A request ready to be sent; serializes to the flat contract object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Bank(BankChurnRequest),
    Telecom(TelecomChurnRequest),
}

impl PredictionRequest {
    pub fn form(&self) -> FormId {
        match self {
            PredictionRequest::Bank(_) => FormId::Bank,
            PredictionRequest::Telecom(_) => FormId::Telecom,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl From<&ValidForm> for PredictionRequest {
    fn from(valid: &ValidForm) -> Self {
        match valid {
            ValidForm::Bank(bank) => PredictionRequest::Bank(bank.into()),
            ValidForm::Telecom(telecom) => PredictionRequest::Telecom(telecom.into()),
        }
    }
}

impl From<&ValidBank> for BankChurnRequest {
    fn from(v: &ValidBank) -> Self {
        Self {
            credit_score: v.credit_score,
            age: v.age,
            tenure: v.tenure,
            balance: v.balance,
            num_of_products: v.products,
            has_cr_card: flag(&v.credit_card),
            is_active_member: flag(&v.active_member),
            estimated_salary: v.salary,
            satisfaction_score: v.satisfaction_score,
            point_earned: v.points_earned,
            gender: v.gender.clone(),
            card_type: v.card_type.clone(),
            total_charges: v.total_charges.unwrap_or(0.0),
        }
    }
}

impl From<&ValidTelecom> for TelecomChurnRequest {
    fn from(v: &ValidTelecom) -> Self {
        Self {
            tenure: v.account_length,
            monthly_charges: v.monthly_charges,
            total_charges: v.total_charges,
            internet_service: v.service_type.clone(),
            contract: v.contract_type.clone(),
            paperless_billing: flag(&v.paperless_billing),
            senior_citizen: flag(&v.senior_citizen),
            streaming_tv: flag(&v.streaming_tv),
            streaming_movies: flag(&v.streaming_movies),
            multiple_lines: flag(&v.multiple_lines),
            phone_service: flag(&v.phone_service),
            device_protection: flag(&v.device_protection),
            online_backup: flag(&v.online_backup),
            partner: flag(&v.partner),
            dependents: flag(&v.dependents),
            tech_support: flag(&v.tech_support),
            online_security: flag(&v.online_security),
            gender: v.gender.clone(),
            payment_method: v.payment_method.clone(),
        }
    }
}

fn flag(answer: &str) -> u8 {
    u8::from(answer == YES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::accessor::FieldValues;
    use crate::form::snapshot::{BankSnapshot, TelecomSnapshot};
    use crate::form::validate::{validate_bank, validate_telecom};

    fn valid_bank(credit_card: &str, active_member: &str) -> ValidBank {
        let values = FieldValues::new()
            .with("creditScore", "700")
            .with("age", "30")
            .with("balance", "0")
            .with("salary", "42000.5")
            .with("pointsEarned", "120")
            .with("gender", "Male")
            .with("tenure", "3")
            .with("products", "1")
            .with("cardType", "SILVER")
            .with("satisfactionScore", "4")
            .with("creditCard", credit_card)
            .with("activeMember", active_member);
        validate_bank(&BankSnapshot::capture(&values)).unwrap()
    }

    #[test]
    fn bank_flags_follow_yes_selection() {
        for (card, member) in [("Yes", "Yes"), ("Yes", "No"), ("No", "Yes"), ("No", "No")] {
            let request = BankChurnRequest::from(&valid_bank(card, member));
            assert_eq!(request.has_cr_card, u8::from(card == "Yes"));
            assert_eq!(request.is_active_member, u8::from(member == "Yes"));
        }
    }

    #[test]
    fn bank_request_uses_contract_names() {
        let request = PredictionRequest::Bank(BankChurnRequest::from(&valid_bank("Yes", "No")));
        let json = request.to_json().unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "age",
                "balance",
                "card_type",
                "credit_score",
                "estimated_salary",
                "gender",
                "has_cr_card",
                "is_active_member",
                "num_of_products",
                "point_earned",
                "satisfaction_score",
                "tenure",
                "total_charges",
            ]
        );
        assert_eq!(json["num_of_products"], 1);
        assert_eq!(json["total_charges"], 0.0);
        assert_eq!(request.form(), FormId::Bank);
    }

    #[test]
    fn telecom_request_defaults_optional_flags_to_yes() {
        let mut values = FieldValues::new()
            .with("accountLength", "24")
            .with("serviceType", "Fiber optic")
            .with("contractType", "Two year")
            .with("monthlyCharges", "99.9")
            .with("serviceCalls", "1")
            .with("totalCharges", "28771.2")
            .with("gender", "Female")
            .with("phoneService", "No");
        for group in [
            "onlineSecurity",
            "onlineBackup",
            "deviceProtection",
            "techSupport",
            "streamingTV",
            "streamingMovies",
            "seniorCitizen",
            "partner",
            "dependents",
        ] {
            values.set(group, "Yes");
        }
        let valid = validate_telecom(&TelecomSnapshot::capture(&values)).unwrap();
        let request = TelecomChurnRequest::from(&valid);

        assert_eq!(request.tenure, 24);
        assert_eq!(request.internet_service, "Fiber optic");
        assert_eq!(request.contract, "Two year");
        assert_eq!(request.paperless_billing, 1);
        assert_eq!(request.multiple_lines, 1);
        assert_eq!(request.phone_service, 0);
        assert_eq!(request.online_security, 1);
        assert_eq!(request.payment_method, "Electronic check");
    }
}
