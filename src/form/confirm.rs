//! Review step shown before a prediction request is sent.

use std::collections::VecDeque;
use std::fmt;

use crate::utils::format_number;

use super::validate::{ValidBank, ValidForm, ValidTelecom};

const RULE: &str = "----------------------------------";
const QUESTION: &str = "Do you want to proceed?";

/// Labelled values in a fixed order, rendered for a yes/no decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationSummary {
    pub title: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

impl ConfirmationSummary {
    pub fn for_form(valid: &ValidForm) -> Self {
        match valid {
            ValidForm::Bank(bank) => Self::bank(bank),
            ValidForm::Telecom(telecom) => Self::telecom(telecom),
        }
    }

    pub fn bank(v: &ValidBank) -> Self {
        Self {
            title: "Customer Information:",
            entries: vec![
                ("Credit Score", v.credit_score.to_string()),
                ("Age", v.age.to_string()),
                ("Gender", v.gender.clone()),
                ("Tenure", v.tenure.to_string()),
                ("Balance", format_number(v.balance)),
                ("Number of Products", v.products.to_string()),
                ("Has Credit Card", v.credit_card.clone()),
                ("Is Active Member", v.active_member.clone()),
                ("Estimated Salary", format_number(v.salary)),
                ("Satisfaction Score", v.satisfaction_score.to_string()),
                ("Card Type", v.card_type.clone()),
                ("Points Earned", v.points_earned.to_string()),
                ("Total Charges", format_number(v.total_charges.unwrap_or(0.0))),
            ],
        }
    }

    pub fn telecom(v: &ValidTelecom) -> Self {
        Self {
            title: "Telecom Customer Information:",
            entries: vec![
                ("Account Length", v.account_length.to_string()),
                ("Service Type", v.service_type.clone()),
                ("Contract Type", v.contract_type.clone()),
                ("Monthly Charges", format_number(v.monthly_charges)),
                ("Total Charges", format_number(v.total_charges)),
                ("Customer Service Calls", v.service_calls.to_string()),
                ("Online Security", v.online_security.clone()),
                ("Online Backup", v.online_backup.clone()),
                ("Device Protection", v.device_protection.clone()),
                ("Tech Support", v.tech_support.clone()),
                ("Streaming TV", v.streaming_tv.clone()),
                ("Streaming Movies", v.streaming_movies.clone()),
                ("Gender", v.gender.clone()),
                ("Senior Citizen", v.senior_citizen.clone()),
                ("Partner", v.partner.clone()),
                ("Dependents", v.dependents.clone()),
            ],
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 4);
        lines.push(self.title.to_string());
        lines.push(RULE.to_string());
        lines.extend(
            self.entries
                .iter()
                .map(|(label, value)| format!("{label}: {value}")),
        );
        lines.push(RULE.to_string());
        lines.push(QUESTION.to_string());
        lines
    }
}

impl fmt::Display for ConfirmationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// User-facing surface consulted by the submission pipeline.
///
/// `alert` is an interrupting notice (validation failures); `confirm` asks for
/// an explicit yes/no before any network effect happens.
pub trait SubmissionInteraction {
    fn alert(&mut self, message: &str);

    fn confirm(&mut self, summary: &ConfirmationSummary) -> bool;
}

/// Interaction driven by pre-recorded answers. Records every alert and
/// summary it was shown.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub summaries: Vec<ConfirmationSummary>,
}

impl ScriptedInteraction {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl SubmissionInteraction for ScriptedInteraction {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, summary: &ConfirmationSummary) -> bool {
        self.summaries.push(summary.clone());
        // An exhausted script declines.
        self.answers.pop_front().unwrap_or(false)
    }
}
