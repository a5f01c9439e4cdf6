mod common;

use churn_client::errors::SubmissionError;
use churn_client::form::{ConfirmationSummary, FormId, ScriptedInteraction};
use churn_client::pipeline::prepare_submission;
use common::filled;
use insta::assert_snapshot;

fn summary_for(form: FormId) -> ConfirmationSummary {
    let mut interaction = ScriptedInteraction::answering([false]);
    let result = prepare_submission(&filled(form).snapshot(), &mut interaction);
    assert_eq!(result.unwrap_err(), SubmissionError::Aborted);
    interaction.summaries.remove(0)
}

#[test]
fn bank_summary_lists_every_field_in_order() {
    assert_snapshot!("bank_summary", summary_for(FormId::Bank).to_string());
}

#[test]
fn telecom_summary_lists_every_field_in_order() {
    assert_snapshot!("telecom_summary", summary_for(FormId::Telecom).to_string());
}
