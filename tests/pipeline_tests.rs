mod common;

use std::sync::Arc;

use churn_client::client::{MemoryTransport, RequestOrchestrator, TransportError};
use churn_client::errors::SubmissionError;
use churn_client::form::payload::{BANK_ENDPOINT, TELECOM_ENDPOINT};
use churn_client::form::validate::{CREDIT_SCORE_RANGE, YES_NO_REQUIRED};
use churn_client::form::{FormId, ScriptedInteraction};
use churn_client::pipeline::submit_form;
use churn_client::view::render::UNAVAILABLE_MESSAGE;
use churn_client::view::{lock, Activation, UiState, ViewToggler};
use common::filled;
use serde_json::json;

fn orchestrator(transport: MemoryTransport) -> RequestOrchestrator<MemoryTransport> {
    RequestOrchestrator::new(Arc::new(transport), UiState::shared())
}

#[tokio::test]
async fn valid_bank_submission_posts_the_contract_body() {
    let transport = MemoryTransport::new();
    transport.reply(200, r#"{"prediction": 0.73}"#);
    let orchestrator = orchestrator(transport);
    let mut interaction = ScriptedInteraction::answering([true]);

    let response = submit_form(&filled(FormId::Bank), &orchestrator, &mut interaction)
        .await
        .unwrap();
    assert!(response.error.is_none());

    let requests = orchestrator.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, BANK_ENDPOINT);
    assert_eq!(
        requests[0].body,
        json!({
            "credit_score": 650,
            "age": 42,
            "tenure": 5,
            "balance": 1200.5,
            "num_of_products": 2,
            "has_cr_card": 1,
            "is_active_member": 0,
            "estimated_salary": 55000.0,
            "satisfaction_score": 3,
            "point_earned": 300,
            "gender": "Female",
            "card_type": "GOLD",
            "total_charges": 0.0
        })
    );

    let ui = lock(orchestrator.ui());
    let region = ui.form(FormId::Bank).results.clone().unwrap();
    assert_eq!(region.message, "Raw Model Prediction: 0.73");
    assert!(!region.is_error);
}

#[tokio::test]
async fn telecom_submission_uses_derived_total_and_defaults() {
    let transport = MemoryTransport::new();
    transport.reply(200, r#"{"prediction": "Churn"}"#);
    let orchestrator = orchestrator(transport);
    let mut interaction = ScriptedInteraction::answering([true]);

    let telecom = filled(FormId::Telecom);
    assert_eq!(telecom.values().raw("totalCharges"), Some("10152.00"));
    submit_form(&telecom, &orchestrator, &mut interaction)
        .await
        .unwrap();

    let request = &orchestrator.transport().requests()[0];
    assert_eq!(request.path, TELECOM_ENDPOINT);
    assert_eq!(request.body["tenure"], 12);
    assert_eq!(request.body["total_charges"], 10152.0);
    assert_eq!(request.body["internet_service"], "Fiber optic");
    assert_eq!(request.body["paperless_billing"], 1);
    assert_eq!(request.body["phone_service"], 1);
    assert_eq!(request.body["multiple_lines"], 1);
    assert_eq!(request.body["payment_method"], "Electronic check");
    assert_eq!(request.body["gender"], "Male");
}

#[tokio::test]
async fn out_of_range_credit_score_never_reaches_the_network() {
    let orchestrator = orchestrator(MemoryTransport::new());
    let mut bank = filled(FormId::Bank);
    bank.set("creditScore", "900").unwrap();
    let mut interaction = ScriptedInteraction::answering([true]);

    let result = submit_form(&bank, &orchestrator, &mut interaction).await;
    assert!(matches!(result, Err(SubmissionError::Validation(_))));
    assert_eq!(interaction.alerts, vec![CREDIT_SCORE_RANGE.to_string()]);
    assert!(orchestrator.transport().requests().is_empty());

    let ui = lock(orchestrator.ui());
    assert!(!ui.form(FormId::Bank).loading);
    assert!(ui.form(FormId::Bank).results.is_none());
}

#[tokio::test]
async fn unanswered_yes_no_group_is_rejected() {
    let orchestrator = orchestrator(MemoryTransport::new());
    let mut telecom = filled(FormId::Telecom);
    telecom.clear("partner").unwrap();
    let mut interaction = ScriptedInteraction::answering([true]);

    let result = submit_form(&telecom, &orchestrator, &mut interaction).await;
    assert!(result.is_err());
    assert_eq!(interaction.alerts, vec![YES_NO_REQUIRED.to_string()]);
    assert!(orchestrator.transport().requests().is_empty());
}

#[tokio::test]
async fn declined_confirmation_leaves_the_view_untouched() {
    let orchestrator = orchestrator(MemoryTransport::new());
    let mut interaction = ScriptedInteraction::answering([false]);

    let result = submit_form(&filled(FormId::Telecom), &orchestrator, &mut interaction).await;
    assert_eq!(result.unwrap_err(), SubmissionError::Aborted);
    assert_eq!(interaction.summaries.len(), 1);
    assert!(orchestrator.transport().requests().is_empty());
    assert!(lock(orchestrator.ui()).form(FormId::Telecom).results.is_none());
}

#[tokio::test]
async fn server_error_body_is_rendered_as_error() {
    let transport = MemoryTransport::new();
    transport.reply(500, r#"{"error": "model unavailable"}"#);
    let orchestrator = orchestrator(transport);
    let mut interaction = ScriptedInteraction::answering([true]);

    submit_form(&filled(FormId::Bank), &orchestrator, &mut interaction)
        .await
        .unwrap();
    let ui = lock(orchestrator.ui());
    let view = ui.form(FormId::Bank);
    assert!(!view.loading);
    let region = view.results.as_ref().unwrap();
    assert_eq!(region.message, "Error: model unavailable");
    assert!(region.is_error);
}

#[tokio::test]
async fn empty_success_body_is_unavailable() {
    let transport = MemoryTransport::new();
    transport.reply(200, "");
    let orchestrator = orchestrator(transport);
    let mut interaction = ScriptedInteraction::answering([true]);

    submit_form(&filled(FormId::Bank), &orchestrator, &mut interaction)
        .await
        .unwrap();
    let ui = lock(orchestrator.ui());
    let region = ui.form(FormId::Bank).results.as_ref().unwrap();
    assert_eq!(region.message, UNAVAILABLE_MESSAGE);
    assert!(region.is_error);
    assert!(!ui.form(FormId::Bank).loading);
}

#[tokio::test]
async fn transport_failure_clears_the_indicator() {
    let transport = MemoryTransport::new();
    transport.fail(TransportError::Network("connection refused".into()));
    let orchestrator = orchestrator(transport);
    let mut interaction = ScriptedInteraction::answering([true]);

    let response = submit_form(&filled(FormId::Telecom), &orchestrator, &mut interaction)
        .await
        .unwrap();
    assert_eq!(
        response.error.as_deref(),
        Some("Network error: connection refused")
    );
    assert!(!lock(orchestrator.ui()).form(FormId::Telecom).loading);
}

#[tokio::test]
async fn submissions_of_different_forms_do_not_interfere() {
    let transport = MemoryTransport::new();
    let bank_reply = transport.defer();
    transport.reply(200, r#"{"prediction": "Stay"}"#);
    let orchestrator = orchestrator(transport);

    let bank = filled(FormId::Bank);
    let bank_task = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            let mut interaction = ScriptedInteraction::answering([true]);
            submit_form(&bank, &orchestrator, &mut interaction).await
        })
    };
    tokio::task::yield_now().await;

    let mut interaction = ScriptedInteraction::answering([true]);
    submit_form(&filled(FormId::Telecom), &orchestrator, &mut interaction)
        .await
        .unwrap();
    {
        let ui = lock(orchestrator.ui());
        assert!(ui.form(FormId::Bank).loading);
        assert!(!ui.form(FormId::Telecom).loading);
    }

    bank_reply
        .send(Ok(churn_client::client::TransportReply::new(
            200,
            r#"{"prediction": 1}"#,
        )))
        .unwrap();
    bank_task.await.unwrap().unwrap();

    let ui = lock(orchestrator.ui());
    assert_eq!(
        ui.form(FormId::Bank).results.as_ref().unwrap().message,
        "Raw Model Prediction: 1"
    );
    assert_eq!(
        ui.form(FormId::Telecom).results.as_ref().unwrap().message,
        "Raw Model Prediction: Stay"
    );
}

#[test]
fn toggling_keeps_exactly_one_form_visible() {
    let mut ui = UiState::new();
    let toggler = ViewToggler;
    for (form, activation) in [
        (FormId::Bank, Activation::Button),
        (FormId::Telecom, Activation::Link),
        (FormId::Telecom, Activation::Button),
        (FormId::Bank, Activation::Link),
    ] {
        let outcome = toggler.activate(&mut ui, form, activation);
        assert_eq!(ui.visible_forms(), vec![form]);
        assert_eq!(outcome.default_prevented, activation == Activation::Link);
    }
}
