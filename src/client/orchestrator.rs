use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::form::payload::{PredictionRequest, BANK_ENDPOINT, TELECOM_ENDPOINT};
use crate::form::FormId;
use crate::view::render::ResultRenderer;
use crate::view::state::{lock, SharedUiState, SubmissionTicket};

use super::response::PredictionResponse;
use super::transport::PredictionTransport;

/// Service paths per form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub bank: String,
    pub telecom: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bank: BANK_ENDPOINT.to_string(),
            telecom: TELECOM_ENDPOINT.to_string(),
        }
    }
}

impl Endpoints {
    pub fn path(&self, form: FormId) -> &str {
        match form {
            FormId::Bank => &self.bank,
            FormId::Telecom => &self.telecom,
        }
    }
}

/// A finished exchange and whether it reached the form's view.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub ticket: SubmissionTicket,
    pub response: PredictionResponse,
    pub rendered: bool,
}

/// Sends prediction requests and drives the loading indicator and results
/// region of the submitting form.
pub struct RequestOrchestrator<T> {
    transport: Arc<T>,
    ui: SharedUiState,
    endpoints: Endpoints,
    discard_stale: bool,
    renderer: ResultRenderer,
}

impl<T> Clone for RequestOrchestrator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            ui: Arc::clone(&self.ui),
            endpoints: self.endpoints.clone(),
            discard_stale: self.discard_stale,
            renderer: self.renderer,
        }
    }
}

impl<T: PredictionTransport> RequestOrchestrator<T> {
    pub fn new(transport: Arc<T>, ui: SharedUiState) -> Self {
        Self {
            transport,
            ui,
            endpoints: Endpoints::default(),
            discard_stale: true,
            renderer: ResultRenderer,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// When disabled every response renders, whichever submission it belongs to.
    pub fn discard_stale_responses(mut self, enabled: bool) -> Self {
        self.discard_stale = enabled;
        self
    }

    pub fn ui(&self) -> &SharedUiState {
        &self.ui
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Runs a whole submission: loading state, POST, normalization, render.
    pub async fn submit(&self, request: &PredictionRequest) -> PredictionResponse {
        let ticket = self.begin(request.form());
        self.complete(ticket, request).await.response
    }

    /// Marks a submission as in flight: the results region shows the
    /// processing message and the loading indicator becomes visible.
    pub fn begin(&self, form: FormId) -> SubmissionTicket {
        let ticket = SubmissionTicket::issue(form);
        info!(form = form.as_str(), ticket = %ticket.id, "submitting {} form", form.title());

        let mut ui = lock(&self.ui);
        let view = ui.form_mut(form);
        view.in_flight = Some(ticket.clone());
        view.loading = true;
        self.renderer.show_loading(view.results_region());
        ticket
    }

    /// Performs the exchange for a ticket from [`begin`](Self::begin) and
    /// applies the outcome to the view.
    pub async fn complete(&self, ticket: SubmissionTicket, request: &PredictionRequest) -> Delivery {
        let response = self.exchange(request).await;
        let rendered = self.finish(&ticket, &response);
        Delivery {
            ticket,
            response,
            rendered,
        }
    }

    async fn exchange(&self, request: &PredictionRequest) -> PredictionResponse {
        let path = self.endpoints.path(request.form());
        let body = match request.to_json() {
            Ok(body) => body,
            Err(err) => return PredictionResponse::failure(err.to_string()),
        };
        debug!(path, payload = %body, "prediction payload");

        match self.transport.post_json(path, &body).await {
            Ok(reply) => PredictionResponse::from_http(reply.status, &reply.body),
            Err(err) => {
                warn!(path, error = %err, "prediction request failed");
                PredictionResponse::failure(err.to_string())
            }
        }
    }

    /// Returns whether the response was rendered.
    fn finish(&self, ticket: &SubmissionTicket, response: &PredictionResponse) -> bool {
        let mut ui = lock(&self.ui);
        let view = ui.form_mut(ticket.form);
        let current = view.is_current(ticket);
        if self.discard_stale && !current {
            warn!(
                form = ticket.form.as_str(),
                ticket = %ticket.id,
                "ignoring response of a superseded submission"
            );
            return false;
        }

        if current {
            view.in_flight = None;
        }
        view.loading = false;
        self.renderer.render(view.results_region(), response);
        debug!(form = ticket.form.as_str(), ?response, "prediction rendered");
        true
    }
}
