//! Headless model of what the page shows: which form is visible, each form's
//! loading indicator and results region.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::form::FormId;

pub type SharedUiState = Arc<Mutex<UiState>>;

/// Area of a form where the prediction outcome is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsRegion {
    pub visible: bool,
    pub message: String,
    pub is_error: bool,
}

/// Identifies one submission for a form. Only the most recent ticket of a
/// form may update that form's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: Uuid,
    pub form: FormId,
    pub started_at: DateTime<Utc>,
}

impl SubmissionTicket {
    pub fn issue(form: FormId) -> Self {
        Self {
            id: Uuid::new_v4(),
            form,
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub visible: bool,
    pub loading: bool,
    pub results: Option<ResultsRegion>,
    pub in_flight: Option<SubmissionTicket>,
}

impl FormView {
    /// Results region of this form, created on first use.
    pub fn results_region(&mut self) -> &mut ResultsRegion {
        self.results.get_or_insert_with(ResultsRegion::default)
    }

    pub fn is_current(&self, ticket: &SubmissionTicket) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|current| current.id == ticket.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Last request to bring a form into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub form: FormId,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Default)]
pub struct UiState {
    bank: FormView,
    telecom: FormView,
    pub last_scroll: Option<ScrollRequest>,
}

impl UiState {
    /// Initial state: both forms hidden, no results regions yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedUiState {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn form(&self, form: FormId) -> &FormView {
        match form {
            FormId::Bank => &self.bank,
            FormId::Telecom => &self.telecom,
        }
    }

    pub fn form_mut(&mut self, form: FormId) -> &mut FormView {
        match form {
            FormId::Bank => &mut self.bank,
            FormId::Telecom => &mut self.telecom,
        }
    }

    pub fn visible_forms(&self) -> Vec<FormId> {
        FormId::ALL
            .into_iter()
            .filter(|form| self.form(*form).visible)
            .collect()
    }

    pub fn active_form(&self) -> Option<FormId> {
        self.visible_forms().first().copied()
    }
}

/// Locks shared UI state. A panic in another holder does not invalidate the
/// plain data inside, so poisoning is ignored.
pub fn lock(ui: &SharedUiState) -> MutexGuard<'_, UiState> {
    ui.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_hides_both_forms() {
        let state = UiState::new();
        assert!(state.visible_forms().is_empty());
        assert!(state.form(FormId::Bank).results.is_none());
        assert!(state.last_scroll.is_none());
    }

    #[test]
    fn results_region_is_created_once_and_reused() {
        let mut state = UiState::new();
        state.form_mut(FormId::Telecom).results_region().message = "first".into();
        let region = state.form_mut(FormId::Telecom).results_region();
        assert_eq!(region.message, "first");
        assert!(state.form(FormId::Bank).results.is_none());
    }

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut view = FormView::default();
        let first = SubmissionTicket::issue(FormId::Bank);
        let second = SubmissionTicket::issue(FormId::Bank);
        view.in_flight = Some(first.clone());
        assert!(view.is_current(&first));
        view.in_flight = Some(second.clone());
        assert!(!view.is_current(&first));
        assert!(view.is_current(&second));
    }
}
