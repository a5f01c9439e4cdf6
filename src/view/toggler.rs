use tracing::info;

use crate::form::FormId;

use super::state::{ScrollBehavior, ScrollRequest, UiState};

/// How the user asked for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Button,
    /// Navigation link; its default navigation is suppressed.
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationOutcome {
    pub shown: FormId,
    pub default_prevented: bool,
}

/// Shows exactly one of the managed forms at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewToggler;

impl ViewToggler {
    pub fn activate(
        &self,
        ui: &mut UiState,
        form: FormId,
        activation: Activation,
    ) -> ActivationOutcome {
        info!(form = form.as_str(), ?activation, "{} form requested", form.title());

        for other in FormId::ALL {
            ui.form_mut(other).visible = other == form;
        }
        ui.last_scroll = Some(ScrollRequest {
            form,
            behavior: ScrollBehavior::Smooth,
        });

        ActivationOutcome {
            shown: form,
            default_prevented: activation == Activation::Link,
        }
    }
}
