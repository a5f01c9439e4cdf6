//! UI model: visibility, loading indicators, results regions and the
//! per-form controllers.

pub mod controller;
pub mod render;
pub mod state;
pub mod toggler;

pub use controller::{Adjustment, FieldError, FormController};
pub use render::ResultRenderer;
pub use state::{lock, FormView, ResultsRegion, SharedUiState, SubmissionTicket, UiState};
pub use toggler::{Activation, ActivationOutcome, ViewToggler};
