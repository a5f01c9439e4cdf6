use tracing::debug;

use crate::client::response::{PredictionResponse, ResponseOutcome};

use super::state::ResultsRegion;

pub const PROCESSING_MESSAGE: &str = "Processing your request...";
pub const UNAVAILABLE_MESSAGE: &str = "Unable to get prediction. Please try again.";

/// Writes prediction outcomes into a results region. Every call fully
/// replaces the previous message and style.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRenderer;

impl ResultRenderer {
    pub fn show_loading(&self, region: &mut ResultsRegion) {
        region.visible = true;
        region.message = PROCESSING_MESSAGE.to_string();
        region.is_error = false;
    }

    pub fn render(&self, region: &mut ResultsRegion, response: &PredictionResponse) {
        region.visible = true;
        let (message, is_error) = match response.outcome() {
            ResponseOutcome::Error(error) => (format!("Error: {error}"), true),
            ResponseOutcome::Prediction(value) => (format!("Raw Model Prediction: {value}"), false),
            ResponseOutcome::Unavailable => (UNAVAILABLE_MESSAGE.to_string(), true),
        };
        debug!(%message, is_error, "results updated");
        region.message = message;
        region.is_error = is_error;
    }
}
