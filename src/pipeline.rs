//! Submission pipeline: snapshot, validation gate, confirmation gate,
//! payload mapping, request.

use tracing::{debug, info, warn};

use crate::client::orchestrator::RequestOrchestrator;
use crate::client::response::PredictionResponse;
use crate::client::transport::PredictionTransport;
use crate::errors::SubmissionError;
use crate::form::confirm::{ConfirmationSummary, SubmissionInteraction};
use crate::form::payload::PredictionRequest;
use crate::form::snapshot::FormSnapshot;
use crate::form::validate::{self, ValidationResult};
use crate::view::controller::FormController;

/// Runs the synchronous gates of a submission. A rule violation is reported
/// through `alert`; a declined confirmation stops silently. Neither touches
/// the view or the network.
pub fn prepare_submission<I>(
    snapshot: &FormSnapshot,
    interaction: &mut I,
) -> Result<PredictionRequest, SubmissionError>
where
    I: SubmissionInteraction + ?Sized,
{
    let form = snapshot.form();
    let validated = validate::validate(snapshot);
    let verdict = ValidationResult::from(&validated);
    debug!(form = form.as_str(), ?verdict, "validation finished");

    let valid = match validated {
        Ok(valid) => valid,
        Err(err) => {
            warn!(form = form.as_str(), reason = %err, "submission rejected");
            interaction.alert(&err.message);
            return Err(err.into());
        }
    };

    let summary = ConfirmationSummary::for_form(&valid);
    if !interaction.confirm(&summary) {
        info!(form = form.as_str(), "submission declined");
        return Err(SubmissionError::Aborted);
    }

    Ok(PredictionRequest::from(&valid))
}

/// Full submission of a form's current inputs.
pub async fn submit_form<T, I>(
    controller: &FormController,
    orchestrator: &RequestOrchestrator<T>,
    interaction: &mut I,
) -> Result<PredictionResponse, SubmissionError>
where
    T: PredictionTransport,
    I: SubmissionInteraction + ?Sized,
{
    let request = prepare_submission(&controller.snapshot(), interaction)?;
    Ok(orchestrator.submit(&request).await)
}
