//! Form model: field catalogs, typed reads, validation, payload mapping and
//! the confirmation step.

pub mod accessor;
pub mod confirm;
pub mod field;
pub mod payload;
pub mod snapshot;
pub mod validate;

pub use accessor::{FieldValues, Parsed, Selection, NOT_SELECTED};
pub use confirm::{ConfirmationSummary, ScriptedInteraction, SubmissionInteraction};
pub use field::{Bounds, FieldKind, FormField, FormId};
pub use payload::{BankChurnRequest, PredictionRequest, TelecomChurnRequest};
pub use snapshot::{BankSnapshot, FormSnapshot, TelecomSnapshot};
pub use validate::{ValidForm, ValidationError, ValidationResult};
