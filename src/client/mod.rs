//! Async side of a submission: transport, orchestration and response
//! normalization.

pub mod orchestrator;
pub mod response;
pub mod transport;

pub use orchestrator::{Delivery, Endpoints, RequestOrchestrator};
pub use response::{PredictionResponse, PredictionValue, ResponseOutcome};
pub use transport::{
    HttpTransport, MemoryTransport, PredictionTransport, RecordedRequest, TransportError,
    TransportReply,
};
