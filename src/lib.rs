#![doc(test(attr(deny(warnings))))]

//! Churn client drives the bank and telecom churn forms: it validates and
//! confirms customer input, posts it to the prediction service and keeps a
//! headless model of what each form shows.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod pipeline;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Churn client tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
