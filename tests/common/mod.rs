#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use axum::Router;
use churn_client::form::FormId;
use churn_client::view::FormController;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated client home directory.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub const BANK_INPUT: &[(&str, &str)] = &[
    ("creditScore", "650"),
    ("age", "42"),
    ("gender", "Female"),
    ("tenure", "5"),
    ("balance", "1200.5"),
    ("products", "2"),
    ("creditCard", "Yes"),
    ("activeMember", "No"),
    ("salary", "55000"),
    ("cardType", "GOLD"),
    ("pointsEarned", "300"),
];

pub const TELECOM_INPUT: &[(&str, &str)] = &[
    ("accountLength", "12"),
    ("serviceType", "Fiber optic"),
    ("contractType", "Month-to-month"),
    ("monthlyCharges", "70.5"),
    ("serviceCalls", "2"),
    ("gender", "Male"),
    ("onlineSecurity", "No"),
    ("onlineBackup", "Yes"),
    ("deviceProtection", "No"),
    ("techSupport", "No"),
    ("streamingTV", "Yes"),
    ("streamingMovies", "Yes"),
    ("seniorCitizen", "No"),
    ("partner", "Yes"),
    ("dependents", "No"),
];

pub fn filled(form: FormId) -> FormController {
    let input = match form {
        FormId::Bank => BANK_INPUT,
        FormId::Telecom => TELECOM_INPUT,
    };
    let mut controller = FormController::new(form);
    for (field, value) in input {
        controller.set(field, value).expect("valid test input");
    }
    controller
}

/// Serves `app` on an ephemeral port from the current runtime.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Serves `app` from a background thread with its own runtime, for tests that
/// drive the binary.
pub fn serve_in_background(app: Router) -> String {
    let (sender, receiver) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        runtime.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            sender
                .send(listener.local_addr().expect("local addr"))
                .expect("send addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    format!("http://{}", receiver.recv().expect("server address"))
}
