//! Common test utilities and fixtures
//!
//! - `RecordingGateway`: in-memory `TerminalGateway` that logs every call and
//!   can be told to fail specific operations
//! - Request builders and a `send` helper that decodes JSON responses

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use terminal_api::{create_router, AppConfig, AppState};
use terminal_core::{
    CreatePaymentIntent, ListReaders, PaymentIntent, PaymentIntentId, Reader, ReaderId,
    TerminalError, TerminalGateway, TerminalResult,
};

pub use axum::body::Body;
pub use axum::http::{Request, StatusCode};
pub use tower::ServiceExt;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListReaders(ListReaders),
    CreatePaymentIntent(CreatePaymentIntent),
    RetrievePaymentIntent(String),
    CapturePaymentIntent(String),
    RetrieveReader(String),
    ProcessPaymentIntent { reader: String, payment_intent: String },
    PresentPaymentMethod(String),
    CancelReaderAction(String),
}

impl Call {
    fn operation(&self) -> &'static str {
        match self {
            Call::ListReaders(_) => "list_readers",
            Call::CreatePaymentIntent(_) => "create_payment_intent",
            Call::RetrievePaymentIntent(_) => "retrieve_payment_intent",
            Call::CapturePaymentIntent(_) => "capture_payment_intent",
            Call::RetrieveReader(_) => "retrieve_reader",
            Call::ProcessPaymentIntent { .. } => "process_payment_intent",
            Call::PresentPaymentMethod(_) => "present_payment_method",
            Call::CancelReaderAction(_) => "cancel_reader_action",
        }
    }
}

#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, TerminalError>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every call to `operation` fail with `err`
    pub fn fail(&self, operation: &'static str, err: TerminalError) {
        self.failures.lock().unwrap().insert(operation, err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> TerminalResult<()> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TerminalGateway for RecordingGateway {
    async fn list_readers(&self, params: &ListReaders) -> TerminalResult<Vec<Reader>> {
        self.record(Call::ListReaders(params.clone()))?;
        Ok(vec![reader("tmr_1", Value::Null), reader("tmr_2", Value::Null)])
    }

    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> TerminalResult<PaymentIntent> {
        self.record(Call::CreatePaymentIntent(params.clone()))?;
        Ok(payment_intent("pi_new", "requires_payment_method"))
    }

    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> TerminalResult<PaymentIntent> {
        self.record(Call::RetrievePaymentIntent(id.to_string()))?;
        Ok(payment_intent(id.as_str(), "requires_capture"))
    }

    async fn capture_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> TerminalResult<PaymentIntent> {
        self.record(Call::CapturePaymentIntent(id.to_string()))?;
        Ok(payment_intent(id.as_str(), "succeeded"))
    }

    async fn retrieve_reader(&self, id: &ReaderId) -> TerminalResult<Reader> {
        self.record(Call::RetrieveReader(id.to_string()))?;
        Ok(reader(id.as_str(), Value::Null))
    }

    async fn process_payment_intent(
        &self,
        reader_id: &ReaderId,
        payment_intent: &PaymentIntentId,
    ) -> TerminalResult<Reader> {
        self.record(Call::ProcessPaymentIntent {
            reader: reader_id.to_string(),
            payment_intent: payment_intent.to_string(),
        })?;
        Ok(reader(
            reader_id.as_str(),
            json!({
                "type": "process_payment_intent",
                "status": "in_progress",
                "process_payment_intent": { "payment_intent": payment_intent.as_str() }
            }),
        ))
    }

    async fn present_payment_method(&self, reader_id: &ReaderId) -> TerminalResult<Reader> {
        self.record(Call::PresentPaymentMethod(reader_id.to_string()))?;
        Ok(reader(
            reader_id.as_str(),
            json!({ "type": "process_payment_intent", "status": "succeeded" }),
        ))
    }

    async fn cancel_reader_action(&self, reader_id: &ReaderId) -> TerminalResult<Reader> {
        self.record(Call::CancelReaderAction(reader_id.to_string()))?;
        Ok(reader(reader_id.as_str(), Value::Null))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn reader(id: &str, action: Value) -> Reader {
    serde_json::from_value(json!({
        "id": id,
        "object": "terminal.reader",
        "action": action,
        "device_type": "simulated_wisepos_e",
        "label": "simulated-wpe",
        "livemode": false,
        "status": "online"
    }))
    .unwrap()
}

pub fn payment_intent(id: &str, status: &str) -> PaymentIntent {
    serde_json::from_value(json!({
        "id": id,
        "object": "payment_intent",
        "amount": 1000,
        "currency": "usd",
        "status": status,
        "capture_method": "manual",
        "payment_method_types": ["card_present"]
    }))
    .unwrap()
}

pub fn api_error(message: &str) -> TerminalError {
    TerminalError::Api {
        status: 400,
        kind: Some("invalid_request_error".to_string()),
        code: None,
        param: None,
        message: message.to_string(),
    }
}

// =============================================================================
// App & requests
// =============================================================================

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None)
}

pub fn test_app(gateway: Arc<RecordingGateway>) -> axum::Router {
    create_router(AppState::new(gateway, test_config()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    assert_eq!(
        response.headers()["content-type"],
        "application/json",
        "every API response is JSON"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
