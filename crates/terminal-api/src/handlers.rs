//! # Request Handlers
//!
//! Axum request handlers for the server-driven Terminal flow. Each handler
//! parses a typed request, issues one gateway call (or a fixed
//! retrieve-then-act pair), and wraps the result under a fixed key.
//!
//! Retrieve-then-act handlers do not compensate when the second call fails:
//! the first call is a read, and the API is the only source of truth.

use crate::error::{ApiError, ApiResult};
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;
use axum::{extract::State, http::Method, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use terminal_core::{
    CreatePaymentIntent, ListReaders, PaymentIntent, PaymentIntentId, Reader, ReaderId,
};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor units (cents)
    pub amount: NonZeroU64,
}

/// Process payment intent request
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentIntentRequest {
    pub reader_id: ReaderId,
    pub payment_intent_id: PaymentIntentId,
}

/// Request naming a single reader (simulate-payment, cancel-reader-action)
#[derive(Debug, Deserialize)]
pub struct ReaderRequest {
    pub reader_id: ReaderId,
}

/// Request naming a single payment intent (capture-payment-intent)
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub payment_intent_id: PaymentIntentId,
}

/// `?reader_id=`
#[derive(Debug, Deserialize)]
pub struct ReaderQuery {
    pub reader_id: ReaderId,
}

/// `?payment_intent_id=`
#[derive(Debug, Deserialize)]
pub struct PaymentIntentQuery {
    pub payment_intent_id: PaymentIntentId,
}

#[derive(Debug, Serialize)]
pub struct ReadersResponse {
    pub readers: Vec<Reader>,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentIdResponse {
    pub payment_intent_id: PaymentIntentId,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub payment_intent: PaymentIntent,
}

#[derive(Debug, Serialize)]
pub struct ReaderStateResponse {
    pub reader_state: Reader,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "terminal-server",
        "provider": state.gateway.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List readers.
///
/// Every gateway failure here is reported as 500; only a malformed query is
/// a 400.
#[instrument(skip(state))]
pub async fn list_readers(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListReaders>,
) -> ApiResult<Json<ReadersResponse>> {
    params.validate()?;

    let readers = state
        .gateway
        .list_readers(&params)
        .await
        .map_err(ApiError::unexpected)?;

    info!("Listed {} readers", readers.len());
    Ok(Json(ReadersResponse { readers }))
}

/// Create a card-present, manually captured USD payment intent
#[instrument(skip(state, request), fields(amount = request.amount.get()))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreatePaymentIntentRequest>,
) -> ApiResult<Json<PaymentIntentIdResponse>> {
    let params = CreatePaymentIntent::card_present(request.amount);
    let intent = state.gateway.create_payment_intent(&params).await?;

    info!("Created payment intent: {}", intent.id);
    Ok(Json(PaymentIntentIdResponse {
        payment_intent_id: intent.id,
    }))
}

#[instrument(skip(state, query), fields(payment_intent_id = %query.payment_intent_id))]
pub async fn retrieve_payment_intent(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaymentIntentQuery>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    let payment_intent = state
        .gateway
        .retrieve_payment_intent(&query.payment_intent_id)
        .await?;

    Ok(Json(PaymentIntentResponse { payment_intent }))
}

/// Hand a payment intent to a reader
#[instrument(
    skip(state, request),
    fields(reader_id = %request.reader_id, payment_intent_id = %request.payment_intent_id)
)]
pub async fn process_payment_intent(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProcessPaymentIntentRequest>,
) -> ApiResult<Json<ReaderStateResponse>> {
    let reader = state.gateway.retrieve_reader(&request.reader_id).await?;

    if let Some(action) = reader.action.as_ref().filter(|_| reader.is_busy()) {
        warn!(
            "Reader {} already has an action in progress (payment intent {:?})",
            reader.id,
            action.payment_intent_id().map(|id| id.to_string())
        );
    }

    let reader_state = state
        .gateway
        .process_payment_intent(&reader.id, &request.payment_intent_id)
        .await?;

    info!(
        "Reader {} processing {}: action={:?}",
        reader_state.id,
        request.payment_intent_id,
        reader_state.action_status()
    );
    Ok(Json(ReaderStateResponse { reader_state }))
}

/// Simulate a card tap on a simulated reader (test mode only)
#[instrument(skip(state, request), fields(reader_id = %request.reader_id))]
pub async fn simulate_payment(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReaderRequest>,
) -> ApiResult<Json<ReaderStateResponse>> {
    let reader = state.gateway.retrieve_reader(&request.reader_id).await?;

    if !reader.is_simulated() {
        debug!(
            "Presenting payment method on non-simulated reader {} ({:?})",
            reader.id, reader.device_type
        );
    }

    let reader_state = state.gateway.present_payment_method(&reader.id).await?;

    info!(
        "Simulated payment on reader {}: action={:?}",
        reader_state.id,
        reader_state.action_status()
    );
    Ok(Json(ReaderStateResponse { reader_state }))
}

#[instrument(skip(state, query), fields(reader_id = %query.reader_id))]
pub async fn retrieve_reader(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReaderQuery>,
) -> ApiResult<Json<ReaderStateResponse>> {
    let reader_state = state.gateway.retrieve_reader(&query.reader_id).await?;

    Ok(Json(ReaderStateResponse { reader_state }))
}

/// Capture an authorized payment intent.
///
/// Capturing twice is not idempotent; the API's rejection is relayed as 400.
#[instrument(skip(state, request), fields(payment_intent_id = %request.payment_intent_id))]
pub async fn capture_payment_intent(
    State(state): State<AppState>,
    AppJson(request): AppJson<PaymentIntentRequest>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    let intent = state
        .gateway
        .retrieve_payment_intent(&request.payment_intent_id)
        .await?;

    debug!(
        "Capturing {} (status={:?}, capturable={})",
        intent.id,
        intent.status,
        intent.is_capturable()
    );

    if intent.is_succeeded() {
        warn!("Payment intent {} was already captured", intent.id);
    }

    let payment_intent = state.gateway.capture_payment_intent(&intent.id).await?;

    info!(
        "Captured {}: status={:?}",
        payment_intent.id, payment_intent.status
    );
    Ok(Json(PaymentIntentResponse { payment_intent }))
}

/// Wrong HTTP method on a known route
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
    }
}

/// Cancel the reader's current action and reset it to idle
#[instrument(skip(state, request), fields(reader_id = %request.reader_id))]
pub async fn cancel_reader_action(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReaderRequest>,
) -> ApiResult<Json<ReaderStateResponse>> {
    let reader = state.gateway.retrieve_reader(&request.reader_id).await?;
    let reader_state = state.gateway.cancel_reader_action(&reader.id).await?;

    info!("Cancelled action on reader {}", reader_state.id);
    Ok(Json(ReaderStateResponse { reader_state }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_zero_amount() {
        let result: Result<CreatePaymentIntentRequest, _> =
            serde_json::from_str(r#"{"amount": 0}"#);
        assert!(result.is_err());

        let request: CreatePaymentIntentRequest =
            serde_json::from_str(r#"{"amount": 1000}"#).unwrap();
        assert_eq!(request.amount.get(), 1000);
    }

    #[test]
    fn test_process_request_requires_both_ids() {
        let result: Result<ProcessPaymentIntentRequest, _> =
            serde_json::from_str(r#"{"reader_id": "tmr_1"}"#);
        assert!(result.is_err());

        let result: Result<ProcessPaymentIntentRequest, _> =
            serde_json::from_str(r#"{"reader_id": "", "payment_intent_id": "pi_1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_requests_ignore_extra_fields() {
        let request: ReaderRequest =
            serde_json::from_str(r#"{"reader_id": "tmr_1", "amount": 5}"#).unwrap();
        assert_eq!(request.reader_id.as_str(), "tmr_1");
    }

    #[test]
    fn test_payment_intent_id_response_shape() {
        let response = PaymentIntentIdResponse {
            payment_intent_id: PaymentIntentId::new("pi_1").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "payment_intent_id": "pi_1" })
        );
    }
}
