//! # Stripe Terminal Client
//!
//! `TerminalGateway` implementation backed by the Stripe REST API.
//! Every gateway method maps to exactly one API request.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use terminal_core::{
    CreatePaymentIntent, ListReaders, PaymentIntent, PaymentIntentId, Reader, ReaderId,
    TerminalError, TerminalGateway, TerminalResult,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

type FormParams = Vec<(String, String)>;

/// Stripe Terminal gateway
///
/// Holds its own configuration and HTTP client. Construct once at startup
/// and share behind an `Arc`.
pub struct StripeTerminalClient {
    config: StripeConfig,
    client: Client,
}

impl StripeTerminalClient {
    /// Create a new Stripe Terminal client
    pub fn new(config: StripeConfig) -> TerminalResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(config.app_info.clone())
            .build()
            .map_err(|e| {
                TerminalError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> TerminalResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &FormParams) -> TerminalResult<T> {
        let request = self.client.get(self.config.url(path)).query(query);
        self.send(request).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, form: &FormParams) -> TerminalResult<T> {
        // Fresh key per call: a retried request from the client is a new
        // operation as far as this server is concerned.
        let idempotency_key = Uuid::new_v4().to_string();

        let request = self
            .client
            .post(self.config.url(path))
            .header("Idempotency-Key", idempotency_key)
            .form(form);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> TerminalResult<T> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| TerminalError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TerminalError::network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TerminalError::serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl TerminalGateway for StripeTerminalClient {
    #[instrument(skip(self))]
    async fn list_readers(&self, params: &ListReaders) -> TerminalResult<Vec<Reader>> {
        let list: StripeList<Reader> = self
            .get("/v1/terminal/readers", &list_readers_query(params))
            .await?;

        debug!("Listed {} readers (has_more={})", list.data.len(), list.has_more);
        Ok(list.data)
    }

    #[instrument(skip(self, params), fields(amount = params.amount.get()))]
    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> TerminalResult<PaymentIntent> {
        let intent: PaymentIntent = self
            .post("/v1/payment_intents", &payment_intent_form(params))
            .await?;

        info!("Created payment intent: id={}, status={:?}", intent.id, intent.status);
        Ok(intent)
    }

    #[instrument(skip(self), fields(payment_intent_id = %id))]
    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> TerminalResult<PaymentIntent> {
        self.get(&format!("/v1/payment_intents/{}", id), &Vec::new())
            .await
    }

    #[instrument(skip(self), fields(payment_intent_id = %id))]
    async fn capture_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> TerminalResult<PaymentIntent> {
        let intent: PaymentIntent = self
            .post(&format!("/v1/payment_intents/{}/capture", id), &Vec::new())
            .await?;

        info!(
            "Captured payment intent: id={}, amount_received={:?}",
            intent.id, intent.amount_received
        );
        Ok(intent)
    }

    #[instrument(skip(self), fields(reader_id = %id))]
    async fn retrieve_reader(&self, id: &ReaderId) -> TerminalResult<Reader> {
        self.get(&format!("/v1/terminal/readers/{}", id), &Vec::new())
            .await
    }

    #[instrument(skip(self), fields(reader_id = %reader, payment_intent_id = %payment_intent))]
    async fn process_payment_intent(
        &self,
        reader: &ReaderId,
        payment_intent: &PaymentIntentId,
    ) -> TerminalResult<Reader> {
        let form = vec![(
            "payment_intent".to_string(),
            payment_intent.as_str().to_string(),
        )];

        self.post(
            &format!("/v1/terminal/readers/{}/process_payment_intent", reader),
            &form,
        )
        .await
    }

    #[instrument(skip(self), fields(reader_id = %reader))]
    async fn present_payment_method(&self, reader: &ReaderId) -> TerminalResult<Reader> {
        self.post(
            &format!(
                "/v1/test_helpers/terminal/readers/{}/present_payment_method",
                reader
            ),
            &Vec::new(),
        )
        .await
    }

    #[instrument(skip(self), fields(reader_id = %reader))]
    async fn cancel_reader_action(&self, reader: &ReaderId) -> TerminalResult<Reader> {
        self.post(
            &format!("/v1/terminal/readers/{}/cancel_action", reader),
            &Vec::new(),
        )
        .await
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Request encoding
// =============================================================================

fn payment_intent_form(params: &CreatePaymentIntent) -> FormParams {
    let mut form = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.as_str().to_string()),
        (
            "capture_method".to_string(),
            params.capture_method.as_str().to_string(),
        ),
    ];

    for (i, kind) in params.payment_method_types.iter().enumerate() {
        form.push((
            format!("payment_method_types[{}]", i),
            kind.as_str().to_string(),
        ));
    }

    form
}

fn list_readers_query(params: &ListReaders) -> FormParams {
    let mut query = Vec::new();

    if let Some(limit) = params.limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(ref location) = params.location {
        query.push(("location".to_string(), location.clone()));
    }
    if let Some(ref device_type) = params.device_type {
        query.push(("device_type".to_string(), device_type.clone()));
    }
    if let Some(status) = params.status {
        query.push(("status".to_string(), status.as_str().to_string()));
    }

    query
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

/// Any non-2xx response is an API rejection, whether or not the body parses.
fn api_error(status: u16, body: &str) -> TerminalError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(response) => TerminalError::Api {
            status,
            kind: response.error.kind,
            code: response.error.code,
            param: response.error.param,
            message: response.error.message,
        },
        Err(_) => TerminalError::Api {
            status,
            kind: None,
            code: None,
            param: None,
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
