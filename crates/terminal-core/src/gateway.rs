//! # Terminal Gateway Trait
//!
//! The seam between HTTP handlers and the payments API. Handlers only ever
//! talk to a `TerminalGateway`; the Stripe client is one implementation and
//! tests substitute an in-memory one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  TerminalGateway (trait)                    │
//! │  ├── list_readers()            ├── retrieve_reader()        │
//! │  ├── create_payment_intent()   ├── process_payment_intent() │
//! │  ├── retrieve_payment_intent() ├── present_payment_method() │
//! │  └── capture_payment_intent()  └── cancel_reader_action()   │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┴─────────────────┐
//!  ┌───────┴───────────┐             ┌─────────┴─────────┐
//!  │StripeTerminalClient│             │  test gateways    │
//!  └───────────────────┘             └───────────────────┘
//! ```
//!
//! Every method issues exactly one API call. Multi-step flows are composed
//! by the caller.

use crate::error::TerminalResult;
use crate::ids::{PaymentIntentId, ReaderId};
use crate::payment_intent::{CreatePaymentIntent, PaymentIntent};
use crate::reader::{ListReaders, Reader};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TerminalGateway: Send + Sync {
    /// List registered readers, optionally filtered.
    async fn list_readers(&self, params: &ListReaders) -> TerminalResult<Vec<Reader>>;

    /// Create a payment intent.
    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> TerminalResult<PaymentIntent>;

    /// Fetch a payment intent by id.
    async fn retrieve_payment_intent(&self, id: &PaymentIntentId)
        -> TerminalResult<PaymentIntent>;

    /// Capture an authorized payment intent.
    ///
    /// Not idempotent: capturing an already captured intent is rejected by
    /// the API.
    async fn capture_payment_intent(&self, id: &PaymentIntentId)
        -> TerminalResult<PaymentIntent>;

    /// Fetch a reader by id.
    async fn retrieve_reader(&self, id: &ReaderId) -> TerminalResult<Reader>;

    /// Hand a payment intent to a reader for collection.
    async fn process_payment_intent(
        &self,
        reader: &ReaderId,
        payment_intent: &PaymentIntentId,
    ) -> TerminalResult<Reader>;

    /// Test helper: simulate a card being presented to a simulated reader.
    async fn present_payment_method(&self, reader: &ReaderId) -> TerminalResult<Reader>;

    /// Cancel the reader's current action and return it to idle.
    ///
    /// Does not cancel an in-flight payment once the card has been read.
    async fn cancel_reader_action(&self, reader: &ReaderId) -> TerminalResult<Reader>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type SharedGateway = Arc<dyn TerminalGateway>;
