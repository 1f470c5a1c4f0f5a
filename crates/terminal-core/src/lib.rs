//! # terminal-core
//!
//! Core types and traits for server-driven Terminal payments.
//!
//! This crate provides:
//! - `TerminalGateway` trait, the single seam to the payments API
//! - `PaymentIntent` and `Reader` views of API objects
//! - `ReaderId` and `PaymentIntentId` validated identifiers
//! - `TerminalError` two-tier error taxonomy
//!
//! ## Example
//!
//! ```rust,ignore
//! use terminal_core::{CreatePaymentIntent, ReaderId, TerminalGateway};
//!
//! let intent = gateway
//!     .create_payment_intent(&CreatePaymentIntent::card_present(amount))
//!     .await?;
//!
//! let reader = gateway.retrieve_reader(&ReaderId::new("tmr_123")?).await?;
//! let reader = gateway.process_payment_intent(&reader.id, &intent.id).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod ids;
pub mod payment_intent;
pub mod reader;

// Re-exports for convenience
pub use error::{TerminalError, TerminalResult};
pub use gateway::{SharedGateway, TerminalGateway};
pub use ids::{PaymentIntentId, ReaderId};
pub use payment_intent::{
    CaptureMethod, CreatePaymentIntent, Currency, PaymentIntent, PaymentIntentStatus,
    PaymentMethodType,
};
pub use reader::{ListReaders, Reader, ReaderAction, ReaderActionStatus, ReaderStatus};
