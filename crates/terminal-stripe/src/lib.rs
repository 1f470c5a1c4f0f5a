//! # terminal-stripe
//!
//! Stripe Terminal gateway for terminal-server-driven.
//!
//! `StripeTerminalClient` implements [`terminal_core::TerminalGateway`] over
//! the Stripe REST API (form-encoded requests, JSON responses). Failed
//! requests are sorted into the two-tier [`terminal_core::TerminalError`]
//! taxonomy:
//!
//! - non-2xx responses become `TerminalError::Api` with Stripe's message
//! - transport failures become `TerminalError::Network`
//! - undecodable 2xx bodies become `TerminalError::Serialization`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use terminal_stripe::StripeTerminalClient;
//! use terminal_core::{ReaderId, TerminalGateway};
//!
//! let client = StripeTerminalClient::from_env()?;
//! let reader = client.retrieve_reader(&ReaderId::new("tmr_123")?).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::StripeTerminalClient;
pub use config::StripeConfig;
