//! # terminal-api
//!
//! HTTP API layer for terminal-server-driven.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - JSON endpoints driving Terminal readers and payment intents
//! - A single error-translation layer (`ApiError`) shared by every route
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/list-readers` | List readers |
//! | POST | `/create-payment-intent` | Create a card-present payment intent |
//! | GET | `/retrieve-payment-intent` | Get payment intent |
//! | POST | `/process-payment-intent` | Hand a payment intent to a reader |
//! | POST | `/simulate-payment` | Simulate a card tap (test mode) |
//! | GET | `/retrieve-reader` | Get reader state |
//! | POST | `/capture-payment-intent` | Capture an authorized payment intent |
//! | POST | `/cancel-reader-action` | Reset the reader to idle |
//! | GET | `/health` | Health check |

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::{api_routes, create_router};
pub use state::{AppConfig, AppState};
