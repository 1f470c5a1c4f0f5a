//! # Reader Types
//!
//! A reader is a physical (or simulated) card-reading device registered with
//! the payments API. Server-driven integrations push actions to the reader
//! (process a payment intent, cancel the current action) and poll its state.

use crate::error::{TerminalError, TerminalResult};
use crate::ids::{PaymentIntentId, ReaderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Network status reported for a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderStatus {
    Online,
    Offline,
}

impl ReaderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReaderStatus::Online => "online",
            ReaderStatus::Offline => "offline",
        }
    }
}

/// Status of the action currently assigned to a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderActionStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// The action a reader is working on (or last finished)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderAction {
    /// Action type, e.g. `process_payment_intent`
    #[serde(rename = "type")]
    pub kind: String,

    pub status: ReaderActionStatus,

    #[serde(default)]
    pub failure_code: Option<String>,

    #[serde(default)]
    pub failure_message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReaderAction {
    /// Payment intent attached to a `process_payment_intent` action
    pub fn payment_intent_id(&self) -> Option<PaymentIntentId> {
        self.extra
            .get("process_payment_intent")
            .and_then(|p| p.get("payment_intent"))
            .and_then(|v| v.as_str())
            .and_then(|s| PaymentIntentId::new(s).ok())
    }
}

/// A reader as returned by the API.
///
/// `action` is `None` when the reader is idle and is always relayed, as
/// `null` in that case. Other typed fields the API left out stay out of the
/// relayed object; untyped fields are kept in `extra` and relayed unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    pub id: ReaderId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// e.g. `bbpos_wisepos_e`, `simulated_wisepos_e`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReaderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(default)]
    pub action: Option<ReaderAction>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_seen_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reader {
    pub fn action_status(&self) -> Option<ReaderActionStatus> {
        self.action.as_ref().map(|a| a.status)
    }

    /// True while an action is in progress on the device
    pub fn is_busy(&self) -> bool {
        self.action_status() == Some(ReaderActionStatus::InProgress)
    }

    pub fn is_simulated(&self) -> bool {
        self.device_type
            .as_deref()
            .map(|t| t.starts_with("simulated_"))
            .unwrap_or(false)
    }
}

/// Filters for listing readers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReaders {
    /// Page size, 1 to 100
    #[serde(default)]
    pub limit: Option<u8>,

    /// Location id (`tml_...`)
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub device_type: Option<String>,

    #[serde(default)]
    pub status: Option<ReaderStatus>,
}

impl ListReaders {
    pub const MAX_LIMIT: u8 = 100;

    pub fn validate(&self) -> TerminalResult<()> {
        if let Some(limit) = self.limit {
            if limit == 0 || limit > Self::MAX_LIMIT {
                return Err(TerminalError::invalid_request(format!(
                    "limit must be between 1 and {}",
                    Self::MAX_LIMIT
                )));
            }
        }
        Ok(())
    }
}
