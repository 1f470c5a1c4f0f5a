//! # Payment Intent Types
//!
//! A payment intent is the API's record of a single payment attempt. For
//! in-person payments it is created with `card_present` and manual capture,
//! handed to a reader, and captured once the card has been authorized.

use crate::ids::PaymentIntentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::NonZeroU64;

/// Currency for in-person payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// ISO code as the API expects it (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
        }
    }
}

/// How funds are captured after authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    Automatic,
    AutomaticAsync,
    /// Authorize on the reader, capture later with an explicit call
    Manual,
}

impl CaptureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMethod::Automatic => "automatic",
            CaptureMethod::AutomaticAsync => "automatic_async",
            CaptureMethod::Manual => "manual",
        }
    }
}

/// In-person payment method types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    CardPresent,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::CardPresent => "card_present",
        }
    }
}

/// Payment intent lifecycle states.
///
/// ```text
/// requires_payment_method ─▶ requires_confirmation ─▶ requires_capture ─▶ succeeded
///            │                         │                      │
///            └──────────────┬──────────┴──────────────────────┘
///                           ▼
///                        canceled
/// ```
///
/// The API owns these transitions; this type is only a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
}

/// A payment intent as returned by the API.
///
/// Fields the server reads are typed; everything else is kept in `extra`.
/// Typed fields the API left out stay out of the relayed object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,

    /// Amount in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_capturable: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_received: Option<i64>,

    /// Lowercase ISO currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentIntentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_method: Option<CaptureMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_types: Option<Vec<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentIntent {
    /// Authorized on a reader and waiting for capture
    pub fn is_capturable(&self) -> bool {
        self.status == Some(PaymentIntentStatus::RequiresCapture)
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == Some(PaymentIntentStatus::Succeeded)
    }
}

/// Parameters for creating a payment intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePaymentIntent {
    /// Amount in minor units
    pub amount: NonZeroU64,
    pub currency: Currency,
    pub payment_method_types: Vec<PaymentMethodType>,
    pub capture_method: CaptureMethod,
}

impl CreatePaymentIntent {
    /// In-person card payment in USD, captured manually after the reader
    /// authorizes it.
    pub fn card_present(amount: NonZeroU64) -> Self {
        Self {
            amount,
            currency: Currency::USD,
            payment_method_types: vec![PaymentMethodType::CardPresent],
            capture_method: CaptureMethod::Manual,
        }
    }
}
