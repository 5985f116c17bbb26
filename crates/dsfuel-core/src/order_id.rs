//! # Order Numbers
//!
//! Customer-facing order numbers, also used as the EFT payment reference.
//!
//! ## Format
//! ```text
//! DS-MBX3K2Q1-7Z0AF4
//! ── ──────── ──────
//! │     │        └── 6 random base36 chars (from a UUID v4)
//! │     └─────────── confirmation time, ms since epoch, base36
//! └───────────────── fixed prefix
//! ```
//!
//! Uniqueness is probabilistic. There is no store to check collisions against.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

const PREFIX: &str = "DS";
const RANDOM_LEN: usize = 6;
/// 36^6, the number of distinct random suffixes.
const RANDOM_SPACE: u128 = 2_176_782_336;
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DS-[A-Z0-9]+-[A-Z0-9]{6}$").expect("Invalid regex"));

/// A confirmed order's number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Generates a fresh order number for an order confirmed at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let random = (Uuid::new_v4().as_u128() % RANDOM_SPACE) as u64;
        Self::from_parts(millis, random)
    }

    /// Builds an order number from its timestamp and random components.
    ///
    /// ```rust
    /// use dsfuel_core::order_id::OrderId;
    ///
    /// let id = OrderId::from_parts(1_700_000_000_000, 35);
    /// assert_eq!(id.as_str(), "DS-LOYW3V28-00000Z");
    /// ```
    pub fn from_parts(millis: u64, random: u64) -> Self {
        let random = to_base36(random % RANDOM_SPACE as u64);
        OrderId(format!(
            "{}-{}-{:0>width$}",
            PREFIX,
            to_base36(millis),
            random,
            width = RANDOM_LEN
        ))
    }

    /// Parses an order number, accepting only `DS-[A-Z0-9]+-[A-Z0-9]{6}`.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        if ORDER_ID_RE.is_match(value) {
            Ok(OrderId(value.to_string()))
        } else {
            Err(CoreError::InvalidOrderId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        OrderId::parse(&value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
