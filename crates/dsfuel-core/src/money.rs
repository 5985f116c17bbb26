//! # Money Module
//!
//! Provides the `Money` type for Rand amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  R549.99 × 5 in floating point = 2749.9500000000003  ❌                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    54999 cents × 5 = 274995 cents = R2749.95 exactly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dsfuel_core::money::Money;
//!
//! let bottle = Money::from_major_minor(549, 99);
//! let total = bottle * 5;
//! assert_eq!(total.cents(), 274_995);
//! assert_eq!(total.percentage(20).cents(), 54_999);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (1/100 Rand).
///
/// ## Where Money is Used
/// ```text
/// CatalogEntry.price ──► PricingDetails.unit_price
///                              │ × quantity
///                              ▼
///                   total_before_discount ──► discount (20% bulk)
///                              │
///                              ▼
///                   total_after_discount ──► Review / EFT amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use dsfuel_core::money::Money;
    ///
    /// let price = Money::from_cents(54999);
    /// assert_eq!(price.cents(), 54999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from Rand and cents.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -R5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole Rand portion.
    #[inline]
    pub const fn rands(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use dsfuel_core::money::Money;
    ///
    /// let barrel = Money::from_cents(349_999);
    /// assert_eq!(barrel.multiply_quantity(2).cents(), 699_998);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns `pct` percent of this amount, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(cents * pct + 50) / 100`.
    ///
    /// ```rust
    /// use dsfuel_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10_000); // R100.00
    /// assert_eq!(subtotal.percentage(20).cents(), 2_000);
    /// assert_eq!(Money::from_cents(5).percentage(10).cents(), 1); // 0.5c → 1c
    /// ```
    pub fn percentage(&self, pct: u32) -> Money {
        let amount = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::from_cents(amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `R549.99`.
///
/// The app's `CheckoutConfig::format_currency` honours a configured symbol;
/// this impl is for logs and summaries.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R{}.{:02}", sign, self.rands().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by an order quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
