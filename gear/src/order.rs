//! Order parameters and statuses.

use std::fmt;

use rust_decimal::Decimal;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::endpoint::QueryParams;

/// Order status as reported by the gateway.
///
/// Encoded on the wire as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum OrderStatus {
    /// Waiting for a payment.
    Pending = 0,
    /// A transaction was received but lacks confirmations.
    Unconfirmed = 1,
    /// Paid in full.
    Paid = 2,
    /// Not enough money received.
    Underpaid = 3,
    /// Too much money received.
    Overpaid = 4,
    /// The customer did not pay in time.
    Expired = 5,
    /// The customer canceled the order.
    Canceled = 6,
}

impl OrderStatus {
    /// Every status, in wire order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Unconfirmed,
        Self::Paid,
        Self::Underpaid,
        Self::Overpaid,
        Self::Expired,
        Self::Canceled,
    ];

    /// Lowercase status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Unconfirmed => "unconfirmed",
            Self::Paid => "paid",
            Self::Underpaid => "underpaid",
            Self::Overpaid => "overpaid",
            Self::Expired => "expired",
            Self::Canceled => "canceled",
        }
    }

    /// `true` once the gateway will no longer change the status.
    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Pending | Self::Unconfirmed)
    }

    /// `true` if at least the requested amount was received.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid | Self::Overpaid)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        status as Self
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| u8::from(*status) == value)
            .ok_or(value)
    }
}

/// Parameters for creating an order.
///
/// # Example
///
/// ```rust
/// use mycelium_gear::order::OrderRequest;
/// use rust_decimal::Decimal;
///
/// let request = OrderRequest::new(Decimal::from(1000)).with_keychain_id(3);
/// assert_eq!(request.to_params().build_query(), "?amount=1000&keychain_id=3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount to pay, in the gateway currency (satoshis for BTC gateways).
    pub amount: Decimal,
    /// Keychain id used to derive the deposit address.
    pub keychain_id: Option<u64>,
    /// Opaque merchant data echoed back in callbacks.
    pub callback_data: Option<String>,
}

impl OrderRequest {
    /// Creates a request for `amount` with no optional parameters.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self {
            amount,
            keychain_id: None,
            callback_data: None,
        }
    }

    /// Sets the keychain id.
    #[must_use]
    pub const fn with_keychain_id(mut self, keychain_id: u64) -> Self {
        self.keychain_id = Some(keychain_id);
        self
    }

    /// Sets the callback data.
    #[must_use]
    pub fn with_callback_data(mut self, callback_data: impl Into<String>) -> Self {
        self.callback_data = Some(callback_data.into());
        self
    }

    /// Query parameters in the order `amount`, `keychain_id`, `callback_data`,
    /// with absent keys omitted. Empty callback data counts as absent.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut pairs = vec![("amount".to_owned(), self.amount.to_string())];
        if let Some(keychain_id) = self.keychain_id {
            pairs.push(("keychain_id".to_owned(), keychain_id.to_string()));
        }
        if let Some(callback_data) = self.callback_data.as_ref().filter(|data| !data.is_empty()) {
            pairs.push(("callback_data".to_owned(), callback_data.clone()));
        }
        QueryParams::Form(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        for (index, status) in OrderStatus::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(u8::from(status)), index);
            assert_eq!(OrderStatus::try_from(u8::from(status)), Ok(status));
        }
        assert_eq!(OrderStatus::try_from(7), Err(7));
    }

    #[test]
    fn test_status_deserializes_from_integer() {
        let status: OrderStatus = serde_json::from_str("2").unwrap();
        assert_eq!(status, OrderStatus::Paid);
        assert_eq!(serde_json::to_string(&OrderStatus::Canceled).unwrap(), "6");
        assert!(serde_json::from_str::<OrderStatus>("9").is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(!OrderStatus::Pending.is_final());
        assert!(!OrderStatus::Unconfirmed.is_final());
        assert!(OrderStatus::Expired.is_final());
        assert!(OrderStatus::Overpaid.is_paid());
        assert!(!OrderStatus::Underpaid.is_paid());
        assert_eq!(OrderStatus::Underpaid.to_string(), "underpaid");
    }

    #[test]
    fn test_amount_only_params() {
        let params = OrderRequest::new(Decimal::from(1000)).to_params();
        assert_eq!(params.build_query(), "?amount=1000");
    }

    #[test]
    fn test_all_params_in_order() {
        let params = OrderRequest::new(Decimal::new(105, 1))
            .with_keychain_id(0)
            .with_callback_data("ref=7")
            .to_params();
        assert_eq!(
            params.build_query(),
            "?amount=10.5&keychain_id=0&callback_data=ref%3D7"
        );
    }

    #[test]
    fn test_empty_callback_data_is_omitted() {
        let params = OrderRequest::new(Decimal::ONE)
            .with_callback_data("")
            .to_params();
        assert_eq!(params.build_query(), "?amount=1");
    }

    #[test]
    fn test_callback_data_without_keychain() {
        let params = OrderRequest::new(Decimal::from(5))
            .with_callback_data("x")
            .to_params();
        assert_eq!(params.build_query(), "?amount=5&callback_data=x");
    }
}
