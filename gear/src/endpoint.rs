//! Canonical request paths and query strings.
//!
//! The strings built here are signed byte-for-byte and then appended to the
//! base URL unchanged, so the bytes the gateway sees are exactly the bytes
//! that were signed.

use url::form_urlencoded;

/// Resource name of the order collection.
pub const ORDERS: &str = "orders";

/// Resource name of the last-keychain-id endpoint.
pub const LAST_KEYCHAIN_ID: &str = "last_keychain_id";

/// Returns `/gateways/{gateway_id}/{resource}`.
#[must_use]
pub fn build_path(gateway_id: &str, resource: &str) -> String {
    format!("/gateways/{gateway_id}/{resource}")
}

/// Parameters attached to a signed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryParams {
    /// No parameters.
    #[default]
    None,
    /// Key/value pairs, form-urlencoded in insertion order.
    Form(Vec<(String, String)>),
    /// A sub-resource suffix such as `"{payment_id}/cancel"`. Sent verbatim.
    Suffix(String),
}

impl QueryParams {
    /// Builds [`QueryParams::Form`] from any iterator of pairs.
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds [`QueryParams::Suffix`].
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Suffix(suffix.into())
    }

    /// Renders the parameters as they are appended to the path.
    ///
    /// - form pairs → `"?" + urlencoded(pairs)`
    /// - suffix → `"/" + suffix`, with no escaping
    /// - nothing, an empty form or an empty suffix → `""`
    #[must_use]
    pub fn build_query(&self) -> String {
        match self {
            Self::Form(pairs) if !pairs.is_empty() => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                format!("?{encoded}")
            }
            Self::Suffix(suffix) if !suffix.is_empty() => format!("/{suffix}"),
            _ => String::new(),
        }
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Form(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path() {
        assert_eq!(build_path("gw1", ORDERS), "/gateways/gw1/orders");
        assert_eq!(
            build_path("gw1", LAST_KEYCHAIN_ID),
            "/gateways/gw1/last_keychain_id"
        );
    }

    #[test]
    fn test_form_query_keeps_insertion_order() {
        let params = QueryParams::form([("amount", "1000"), ("keychain_id", "3")]);
        assert_eq!(params.build_query(), "?amount=1000&keychain_id=3");
    }

    #[test]
    fn test_form_query_is_urlencoded() {
        let params = QueryParams::form([("callback_data", "order #1&more")]);
        assert_eq!(params.build_query(), "?callback_data=order+%231%26more");
    }

    #[test]
    fn test_form_query_uses_whatwg_byte_set() {
        // `~` is escaped and `*` is kept, unlike Python's `urlencode`
        let params = QueryParams::form([("callback_data", "x~y*z")]);
        assert_eq!(params.build_query(), "?callback_data=x%7Ey*z");
    }

    #[test]
    fn test_suffix_query_is_not_escaped() {
        let params = QueryParams::suffix("42/cancel");
        assert_eq!(params.build_query(), "/42/cancel");
    }

    #[test]
    fn test_empty_params_produce_empty_query() {
        assert_eq!(QueryParams::None.build_query(), "");
        assert_eq!(QueryParams::Form(Vec::new()).build_query(), "");
        assert_eq!(QueryParams::suffix("").build_query(), "");
    }

    #[test]
    fn test_build_query_is_pure() {
        let params = QueryParams::form([("amount", "10.5"), ("callback_data", "a b")]);
        assert_eq!(params.build_query(), params.build_query());
    }
}
