//! Local payment (bank redirect) browser-switch adapter.
//!
//! iDEAL-style flows: the payment gateway issues an approval URL, the user
//! authorizes in the external browser, and the bank redirects back to
//! `{scheme}://local-payment-success` (or `-cancel`) with the gateway
//! identifiers in the query string.

use payswitch_types::{
    Destination, PaymentAdapter, ReturnData, Slot, SwitchConfig, SwitchError, traits::Result,
};
use serde_json::{Value, json};
use url::Url;

/// Metadata key carrying the gateway's approval URL.
pub const APPROVAL_URL_KEY: &str = "approval_url";

// Query parameter names the gateway expects for its redirect targets.
const SUCCESS_URL_PARAM: &str = "successUrl";
const CANCEL_URL_PARAM: &str = "cancelUrl";

/// Build the browser destination from the gateway approval URL, attaching
/// the host's success and cancel deep links as query parameters.
///
/// # Errors
///
/// Returns [`SwitchError::DestinationUnavailable`] if the approval URL does
/// not parse.
pub fn build_approval_url(approval_url: &str, return_scheme: &str) -> Result<String> {
    let mut url = Url::parse(approval_url).map_err(|e| {
        SwitchError::DestinationUnavailable(format!("invalid approval url: {e}"))
    })?;
    let success = format!("{return_scheme}://{}", Slot::LocalPayment.success_host());
    let cancel = format!("{return_scheme}://{}", Slot::LocalPayment.cancel_host());
    url.query_pairs_mut()
        .append_pair(SUCCESS_URL_PARAM, &success)
        .append_pair(CANCEL_URL_PARAM, &cancel);
    Ok(url.into())
}

/// Extract the gateway identifiers from a success return URI's query.
///
/// # Errors
///
/// Returns [`SwitchError::MalformedResult`] if the URI does not parse or
/// carries no `paymentId`.
pub fn parse_return_query(return_uri: &str) -> Result<Value> {
    let url = Url::parse(return_uri)
        .map_err(|e| SwitchError::MalformedResult(format!("invalid return uri: {e}")))?;

    let mut payment_id = None;
    let mut payer_token = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "paymentId" => payment_id = Some(value.into_owned()),
            "token" => payer_token = Some(value.into_owned()),
            _ => {}
        }
    }

    let payment_id = payment_id
        .ok_or_else(|| SwitchError::MalformedResult("return uri missing paymentId".into()))?;
    Ok(json!({
        "payment_id": payment_id,
        "payer_token": payer_token,
    }))
}

/// [`PaymentAdapter`] for redirect-based local payment methods.
pub struct LocalPaymentAdapter;

impl PaymentAdapter for LocalPaymentAdapter {
    fn slot(&self) -> Slot {
        Slot::LocalPayment
    }

    fn build_destination(&self, config: &SwitchConfig, metadata: &Value) -> Result<Destination> {
        let approval_url = metadata
            .get(APPROVAL_URL_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SwitchError::DestinationUnavailable("metadata missing approval_url".into())
            })?;
        Ok(Destination::Url(build_approval_url(
            approval_url,
            &config.return_url_scheme,
        )?))
    }

    fn interpret(&self, data: &ReturnData) -> Result<Value> {
        match data {
            ReturnData::Uri(uri) => parse_return_query(uri),
            ReturnData::Document(_) => Err(SwitchError::MalformedResult(
                "local payment returns via deep link, not a document".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_approval_url_attaches_deep_links() {
        let url = build_approval_url("https://gateway.example/approve?id=p-1", "shop").unwrap();
        assert!(url.starts_with("https://gateway.example/approve?id=p-1"));
        assert!(url.contains("successUrl=shop%3A%2F%2Flocal-payment-success"));
        assert!(url.contains("cancelUrl=shop%3A%2F%2Flocal-payment-cancel"));
    }

    #[test]
    fn test_build_approval_url_rejects_garbage() {
        let err = build_approval_url("not a url", "shop").unwrap_err();
        assert!(matches!(err, SwitchError::DestinationUnavailable(_)));
    }

    #[test]
    fn test_parse_return_query() {
        let doc =
            parse_return_query("shop://local-payment-success?paymentId=p-1&token=tok-9").unwrap();
        assert_eq!(doc["payment_id"], "p-1");
        assert_eq!(doc["payer_token"], "tok-9");
    }

    #[test]
    fn test_parse_return_query_token_optional() {
        let doc = parse_return_query("shop://local-payment-success?paymentId=p-1").unwrap();
        assert_eq!(doc["payment_id"], "p-1");
        assert!(doc["payer_token"].is_null());
    }

    #[test]
    fn test_parse_return_query_missing_payment_id() {
        let err = parse_return_query("shop://local-payment-success?token=tok-9").unwrap_err();
        assert!(matches!(err, SwitchError::MalformedResult(_)));
    }

    #[test]
    fn test_adapter_build_destination() {
        let adapter = LocalPaymentAdapter;
        let config = SwitchConfig::new("shop");
        let metadata = serde_json::json!({ APPROVAL_URL_KEY: "https://gateway.example/approve" });
        let Destination::Url(url) = adapter.build_destination(&config, &metadata).unwrap() else {
            panic!("expected a browser destination");
        };
        assert!(url.contains("local-payment-success"));
    }

    #[test]
    fn test_adapter_rejects_missing_approval_url() {
        let adapter = LocalPaymentAdapter;
        let err = adapter
            .build_destination(&SwitchConfig::new("shop"), &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, SwitchError::DestinationUnavailable(_)));
    }

    #[test]
    fn test_adapter_rejects_document_data() {
        let adapter = LocalPaymentAdapter;
        let err = adapter
            .interpret(&ReturnData::Document(serde_json::json!({})))
            .unwrap_err();
        assert!(matches!(err, SwitchError::MalformedResult(_)));
    }
}
