//! Wallet companion-app (app-to-app) adapter.
//!
//! Venmo-style flows: the host invokes an installed wallet app directly,
//! the user approves there, and the wallet hands back a structured document
//! carrying a one-time payment method nonce.

use payswitch_types::{
    Destination, PaymentAdapter, ReturnData, Slot, SwitchConfig, SwitchError, traits::Result,
};
use serde_json::{Value, json};

/// [`PaymentAdapter`] for an installed wallet companion app.
pub struct WalletAdapter {
    app_id: String,
}

impl WalletAdapter {
    /// Create an adapter targeting the given installed-app identifier
    /// (e.g. `"com.venmo"`).
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

impl PaymentAdapter for WalletAdapter {
    fn slot(&self) -> Slot {
        Slot::Venmo
    }

    fn build_destination(&self, _config: &SwitchConfig, _metadata: &Value) -> Result<Destination> {
        Ok(Destination::CompanionApp(self.app_id.clone()))
    }

    /// Interpret the wallet's returned document. A usable result carries a
    /// `nonce`; everything else is reported malformed.
    fn interpret(&self, data: &ReturnData) -> Result<Value> {
        let ReturnData::Document(document) = data else {
            return Err(SwitchError::MalformedResult(
                "wallet returns a structured document, not a deep link".into(),
            ));
        };
        let nonce = document
            .get("nonce")
            .and_then(Value::as_str)
            .ok_or_else(|| SwitchError::MalformedResult("wallet payload missing nonce".into()))?;
        Ok(json!({
            "nonce": nonce,
            "username": document.get("username").cloned().unwrap_or(Value::Null),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_destination_is_companion() {
        let adapter = WalletAdapter::new("com.venmo");
        let dest = adapter
            .build_destination(&SwitchConfig::new("shop"), &Value::Null)
            .unwrap();
        assert_eq!(dest, Destination::CompanionApp("com.venmo".into()));
    }

    #[test]
    fn test_interpret_document() {
        let adapter = WalletAdapter::new("com.venmo");
        let doc = adapter
            .interpret(&ReturnData::Document(
                json!({"nonce": "n-1", "username": "@alice"}),
            ))
            .unwrap();
        assert_eq!(doc["nonce"], "n-1");
        assert_eq!(doc["username"], "@alice");
    }

    #[test]
    fn test_interpret_missing_nonce() {
        let adapter = WalletAdapter::new("com.venmo");
        let err = adapter
            .interpret(&ReturnData::Document(json!({"username": "@alice"})))
            .unwrap_err();
        assert!(matches!(err, SwitchError::MalformedResult(_)));
    }

    #[test]
    fn test_interpret_rejects_uri_data() {
        let adapter = WalletAdapter::new("com.venmo");
        let err = adapter
            .interpret(&ReturnData::Uri("shop://venmo-success".into()))
            .unwrap_err();
        assert!(matches!(err, SwitchError::MalformedResult(_)));
    }
}
