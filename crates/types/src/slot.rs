//! Slot identifiers and their well-known return-host literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which payment method's switch is in flight.
///
/// At most one switch is outstanding per slot; starting a new switch on an
/// occupied slot overwrites the prior pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    LocalPayment,
    PayPalCheckout,
    Venmo,
    ThreeDSecure,
    SepaDebit,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalPayment => write!(f, "local_payment"),
            Self::PayPalCheckout => write!(f, "paypal_checkout"),
            Self::Venmo => write!(f, "venmo"),
            Self::ThreeDSecure => write!(f, "three_d_secure"),
            Self::SepaDebit => write!(f, "sepa_debit"),
        }
    }
}

impl std::str::FromStr for Slot {
    type Err = crate::SwitchError;

    /// Parse a persisted slot key back into a [`Slot`].
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::UnknownSlot`] if the string does not match any
    /// known slot name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local_payment" => Ok(Self::LocalPayment),
            "paypal_checkout" => Ok(Self::PayPalCheckout),
            "venmo" => Ok(Self::Venmo),
            "three_d_secure" => Ok(Self::ThreeDSecure),
            "sepa_debit" => Ok(Self::SepaDebit),
            other => Err(crate::SwitchError::UnknownSlot(other.to_string())),
        }
    }
}

impl Slot {
    /// Returns all known slot variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::LocalPayment,
            Self::PayPalCheckout,
            Self::Venmo,
            Self::ThreeDSecure,
            Self::SepaDebit,
        ]
    }

    /// The fixed return-URI host signalling a completed approval.
    ///
    /// The full return URI is `{scheme}://{success_host()}`, where `scheme`
    /// comes from [`crate::SwitchConfig::return_url_scheme`].
    #[must_use]
    pub fn success_host(&self) -> &'static str {
        match self {
            Self::LocalPayment => "local-payment-success",
            Self::PayPalCheckout => "paypal-checkout-success",
            Self::Venmo => "venmo-success",
            Self::ThreeDSecure => "three-d-secure-success",
            Self::SepaDebit => "sepa-debit-success",
        }
    }

    /// The fixed return-URI host signalling user cancellation.
    #[must_use]
    pub fn cancel_host(&self) -> &'static str {
        match self {
            Self::LocalPayment => "local-payment-cancel",
            Self::PayPalCheckout => "paypal-checkout-cancel",
            Self::Venmo => "venmo-cancel",
            Self::ThreeDSecure => "three-d-secure-cancel",
            Self::SepaDebit => "sepa-debit-cancel",
        }
    }
}
