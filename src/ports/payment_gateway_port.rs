use serde::{Deserialize, Serialize};

/// Placeholder payment id when the gateway result carries none.
pub const UNKNOWN_PAYMENT_ID: &str = "unknown_payment_id";

/// Gateway status code that confirms a card charge; anything else is treated
/// as still pending.
pub const GATEWAY_STATUS_CONFIRMED: &str = "CONFIRMED";

/// Result produced by the payment gateway for one charge attempt. Transient:
/// consumed by the payment method adapter, never persisted as-is. Card and
/// PIX charges populate different subsets of the optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub payment_id: Option<String>,
    pub status: Option<String>,

    // Card fields
    pub card_number: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub cvv: Option<String>,
    pub brand: Option<String>,

    // PIX fields
    pub qr_code: Option<String>,
    pub qr_code_image: Option<String>,
    pub expiration_date: Option<String>,
}

impl PaymentResult {
    /// The payment id to key guards on, with the gateway's placeholder when
    /// missing.
    pub fn payment_id_or_unknown(&self) -> String {
        self.payment_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_PAYMENT_ID.to_string())
    }
}
