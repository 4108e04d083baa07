use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "CREDIT_CARD"),
            PaymentMethod::Pix => write!(f, "PIX"),
        }
    }
}

/// Persisted payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Denied,
}

impl PaymentStatus {
    /// Three-way mapping shared by manual-status codes and upper-cased base
    /// statuses: `CONFIRMED` pays, `REJECTED` denies, anything else stays
    /// pending.
    pub fn from_code(code: &str) -> Self {
        match code {
            "CONFIRMED" => PaymentStatus::Paid,
            "REJECTED" => PaymentStatus::Denied,
            _ => PaymentStatus::Pending,
        }
    }

    /// Resolves a manually-entered processing code (simulated gateways let the
    /// merchant force an outcome). Unknown or missing codes fall back to
    /// pending.
    pub fn resolve_manual(code: Option<&str>) -> Self {
        match code {
            Some(raw) => Self::from_code(raw.trim().to_uppercase().as_str()),
            None => PaymentStatus::Pending,
        }
    }

    /// Resolves the base status reported by the gateway.
    pub fn resolve_base(base: BaseStatus) -> Self {
        Self::from_code(base.as_str().to_uppercase().as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::Denied => write!(f, "DENIED"),
        }
    }
}

/// Raw status handed to the checkout flow by the payment method adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseStatus {
    Pending,
    Confirmed,
}

impl BaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseStatus::Pending => "pending",
            BaseStatus::Confirmed => "confirmed",
        }
    }
}

/// Device class the checkout was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
}

const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "windows phone",
    "blackberry",
    "opera mini",
    "mobile",
];

impl DeviceType {
    /// Coarse detection from the User-Agent header. Absent or unrecognized
    /// agents count as desktop.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) => {
                let ua = ua.to_lowercase();
                if MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token)) {
                    DeviceType::Mobile
                } else {
                    DeviceType::Desktop
                }
            }
            None => DeviceType::Desktop,
        }
    }
}

/// Monetary amount in cents, avoiding floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in cents
    pub amount_cents: i64,
}

impl Money {
    pub fn from_reais(amount: i64) -> Self {
        Self {
            amount_cents: amount * 100,
        }
    }

    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount_cents: cents,
        }
    }

    pub fn to_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn to_reais(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R${:.2}", self.to_reais())
    }
}

/// Card block attached to credit-card orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub brand: String,
}

/// PIX block attached to PIX orders: the copy-paste payload, the rendered QR
/// image, and when the charge expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixDetails {
    pub qr_code: Option<String>,
    pub qr_code_image: Option<String>,
    pub expiration_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_status_mapping() {
        assert_eq!(
            PaymentStatus::resolve_base(BaseStatus::Pending),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentStatus::resolve_base(BaseStatus::Confirmed),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_manual_status_table() {
        assert_eq!(
            PaymentStatus::resolve_manual(Some("CONFIRMED")),
            PaymentStatus::Paid
        );
        assert_eq!(
            PaymentStatus::resolve_manual(Some("REJECTED")),
            PaymentStatus::Denied
        );
        assert_eq!(
            PaymentStatus::resolve_manual(Some("ANALYSIS")),
            PaymentStatus::Pending
        );
        assert_eq!(PaymentStatus::resolve_manual(None), PaymentStatus::Pending);
    }

    #[test]
    fn test_manual_status_is_case_insensitive() {
        assert_eq!(
            PaymentStatus::resolve_manual(Some(" confirmed ")),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_device_detection() {
        let mobile = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/126.0";
        assert_eq!(
            DeviceType::from_user_agent(Some(mobile)),
            DeviceType::Mobile
        );
        assert_eq!(
            DeviceType::from_user_agent(Some(desktop)),
            DeviceType::Desktop
        );
        assert_eq!(DeviceType::from_user_agent(None), DeviceType::Desktop);
    }

    #[test]
    fn test_money_display() {
        let price = Money::from_cents(19790);
        assert_eq!(format!("{}", price), "R$197.90");
    }

    #[test]
    fn test_money_from_reais() {
        let price = Money::from_reais(50);
        assert_eq!(price.to_cents(), 5000);
        assert_eq!(price.to_reais(), 50.0);
    }
}
