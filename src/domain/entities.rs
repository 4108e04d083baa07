use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    CardDetails, DeviceType, Money, PaymentMethod, PaymentStatus, PixDetails,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shipping/billing address. Only present when the buyer filled the street
/// field; the postal code is stored digits-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: String,
}

/// Buyer identification captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub address: Option<Address>,
}

/// Order as persisted by the external order store. Never mutated by this
/// service after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier assigned by the order store
    pub id: i64,

    pub customer: Customer,

    /// Product reference
    pub product_id: String,
    pub product_name: String,
    pub product_price: Money,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    /// Gateway payment id this order was created for
    pub payment_id: String,

    pub card_details: Option<CardDetails>,
    pub pix_details: Option<PixDetails>,

    pub order_date: DateTime<Utc>,
    pub device_type: DeviceType,
    pub is_digital_product: bool,
}

/// Order shape sent to the order store; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: Customer,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Money,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_id: String,
    pub card_details: Option<CardDetails>,
    pub pix_details: Option<PixDetails>,
    pub order_date: DateTime<Utc>,
    pub device_type: DeviceType,
    pub is_digital_product: bool,
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub slug: String,
    pub is_digital: bool,
}

impl Product {
    /// Creates a new catalog product. The slug is derived from the name when
    /// not supplied.
    pub fn new(
        name: String,
        price: Money,
        slug: Option<String>,
        is_digital: bool,
    ) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Product name must not be empty".to_string(),
            ));
        }

        if price.to_cents() <= 0 {
            return Err(DomainError::ValidationError(
                "Product price must be greater than 0".to_string(),
            ));
        }

        let slug = match slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&name),
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            slug,
            is_digital,
        })
    }
}

/// Lowercase, alphanumeric words joined by hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_derives_slug() {
        let product = Product::new(
            "Curso de Violão Completo".to_string(),
            Money::from_cents(9900),
            None,
            true,
        )
        .unwrap();

        assert_eq!(product.slug, "curso-de-viol-o-completo");
        assert!(product.is_digital);
    }

    #[test]
    fn test_create_product_keeps_explicit_slug() {
        let product = Product::new(
            "Ebook".to_string(),
            Money::from_cents(1990),
            Some("ebook-2024".to_string()),
            true,
        )
        .unwrap();

        assert_eq!(product.slug, "ebook-2024");
    }

    #[test]
    fn test_create_product_rejects_invalid_price() {
        let result = Product::new("Ebook".to_string(), Money::from_cents(0), None, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_product_rejects_blank_name() {
        let result = Product::new("   ".to_string(), Money::from_cents(100), None, false);
        assert!(result.is_err());
    }
}
