//! Shopware-side entities, reduced to the fields the bridge reads.
//!
//! These are plain data carriers filled by whatever loads them from the shop
//! (repository search, store-api responses). They carry no behaviour beyond
//! small lookups.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerGroup {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salutation {
    pub id: String,
    /// Technical key, e.g. `mr`, `mrs`, `not_specified`.
    pub salutation_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub iso: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryState {
    pub id: String,
    pub short_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub handler_identifier: Option<String>,
}

/// Customer or order address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub street: String,
    #[serde(default)]
    pub additional_address_line1: Option<String>,
    #[serde(default)]
    pub additional_address_line2: Option<String>,
    pub zipcode: String,
    pub city: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub country_state: Option<CountryState>,
    #[serde(default)]
    pub salutation: Option<Salutation>,
    /// Mail of the owning customer; only customer addresses carry it.
    #[serde(default)]
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEntity {
    pub id: String,
    pub customer_number: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub salutation: Option<Salutation>,
    #[serde(default)]
    pub group: Option<CustomerGroup>,
    pub default_billing_address_id: String,
    pub default_shipping_address_id: String,
    #[serde(default)]
    pub default_payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub addresses: Vec<AddressEntity>,
}

impl CustomerEntity {
    #[must_use]
    pub fn default_shipping_address(&self) -> Option<&AddressEntity> {
        self.addresses
            .iter()
            .find(|a| a.id == self.default_shipping_address_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoUrl {
    pub sales_channel_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub path_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesChannelDomain {
    pub sales_channel_id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntity {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    pub auto_increment: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub seo_urls: Vec<SeoUrl>,
    /// CMS slot configuration keyed by slot id.
    #[serde(default)]
    pub slot_config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedTax {
    pub tax: Decimal,
    pub tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedPrice {
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub calculated_taxes: Vec<CalculatedTax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInformation {
    pub stock: i64,
}

/// A line item of a calculated Shopware cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<CalculatedPrice>,
    #[serde(default)]
    pub delivery_information: Option<DeliveryInformation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartErrorKind {
    ProductNotFound,
    ProductOutOfStock,
    ProductStockReached,
    Other,
}

/// An error the cart calculation attached to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartError {
    /// Error id: the message key followed by the affected line item id.
    pub id: String,
    pub message_key: String,
    /// Human readable message, may contain a `%s` placeholder for the item name.
    pub message: String,
    pub kind: CartErrorKind,
}

impl CartError {
    /// The line item id this error refers to.
    #[must_use]
    pub fn line_item_id(&self) -> String {
        self.id.replace(&self.message_key, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Open,
    InProgress,
    Paid,
    PaidPartially,
    Authorized,
    Cancelled,
    Failed,
    Refunded,
    RefundedPartially,
    Reminded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTransaction {
    pub id: String,
    pub state: TransactionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_error_strips_message_key_from_id() {
        let error = CartError {
            id: "product-stock-reachedabc123".to_string(),
            message_key: "product-stock-reached".to_string(),
            message: "stock reached".to_string(),
            kind: CartErrorKind::ProductStockReached,
        };
        assert_eq!(error.line_item_id(), "abc123");
    }

    #[test]
    fn default_shipping_address_is_looked_up_by_id() {
        let customer = CustomerEntity {
            id: "c1".to_string(),
            customer_number: "10001".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            newsletter: false,
            created_at: None,
            birthday: None,
            salutation: None,
            group: None,
            default_billing_address_id: "a1".to_string(),
            default_shipping_address_id: "a2".to_string(),
            default_payment_method: None,
            addresses: vec![
                AddressEntity {
                    id: "a1".to_string(),
                    ..AddressEntity::default()
                },
                AddressEntity {
                    id: "a2".to_string(),
                    city: "Butzbach".to_string(),
                    ..AddressEntity::default()
                },
            ],
        };
        let shipping = customer.default_shipping_address().expect("address a2");
        assert_eq!(shipping.city, "Butzbach");
    }
}
