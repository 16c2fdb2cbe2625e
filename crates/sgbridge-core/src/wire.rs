//! Shopgate wire DTOs produced and consumed by the bridge.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionType {
    Fixed,
    Percent,
}

/// A quantity band with a fixed reduction off the regular price, optionally
/// restricted to one customer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrice {
    pub from_quantity: u32,
    pub to_quantity: Option<u32>,
    pub reduction_type: ReductionType,
    pub reduction: Decimal,
    /// `None` applies the band to every customer group.
    pub customer_group_uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateImage {
    pub uid: String,
    pub sort_order: u32,
    pub url: String,
    pub title: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateCategory {
    pub uid: String,
    pub sort_order: i64,
    pub name: String,
    pub parent_uid: Option<String>,
    pub deeplink: String,
    pub is_anchor: bool,
    pub is_active: bool,
    pub image: Option<ShopgateImage>,
}

// -----------------------------------------------------------------------
// Customers and addresses
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "d")]
    Diverse,
}

/// Shopgate address type. Numeric codes match the partner API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Invoice,
    Delivery,
    Both,
}

impl AddressType {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AddressType::Invoice => 1,
            AddressType::Delivery => 2,
            AddressType::Both => 3,
        }
    }

    #[must_use]
    pub fn is_invoice(self) -> bool {
        matches!(self, AddressType::Invoice | AddressType::Both)
    }

    #[must_use]
    pub fn is_delivery(self) -> bool {
        matches!(self, AddressType::Delivery | AddressType::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateAddress {
    pub id: Option<String>,
    pub address_type: AddressType,
    pub gender: Option<Gender>,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street1: String,
    pub street2: Option<String>,
    pub zipcode: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    /// ISO 3166-2 state code, e.g. `DE-HE`.
    pub state: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub mail: Option<String>,
    pub birthday: Option<String>,
}

impl ShopgateAddress {
    /// Whether both addresses point to the same recipient and location.
    /// Ids, type and contact data are ignored.
    #[must_use]
    pub fn same_location(&self, other: &ShopgateAddress) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.company.as_deref().unwrap_or_default()
                == other.company.as_deref().unwrap_or_default()
            && self.street1 == other.street1
            && self.street2.as_deref().unwrap_or_default()
                == other.street2.as_deref().unwrap_or_default()
            && self.zipcode == other.zipcode
            && self.city == other.city
            && self.country == other.country
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateCustomerGroup {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateCustomer {
    pub customer_id: Option<String>,
    pub customer_number: Option<String>,
    pub mail: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    /// `YYYY-MM-DD`.
    pub birthday: Option<String>,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`.
    pub registration_date: Option<String>,
    pub newsletter_subscription: bool,
    pub customer_groups: Vec<ShopgateCustomerGroup>,
    pub addresses: Vec<ShopgateAddress>,
    pub tax_class_id: Option<String>,
    pub tax_class_key: Option<String>,
}

/// Customer block of a `check_cart` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCustomer {
    pub customer_groups: Vec<ShopgateCustomerGroup>,
}

// -----------------------------------------------------------------------
// Orders and carts
// -----------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_number: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_amount: Decimal,
    #[serde(default)]
    pub unit_amount_with_tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateOrder {
    pub mail: String,
    pub delivery_address: ShopgateAddress,
    pub invoice_address: ShopgateAddress,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Cart item error codes understood by Shopgate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartItemError {
    OutOfStock,
    ProductNotFound,
    RequestedQuantityNotAvailable,
    ProductNotAllowed,
}

impl CartItemError {
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            CartItemError::OutOfStock => 301,
            CartItemError::ProductNotFound => 302,
            CartItemError::RequestedQuantityNotAvailable => 305,
            CartItemError::ProductNotAllowed => 306,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_number: String,
    pub name: String,
    pub is_buyable: bool,
    pub qty_buyable: Option<u32>,
    pub stock_quantity: i64,
    pub unit_amount: Decimal,
    pub unit_amount_with_tax: Decimal,
    pub error: Option<CartItemError>,
    pub error_text: Option<String>,
}

impl CartItem {
    /// Starts a cart item from the incoming order item it answers.
    #[must_use]
    pub fn from_order_item(item: &OrderItem) -> Self {
        Self {
            item_number: item.item_number.clone(),
            name: item.name.clone(),
            is_buyable: true,
            qty_buyable: None,
            stock_quantity: i64::from(item.quantity),
            unit_amount: item.unit_amount,
            unit_amount_with_tax: item.unit_amount_with_tax,
            error: None,
            error_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCoupon {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form field; carries `cartRule` for automatically applied rules.
    #[serde(default)]
    pub internal_info: Option<String>,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub is_free_shipping: bool,
    #[serde(default)]
    pub amount_gross: Option<Decimal>,
}
