//! Cart line items: Shopgate order items and coupons going into a Shopware
//! cart, calculated line items coming back as Shopgate cart items.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sgbridge_core::entities::{CartError, CartErrorKind, LineItem};
use sgbridge_core::wire::{CartItem, CartItemError, ExternalCoupon, OrderItem};

/// Internal info marking a coupon as an automatically applied cart rule.
pub const CART_RULE: &str = "cartRule";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    Product,
    Promotion,
}

/// A line item to add to the Shopware cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub referenced_id: String,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stackable: Option<bool>,
}

#[must_use]
pub fn map_incoming_products(items: &[OrderItem]) -> Vec<LineItemRequest> {
    items
        .iter()
        .map(|item| LineItemRequest {
            id: Some(item.item_number.clone()),
            referenced_id: item.item_number.clone(),
            kind: LineItemKind::Product,
            quantity: Some(item.quantity),
            stackable: Some(true),
        })
        .collect()
}

/// Coupon line items; cart rules are skipped as the cart applies them on
/// its own.
#[must_use]
pub fn map_incoming_promos(coupons: &[ExternalCoupon]) -> Vec<LineItemRequest> {
    coupons
        .iter()
        .filter(|coupon| coupon.internal_info.as_deref() != Some(CART_RULE))
        .map(|coupon| LineItemRequest {
            id: None,
            referenced_id: coupon.code.clone(),
            kind: LineItemKind::Promotion,
            quantity: None,
            stackable: None,
        })
        .collect()
}

/// Cart item for a product the cart accepted.
///
/// Soft errors raised for this line item end up in `error_text`. A
/// stock-reached error makes the item unbuyable and reports the requested
/// quantity instead of the one the cart reduced it to.
#[must_use]
pub fn map_valid_product(line_item: &LineItem, incoming: &OrderItem, errors: &[CartError]) -> CartItem {
    let mut item = CartItem::from_order_item(incoming);
    item.item_number.clone_from(&line_item.id);
    item.is_buyable = true;
    item.stock_quantity = line_item
        .delivery_information
        .as_ref()
        .map_or(i64::from(line_item.quantity), |delivery| delivery.stock);

    let Some(price) = &line_item.price else {
        return item;
    };

    item.qty_buyable = Some(price.quantity);
    item.unit_amount_with_tax = price.unit_price.round_dp(2);
    let tax: Decimal = price.calculated_taxes.iter().map(|t| t.tax).sum();
    let unit_tax = tax
        .checked_div(Decimal::from(price.quantity))
        .unwrap_or_default();
    item.unit_amount = (price.unit_price - unit_tax).round_dp(2);

    let mut text = String::new();
    for error in errors.iter().filter(|e| e.line_item_id() == line_item.id) {
        let _ = write!(text, "{}. ", error.message);
        if error.kind == CartErrorKind::ProductStockReached {
            item.is_buyable = false;
            item.error = Some(CartItemError::RequestedQuantityNotAvailable);
            item.stock_quantity = i64::from(incoming.quantity);
        }
    }
    if !text.is_empty() {
        tracing::debug!(line_item_id = %line_item.id, errors = %text, "line item carries cart errors");
        item.error_text = Some(text);
    }

    item
}

/// Cart item for a product the cart rejected.
#[must_use]
pub fn map_invalid_product(error: &CartError, missing: &OrderItem) -> CartItem {
    let mut item = CartItem::from_order_item(missing);
    item.is_buyable = false;
    item.error_text = Some(error.message.replacen("%s", &missing.name, 1));
    item.error = Some(match error.kind {
        CartErrorKind::ProductNotFound => CartItemError::ProductNotFound,
        CartErrorKind::ProductOutOfStock => CartItemError::OutOfStock,
        CartErrorKind::ProductStockReached | CartErrorKind::Other => {
            CartItemError::ProductNotAllowed
        }
    });
    item
}

/// Marks `coupon` valid, taking name and discount from the cart's
/// promotion line item.
#[must_use]
pub fn map_valid_coupon(line_item: &LineItem, mut coupon: ExternalCoupon) -> ExternalCoupon {
    coupon.is_valid = true;
    coupon.name.clone_from(&line_item.label);
    coupon.is_free_shipping = false;
    if let Some(price) = &line_item.price {
        coupon.amount_gross = Some(-price.total_price);
    }
    coupon
}
