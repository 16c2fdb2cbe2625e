//! Sales channel context and the request-scoped holder that hands it out.
//!
//! The context is supplied by the caller for each request; mapping code that
//! needs it receives a `&ContextManager` at construction time.

use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::data_bag::RequestDataBag;
use crate::entities::{CustomerEntity, CustomerGroup, SalesChannelDomain};
use crate::CoreError;

pub const PAYMENT_METHOD_ID: &str = "paymentMethodId";
pub const SHIPPING_METHOD_ID: &str = "shippingMethodId";
pub const BILLING_ADDRESS_ID: &str = "billingAddressId";
pub const SHIPPING_ADDRESS_ID: &str = "shippingAddressId";
pub const LANGUAGE_ID: &str = "languageId";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesChannel {
    pub id: String,
    pub currency_id: String,
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default)]
    pub navigation_category_id: Option<String>,
    #[serde(default)]
    pub payment_method_id: Option<String>,
    #[serde(default)]
    pub shipping_method_id: Option<String>,
    #[serde(default)]
    pub domains: Vec<SalesChannelDomain>,
}

impl SalesChannel {
    /// Channel as configured for this process. Payment and shipping
    /// defaults and domains are only known to the shop and stay empty.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            id: config.sales_channel_id.clone(),
            currency_id: config.currency_id.clone(),
            language_id: config.language_id.clone(),
            navigation_category_id: config.navigation_category_id.clone(),
            payment_method_id: None,
            shipping_method_id: None,
            domains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesContext {
    pub token: String,
    pub sales_channel: SalesChannel,
    pub current_customer_group: CustomerGroup,
    /// ISO 4217 code of the active currency.
    pub currency_iso: String,
    #[serde(default)]
    pub customer: Option<CustomerEntity>,
}

impl SalesContext {
    #[must_use]
    pub fn currency_id(&self) -> &str {
        &self.sales_channel.currency_id
    }
}

/// Holds the active [`SalesContext`] of the current request.
#[derive(Debug, Clone, Default)]
pub struct ContextManager {
    sales_context: Option<SalesContext>,
}

impl ContextManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(context: SalesContext) -> Self {
        Self {
            sales_context: Some(context),
        }
    }

    pub fn set_sales_context(&mut self, context: SalesContext) -> &mut Self {
        self.sales_context = Some(context);
        self
    }

    /// Returns the active context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingContext`] if no context was set.
    pub fn sales_context(&self) -> Result<&SalesContext, CoreError> {
        self.sales_context
            .as_ref()
            .ok_or_else(|| CoreError::MissingContext("context not initialized".to_string()))
    }

    /// Payload that switches the context back to the customer's default
    /// payment method (or the channel's) and the channel's shipping method.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingContext`] if no context was set.
    pub fn reset_context_bag(&self) -> Result<RequestDataBag, CoreError> {
        let context = self.sales_context()?;
        let payment = context
            .customer
            .as_ref()
            .and_then(|c| c.default_payment_method.as_ref())
            .map(|m| m.id.clone())
            .or_else(|| context.sales_channel.payment_method_id.clone());

        let mut bag = RequestDataBag::new();
        if let Some(payment) = payment {
            bag.set(PAYMENT_METHOD_ID, payment);
        }
        if let Some(shipping) = &context.sales_channel.shipping_method_id {
            bag.set(SHIPPING_METHOD_ID, shipping.clone());
        }
        Ok(bag)
    }
}

/// Payloads that put billing and shipping addresses on the context.
///
/// Two distinct ids are switched one after the other, billing first, so
/// the shipping switch cannot be validated against a stale billing id.
#[must_use]
pub fn address_switch_bags(billing_id: &str, shipping_id: &str) -> Vec<RequestDataBag> {
    if billing_id == shipping_id {
        return vec![RequestDataBag::new()
            .with(BILLING_ADDRESS_ID, billing_id)
            .with(SHIPPING_ADDRESS_ID, shipping_id)];
    }
    vec![
        RequestDataBag::new().with(BILLING_ADDRESS_ID, billing_id),
        RequestDataBag::new().with(SHIPPING_ADDRESS_ID, shipping_id),
    ]
}

#[must_use]
pub fn payment_switch_bag(payment_method_id: &str) -> RequestDataBag {
    RequestDataBag::new().with(PAYMENT_METHOD_ID, payment_method_id)
}

#[must_use]
pub fn language_switch_bag(language_id: &str) -> RequestDataBag {
    RequestDataBag::new().with(LANGUAGE_ID, language_id)
}
