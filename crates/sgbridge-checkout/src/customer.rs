//! Customer translation for registration, login and checkout.

use sgbridge_core::entities::CustomerEntity;
use sgbridge_core::wire::{
    AddressType, CartCustomer, ShopgateCustomer, ShopgateCustomerGroup, ShopgateOrder,
};
use sgbridge_core::{ContextManager, RequestDataBag};

use crate::address::{
    billing_address, shipping_address, working_phone, AddressMapper, LocationLookup,
    SalutationLookup,
};
use crate::error::CheckoutError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_TAX_CLASS_ID: &str = "1";
const DEFAULT_TAX_CLASS_KEY: &str = "default";

pub struct CustomerMapper<S, L> {
    addresses: AddressMapper<S, L>,
}

impl<S, L> CustomerMapper<S, L>
where
    S: SalutationLookup,
    L: LocationLookup,
{
    pub fn new(addresses: AddressMapper<S, L>) -> Self {
        Self { addresses }
    }

    pub fn addresses(&self) -> &AddressMapper<S, L> {
        &self.addresses
    }

    #[must_use]
    pub fn map_to_shopgate(&self, customer: &CustomerEntity) -> ShopgateCustomer {
        let phone = match customer.default_shipping_address() {
            Some(address) => address.phone_number.clone(),
            None => working_phone(&customer.addresses).map(str::to_string),
        };

        ShopgateCustomer {
            customer_id: Some(customer.id.clone()),
            customer_number: Some(customer.customer_number.clone()),
            mail: Some(customer.email.clone()),
            first_name: Some(customer.first_name.clone()),
            last_name: Some(customer.last_name.clone()),
            gender: customer
                .salutation
                .as_ref()
                .and_then(|s| self.addresses.salutations().gender_for(s)),
            birthday: customer
                .birthday
                .map(|date| date.format(DATE_FORMAT).to_string()),
            phone,
            registration_date: customer
                .created_at
                .map(|created| created.format(DATE_FORMAT).to_string()),
            newsletter_subscription: customer.newsletter,
            customer_groups: customer
                .group
                .iter()
                .map(|group| ShopgateCustomerGroup {
                    id: group.id.clone(),
                    name: Some(group.name.clone()),
                })
                .collect(),
            addresses: self.addresses.map_from_shopware(customer),
            tax_class_id: Some(DEFAULT_TAX_CLASS_ID.to_string()),
            tax_class_key: Some(DEFAULT_TAX_CLASS_KEY.to_string()),
        }
    }

    /// Registration payload. Without a password the customer is created as
    /// a guest.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoAddresses`] if the customer has no address
    /// to bill to.
    pub fn map_to_shopware(
        &self,
        customer: &ShopgateCustomer,
        password: Option<&str>,
    ) -> Result<RequestDataBag, CheckoutError> {
        let billing = billing_address(customer)?;

        let mut bag = match password {
            Some(password) => RequestDataBag::new().with("password", password),
            None => RequestDataBag::new().with("guest", true),
        };
        bag.set("email", customer.mail.clone());
        bag.set(
            "salutationId",
            self.addresses.salutations().salutation_id_by_gender(customer.gender),
        );
        bag.set("firstName", customer.first_name.clone());
        bag.set("lastName", customer.last_name.clone());
        bag.set(
            "billingAddress",
            self.addresses.map_to_shopware_address(billing),
        );
        if let Some(shipping) = shipping_address(customer) {
            bag.set(
                "shippingAddress",
                self.addresses.map_to_shopware_address(shipping),
            );
        }

        Ok(bag)
    }
}

/// Customer block for a cart check, carrying the context's current group.
///
/// # Errors
///
/// Returns [`CheckoutError::Context`] if no sales context is active.
pub fn cart_customer(context: &ContextManager) -> Result<CartCustomer, CheckoutError> {
    let group = &context.sales_context()?.current_customer_group;
    Ok(CartCustomer {
        customer_groups: vec![ShopgateCustomerGroup {
            id: group.id.clone(),
            name: None,
        }],
    })
}

/// Guest customer built from an incoming order, personal data taken from
/// the invoice address.
#[must_use]
pub fn order_to_shopgate_customer(order: &ShopgateOrder) -> ShopgateCustomer {
    let invoice = &order.invoice_address;
    let mut delivery = order.delivery_address.clone();
    delivery.address_type = AddressType::Delivery;
    let mut billing = invoice.clone();
    billing.address_type = AddressType::Invoice;

    ShopgateCustomer {
        mail: Some(order.mail.clone()),
        first_name: Some(invoice.first_name.clone()),
        last_name: Some(invoice.last_name.clone()),
        gender: invoice.gender,
        birthday: invoice.birthday.clone(),
        addresses: vec![delivery, billing],
        ..ShopgateCustomer::default()
    }
}
