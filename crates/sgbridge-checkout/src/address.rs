//! Address translation in both directions.
//!
//! Shopgate addresses carry ISO codes and a gender; Shopware addresses carry
//! country, state and salutation ids. The lookups bridging the two are
//! injected so the mapper itself never touches the shop.

use sgbridge_core::entities::{AddressEntity, Country, CountryState, CustomerEntity, Salutation};
use sgbridge_core::wire::{AddressType, Gender, ShopgateAddress, ShopgateCustomer};
use sgbridge_core::RequestDataBag;

use crate::error::CheckoutError;

const SALUTATION_MR: &str = "mr";
const SALUTATION_MRS: &str = "mrs";
const SALUTATION_NOT_SPECIFIED: &str = "not_specified";

pub trait SalutationLookup {
    /// Salutation id for a Shopgate gender; `None` when the shop has no
    /// matching salutation.
    fn salutation_id_by_gender(&self, gender: Option<Gender>) -> Option<String>;

    fn gender_for(&self, salutation: &Salutation) -> Option<Gender>;
}

pub trait LocationLookup {
    fn country_id_by_iso(&self, iso: Option<&str>) -> Option<String>;

    /// `iso` is the ISO 3166-2 code, e.g. `DE-HE`.
    fn state_id_by_iso(&self, iso: Option<&str>) -> Option<String>;
}

/// Salutation lookup over the shop's salutation list, keyed by Shopware's
/// default salutation keys.
#[derive(Debug, Clone, Default)]
pub struct SalutationTable {
    salutations: Vec<Salutation>,
}

impl SalutationTable {
    #[must_use]
    pub fn new(salutations: Vec<Salutation>) -> Self {
        Self { salutations }
    }

    fn id_for_key(&self, key: &str) -> Option<String> {
        self.salutations
            .iter()
            .find(|s| s.salutation_key == key)
            .map(|s| s.id.clone())
    }
}

impl SalutationLookup for SalutationTable {
    fn salutation_id_by_gender(&self, gender: Option<Gender>) -> Option<String> {
        let key = match gender {
            Some(Gender::Male) => SALUTATION_MR,
            Some(Gender::Female) => SALUTATION_MRS,
            Some(Gender::Diverse) | None => SALUTATION_NOT_SPECIFIED,
        };
        self.id_for_key(key)
    }

    fn gender_for(&self, salutation: &Salutation) -> Option<Gender> {
        match salutation.salutation_key.as_str() {
            SALUTATION_MR => Some(Gender::Male),
            SALUTATION_MRS => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    countries: Vec<Country>,
    states: Vec<CountryState>,
}

impl CountryTable {
    #[must_use]
    pub fn new(countries: Vec<Country>, states: Vec<CountryState>) -> Self {
        Self { countries, states }
    }
}

impl LocationLookup for CountryTable {
    fn country_id_by_iso(&self, iso: Option<&str>) -> Option<String> {
        let iso = iso?;
        self.countries
            .iter()
            .find(|c| c.iso.eq_ignore_ascii_case(iso))
            .map(|c| c.id.clone())
    }

    fn state_id_by_iso(&self, iso: Option<&str>) -> Option<String> {
        let iso = iso?;
        self.states
            .iter()
            .find(|s| s.short_code.eq_ignore_ascii_case(iso))
            .map(|s| s.id.clone())
    }
}

pub struct AddressMapper<S, L> {
    salutations: S,
    locations: L,
}

impl<S, L> AddressMapper<S, L>
where
    S: SalutationLookup,
    L: LocationLookup,
{
    pub fn new(salutations: S, locations: L) -> Self {
        Self {
            salutations,
            locations,
        }
    }

    pub fn salutations(&self) -> &S {
        &self.salutations
    }

    /// Builds the store-api payload for creating or updating an address.
    #[must_use]
    pub fn map_to_shopware_address(&self, address: &ShopgateAddress) -> RequestDataBag {
        let mut bag = RequestDataBag::new()
            .with(
                "salutationId",
                self.salutations.salutation_id_by_gender(address.gender),
            )
            .with("firstName", address.first_name.as_str())
            .with("lastName", address.last_name.as_str())
            .with("street", address.street1.as_str())
            .with("zipcode", address.zipcode.as_str())
            .with("city", address.city.as_str())
            .with(
                "countryId",
                self.locations.country_id_by_iso(address.country.as_deref()),
            )
            .with(
                "countryStateId",
                self.locations.state_id_by_iso(address.state.as_deref()),
            );

        bag.set_non_empty("company", address.company.as_deref());
        bag.set_non_empty("additionalAddressLine1", address.street2.as_deref());
        bag.set_non_empty("phoneNumber", address.phone.as_deref());
        // mobile wins over landline
        bag.set_non_empty("phoneNumber", address.mobile.as_deref());
        bag
    }

    /// Maps every address of a Shopware customer, typed by the customer's
    /// default billing and shipping ids.
    #[must_use]
    pub fn map_from_shopware(&self, customer: &CustomerEntity) -> Vec<ShopgateAddress> {
        customer
            .addresses
            .iter()
            .map(|address| {
                let address_type = map_address_type(
                    &address.id,
                    &customer.default_billing_address_id,
                    &customer.default_shipping_address_id,
                );
                self.map_address(address, address_type)
            })
            .collect()
    }

    #[must_use]
    pub fn map_address(&self, entity: &AddressEntity, address_type: AddressType) -> ShopgateAddress {
        let street2 = match (
            non_empty(entity.additional_address_line1.as_deref()),
            non_empty(entity.additional_address_line2.as_deref()),
        ) {
            (Some(line1), Some(line2)) => Some(format!("{line1}\n{line2}")),
            (Some(line), None) | (None, Some(line)) => Some(line.to_string()),
            (None, None) => None,
        };

        ShopgateAddress {
            id: Some(entity.id.clone()),
            address_type,
            gender: entity
                .salutation
                .as_ref()
                .and_then(|s| self.salutations.gender_for(s)),
            first_name: entity.first_name.clone(),
            last_name: entity.last_name.clone(),
            company: entity.company.clone(),
            street1: entity.street.clone(),
            street2,
            zipcode: entity.zipcode.clone(),
            city: entity.city.clone(),
            country: entity.country.as_ref().map(|c| c.iso.clone()),
            state: entity.country_state.as_ref().map(|s| s.short_code.clone()),
            phone: entity.phone_number.clone(),
            mobile: None,
            mail: entity.customer_email.clone(),
            birthday: None,
        }
    }

    /// Id of the customer's stored address at the same location as
    /// `address`, if any.
    #[must_use]
    pub fn selected_address_id(
        &self,
        address: &ShopgateAddress,
        customer: &CustomerEntity,
    ) -> Option<String> {
        self.map_from_shopware(customer)
            .into_iter()
            .find(|stored| stored.same_location(address))
            .and_then(|stored| stored.id)
    }
}

/// The first invoice address, otherwise the last address of any type.
///
/// # Errors
///
/// Returns [`CheckoutError::NoAddresses`] if the customer has no addresses.
pub fn billing_address(customer: &ShopgateCustomer) -> Result<&ShopgateAddress, CheckoutError> {
    customer
        .addresses
        .iter()
        .find(|a| a.address_type.is_invoice())
        .or_else(|| customer.addresses.last())
        .ok_or(CheckoutError::NoAddresses)
}

#[must_use]
pub fn shipping_address(customer: &ShopgateCustomer) -> Option<&ShopgateAddress> {
    customer
        .addresses
        .iter()
        .find(|a| a.address_type.is_delivery())
}

/// First non-empty phone number among `addresses`.
#[must_use]
pub fn working_phone(addresses: &[AddressEntity]) -> Option<&str> {
    addresses
        .iter()
        .find_map(|a| non_empty(a.phone_number.as_deref()))
}

#[must_use]
pub fn map_address_type(
    address_id: &str,
    default_billing_id: &str,
    default_shipping_id: &str,
) -> AddressType {
    let shared_default = default_billing_id == default_shipping_id;
    if address_id == default_billing_id {
        if shared_default {
            AddressType::Both
        } else {
            AddressType::Invoice
        }
    } else if address_id == default_shipping_id {
        AddressType::Delivery
    } else {
        AddressType::Both
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
