pub mod address;
pub mod customer;
pub mod error;
pub mod line_item;
pub mod payment;

pub use address::{
    billing_address, map_address_type, shipping_address, working_phone, AddressMapper,
    CountryTable, LocationLookup, SalutationLookup, SalutationTable,
};
pub use customer::{cart_customer, order_to_shopgate_customer, CustomerMapper};
pub use error::CheckoutError;
pub use line_item::{
    map_incoming_products, map_incoming_promos, map_invalid_product, map_valid_coupon,
    map_valid_product, LineItemKind, LineItemRequest,
};
pub use payment::{actual_transaction, is_paid};
