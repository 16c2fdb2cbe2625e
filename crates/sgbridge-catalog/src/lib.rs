pub mod category;
pub mod error;
pub mod rule_eval;
pub mod sort_tree;
pub mod tier_price;

pub use category::CategoryMapper;
pub use error::CatalogError;
pub use rule_eval::{find_first_customer_group_condition, is_exportable, resolve_groups};
pub use sort_tree::{
    sort_order_key, CatalogSource, InMemorySortTreeCache, SortMap, SortTree, SortTreeCache,
};
pub use tier_price::TierPriceMapper;
