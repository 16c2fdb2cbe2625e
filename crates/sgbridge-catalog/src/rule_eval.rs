//! Decides which advanced-price rules can be expressed as Shopgate tier
//! prices and which customer groups they apply to.
//!
//! Shopgate only knows "for everyone" or "for customer group X", so a rule
//! tree is exportable when it is built solely from `alwaysValid` and
//! customer-group leaves. Container kinds do not matter for validity; a
//! single foreign leaf anywhere rejects the whole tree.

use std::collections::BTreeSet;

use sgbridge_core::{CustomerGroupCondition, GroupOperator, RuleNode};

/// Returns `true` if every leaf reachable from `root` is `AlwaysValid` or a
/// customer-group condition.
#[must_use]
pub fn is_exportable(root: &RuleNode) -> bool {
    fold_valid(true, root)
}

fn fold_valid(carry: bool, rule: &RuleNode) -> bool {
    match rule {
        RuleNode::And { rules } | RuleNode::Or { rules } => {
            rules.iter().fold(carry, fold_valid)
        }
        RuleNode::AlwaysValid | RuleNode::CustomerGroupCondition(_) => carry,
        RuleNode::Other => false,
    }
}

/// Depth-first search for the first customer-group leaf, visiting container
/// children in order.
#[must_use]
pub fn find_first_customer_group_condition(root: &RuleNode) -> Option<&CustomerGroupCondition> {
    match root {
        RuleNode::CustomerGroupCondition(condition) => Some(condition),
        RuleNode::And { rules } | RuleNode::Or { rules } => rules
            .iter()
            .find_map(find_first_customer_group_condition),
        RuleNode::AlwaysValid | RuleNode::Other => None,
    }
}

/// Resolves the customer groups a rule tree grants its price to.
///
/// An empty result means "no per-group split": the price applies to all
/// groups. Only the first customer-group leaf is considered; container
/// semantics between several group leaves are not modelled.
#[must_use]
pub fn resolve_groups(root: &RuleNode, all_group_ids: &BTreeSet<String>) -> BTreeSet<String> {
    let Some(condition) = find_first_customer_group_condition(root) else {
        return BTreeSet::new();
    };

    match &condition.operator {
        GroupOperator::Equals => condition.customer_group_ids.iter().cloned().collect(),
        GroupOperator::NotEquals => {
            let excluded: BTreeSet<&str> = condition
                .customer_group_ids
                .iter()
                .map(String::as_str)
                .collect();
            all_group_ids
                .iter()
                .filter(|id| !excluded.contains(id.as_str()))
                .cloned()
                .collect()
        }
        GroupOperator::Unsupported(operator) => {
            tracing::warn!(
                %operator,
                "customer group condition uses an unsupported operator; no groups resolved"
            );
            BTreeSet::new()
        }
    }
}
