//! Rule payloads attached to Shopware advanced prices.
//!
//! Shopware stores a rule as a tree of containers (`andContainer`,
//! `orContainer`, ...) and leaf conditions, each tagged by `_name`. Only two
//! leaf kinds matter to the export: `alwaysValid` and
//! `customerCustomerGroup`. Every other leaf decodes to [`RuleNode::Other`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_name")]
pub enum RuleNode {
    #[serde(rename = "alwaysValid")]
    AlwaysValid,

    #[serde(rename = "customerCustomerGroup")]
    CustomerGroupCondition(CustomerGroupCondition),

    #[serde(rename = "andContainer")]
    And {
        #[serde(default)]
        rules: Vec<RuleNode>,
    },

    #[serde(rename = "orContainer")]
    Or {
        #[serde(default)]
        rules: Vec<RuleNode>,
    },

    /// Any leaf or container the export does not understand.
    #[serde(other)]
    Other,
}

impl RuleNode {
    #[must_use]
    pub fn and(rules: Vec<RuleNode>) -> Self {
        RuleNode::And { rules }
    }

    #[must_use]
    pub fn or(rules: Vec<RuleNode>) -> Self {
        RuleNode::Or { rules }
    }

    #[must_use]
    pub fn customer_group<I, S>(operator: GroupOperator, group_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleNode::CustomerGroupCondition(CustomerGroupCondition {
            operator,
            customer_group_ids: group_ids.into_iter().map(Into::into).collect(),
        })
    }

    /// Child rules for containers, `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[RuleNode]> {
        match self {
            RuleNode::And { rules } | RuleNode::Or { rules } => Some(rules),
            RuleNode::AlwaysValid | RuleNode::CustomerGroupCondition(_) | RuleNode::Other => None,
        }
    }
}

/// Leaf condition restricting a rule to (or away from) customer groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroupCondition {
    pub operator: GroupOperator,
    #[serde(default)]
    pub customer_group_ids: Vec<String>,
}

/// Comparison operator of a [`CustomerGroupCondition`].
///
/// Shopware writes these as `"="` and `"!="`; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupOperator {
    Equals,
    NotEquals,
    Unsupported(String),
}

impl From<String> for GroupOperator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "=" => GroupOperator::Equals,
            "!=" => GroupOperator::NotEquals,
            _ => GroupOperator::Unsupported(value),
        }
    }
}

impl From<GroupOperator> for String {
    fn from(value: GroupOperator) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupOperator::Equals => write!(f, "="),
            GroupOperator::NotEquals => write!(f, "!="),
            GroupOperator::Unsupported(raw) => write!(f, "{raw}"),
        }
    }
}
