//! Statement conditions: operators, key/value entries, and the map shape
//! the enforcement point expects.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PolicyError, PolicyResult};

/// The condition block of a statement as it appears on the wire:
/// operator, then condition key, then value.
pub type ConditionMap = BTreeMap<ConditionOperator, BTreeMap<String, String>>;

/// IAM condition operators.
///
/// Variant names match the wire spelling exactly, so serialization needs
/// no renames.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ConditionOperator {
    StringEquals,
    StringNotEquals,
    StringEqualsIgnoreCase,
    StringNotEqualsIgnoreCase,
    StringLike,
    StringNotLike,
    NumericEquals,
    NumericNotEquals,
    NumericLessThan,
    NumericLessThanEquals,
    NumericGreaterThan,
    NumericGreaterThanEquals,
    DateEquals,
    DateNotEquals,
    DateLessThan,
    DateLessThanEquals,
    DateGreaterThan,
    DateGreaterThanEquals,
    Bool,
    IpAddress,
    NotIpAddress,
    ArnEquals,
    ArnLike,
    ArnNotEquals,
    ArnNotLike,
    Null,
}

impl ConditionOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StringEquals => "StringEquals",
            Self::StringNotEquals => "StringNotEquals",
            Self::StringEqualsIgnoreCase => "StringEqualsIgnoreCase",
            Self::StringNotEqualsIgnoreCase => "StringNotEqualsIgnoreCase",
            Self::StringLike => "StringLike",
            Self::StringNotLike => "StringNotLike",
            Self::NumericEquals => "NumericEquals",
            Self::NumericNotEquals => "NumericNotEquals",
            Self::NumericLessThan => "NumericLessThan",
            Self::NumericLessThanEquals => "NumericLessThanEquals",
            Self::NumericGreaterThan => "NumericGreaterThan",
            Self::NumericGreaterThanEquals => "NumericGreaterThanEquals",
            Self::DateEquals => "DateEquals",
            Self::DateNotEquals => "DateNotEquals",
            Self::DateLessThan => "DateLessThan",
            Self::DateLessThanEquals => "DateLessThanEquals",
            Self::DateGreaterThan => "DateGreaterThan",
            Self::DateGreaterThanEquals => "DateGreaterThanEquals",
            Self::Bool => "Bool",
            Self::IpAddress => "IpAddress",
            Self::NotIpAddress => "NotIpAddress",
            Self::ArnEquals => "ArnEquals",
            Self::ArnLike => "ArnLike",
            Self::ArnNotEquals => "ArnNotEquals",
            Self::ArnNotLike => "ArnNotLike",
            Self::Null => "Null",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One condition attached to a rule: an operator and its key/value entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    operator: ConditionOperator,
    entries: BTreeMap<String, String>,
}

impl Condition {
    /// A condition with a single key/value entry.
    pub fn new(
        operator: ConditionOperator,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self { operator, entries }
    }

    /// Add another key/value entry under the same operator.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn operator(&self) -> ConditionOperator {
        self.operator
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// Fold a rule's conditions into the wire map, rejecting a duplicate
/// operator within the rule. A condition can narrow exactly one statement,
/// so each operator may appear once per rule.
pub(crate) fn fold_conditions(conditions: &[Condition]) -> PolicyResult<ConditionMap> {
    let mut map = ConditionMap::new();
    for condition in conditions {
        if map
            .insert(condition.operator, condition.entries.clone())
            .is_some()
        {
            return Err(PolicyError::DuplicateConditionOperator(condition.operator));
        }
    }
    Ok(map)
}

/// Well-known AWS global condition keys.
pub mod condition_key {
    pub const CURRENT_TIME: &str = "aws:CurrentTime";
    pub const EPOCH_TIME: &str = "aws:EpochTime";
    pub const MULTI_FACTOR_AUTH_AGE: &str = "aws:MultiFactorAuthAge";
    pub const MULTI_FACTOR_AUTH_PRESENT: &str = "aws:MultiFactorAuthPresent";
    pub const REFERER: &str = "aws:Referer";
    pub const SECURE_TRANSPORT: &str = "aws:SecureTransport";
    pub const SOURCE_ARN: &str = "aws:SourceArn";
    pub const SOURCE_IP: &str = "aws:SourceIp";
    pub const TOKEN_ISSUE_TIME: &str = "aws:TokenIssueTime";
    pub const USER_AGENT: &str = "aws:UserAgent";
    pub const PRINCIPAL_TYPE: &str = "aws:PrincipalType";
    pub const SOURCE_VPC: &str = "aws:SourceVpc";
    pub const SOURCE_VPCE: &str = "aws:SourceVpce";
    pub const USER_ID: &str = "aws:userid";
    pub const USERNAME: &str = "aws:username";
}
