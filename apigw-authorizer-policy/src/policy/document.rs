//! Wire models for the authorizer response.
//!
//! Field casing follows what the enforcement point expects: the policy
//! document uses PascalCase (`Version`, `Statement`, `Action`, ...), the
//! response envelope camelCase (`principalId`, `policyDocument`,
//! `context`).

use serde::{Deserialize, Serialize};

use super::condition::ConditionMap;
use super::context::AuthorizerContext;
use super::Effect;

/// Policy language version. Fixed; there is no other valid value.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single action an API Gateway authorizer policy grants or denies.
pub const EXECUTE_API_INVOKE: &str = "execute-api:Invoke";

/// One effect + action + resource(s) unit of the policy document.
///
/// A statement without conditions may batch several resource ARNs; a
/// conditional statement carries exactly one, so a condition never spans
/// resources it was not registered for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionMap>,
}

impl Statement {
    /// A statement for the invoke action with no conditions.
    pub fn new(effect: Effect, resource: Vec<String>) -> Self {
        Self {
            action: EXECUTE_API_INVOKE.to_string(),
            effect,
            resource,
            condition: None,
        }
    }

    /// A single-resource statement narrowed by a condition map.
    pub fn with_condition(effect: Effect, resource: String, condition: ConditionMap) -> Self {
        Self {
            action: EXECUTE_API_INVOKE.to_string(),
            effect,
            resource: vec![resource],
            condition: Some(condition),
        }
    }
}

/// The compiled policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

/// The full authorizer response: principal, policy document, and optional
/// context for the backend.
///
/// This is an immutable value with no back-reference to the builder that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AuthorizerContext>,
}
