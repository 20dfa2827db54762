//! This crate provides the core logic for API Gateway token authorizers:
//! - Method ARN parsing and rendering
//! - Allow/deny rule accumulation with validation
//! - Deterministic compilation into an IAM policy document
//!
//! Token validation, transport, and routing are the caller's concern: a
//! collaborator establishes the principal and hands over the method ARN,
//! and consumes the finished [`AuthorizerResponse`].
//!
//! ```
//! use apigw_authorizer_policy::{ApiOptions, HttpVerb, PolicyBuilder};
//!
//! # fn main() -> apigw_authorizer_policy::PolicyResult<()> {
//! let mut builder = PolicyBuilder::new(
//!     "user|a1b2c3d4",
//!     "123456789012",
//!     ApiOptions::new("us-east-1", "abc123", "prod"),
//! );
//! builder.allow_method(HttpVerb::Get, "/pets")?;
//! builder.deny_method(HttpVerb::Delete, "/pets")?;
//! let response = builder.build()?;
//! assert_eq!(response.policy_document.statement.len(), 2);
//! # Ok(())
//! # }
//! ```

mod arn;
mod errors;
mod event;
mod policy;

// Re-exports for a small, focused public API
pub use arn::MethodArn;
pub use errors::{ErrorKind, PolicyError, PolicyResult};
pub use event::{AuthorizerEvent, PAYLOAD_VERSION_1, PAYLOAD_VERSION_2};
pub use policy::builder::{ApiOptions, PolicyBuilder};
pub use policy::condition::{condition_key, Condition, ConditionMap, ConditionOperator};
pub use policy::context::{AuthorizerContext, ContextValue};
pub use policy::document::{
    AuthorizerResponse, PolicyDocument, Statement, EXECUTE_API_INVOKE, POLICY_VERSION,
};
pub use policy::{Effect, HttpVerb, ALL_RESOURCES};
