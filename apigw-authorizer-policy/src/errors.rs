//! Error types for policy construction.

use thiserror::Error;

use crate::policy::condition::ConditionOperator;

/// Result alias used throughout the crate.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Coarse classification of a [`PolicyError`].
///
/// `Format` errors mean the resource locator string itself could not be
/// interpreted; `Validation` errors mean a registration or build call
/// violated the policy contract. Callers sitting at an authorization
/// boundary are expected to translate either kind into a generic
/// "unauthorized" signal rather than surfacing the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed method ARN or missing locator in the invocation payload.
    Format,
    /// Invalid verb, path, condition set, context value, or empty policy.
    Validation,
}

/// Errors raised while parsing method ARNs or building a policy.
///
/// All errors are raised synchronously at the offending call; only the
/// empty-policy check is deferred to `build()`. These are programmer-input
/// errors, not transient failures, so there is no retry story.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The method ARN did not have 6 colon segments with at least
    /// 3 slash sub-segments in the last one.
    #[error("malformed method ARN `{0}`")]
    MalformedArn(String),

    /// The authorizer event carried neither a method ARN nor a route ARN.
    #[error("no method or route ARN found in authorizer event")]
    MissingResourceArn,

    /// The HTTP verb is not one of the supported set and not `*`.
    #[error("unsupported HTTP verb `{0}`")]
    UnsupportedVerb(String),

    /// The resource path contains characters outside `[/.a-zA-Z0-9-*]`
    /// after percent-decoding.
    #[error("invalid resource path `{0}`")]
    InvalidResourcePath(String),

    /// A single rule carried two condition entries for the same operator.
    #[error("duplicate condition operator `{0}` within a single rule")]
    DuplicateConditionOperator(ConditionOperator),

    /// A context value was an object or an array; the enforcement point
    /// only accepts flat string/number/boolean values.
    #[error("context value for key `{0}` is not a scalar")]
    NonScalarContextValue(String),

    /// `build()` was called with no rules and no custom statements. An
    /// empty statement list is ambiguous with "no opinion" and must never
    /// be emitted.
    #[error("no statement defined for the policy")]
    EmptyPolicy,
}

impl PolicyError {
    /// The two-kind classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedArn(_) | Self::MissingResourceArn => ErrorKind::Format,
            Self::UnsupportedVerb(_)
            | Self::InvalidResourcePath(_)
            | Self::DuplicateConditionOperator(_)
            | Self::NonScalarContextValue(_)
            | Self::EmptyPolicy => ErrorKind::Validation,
        }
    }
}
