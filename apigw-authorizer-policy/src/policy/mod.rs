//! Policy model: verbs, effects, conditions, context, wire documents, and
//! the builder that compiles registered rules into statements.

pub mod builder;
pub mod condition;
pub mod context;
pub mod document;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

/// Wildcard matching every region, API, stage, verb, or path.
pub const ALL_RESOURCES: &str = "*";

/// HTTP verbs API Gateway routes, plus the wildcard.
///
/// A closed set so a misspelled verb is unrepresentable in a registered
/// rule; parsing an unknown verb fails with
/// [`PolicyError::UnsupportedVerb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpVerb {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "OPTIONS")]
    Options,
    #[serde(rename = "*")]
    All,
}

impl HttpVerb {
    /// The verb as it appears in a method ARN.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::All => ALL_RESOURCES,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = PolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            ALL_RESOURCES => Ok(Self::All),
            other => Err(PolicyError::UnsupportedVerb(other.to_string())),
        }
    }
}

/// Outcome attached to a policy statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("GET", HttpVerb::Get)]
    #[case("POST", HttpVerb::Post)]
    #[case("PUT", HttpVerb::Put)]
    #[case("PATCH", HttpVerb::Patch)]
    #[case("HEAD", HttpVerb::Head)]
    #[case("DELETE", HttpVerb::Delete)]
    #[case("OPTIONS", HttpVerb::Options)]
    #[case("*", HttpVerb::All)]
    fn test_verb_round_trip(#[case] raw: &str, #[case] verb: HttpVerb) {
        assert_eq!(raw.parse::<HttpVerb>().unwrap(), verb);
        assert_eq!(verb.as_str(), raw);
    }

    #[rstest]
    #[case("FETCH")]
    #[case("get")]
    #[case("")]
    fn test_unknown_verb_is_rejected(#[case] raw: &str) {
        let err = raw.parse::<HttpVerb>().unwrap_err();
        assert_eq!(err, PolicyError::UnsupportedVerb(raw.to_string()));
    }

    #[test]
    fn test_effect_serializes_to_pascal_case() {
        assert_eq!(serde_json::to_string(&Effect::Allow).unwrap(), "\"Allow\"");
        assert_eq!(serde_json::to_string(&Effect::Deny).unwrap(), "\"Deny\"");
    }
}
