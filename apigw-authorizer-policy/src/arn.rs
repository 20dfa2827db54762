//! Method ARN parsing and rendering.
//!
//! API Gateway hands authorizers the invoked operation as a method ARN,
//! e.g. `arn:aws:execute-api:eu-west-1:123456789012:vjpmhhtdi6/dev/GET/pets`.
//! [`MethodArn`] splits that locator into its structural parts and renders
//! the parts back into the canonical string form.

use std::fmt;
use std::str::FromStr;

use crate::errors::{PolicyError, PolicyResult};

/// Structural parts of an `execute-api` method ARN.
///
/// Parsing is purely positional: the leading `arn` scheme marker is not
/// interpreted, and the verb segment is kept as-is. Verb validation belongs
/// to the rule-registration API, not the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArn {
    /// Partition the API lives in, e.g. `aws`.
    pub partition: String,
    /// Service literal, `execute-api` for API Gateway.
    pub service: String,
    /// Region of the REST API.
    pub region: String,
    /// Account id of the API owner.
    pub account_id: String,
    /// REST API id.
    pub api_id: String,
    /// Deployment stage.
    pub stage: String,
    /// HTTP verb segment, `GET`..`OPTIONS` or `*`.
    pub verb: String,
    /// Slash-joined sub-path beyond the verb, absent when the locator
    /// stops at the verb.
    pub resource: Option<String>,
}

impl Default for MethodArn {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            service: "execute-api".to_string(),
            region: String::new(),
            account_id: String::new(),
            api_id: String::new(),
            stage: String::new(),
            verb: String::new(),
            resource: None,
        }
    }
}

impl MethodArn {
    /// Parse a method ARN string into its parts.
    ///
    /// Fails with [`PolicyError::MalformedArn`] when the input has fewer
    /// than 6 colon segments, or fewer than 3 slash sub-segments in the
    /// 6th segment.
    pub fn parse(raw: &str) -> PolicyResult<Self> {
        let segments: Vec<&str> = raw.split(':').collect();
        if segments.len() < 6 {
            return Err(PolicyError::MalformedArn(raw.to_string()));
        }

        let path: Vec<&str> = segments[5].split('/').collect();
        if path.len() < 3 {
            return Err(PolicyError::MalformedArn(raw.to_string()));
        }

        let resource = if path.len() > 3 {
            let rest = path[3..].join("/");
            // a bare trailing slash is the same locator as none at all
            (!rest.is_empty()).then_some(rest)
        } else {
            None
        };

        Ok(Self {
            partition: segments[1].to_string(),
            service: segments[2].to_string(),
            region: segments[3].to_string(),
            account_id: segments[4].to_string(),
            api_id: path[0].to_string(),
            stage: path[1].to_string(),
            verb: path[2].to_string(),
            resource,
        })
    }

    /// Non-failing variant of [`MethodArn::parse`] for callers that only
    /// want to know whether the locator is well-formed.
    pub fn try_parse(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }
}

impl FromStr for MethodArn {
    type Err = PolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for MethodArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}/{}/{}",
            self.partition,
            self.service,
            self.region,
            self.account_id,
            self.api_id,
            self.stage,
            self.verb
        )?;
        if let Some(resource) = &self.resource {
            write!(f, "/{resource}")?;
        }
        Ok(())
    }
}
