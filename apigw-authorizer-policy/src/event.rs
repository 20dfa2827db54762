//! Invocation payload handed to a token authorizer.

use serde::{Deserialize, Serialize};

use crate::errors::{PolicyError, PolicyResult};

/// Payload format version 1.0 (REST APIs), which carries `methodArn`.
pub const PAYLOAD_VERSION_1: &str = "1.0";

/// Payload format version 2.0 (HTTP APIs), which carries `routeArn`.
pub const PAYLOAD_VERSION_2: &str = "2.0";

/// The event API Gateway sends to a token authorizer.
///
/// Version 1.0 payloads identify the invoked operation through `methodArn`,
/// version 2.0 payloads through `routeArn`; events without a `version`
/// field are treated as 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    /// Authorizer type, `TOKEN` for bearer-token authorizers.
    #[serde(rename = "type")]
    pub event_type: String,
    /// The raw credential presented by the caller. Validating it is the
    /// caller's concern; this crate only encodes the resulting decision.
    pub authorization_token: String,
    /// Payload format version, absent on classic REST API events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_arn: Option<String>,
}

impl AuthorizerEvent {
    /// The resource locator for the invoked operation, resolved by payload
    /// version.
    ///
    /// Fails with [`PolicyError::MissingResourceArn`] when the expected
    /// field is absent.
    pub fn resource_arn(&self) -> PolicyResult<&str> {
        let arn = match self.version.as_deref() {
            Some(PAYLOAD_VERSION_2) => self.route_arn.as_deref(),
            _ => self.method_arn.as_deref(),
        };
        arn.ok_or(PolicyError::MissingResourceArn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(json: &str) -> AuthorizerEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_token_event() {
        let event = sample_event(
            r#"{
                "type": "TOKEN",
                "authorizationToken": "allow-me",
                "methodArn": "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/test"
            }"#,
        );
        assert_eq!(event.event_type, "TOKEN");
        assert_eq!(event.authorization_token, "allow-me");
        assert_eq!(
            event.resource_arn().unwrap(),
            "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/test"
        );
    }

    #[test]
    fn test_version_two_uses_route_arn() {
        let event = sample_event(
            r#"{
                "type": "REQUEST",
                "authorizationToken": "allow-me",
                "version": "2.0",
                "routeArn": "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/test"
            }"#,
        );
        assert_eq!(
            event.resource_arn().unwrap(),
            "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/test"
        );
    }

    #[test]
    fn test_version_one_ignores_route_arn() {
        let event = sample_event(
            r#"{
                "type": "TOKEN",
                "authorizationToken": "allow-me",
                "version": "1.0",
                "routeArn": "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/test"
            }"#,
        );
        assert_eq!(
            event.resource_arn().unwrap_err(),
            PolicyError::MissingResourceArn
        );
    }

    #[test]
    fn test_missing_arn_is_an_error() {
        let event = sample_event(r#"{"type": "TOKEN", "authorizationToken": "allow-me"}"#);
        assert_eq!(
            event.resource_arn().unwrap_err(),
            PolicyError::MissingResourceArn
        );
    }
}
