//! Accumulates allow/deny rules for one authorization decision and
//! compiles them into a policy document.

use std::sync::LazyLock;

use log::debug;
use percent_encoding::percent_decode_str;
use regex::Regex;

use super::condition::{fold_conditions, Condition, ConditionMap};
use super::context::AuthorizerContext;
use super::document::{AuthorizerResponse, PolicyDocument, Statement, POLICY_VERSION};
use super::{Effect, HttpVerb, ALL_RESOURCES};
use crate::arn::MethodArn;
use crate::errors::{PolicyError, PolicyResult};
use crate::event::AuthorizerEvent;

/// Character class a resource path must match after percent-decoding.
static PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[/.a-zA-Z0-9\-\*]+$").expect("path pattern is valid"));

/// Scoping options for the REST API the policy applies to.
///
/// Every unset field independently falls back to `*` when the builder is
/// constructed. This is a deliberately permissive default: an unspecified
/// region, API id, or stage widens the statements to match any value, it
/// does not narrow them. Callers wanting tightly-scoped policies must fill
/// in all three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiOptions {
    pub region: Option<String>,
    pub api_id: Option<String>,
    pub stage: Option<String>,
}

impl ApiOptions {
    pub fn new(
        region: impl Into<String>,
        api_id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            region: Some(region.into()),
            api_id: Some(api_id.into()),
            stage: Some(stage.into()),
        }
    }
}

impl From<&MethodArn> for ApiOptions {
    fn from(arn: &MethodArn) -> Self {
        Self {
            region: some_if_not_blank(&arn.region),
            api_id: some_if_not_blank(&arn.api_id),
            stage: some_if_not_blank(&arn.stage),
        }
    }
}

fn some_if_not_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A blank scoping option counts as unset and widens to the wildcard.
fn resolve_scope(value: Option<String>) -> String {
    value
        .as_deref()
        .and_then(some_if_not_blank)
        .unwrap_or_else(|| ALL_RESOURCES.to_string())
}

/// One registered rule, with its resource ARN already rendered.
#[derive(Debug, Clone)]
struct Rule {
    effect: Effect,
    resource_arn: String,
    conditions: Option<ConditionMap>,
}

/// Accumulates allow/deny rules for a principal and compiles them into an
/// [`AuthorizerResponse`].
///
/// One builder serves one authorization decision: create it per request,
/// register rules, and consume it with [`PolicyBuilder::build`]. The move
/// into `build` is what makes the accumulating→built transition one-way;
/// compiling is a pure function of the accumulated rules, so equal
/// registrations always produce an identical document.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    principal_id: String,
    account_id: String,
    partition: String,
    region: String,
    api_id: String,
    stage: String,
    rules: Vec<Rule>,
    custom_statements: Vec<Statement>,
    context: Option<AuthorizerContext>,
}

impl PolicyBuilder {
    /// A builder for `principal_id` over the API owned by `account_id`,
    /// scoped by `options` (unset options widen to `*`).
    pub fn new(
        principal_id: impl Into<String>,
        account_id: impl Into<String>,
        options: ApiOptions,
    ) -> Self {
        Self {
            principal_id: principal_id.into(),
            account_id: account_id.into(),
            partition: "aws".to_string(),
            region: resolve_scope(options.region),
            api_id: resolve_scope(options.api_id),
            stage: resolve_scope(options.stage),
            rules: Vec::new(),
            custom_statements: Vec::new(),
            context: None,
        }
    }

    /// A builder seeded from a parsed method ARN: account, partition, and
    /// scoping options all come from the locator of the invoked operation.
    pub fn from_method_arn(principal_id: impl Into<String>, arn: &MethodArn) -> Self {
        let mut builder = Self::new(principal_id, arn.account_id.clone(), ApiOptions::from(arn));
        if let Some(partition) = some_if_not_blank(&arn.partition) {
            builder.partition = partition;
        }
        builder
    }

    /// A builder seeded from an authorizer invocation event. Fails when
    /// the event carries no locator or the locator is malformed.
    pub fn from_event(
        principal_id: impl Into<String>,
        event: &AuthorizerEvent,
    ) -> PolicyResult<Self> {
        let arn = MethodArn::parse(event.resource_arn()?)?;
        Ok(Self::from_method_arn(principal_id, &arn))
    }

    /// Register an allow rule for a verb and resource path.
    pub fn allow_method(&mut self, verb: HttpVerb, path: &str) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Allow, verb, path, &[])
    }

    /// Register a deny rule for a verb and resource path.
    pub fn deny_method(&mut self, verb: HttpVerb, path: &str) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Deny, verb, path, &[])
    }

    /// Register an allow rule narrowed by conditions. Each condition
    /// operator may appear at most once per rule.
    pub fn allow_method_with_conditions(
        &mut self,
        verb: HttpVerb,
        path: &str,
        conditions: &[Condition],
    ) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Allow, verb, path, conditions)
    }

    /// Register a deny rule narrowed by conditions.
    pub fn deny_method_with_conditions(
        &mut self,
        verb: HttpVerb,
        path: &str,
        conditions: &[Condition],
    ) -> PolicyResult<&mut Self> {
        self.add_method(Effect::Deny, verb, path, conditions)
    }

    /// Allow every verb on every path.
    pub fn allow_all_methods(&mut self) -> &mut Self {
        self.push_rule(Effect::Allow, HttpVerb::All, ALL_RESOURCES, None);
        self
    }

    /// Deny every verb on every path.
    pub fn deny_all_methods(&mut self) -> &mut Self {
        self.push_rule(Effect::Deny, HttpVerb::All, ALL_RESOURCES, None);
        self
    }

    /// Append a statement verbatim, after everything the builder compiles.
    ///
    /// Escape hatch for shapes the structured API cannot express. The
    /// statement is NOT validated: action, effect, resources, and
    /// conditions are emitted exactly as given.
    pub fn add_statement(&mut self, statement: Statement) -> &mut Self {
        self.custom_statements.push(statement);
        self
    }

    /// Attach the context map, replacing any previously attached one.
    pub fn with_context(&mut self, context: AuthorizerContext) -> &mut Self {
        self.context = Some(context);
        self
    }

    fn add_method(
        &mut self,
        effect: Effect,
        verb: HttpVerb,
        path: &str,
        conditions: &[Condition],
    ) -> PolicyResult<&mut Self> {
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map_err(|_| PolicyError::InvalidResourcePath(path.to_string()))?;
        if !PATH_PATTERN.is_match(&decoded) {
            return Err(PolicyError::InvalidResourcePath(decoded.into_owned()));
        }

        let conditions = if conditions.is_empty() {
            None
        } else {
            Some(fold_conditions(conditions)?)
        };

        self.push_rule(effect, verb, path, conditions);
        Ok(self)
    }

    fn push_rule(
        &mut self,
        effect: Effect,
        verb: HttpVerb,
        path: &str,
        conditions: Option<ConditionMap>,
    ) {
        let resource_arn = self.resource_arn(verb, path);
        debug!("registered {effect} rule for {resource_arn}");
        self.rules.push(Rule {
            effect,
            resource_arn,
            conditions,
        });
    }

    /// Render the resource ARN for a rule. Exactly one leading slash is
    /// stripped from the path; internal slashes are sub-resource hierarchy
    /// and pass through verbatim.
    fn resource_arn(&self, verb: HttpVerb, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!(
            "arn:{}:execute-api:{}:{}:{}/{}/{}/{}",
            self.partition,
            self.region,
            self.account_id,
            self.api_id,
            self.stage,
            verb.as_str(),
            path
        )
    }

    /// Compile the statements for one effect: unconditioned rules merge
    /// into a single statement carrying their ARNs in registration order
    /// (duplicates kept), then each conditioned rule gets its own
    /// single-resource statement, in registration order.
    fn statements_for_effect(&self, effect: Effect) -> Vec<Statement> {
        let mut batched = Vec::new();
        let mut conditional = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.effect == effect) {
            match &rule.conditions {
                Some(conditions) => conditional.push(Statement::with_condition(
                    effect,
                    rule.resource_arn.clone(),
                    conditions.clone(),
                )),
                None => batched.push(rule.resource_arn.clone()),
            }
        }

        let mut statements = Vec::with_capacity(conditional.len() + 1);
        if !batched.is_empty() {
            statements.push(Statement::new(effect, batched));
        }
        statements.extend(conditional);
        statements
    }

    /// Compile the accumulated rules into an authorizer response,
    /// consuming the builder.
    ///
    /// Fails with [`PolicyError::EmptyPolicy`] when nothing was
    /// registered: a document with no statements is ambiguous with "no
    /// opinion" and must never reach the enforcement point.
    pub fn build(self) -> PolicyResult<AuthorizerResponse> {
        if self.rules.is_empty() && self.custom_statements.is_empty() {
            return Err(PolicyError::EmptyPolicy);
        }

        let mut statement = self.statements_for_effect(Effect::Allow);
        statement.extend(self.statements_for_effect(Effect::Deny));
        statement.extend(self.custom_statements);

        debug!(
            "compiled {} statements for principal {}",
            statement.len(),
            self.principal_id
        );

        Ok(AuthorizerResponse {
            principal_id: self.principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement,
            },
            context: self.context,
        })
    }
}
