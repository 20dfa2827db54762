//! Command-line front end for the authorizer policy encoder.
//!
//! `generate` compiles allow/deny rules into an authorizer response and
//! prints it as JSON; `inspect-arn` parses a method ARN and prints its
//! parts. The CLI never validates tokens and never talks to the network;
//! the principal is taken from `--principal` as-is.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde_json::json;

use apigw_authorizer_policy::{
    ApiOptions, AuthorizerContext, ContextValue, HttpVerb, MethodArn, PolicyBuilder, Statement,
};

#[derive(Parser)]
#[command(name = "apigw-authorizer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an authorizer response from allow/deny rules
    Generate(GenerateArgs),
    /// Parse a method ARN and print its parts
    InspectArn {
        /// Method ARN, e.g. arn:aws:execute-api:eu-west-1:123456789102:api/dev/GET/pets
        arn: String,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Principal the policy is issued for
    #[arg(long)]
    principal: String,

    /// Seed account, region, API id, and stage from a method ARN
    #[arg(long, conflicts_with_all = ["account", "region", "api_id", "stage"])]
    method_arn: Option<String>,

    /// Account id of the API owner
    #[arg(long, required_unless_present = "method_arn")]
    account: Option<String>,

    /// Region scope; defaults to `*`
    #[arg(long)]
    region: Option<String>,

    /// REST API id scope; defaults to `*`
    #[arg(long)]
    api_id: Option<String>,

    /// Stage scope; defaults to `*`
    #[arg(long)]
    stage: Option<String>,

    /// Allow rule as VERB:PATH, e.g. GET:/pets (repeatable)
    #[arg(long = "allow", value_name = "VERB:PATH")]
    allow: Vec<String>,

    /// Deny rule as VERB:PATH (repeatable)
    #[arg(long = "deny", value_name = "VERB:PATH")]
    deny: Vec<String>,

    /// Allow every verb on every path
    #[arg(long)]
    allow_all: bool,

    /// Deny every verb on every path
    #[arg(long)]
    deny_all: bool,

    /// Raw statement JSON appended verbatim, unvalidated (repeatable)
    #[arg(long = "statement", value_name = "JSON")]
    statements: Vec<String>,

    /// Context entry as KEY=VALUE; values parse as number or bool when
    /// they can (repeatable)
    #[arg(long = "context", value_name = "KEY=VALUE")]
    context: Vec<String>,

    /// Print the document on one line instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::InspectArn { arn } => inspect_arn(&arn),
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut builder = seeded_builder(args)?;

    for rule in &args.allow {
        let (verb, path) = parse_rule(rule)?;
        builder.allow_method(verb, path)?;
    }
    for rule in &args.deny {
        let (verb, path) = parse_rule(rule)?;
        builder.deny_method(verb, path)?;
    }
    if args.allow_all {
        builder.allow_all_methods();
    }
    if args.deny_all {
        builder.deny_all_methods();
    }

    for raw in &args.statements {
        let statement: Statement =
            serde_json::from_str(raw).context("statement is not valid statement JSON")?;
        builder.add_statement(statement);
    }

    if !args.context.is_empty() {
        builder.with_context(parse_context(&args.context)?);
    }

    let response = builder.build()?;
    let rendered = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{rendered}");
    Ok(())
}

fn seeded_builder(args: &GenerateArgs) -> anyhow::Result<PolicyBuilder> {
    if let Some(raw) = &args.method_arn {
        let arn = MethodArn::parse(raw)?;
        debug!("seeding builder from method ARN {arn}");
        return Ok(PolicyBuilder::from_method_arn(args.principal.as_str(), &arn));
    }

    // clap guarantees account is present when method_arn is not
    let Some(account) = &args.account else {
        bail!("either --method-arn or --account is required");
    };
    let options = ApiOptions {
        region: args.region.clone(),
        api_id: args.api_id.clone(),
        stage: args.stage.clone(),
    };
    Ok(PolicyBuilder::new(
        args.principal.as_str(),
        account.as_str(),
        options,
    ))
}

fn parse_rule(raw: &str) -> anyhow::Result<(HttpVerb, &str)> {
    let (verb, path) = raw
        .split_once(':')
        .with_context(|| format!("rule `{raw}` must look like VERB:PATH"))?;
    Ok((verb.parse()?, path))
}

fn parse_context(entries: &[String]) -> anyhow::Result<AuthorizerContext> {
    let mut context = AuthorizerContext::new();
    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("context entry `{entry}` must look like KEY=VALUE"))?;
        context.insert(key, typed_context_value(value));
    }
    Ok(context)
}

/// Numbers and booleans pass through typed so the gateway sees them as
/// such; everything else stays a string.
fn typed_context_value(raw: &str) -> ContextValue {
    if let Ok(number) = raw.parse::<i64>() {
        return ContextValue::from(number);
    }
    match raw {
        "true" => ContextValue::from(true),
        "false" => ContextValue::from(false),
        other => ContextValue::from(other),
    }
}

fn inspect_arn(raw: &str) -> anyhow::Result<()> {
    let arn = MethodArn::parse(raw)?;
    let value = json!({
        "partition": arn.partition,
        "service": arn.service,
        "region": arn.region,
        "accountId": arn.account_id,
        "apiId": arn.api_id,
        "stage": arn.stage,
        "verb": arn.verb,
        "resource": arn.resource,
        "rendered": arn.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
