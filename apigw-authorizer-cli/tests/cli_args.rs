use std::process::Command;

const DENY_ALL_ARGS: &[&str] = &[
    "generate",
    "--principal",
    "user|a1b2c3d4",
    "--account",
    "123123123123",
    "--region",
    "ap-southeast-2",
    "--api-id",
    "123sdfasdf12",
    "--stage",
    "prod",
    "--deny-all",
];

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_apigw-authorizer"))
        .args(args)
        .output()
        .expect("failed to run apigw-authorizer")
}

#[test]
fn test_generate_deny_all() {
    let output = run(DENY_ALL_ARGS);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be a JSON document");

    assert_eq!(value["principalId"], "user|a1b2c3d4");
    assert_eq!(value["policyDocument"]["Version"], "2012-10-17");
    assert_eq!(
        value["policyDocument"]["Statement"][0]["Resource"][0],
        "arn:aws:execute-api:ap-southeast-2:123123123123:123sdfasdf12/prod/*/*"
    );
    assert_eq!(value["policyDocument"]["Statement"][0]["Effect"], "Deny");
}

#[test]
fn test_generate_from_method_arn_with_rules_and_context() {
    let output = run(&[
        "generate",
        "--principal",
        "user|a1b2c3d4",
        "--method-arn",
        "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/pets",
        "--allow",
        "GET:/pets",
        "--deny",
        "DELETE:/pets",
        "--context",
        "tier=gold",
        "--context",
        "quota=5",
        "--compact",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be a JSON document");

    let statements = value["policyDocument"]["Statement"]
        .as_array()
        .expect("Statement should be an array");
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0]["Resource"][0],
        "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/pets"
    );
    assert_eq!(value["context"]["tier"], "gold");
    assert_eq!(value["context"]["quota"], 5);
}

#[test]
fn test_generate_with_no_rules_fails() {
    let output = run(&[
        "generate",
        "--principal",
        "user|a1b2c3d4",
        "--account",
        "123123123123",
    ]);
    assert_ne!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no statement defined"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_generate_rejects_unknown_verb() {
    let output = run(&[
        "generate",
        "--principal",
        "user|a1b2c3d4",
        "--account",
        "123123123123",
        "--allow",
        "FETCH:/pets",
    ]);
    assert_ne!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unsupported HTTP verb"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_generate_requires_account_or_method_arn() {
    let output = run(&["generate", "--principal", "user|a1b2c3d4", "--deny-all"]);
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_inspect_arn() {
    let output = run(&[
        "inspect-arn",
        "arn:aws:execute-api:eu-west-1:123456789102:vjpmhhtdi6/dev/GET/pets/cats",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be a JSON document");
    assert_eq!(value["region"], "eu-west-1");
    assert_eq!(value["apiId"], "vjpmhhtdi6");
    assert_eq!(value["verb"], "GET");
    assert_eq!(value["resource"], "pets/cats");
}

#[test]
fn test_inspect_arn_rejects_malformed_input() {
    let output = run(&["inspect-arn", "not-an-arn"]);
    assert_ne!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("malformed method ARN"),
        "stderr was: {}",
        stderr
    );
}
