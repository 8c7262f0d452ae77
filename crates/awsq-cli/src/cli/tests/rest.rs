//! Tests for services, verbosity and parameter parsing.

use super::parse;
use crate::cli::{parse_param, Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_services() {
    match parse(&["awsq", "services"]) {
        CliCommand::Services => {}
        _ => panic!("expected Services"),
    }
}

#[test]
fn cli_verbose_is_global_and_counted() {
    let cli = Cli::try_parse_from(["awsq", "services"]).unwrap();
    assert_eq!(cli.verbose, 0);
    let cli = Cli::try_parse_from(["awsq", "-vv", "services"]).unwrap();
    assert_eq!(cli.verbose, 2);
    let cli = Cli::try_parse_from(["awsq", "invoke", "sdb", "ListDomains", "-v"]).unwrap();
    assert_eq!(cli.verbose, 1);
}

#[test]
fn param_value_may_contain_equals() {
    assert_eq!(
        parse_param("Expr=a=b").unwrap(),
        ("Expr".to_string(), "a=b".to_string())
    );
    assert!(parse_param("missing").unwrap_err().contains("NAME=VALUE"));
}

#[test]
fn cli_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["awsq", "download"]).is_err());
}
