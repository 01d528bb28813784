//! Tests for the parse and resolve subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_parse() {
    match parse(&["skupack", "parse", "a.tsv", "b.tsv"]) {
        CliCommand::Parse { inputs, render } => {
            assert_eq!(inputs, vec![PathBuf::from("a.tsv"), PathBuf::from("b.tsv")]);
            assert!(!render);
        }
        _ => panic!("expected Parse"),
    }
}

#[test]
fn cli_parse_parse_render() {
    match parse(&["skupack", "parse", "--render", "a.tsv"]) {
        CliCommand::Parse { inputs, render } => {
            assert_eq!(inputs.len(), 1);
            assert!(render);
        }
        _ => panic!("expected Parse with --render"),
    }
}

#[test]
fn cli_parse_parse_needs_input() {
    assert!(Cli::try_parse_from(["skupack", "parse"]).is_err());
}

#[test]
fn cli_parse_resolve() {
    match parse(&[
        "skupack",
        "resolve",
        "https://drive.google.com/file/d/abc123/view",
    ]) {
        CliCommand::Resolve { url } => {
            assert_eq!(url, "https://drive.google.com/file/d/abc123/view")
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_unknown_subcommand() {
    assert!(Cli::try_parse_from(["skupack", "upload"]).is_err());
}
