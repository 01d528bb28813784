//! Tests for the run and compose subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_run_defaults() {
    match parse(&["skupack", "run", "katalog.tsv"]) {
        CliCommand::Run {
            inputs,
            frame,
            out,
            user,
            retries,
            failed_out,
        } => {
            assert_eq!(inputs, vec![PathBuf::from("katalog.tsv")]);
            assert!(frame.is_none());
            assert!(out.is_none());
            assert_eq!(user, "user");
            assert_eq!(retries, 0);
            assert!(failed_out.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_options() {
    match parse(&[
        "skupack",
        "run",
        "a.tsv",
        "b.tsv",
        "--frame",
        "frame.png",
        "--out",
        "/tmp/out",
        "--user",
        "Budi Santoso",
        "--retries",
        "2",
        "--failed-out",
        "failed.tsv",
    ]) {
        CliCommand::Run {
            inputs,
            frame,
            out,
            user,
            retries,
            failed_out,
        } => {
            assert_eq!(inputs.len(), 2);
            assert_eq!(frame.as_deref(), Some(Path::new("frame.png")));
            assert_eq!(out.as_deref(), Some(Path::new("/tmp/out")));
            assert_eq!(user, "Budi Santoso");
            assert_eq!(retries, 2);
            assert_eq!(failed_out.as_deref(), Some(Path::new("failed.tsv")));
        }
        _ => panic!("expected Run with options"),
    }
}

#[test]
fn cli_parse_run_rejects_bad_retries() {
    assert!(Cli::try_parse_from(["skupack", "run", "a.tsv", "--retries", "many"]).is_err());
}

#[test]
fn cli_parse_compose() {
    match parse(&["skupack", "compose", "base.jpg", "frame.png", "out.png"]) {
        CliCommand::Compose { base, frame, out } => {
            assert_eq!(base, PathBuf::from("base.jpg"));
            assert_eq!(frame, PathBuf::from("frame.png"));
            assert_eq!(out, PathBuf::from("out.png"));
        }
        _ => panic!("expected Compose"),
    }
}

#[test]
fn cli_parse_compose_needs_three_paths() {
    assert!(Cli::try_parse_from(["skupack", "compose", "base.jpg", "frame.png"]).is_err());
}
