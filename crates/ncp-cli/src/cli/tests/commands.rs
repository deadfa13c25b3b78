//! Tests for upload, fetch, info and checksum parsing plus config lookup.

use super::parse;
use crate::cli::{load_config, Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_upload() {
    let cli = parse(&["ncp", "upload"]);
    assert!(cli.config.is_none());
    assert!(cli.project_dir.is_none());
    match cli.command {
        CliCommand::Upload { env } => assert!(env.is_none()),
        _ => panic!("expected Upload"),
    }
}

#[test]
fn cli_parse_upload_env_and_globals() {
    let cli = parse(&[
        "ncp",
        "upload",
        "-e",
        "rp2040",
        "--project-dir",
        "/work/app",
        "--config",
        "/work/ncp.toml",
    ]);
    assert_eq!(cli.project_dir.as_deref(), Some(Path::new("/work/app")));
    assert_eq!(cli.config.as_deref(), Some(Path::new("/work/ncp.toml")));
    match cli.command {
        CliCommand::Upload { env } => assert_eq!(env.as_deref(), Some("rp2040")),
        _ => panic!("expected Upload with env"),
    }
}

#[test]
fn cli_parse_fetch() {
    match parse(&["ncp", "fetch", "esp32.bin", "--release", "v0.6.3"]).command {
        CliCommand::Fetch { firmware, release } => {
            assert_eq!(firmware.as_deref(), Some("esp32.bin"));
            assert_eq!(release.as_deref(), Some("v0.6.3"));
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["ncp", "fetch"]).command {
        CliCommand::Fetch { firmware, release } => {
            assert!(firmware.is_none());
            assert!(release.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_info() {
    match parse(&["ncp", "info", "-r", "v0.6.3"]).command {
        CliCommand::Info { release } => assert_eq!(release.as_deref(), Some("v0.6.3")),
        _ => panic!("expected Info"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["ncp", "checksum", "fw.bin"]).command {
        CliCommand::Checksum { path } => assert_eq!(path, Path::new("fw.bin")),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["ncp", "erase"]).is_err());
    assert!(Cli::try_parse_from(["ncp"]).is_err());
}

#[test]
fn explicit_config_must_exist() {
    let dir = std::env::temp_dir();
    let missing = dir.join("ncp-cli-test-missing-config.toml");
    assert!(load_config(Some(&missing), &dir).is_err());
}

#[test]
fn project_config_is_optional() {
    let dir = std::env::temp_dir().join("ncp-cli-test-empty-project");
    let cfg = load_config(None, &dir).unwrap();
    assert_eq!(cfg.upload.firmware_ver, "latest");
}

#[test]
fn loaded_config_debug_line_hides_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ncp.toml");
    std::fs::write(&path, "[resolver]\ngithub_token = \"ghp_SECRET123\"\n").unwrap();
    let cfg = load_config(Some(&path), dir.path()).unwrap();
    let line = format!("loaded config: {:?}", cfg);
    assert!(!line.contains("ghp_SECRET123"), "{line}");
}
