//! Unit tests for CLI module
//!
//! Argument parsing and output formatting. No bus connection involved.

#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;

use crate::{
    cli::{
        AUTOSTART_WAITS, Cli, CliCommand, CliService, ClientCommand,
        formatting::{format_error, format_metadata, format_status},
    },
    services::mpris::{PlaybackState, TrackMetadata},
};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("mpris-controller").chain(args.iter().copied())).unwrap()
}

fn client(args: &[&str]) -> ClientCommand {
    match parse(args).command {
        CliCommand::Client(command) => command,
        CliCommand::Daemon => panic!("{args:?} parsed as the daemon"),
    }
}

#[test]
fn subcommands_use_kebab_case() {
    assert_eq!(client(&["play-pause"]), ClientCommand::PlayPause);
    assert_eq!(client(&["next"]), ClientCommand::Next);
    assert_eq!(client(&["previous"]), ClientCommand::Previous);
    assert_eq!(client(&["status"]), ClientCommand::Status);
    assert_eq!(client(&["metadata"]), ClientCommand::Metadata);
    assert_eq!(client(&["quit"]), ClientCommand::Quit);
    assert_eq!(client(&["config-schema"]), ClientCommand::ConfigSchema);
    assert_eq!(parse(&["daemon"]).command, CliCommand::Daemon);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["next", "--debug", "--no-autostart", "--config", "/tmp/c.toml"]);

    assert!(cli.debug);
    assert!(cli.no_autostart);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
}

#[test]
fn flags_default_off() {
    let cli = parse(&["daemon"]);

    assert!(!cli.debug);
    assert!(!cli.no_autostart);
    assert!(cli.config.is_none());
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["mpris-controller"]).is_err());
    assert!(Cli::try_parse_from(["mpris-controller", "shuffle"]).is_err());
}

#[tokio::test]
async fn config_schema_runs_without_a_daemon() {
    let output = CliService::new(false)
        .execute(ClientCommand::ConfigSchema)
        .await
        .unwrap();

    assert!(output.contains("\"players\""));
}

#[test]
fn autostart_waits_total() {
    let total: u128 = AUTOSTART_WAITS.iter().map(|wait| wait.as_millis()).sum();

    assert_eq!(total, 4800);
    assert_eq!(AUTOSTART_WAITS[0].as_millis(), 200);
}

#[test]
fn status_formats_as_json() {
    assert_eq!(format_status(Some(PlaybackState::Playing)), "\"Playing\"");
    assert_eq!(format_status(None), "null");
}

#[test]
fn metadata_formats_present_fields_only() {
    let metadata = TrackMetadata {
        title: Some("Freddie Freeloader".to_string()),
        artists: vec!["Miles Davis".to_string()],
        ..TrackMetadata::default()
    };

    let json: serde_json::Value = serde_json::from_str(&format_metadata(Some(&metadata))).unwrap();

    assert_eq!(json["title"], "Freddie Freeloader");
    assert_eq!(json["artists"][0], "Miles Davis");
    assert!(json.get("album").is_none());
    assert_eq!(format_metadata(None), "null");
}

#[test]
fn error_is_wrapped_in_color_codes() {
    let formatted = format_error("boom");

    assert!(formatted.starts_with("\x1b[1m\x1b[31m"));
    assert!(formatted.contains("boom"));
    assert!(formatted.ends_with("\x1b[0m"));
}
