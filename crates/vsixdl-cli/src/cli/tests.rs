use super::*;
use clap::error::ErrorKind;
use vsixdl_core::Error;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_no_args_prints_usage_as_error() {
    let err = Cli::try_parse_from(["vsixdl"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
    assert!(err.use_stderr());
}

#[test]
fn cli_help_is_not_an_error() {
    let err = Cli::try_parse_from(["vsixdl", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert!(!err.use_stderr());
}

#[test]
fn cli_parse_install_flag_first() {
    let cli = parse(&["vsixdl", "-i", "foo.bar"]);
    assert!(cli.install);
    let inv = cli.invocation().unwrap();
    assert!(inv.install);
    assert_eq!(inv.package.publisher, "foo");
    assert_eq!(inv.package.name, "bar");
    assert!(inv.editor.is_none());
}

#[test]
fn cli_parse_install_flag_last() {
    let cli = parse(&["vsixdl", "foo.bar", "-i"]);
    assert!(cli.install);
    assert_eq!(cli.invocation().unwrap().package.to_string(), "foo.bar");
}

#[test]
fn cli_parse_without_install() {
    let cli = parse(&["vsixdl", "ms-python.python"]);
    assert!(!cli.install);
    assert_eq!(cli.invocation().unwrap().package.name, "python");
}

#[test]
fn cli_parse_editor() {
    let cli = parse(&["vsixdl", "-i", "-e", "codium", "foo.bar"]);
    assert_eq!(cli.editor.as_deref(), Some("codium"));
    assert_eq!(cli.invocation().unwrap().editor.as_deref(), Some("codium"));

    let cli = parse(&["vsixdl", "--editor=vscodium", "foo.bar"]);
    assert_eq!(cli.editor.as_deref(), Some("vscodium"));
}

#[test]
fn cli_missing_extension_name() {
    let cli = parse(&["vsixdl", "nofield"]);
    match cli.invocation() {
        Err(Error::Usage(msg)) => assert!(msg.contains("Missing extension name")),
        other => panic!("expected usage error, got {other:?}"),
    }
}

#[test]
fn cli_only_install_flag_is_missing_name() {
    let cli = parse(&["vsixdl", "-i"]);
    assert!(matches!(cli.invocation(), Err(Error::Usage(_))));
}

#[test]
fn cli_unknown_flag_is_usage_error() {
    let err = Cli::try_parse_from(["vsixdl", "-x", "foo.bar"]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn usage_mentions_arguments() {
    let usage = usage();
    assert!(usage.contains("PUBLISHER.EXTENSION"));
}

#[test]
fn report_usage_error_adds_usage_line() {
    let err = parse(&["vsixdl", "nofield"]).invocation().unwrap_err();
    let (message, code) = report(&anyhow::Error::from(err));
    assert_eq!(code, 1);
    let mut lines = message.lines();
    assert_eq!(
        lines.next(),
        Some("Error: Missing extension name (e.g., publisher.extension)")
    );
    assert!(lines.next().unwrap().contains("PUBLISHER.EXTENSION"));
}

#[test]
fn report_prefixes_failed_stage() {
    let err = Error::Download {
        url: "https://example.test/bar.vsix".to_string(),
        source: vsixdl_core::TransferError::Status(404),
    };
    let (message, code) = report(&anyhow::Error::from(err));
    assert_eq!(code, 1);
    assert_eq!(
        message,
        "Error downloading VSIX: https://example.test/bar.vsix: HTTP 404"
    );

    let (message, code) = report(&anyhow::Error::from(Error::NotFound));
    assert_eq!(code, 1);
    assert_eq!(
        message,
        "Error extracting VSIX URL: Could not find assetUri or fallbackAssetUri in page."
    );
}

#[test]
fn report_other_errors_are_generic() {
    let err = anyhow::anyhow!("current directory").context("run");
    let (message, code) = report(&err);
    assert_eq!(code, 1);
    assert_eq!(message, "vsixdl error: run: current directory");
}
