//! Tests for CLI argument parsing.

use super::cli::{Cli, Command};
use std::path::PathBuf;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["http-retry", "--url", "https://example.com/items"]);

        assert_eq!(cli.url.as_deref(), Some("https://example.com/items"));
        assert!(cli.command.is_none());
        assert!(cli.method.is_none());
        assert!(cli.headers.is_empty());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_request_options() {
        let cli = Cli::parse_from_iter([
            "http-retry",
            "--url",
            "https://example.com",
            "-X",
            "PUT",
            "-H",
            "X-Api-Key=secret",
            "--header",
            "Content-Type: application/json",
            "-d",
            r#"{"qty":1}"#,
        ]);

        assert_eq!(cli.method.as_deref(), Some("PUT"));
        assert_eq!(
            cli.headers,
            vec!["X-Api-Key=secret", "Content-Type: application/json"]
        );
        assert_eq!(cli.data.as_deref(), Some(r#"{"qty":1}"#));
        assert!(cli.data_file.is_none());
    }

    #[test]
    fn parse_data_file() {
        let cli = Cli::parse_from_iter(["http-retry", "--data-file", "payload.json"]);

        assert_eq!(cli.data_file, Some(PathBuf::from("payload.json")));
    }

    #[test]
    fn parse_retry_options() {
        let cli = Cli::parse_from_iter([
            "http-retry",
            "--retries",
            "5",
            "--backoff",
            "1",
            "--timeout",
            "10",
        ]);

        assert_eq!(cli.retries, Some(5));
        assert_eq!(cli.backoff, Some(1));
        assert_eq!(cli.timeout, Some(10));
    }

    #[test]
    fn parse_config_and_verbose() {
        let cli = Cli::parse_from_iter(["http-retry", "-c", "custom.toml", "-v"]);

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn retry_options_default_to_none() {
        let cli = Cli::parse_from_iter(["http-retry"]);

        assert!(cli.retries.is_none());
        assert!(cli.backoff.is_none());
        assert!(cli.timeout.is_none());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["http-retry", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("http-retry.toml"));
            }
            None => panic!("Expected init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["http-retry", "init", "-o", "conf/retry.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("conf/retry.toml"));
            }
            None => panic!("Expected init command"),
        }
    }

    #[test]
    fn is_init_false_without_subcommand() {
        let cli = Cli::parse_from_iter(["http-retry", "--url", "https://example.com"]);

        assert!(!cli.is_init());
    }
}
