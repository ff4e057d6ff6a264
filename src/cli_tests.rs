//! Tests for command-line parsing.

use std::path::PathBuf;

use super::cli;
use super::error::ConfigError;
use super::registry::{OptionKey, Registry, RuntimeDefaults};
use super::settings::Partial;
use super::value::{OptionValue, ValueKind};

fn registry() -> Registry {
    Registry::new(&RuntimeDefaults {
        port: 20000,
        config_file: PathBuf::from("/tmp/garlicd.conf"),
        tunnels_file: PathBuf::from("/tmp/tunnels.cfg"),
    })
}

fn parse(tokens: &[&str]) -> Result<Partial, ConfigError> {
    cli::parse(tokens, &registry())
}

fn parse_ok(tokens: &[&str]) -> Partial {
    parse(tokens).expect("parse should succeed")
}

mod forms {
    use super::*;

    #[test]
    fn empty_command_line_is_an_empty_partial() {
        assert!(parse_ok(&[]).is_empty());
    }

    #[test]
    fn long_option_with_separate_value() {
        let partial = parse_ok(&["--port", "4545"]);
        assert_eq!(
            partial.get(OptionKey::Port),
            Some(&OptionValue::Integer(4545))
        );
    }

    #[test]
    fn long_option_with_inline_value() {
        let partial = parse_ok(&["--bandwidth=O"]);
        assert_eq!(
            partial.get(OptionKey::Bandwidth),
            Some(&OptionValue::Str("O".into()))
        );
    }

    #[test]
    fn short_alias_with_separate_value() {
        let partial = parse_ok(&["-p", "9000"]);
        assert_eq!(
            partial.get(OptionKey::Port),
            Some(&OptionValue::Integer(9000))
        );
    }

    #[test]
    fn short_alias_with_inline_value() {
        let partial = parse_ok(&["-b=O"]);
        assert_eq!(
            partial.get(OptionKey::Bandwidth),
            Some(&OptionValue::Str("O".into()))
        );
    }

    #[test]
    fn several_options_in_one_command_line() {
        let partial = parse_ok(&["--host", "10.0.0.1", "-p", "7777", "--floodfill", "1"]);
        assert_eq!(partial.len(), 3);
        assert_eq!(
            partial.get(OptionKey::Host),
            Some(&OptionValue::Str("10.0.0.1".into()))
        );
        assert_eq!(
            partial.get(OptionKey::Port),
            Some(&OptionValue::Integer(7777))
        );
        assert_eq!(
            partial.get(OptionKey::Floodfill),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn last_occurrence_of_a_repeated_option_wins() {
        let partial = parse_ok(&["--port", "1111", "--port", "2222"]);
        assert_eq!(
            partial.get(OptionKey::Port),
            Some(&OptionValue::Integer(2222))
        );
    }
}

mod booleans {
    use super::*;

    #[test]
    fn bare_flag_means_true() {
        let partial = parse_ok(&["--floodfill"]);
        assert_eq!(
            partial.get(OptionKey::Floodfill),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn explicit_literal_is_consumed() {
        let partial = parse_ok(&["--log", "1", "--daemon", "0"]);
        assert_eq!(partial.get(OptionKey::Log), Some(&OptionValue::Bool(true)));
        assert_eq!(
            partial.get(OptionKey::Daemon),
            Some(&OptionValue::Bool(false))
        );
    }

    #[test]
    fn inline_literal_is_coerced() {
        let partial = parse_ok(&["--v6=true", "--service=no"]);
        assert_eq!(partial.get(OptionKey::V6), Some(&OptionValue::Bool(true)));
        assert_eq!(
            partial.get(OptionKey::Service),
            Some(&OptionValue::Bool(false))
        );
    }

    #[test]
    fn bare_flag_does_not_swallow_a_following_option() {
        let partial = parse_ok(&["--log", "--daemon"]);
        assert_eq!(partial.get(OptionKey::Log), Some(&OptionValue::Bool(true)));
        assert_eq!(
            partial.get(OptionKey::Daemon),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn inline_garbage_is_a_type_mismatch() {
        let err = parse(&["--log=maybe"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                option: "log",
                expected: ValueKind::Bool,
                ..
            }
        ));
    }

    #[test]
    fn help_is_a_pure_flag_and_never_consumes_a_value() {
        // "1" after --help is not a value for it; it is an unknown token.
        let err = parse(&["--help", "1"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "1"));

        let partial = parse_ok(&["-h"]);
        assert_eq!(partial.get(OptionKey::Help), Some(&OptionValue::Bool(true)));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_long_option() {
        let err = parse(&["--bogus"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "--bogus"));
    }

    #[test]
    fn unknown_short_alias() {
        let err = parse(&["-z"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "-z"));
    }

    #[test]
    fn bare_word_is_unknown() {
        let err = parse(&["floodfill"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "floodfill"));
    }

    #[test]
    fn chained_short_flags_are_not_supported() {
        let err = parse(&["-ld"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "-ld"));
    }

    #[test]
    fn non_integer_port_is_a_type_mismatch() {
        let err = parse(&["--port", "notanumber"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                option: "port",
                expected: ValueKind::Integer,
                ..
            }
        ));
    }

    #[test]
    fn option_at_end_of_line_without_value() {
        let err = parse(&["--port"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { option } if option == "port"));
    }

    #[test]
    fn unknown_option_mentions_help_in_its_message() {
        let err = parse(&["--bogus"]).unwrap_err();
        assert!(err.to_string().contains("--help"));
    }
}
