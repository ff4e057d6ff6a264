//! Tests for the config-file grammar and the flat settings pass.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::file::{Document, load_document, parse_config_file};
use super::registry::{OptionKey, Registry, RuntimeDefaults};
use super::value::{OptionValue, ValueKind};

fn registry() -> Registry {
    Registry::new(&RuntimeDefaults {
        port: 20000,
        config_file: PathBuf::from("/tmp/garlicd.conf"),
        tunnels_file: PathBuf::from("/tmp/tunnels.cfg"),
    })
}

fn parse_doc(text: &str) -> Result<Document, ConfigError> {
    Document::parse(text, Path::new("test.conf"))
}

/// Writes the text to a temp file and returns its handle (keeps the
/// file alive for the test body).
fn temp_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write temp file");
    file
}

mod document_grammar {
    use super::*;

    #[test]
    fn flat_key_value_lines() {
        let doc = parse_doc("port = 4545\nhost = 10.0.0.1\n").unwrap();
        assert_eq!(doc.global.len(), 2);
        assert!(doc.sections.is_empty());
        assert_eq!(doc.global[0].key, "port");
        assert_eq!(doc.global[0].value, "4545");
        assert_eq!(doc.global[0].line, 1);
        assert_eq!(doc.global[1].key, "host");
        assert_eq!(doc.global[1].line, 2);
    }

    #[test]
    fn whitespace_and_comments_are_tolerated() {
        let doc = parse_doc(
            "\n# main settings\n  port=4545  \n; another comment style\n\n  bandwidth   =   O\n",
        )
        .unwrap();
        assert_eq!(doc.global.len(), 2);
        assert_eq!(doc.global[0].value, "4545");
        assert_eq!(doc.global[1].key, "bandwidth");
        assert_eq!(doc.global[1].value, "O");
    }

    #[test]
    fn sections_group_their_entries() {
        let doc = parse_doc(
            "[irc-tunnel]\ntype = client\nport = 6668\n\n[web-tunnel]\ntype = server\n",
        )
        .unwrap();
        assert!(doc.global.is_empty());
        assert_eq!(doc.sections.len(), 2);

        let irc = doc.section("irc-tunnel").unwrap();
        assert_eq!(irc.line, 1);
        assert_eq!(irc.entries.len(), 2);
        assert_eq!(irc.entries[1].key, "port");
        assert_eq!(irc.entries[1].value, "6668");

        let web = doc.section("web-tunnel").unwrap();
        assert_eq!(web.entries.len(), 1);
        assert!(doc.section("missing").is_none());
    }

    #[test]
    fn global_entries_may_precede_sections() {
        let doc = parse_doc("port = 1\n[s]\nkey = v\n").unwrap();
        assert_eq!(doc.global.len(), 1);
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn malformed_line_reports_its_context() {
        let err = parse_doc("port = 4545\nthis is not a setting\n").unwrap_err();
        match err {
            ConfigError::Malformed { path, line, text } => {
                assert_eq!(path, Path::new("test.conf"));
                assert_eq!(line, 2);
                assert_eq!(text, "this is not a setting");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn line_with_empty_key_is_malformed() {
        let err = parse_doc("= 4545\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { line: 1, .. }));
    }

    #[test]
    fn empty_section_header_is_malformed() {
        let err = parse_doc("[]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { line: 1, .. }));
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        let doc = parse_doc("").unwrap();
        assert!(doc.global.is_empty());
        assert!(doc.sections.is_empty());
    }
}

mod settings_pass {
    use super::*;

    #[test]
    fn values_are_coerced_like_the_command_line() {
        let file = temp_config("port = 4545\nfloodfill = 1\nbandwidth = O\n");
        let partial = parse_config_file(file.path(), &registry()).unwrap();

        assert_eq!(
            partial.get(OptionKey::Port),
            Some(&OptionValue::Integer(4545))
        );
        assert_eq!(
            partial.get(OptionKey::Floodfill),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(
            partial.get(OptionKey::Bandwidth),
            Some(&OptionValue::Str("O".into()))
        );
    }

    #[test]
    fn missing_file_is_tolerated_and_yields_an_empty_partial() {
        let partial =
            parse_config_file(Path::new("/nonexistent/garlicd.conf"), &registry()).unwrap();
        assert!(partial.is_empty());
    }

    #[test]
    fn unknown_key_is_fatal() {
        let file = temp_config("bogus = 1\n");
        let err = parse_config_file(file.path(), &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "bogus"));
    }

    #[test]
    fn uncoercible_value_is_a_type_mismatch() {
        let file = temp_config("port = notanumber\n");
        let err = parse_config_file(file.path(), &registry()).unwrap_err();
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
    fn sectioned_keys_do_not_belong_to_the_main_config() {
        let file = temp_config("port = 4545\n[tunnel]\ntype = client\n");
        let err = parse_config_file(file.path(), &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { token } if token == "tunnel.type"));
    }

    #[test]
    fn malformed_line_is_fatal_for_the_pass() {
        let file = temp_config("port 4545\n");
        let err = parse_config_file(file.path(), &registry()).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { line: 1, .. }));
    }
}

mod document_loader {
    use super::*;

    #[test]
    fn loads_a_sectioned_tunnels_style_file() {
        let file = temp_config("[irc]\ntype = client\nport = 6668\n");
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.section("irc").unwrap().entries.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error_here() {
        let err = load_document(Path::new("/nonexistent/tunnels.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
