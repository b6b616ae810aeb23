//! Tests for validated configuration.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, expand_home, write_default_config};
use crate::network::filter::InterfaceFilter;
use crate::output::OutputFormat;
use crate::scanner::ObserverFailurePolicy;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ifscan"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn no_input_uses_builtin_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
        assert!(!config.poll_only);
        assert_eq!(config.observer_failure, ObserverFailurePolicy::Propagate);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.output_file.is_none());
        assert!(config.filter.is_empty());
        assert!(!config.once);
    }

    #[test]
    fn display_summarizes_config() {
        let config = ValidatedConfig::from_raw(&cli(&["--poll-interval", "15"]), None).unwrap();
        let text = config.to_string();

        assert!(text.contains("poll_interval: 15s"));
        assert!(text.contains("observer_failure: propagate"));
        assert!(text.contains("output_file: none"));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_beats_toml_beats_default() {
        let file = toml("[monitor]\npoll_interval = 30\nprobe_timeout = 7\n");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();
        assert_eq!(from_toml.poll_interval, Duration::from_secs(30));
        assert_eq!(from_toml.probe_timeout, Duration::from_secs(7));

        let from_cli =
            ValidatedConfig::from_raw(&cli(&["--poll-interval", "5"]), Some(&file)).unwrap();
        assert_eq!(from_cli.poll_interval, Duration::from_secs(5));
        assert_eq!(from_cli.probe_timeout, Duration::from_secs(7));
    }

    #[test]
    fn poll_only_uses_or_semantics() {
        let file = toml("[monitor]\npoll_only = true\n");

        assert!(
            ValidatedConfig::from_raw(&cli(&[]), Some(&file))
                .unwrap()
                .poll_only
        );
        assert!(
            ValidatedConfig::from_raw(&cli(&["--poll-only"]), None)
                .unwrap()
                .poll_only
        );
    }

    #[test]
    fn observer_failure_from_toml_and_cli() {
        let file = toml("[monitor]\nobserver_failure = \"Isolate\"\n");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();
        assert_eq!(from_toml.observer_failure, ObserverFailurePolicy::Isolate);

        let from_cli = ValidatedConfig::from_raw(
            &cli(&["--observer-failure", "propagate"]),
            Some(&file),
        )
        .unwrap();
        assert_eq!(from_cli.observer_failure, ObserverFailurePolicy::Propagate);
    }

    #[test]
    fn format_from_toml_and_cli() {
        let file = toml("[output]\nformat = \"json\"\n");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();
        assert_eq!(from_toml.format, OutputFormat::Json);

        let from_cli =
            ValidatedConfig::from_raw(&cli(&["--format", "text"]), Some(&file)).unwrap();
        assert_eq!(from_cli.format, OutputFormat::Text);
    }

    #[test]
    fn output_file_cli_wins() {
        let file = toml("[output]\nfile = \"/var/lib/ifscan/result.json\"\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--output-file", "/tmp/out.json"]), Some(&file))
                .unwrap();

        assert_eq!(config.output_file, Some(PathBuf::from("/tmp/out.json")));
    }
}

mod filters {
    use super::*;

    #[test]
    fn toml_patterns_are_used_without_cli_patterns() {
        let file = toml("[filter]\ninclude = [\"^en\"]\nexclude = [\"^enx\"]\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert!(config.filter.matches("enp0s3"));
        assert!(!config.filter.matches("enx001122"));
        assert!(!config.filter.matches("wlan0"));
    }

    #[test]
    fn cli_includes_replace_toml_includes_only() {
        let file = toml("[filter]\ninclude = [\"^en\"]\nexclude = [\"^wlx\"]\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--include-interface", "^wl"]), Some(&file)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches("wlan0"));
        assert!(!config.filter.matches("enp0s3"));
        assert!(!config.filter.matches("wlx0011"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let result = ValidatedConfig::from_raw(&cli(&["--exclude-interface", "[unclosed"]), None);

        match result {
            Err(ConfigError::InvalidRegex { pattern, .. }) => assert_eq!(pattern, "[unclosed"),
            other => panic!("expected InvalidRegex, got {other:?}"),
        }
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_poll_interval_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--poll-interval", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                ..
            })
        ));
    }

    #[test]
    fn zero_probe_timeout_in_toml_is_rejected() {
        let file = toml("[monitor]\nprobe_timeout = 0\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "probe_timeout",
                ..
            })
        ));
    }

    #[test]
    fn oversized_poll_interval_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--poll-interval", "18446744073709551615"]), None);

        match result {
            Err(ConfigError::InvalidDuration { field, reason }) => {
                assert_eq!(field, "poll_interval");
                assert!(reason.contains("at most"));
            }
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
    }

    #[test]
    fn poll_interval_bound_is_inclusive() {
        let one_year = (365 * 24 * 60 * 60).to_string();
        let config =
            ValidatedConfig::from_raw(&cli(&["--poll-interval", &one_year]), None).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(365 * 24 * 60 * 60));
    }

    #[test]
    fn oversized_probe_timeout_in_toml_is_rejected() {
        let file = toml("[monitor]\nprobe_timeout = 3601\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "probe_timeout",
                ..
            })
        ));
    }

    #[test]
    fn unknown_policy_in_toml_is_rejected() {
        let file = toml("[monitor]\nobserver_failure = \"ignore\"\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidChoice {
                field: "observer_failure",
                ..
            })
        ));
    }

    #[test]
    fn unknown_format_in_toml_is_rejected() {
        let file = toml("[output]\nformat = \"xml\"\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidChoice { field: "format", .. })
        ));
    }
}

mod home_expansion {
    use super::*;

    #[test]
    fn leading_tilde_is_expanded() {
        let expanded =
            expand_home(Path::new("~/cache/result.json"), Some(PathBuf::from("/home/ada")))
                .unwrap();

        assert_eq!(expanded, PathBuf::from("/home/ada/cache/result.json"));
    }

    #[test]
    fn other_paths_are_unchanged() {
        let home = Some(PathBuf::from("/home/ada"));

        assert_eq!(
            expand_home(Path::new("/tmp/result.json"), home.clone()).unwrap(),
            PathBuf::from("/tmp/result.json")
        );
        assert_eq!(
            expand_home(Path::new("data/~result.json"), home).unwrap(),
            PathBuf::from("data/~result.json")
        );
    }

    #[test]
    fn missing_home_is_an_error() {
        let result = expand_home(Path::new("~/result.json"), None);
        assert!(matches!(result, Err(ConfigError::HomeDirNotFound { .. })));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[monitor]\npoll_interval = 42").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = ValidatedConfig::load(&cli(&["--config", &path])).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(42));
    }

    #[test]
    fn load_without_config_file_uses_defaults() {
        let config = ValidatedConfig::load(&cli(&[])).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn load_missing_file_fails() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/ifscan.toml"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn written_template_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ifscan.toml");

        write_default_config(&path).unwrap();
        let config =
            ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let result = write_default_config(Path::new("/nonexistent/dir/ifscan.toml"));
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
