// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.
//!
//! This module provides a source that reads `-D key=value` definitions from the
//! command line, parsed with `clap`.

use crate::domain::config_value::clean_value;
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigSource, Entries};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;

/// Argument id under which definitions are stored in [`ArgMatches`].
pub const DEFINE_ARG_ID: &str = "define";

/// Configuration source for command-line definitions.
///
/// Definitions are given as `-D key=value` or `--define key=value` and may repeat; the
/// same key given twice yields two values in command-line order. Applications with their
/// own `clap` command add [`CommandLineSource::arg`] to it and build the source from the
/// resulting matches.
///
/// # Priority
///
/// Command-line arguments have the highest priority (3), which means they override
/// both environment variables (priority 2) and configuration files (priority 1).
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::CommandLineSource;
/// use pathcfg::ports::ConfigSource;
///
/// let source = CommandLineSource::from_args(["-D", "database.host=localhost", "--define", "port=5432"]).unwrap();
/// assert_eq!(source.load().unwrap().len(), 2);
///
/// // Embedding in an application's own command
/// let matches = clap::Command::new("app")
///     .arg(CommandLineSource::arg())
///     .get_matches_from(["app", "-D", "log.level=debug"]);
/// let source = CommandLineSource::from_matches(&matches);
/// assert_eq!(source.priority(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineSource {
    /// Parsed definitions in command-line order
    entries: Entries,
}

impl CommandLineSource {
    /// Creates a new command-line source with no definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `-D/--define KEY=VALUE` argument definition.
    pub fn arg() -> Arg {
        Arg::new(DEFINE_ARG_ID)
            .short('D')
            .long("define")
            .value_name("KEY=VALUE")
            .help("Set a configuration value; may be repeated")
            .action(ArgAction::Append)
            .value_parser(parse_definition)
    }

    /// Adds the definition argument to an existing command.
    pub fn augment(command: Command) -> Command {
        command.arg(Self::arg())
    }

    /// Creates a source from matches produced by a command carrying [`CommandLineSource::arg`].
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let entries = matches
            .get_many::<(String, String)>(DEFINE_ARG_ID)
            .map(|defs| defs.cloned().collect())
            .unwrap_or_default();
        Self { entries }
    }

    /// Creates a source from an argument list without a program name.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if an argument is not a well-formed definition.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::augment(Command::new("pathcfg").no_binary_name(true))
            .try_get_matches_from(args)
            .map_err(|e| ConfigError::SourceError {
                source_name: "cli".to_string(),
                message: format!("Invalid command line: {}", e),
                source: Some(Box::new(e)),
            })?;
        let source = Self::from_matches(&matches);
        tracing::debug!("Parsed {} command-line definitions", source.entries.len());
        Ok(source)
    }

    /// Creates a source from the process's command-line arguments.
    ///
    /// This skips the first argument (the program name) and parses the rest.
    pub fn from_env_args() -> Result<Self> {
        Self::from_args(std::env::args_os().skip(1))
    }
}

impl ConfigSource for CommandLineSource {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn load(&self) -> Result<Entries> {
        // Command-line arguments don't change during runtime
        Ok(self.entries.clone())
    }
}

/// Splits a `KEY=VALUE` definition at the first `=` and cleans the value.
fn parse_definition(text: &str) -> std::result::Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), clean_value(value).to_string()))
        }
        Some(_) => Err(format!("missing key in definition '{}'", text)),
        None => Err(format!("expected KEY=VALUE, found '{}'", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(source: &CommandLineSource) -> Vec<(String, String)> {
        source.load().unwrap()
    }

    #[test]
    fn test_cli_source_name_and_priority() {
        let source = CommandLineSource::new();
        assert_eq!(source.name(), "cli");
        assert_eq!(source.priority(), 3);
        assert!(pairs(&source).is_empty());
    }

    #[test]
    fn test_cli_source_short_and_long_forms() {
        let source =
            CommandLineSource::from_args(["-D", "database.host=localhost", "--define=port=5432"]).unwrap();
        assert_eq!(
            pairs(&source),
            vec![
                ("database.host".to_string(), "localhost".to_string()),
                ("port".to_string(), "5432".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_source_repeated_key_keeps_order() {
        let source = CommandLineSource::from_args(["-D", "key=value1", "-D", "key=value2"]).unwrap();
        assert_eq!(
            pairs(&source),
            vec![
                ("key".to_string(), "value1".to_string()),
                ("key".to_string(), "value2".to_string()),
            ]
        );
    }

    #[test]
    fn test_cli_source_equals_in_value() {
        let source =
            CommandLineSource::from_args(["-D", "connection-string=host=localhost;port=5432"]).unwrap();
        assert_eq!(pairs(&source)[0].1, "host=localhost;port=5432");
    }

    #[test]
    fn test_cli_source_cleans_values() {
        let source = CommandLineSource::from_args(["-D", "name= 'quoted' ", "-D", "raw='\"x\"'"]).unwrap();
        assert_eq!(pairs(&source)[0].1, "quoted");
        assert_eq!(pairs(&source)[1].1, "\"x\"");
    }

    #[test]
    fn test_cli_source_empty_value() {
        let source = CommandLineSource::from_args(["-D", "key="]).unwrap();
        assert_eq!(pairs(&source), vec![("key".to_string(), String::new())]);
    }

    #[test]
    fn test_cli_source_rejects_malformed_definition() {
        let result = CommandLineSource::from_args(["-D", "novalue"]);
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));

        let result = CommandLineSource::from_args(["-D", "=value"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_source_rejects_unknown_arguments() {
        let result = CommandLineSource::from_args(["--verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_source_from_application_matches() {
        let command = CommandLineSource::augment(
            Command::new("app").arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue)),
        );
        let matches = command.get_matches_from(["app", "--verbose", "-D", "log.level=debug"]);
        let source = CommandLineSource::from_matches(&matches);
        assert_eq!(pairs(&source), vec![("log.level".to_string(), "debug".to_string())]);
    }

    #[test]
    fn test_cli_source_without_definitions() {
        let matches = Command::new("app")
            .arg(CommandLineSource::arg())
            .get_matches_from(["app"]);
        assert!(pairs(&CommandLineSource::from_matches(&matches)).is_empty());
    }
}
