use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

use crate::{
    error::{ConvertError, Result},
    models::config::{Config, Separator},
};

/// Raw command-line arguments, before validation.
#[derive(Parser, Debug)]
#[command(
    name = "csv2json",
    about = "Convert a CSV file into a JSON array of records",
    version
)]
struct Cli {
    /// Column separator: comma or semicolon
    #[arg(long, default_value = "comma")]
    separator: String,

    /// Generate pretty JSON
    #[arg(long)]
    pretty: bool,

    /// Path to the CSV file to convert; further paths are ignored
    #[arg(value_name = "FILE")]
    file_paths: Vec<PathBuf>,
}

/// Parse command-line arguments into a validated configuration
pub fn resolve<I, T>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    let file_path = cli
        .file_paths
        .into_iter()
        .next()
        .ok_or(ConvertError::MissingArgument)?;
    let separator: Separator = cli.separator.parse()?;

    Ok(Config {
        file_path,
        separator,
        pretty: cli.pretty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = resolve(["csv2json", "data.csv"]).unwrap();

        assert_eq!(config.file_path, PathBuf::from("data.csv"));
        assert_eq!(config.separator, Separator::Comma);
        assert!(!config.pretty);
    }

    #[test]
    fn test_resolve_all_options() {
        let config =
            resolve(["csv2json", "--separator", "semicolon", "--pretty", "data.csv"]).unwrap();

        assert_eq!(config.separator, Separator::Semicolon);
        assert!(config.pretty);
    }

    #[test]
    fn test_resolve_flags_after_path() {
        let config = resolve(["csv2json", "data.csv", "--separator=semicolon"]).unwrap();

        assert_eq!(config.file_path, PathBuf::from("data.csv"));
        assert_eq!(config.separator, Separator::Semicolon);
    }

    #[test]
    fn test_resolve_uses_first_path() {
        let config = resolve(["csv2json", "first.csv", "second.csv", "--pretty"]).unwrap();

        assert_eq!(config.file_path, PathBuf::from("first.csv"));
        assert!(config.pretty);
    }

    #[test]
    fn test_resolve_missing_path() {
        let err = resolve(["csv2json", "--pretty"]).unwrap_err();
        assert!(matches!(err, ConvertError::MissingArgument));
    }

    #[test]
    fn test_resolve_invalid_separator() {
        let err = resolve(["csv2json", "--separator", "tab", "data.csv"]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidSeparator(ref v) if v == "tab"));
    }

    #[test]
    fn test_resolve_unknown_flag_is_usage_error() {
        let err = resolve(["csv2json", "--verbose", "data.csv"]).unwrap_err();
        assert!(matches!(err, ConvertError::Usage(_)));
    }
}
