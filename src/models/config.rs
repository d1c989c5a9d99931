use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::ConvertError;

/// Field delimiter of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
}

impl Separator {
    pub fn as_byte(&self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Semicolon => b';',
        }
    }
}

impl FromStr for Separator {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" => Ok(Separator::Comma),
            "semicolon" => Ok(Separator::Semicolon),
            other => Err(ConvertError::InvalidSeparator(other.to_string())),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Comma => write!(f, "comma"),
            Separator::Semicolon => write!(f, "semicolon"),
        }
    }
}

/// Resolved program configuration. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file_path: PathBuf,
    pub separator: Separator,
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_from_str() {
        assert_eq!("comma".parse::<Separator>().unwrap(), Separator::Comma);
        assert_eq!(
            "semicolon".parse::<Separator>().unwrap(),
            Separator::Semicolon
        );
    }

    #[test]
    fn test_separator_rejects_other_values() {
        // Matching is exact, the delimiter character itself is not accepted
        for value in ["tab", ",", "Comma", ""] {
            let err = value.parse::<Separator>().unwrap_err();
            assert!(matches!(err, ConvertError::InvalidSeparator(v) if v == value));
        }
    }

    #[test]
    fn test_separator_bytes() {
        assert_eq!(Separator::default().as_byte(), b',');
        assert_eq!(Separator::Semicolon.as_byte(), b';');
    }
}
