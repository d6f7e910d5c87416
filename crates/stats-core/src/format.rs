//! Format identifiers such as "gen7ou-1500" or "gen7monotype-monowater-1760"

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FORMAT_DELIMITER: char = '-';
const SEGMENTS_MIN: usize = 2;
const SEGMENTS_MAX: usize = 3;

/// Rank written when a format has none
pub const DEFAULT_RANK: &str = "0";

/// A competitive ruleset, optionally ranked and optionally monotype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Format {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monotype: Option<String>,
}

impl Format {
    /// Create a format with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank: None,
            monotype: None,
        }
    }

    /// Set the rank
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    /// Set the monotype variant
    pub fn with_monotype(mut self, monotype: impl Into<String>) -> Self {
        self.monotype = Some(monotype.into());
        self
    }

    /// Rank, or "0" when unset
    pub fn normalized_rank(&self) -> &str {
        self.rank.as_deref().unwrap_or(DEFAULT_RANK)
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Two segments are `name-rank`, three are `name-monotype-rank`.
    fn from_str(line: &str) -> Result<Self> {
        let split: Vec<&str> = line.split(FORMAT_DELIMITER).collect();

        match split.as_slice() {
            [name, rank] => Ok(Format::new(*name).with_rank(*rank)),
            [name, monotype, rank] => Ok(Format::new(*name)
                .with_monotype(*monotype)
                .with_rank(*rank)),
            _ => Err(Error::InvalidFormat {
                line: line.to_string(),
                min: SEGMENTS_MIN,
                max: SEGMENTS_MAX,
                actual: split.len(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(monotype) = &self.monotype {
            write!(f, "{}{}", FORMAT_DELIMITER, monotype)?;
        }
        write!(f, "{}{}", FORMAT_DELIMITER, self.normalized_rank())
    }
}

/// Parse a format line
pub fn format_from_str(line: &str) -> Result<Format> {
    line.parse()
}

/// Join a format back into a line, writing rank "0" when it is unset
pub fn format_to_string(format: &Format) -> String {
    format.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_ranked() {
        let format = format_from_str("gen7ou-1500").unwrap();
        assert_eq!(format.name, "gen7ou");
        assert_eq!(format.rank.as_deref(), Some("1500"));
        assert_eq!(format.monotype, None);
    }

    #[test]
    fn test_format_parse_monotype() {
        let format = format_from_str("gen7monotype-monowater-1760").unwrap();
        assert_eq!(format.name, "gen7monotype");
        assert_eq!(format.monotype.as_deref(), Some("monowater"));
        assert_eq!(format.rank.as_deref(), Some("1760"));
    }

    #[test]
    fn test_format_parse_invalid() {
        match format_from_str("gen7ou") {
            Err(Error::InvalidFormat { line, min, max, actual }) => {
                assert_eq!(line, "gen7ou");
                assert_eq!((min, max, actual), (2, 3, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(format_from_str("a-b-c-d").is_err());
    }

    #[test]
    fn test_format_to_string_normalizes_rank() {
        assert_eq!(format_to_string(&Format::new("gen7ou")), "gen7ou-0");
        assert_eq!(
            format_to_string(&Format::new("gen7ou").with_rank("1825")),
            "gen7ou-1825"
        );
        assert_eq!(
            format_to_string(&Format::new("gen7monotype").with_monotype("monofire")),
            "gen7monotype-monofire-0"
        );
    }

    #[test]
    fn test_format_round_trip() {
        let cases = [
            Format::new("gen7ou"),
            Format::new("gen7ou").with_rank("1500"),
            Format::new("gen7monotype").with_monotype("monowater"),
            Format::new("gen7monotype")
                .with_monotype("monowater")
                .with_rank("1760"),
        ];

        for format in cases {
            let parsed = format_from_str(&format_to_string(&format)).unwrap();
            assert_eq!(parsed.name, format.name);
            assert_eq!(parsed.monotype, format.monotype);
            assert_eq!(parsed.rank.as_deref(), Some(format.normalized_rank()));
        }
    }
}
