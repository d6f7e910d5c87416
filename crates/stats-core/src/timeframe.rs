//! Timeframe identifiers such as "2019-01" or "2014-11-DLC1"

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TIMEFRAME_DELIMITER: char = '-';
const SEGMENTS_MIN: usize = 2;
const SEGMENTS_MAX: usize = 3;

/// The year/month (optionally qualified) a set of statistics covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    pub year: String,
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl Timeframe {
    /// Create a timeframe without modifier
    pub fn new(year: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            modifier: None,
        }
    }

    /// Attach a modifier (e.g. "DLC1")
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// First day of the covered month, if year and month are numeric
    pub fn first_day(&self) -> Option<NaiveDate> {
        let year = self.year.parse().ok()?;
        let month = self.month.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let split: Vec<&str> = line.split(TIMEFRAME_DELIMITER).collect();

        if split.len() < SEGMENTS_MIN || split.len() > SEGMENTS_MAX {
            return Err(Error::InvalidTimeframe {
                line: line.to_string(),
                min: SEGMENTS_MIN,
                max: SEGMENTS_MAX,
                actual: split.len(),
            });
        }

        Ok(Self {
            year: split[0].to_string(),
            month: split[1].to_string(),
            modifier: split.get(2).map(|s| s.to_string()),
        })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.year, TIMEFRAME_DELIMITER, self.month)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "{}{}", TIMEFRAME_DELIMITER, modifier)?;
        }
        Ok(())
    }
}

/// Parse a timeframe line
pub fn timeframe_from_str(line: &str) -> Result<Timeframe> {
    line.parse()
}

/// Join a timeframe back into a line
pub fn timeframe_to_string(timeframe: &Timeframe) -> String {
    timeframe.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse() {
        let timeframe = timeframe_from_str("2019-01").unwrap();
        assert_eq!(timeframe.year, "2019");
        assert_eq!(timeframe.month, "01");
        assert_eq!(timeframe.modifier, None);
    }

    #[test]
    fn test_timeframe_parse_modifier() {
        let timeframe = timeframe_from_str("2014-11-DLC1").unwrap();
        assert_eq!(timeframe, Timeframe::new("2014", "11").with_modifier("DLC1"));
    }

    #[test]
    fn test_timeframe_parse_invalid() {
        match timeframe_from_str("2019") {
            Err(Error::InvalidTimeframe { line, min, max, actual }) => {
                assert_eq!(line, "2019");
                assert_eq!((min, max, actual), (2, 3, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(timeframe_from_str("2019-01-DLC1-x").is_err());
    }

    #[test]
    fn test_timeframe_round_trip() {
        for line in ["2019-01", "2014-11-DLC1", "2020-12-H2"] {
            let timeframe = timeframe_from_str(line).unwrap();
            assert_eq!(timeframe_to_string(&timeframe), line);
        }

        let with_modifier = Timeframe::new("2016", "03").with_modifier("DLC2");
        let parsed = timeframe_from_str(&timeframe_to_string(&with_modifier)).unwrap();
        assert_eq!(parsed, with_modifier);

        let without = Timeframe::new("2016", "03");
        let parsed = timeframe_from_str(&timeframe_to_string(&without)).unwrap();
        assert_eq!(parsed.modifier, None);
    }

    #[test]
    fn test_timeframe_first_day() {
        let timeframe = Timeframe::new("2019", "01");
        assert_eq!(timeframe.first_day(), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(Timeframe::new("20xx", "01").first_day(), None);
        assert_eq!(Timeframe::new("2019", "13").first_day(), None);
    }
}
