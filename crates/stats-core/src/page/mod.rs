//! Page parsers for the individual statistics resources
//!
//! Each parser takes the full body of one page and returns a typed record.
//! Scalar totals come from fixed header lines; tables go through
//! [`crate::table::parse_layout_table`].

pub mod chaos;
pub mod leads;
pub mod metagame;
pub mod usage;

use crate::convert::Value;
use crate::error::{Error, Result};
use crate::pattern::get_match_group;
use regex::Regex;

/// Column names shared by the usage and leads layouts
pub mod columns {
    pub const RANK: &str = "Rank";
    pub const POKEMON: &str = "Pokemon";
    pub const USAGE_PERCENTAGE: &str = "Usage Percentage";
    pub const USAGE_RAW: &str = "Usage Raw";
    pub const USAGE_RAW_PERCENTAGE: &str = "Usage Raw Percentage";
    pub const USAGE_REAL: &str = "Usage Real";
    pub const USAGE_REAL_PERCENTAGE: &str = "Usage Real Percentage";
}

/// Line `index` of the page, or "" past the end
fn line_at<'a>(lines: &[&'a str], index: usize) -> &'a str {
    lines.get(index).copied().unwrap_or("")
}

/// Lines from `start` on, joined back into one block
fn lines_from(lines: &[&str], start: usize) -> String {
    lines.get(start..).map(|rest| rest.join("\n")).unwrap_or_default()
}

/// Extract an integer total from a header line
fn parse_total(line: &str, regex: &Regex) -> Result<i64> {
    let total = get_match_group(line, regex, 1)?;
    total
        .parse()
        .map_err(|_| Error::MalformedPage(format!("total '{}' is out of range", total)))
}

fn number_at(row: &[Value], index: usize) -> f64 {
    row.get(index).and_then(Value::as_number).unwrap_or(f64::NAN)
}

fn text_at(row: &[Value], index: usize) -> String {
    row.get(index)
        .and_then(Value::as_text)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_helpers() {
        let lines = ["a", "b", "c"];
        assert_eq!(line_at(&lines, 1), "b");
        assert_eq!(line_at(&lines, 5), "");
        assert_eq!(lines_from(&lines, 1), "b\nc");
        assert_eq!(lines_from(&lines, 4), "");
    }

    #[test]
    fn test_parse_total_out_of_range() {
        let re = Regex::new(r"Total: (-?\d+)").unwrap();
        assert_eq!(parse_total("Total: -3", &re).unwrap(), -3);
        assert!(matches!(
            parse_total("Total: 99999999999999999999", &re),
            Err(Error::MalformedPage(_))
        ));
    }
}
