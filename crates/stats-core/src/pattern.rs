//! Regex-based scalar extraction from single page lines

use crate::error::{Error, Result};
use regex::Regex;

/// Match `regex` against `line` and return capture group `group`.
///
/// Fails with [`Error::PatternNotFound`] if the regex does not match or the
/// group did not take part in the match. Group 0 is the whole match.
pub fn get_match_group<'a>(line: &'a str, regex: &Regex, group: usize) -> Result<&'a str> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::PatternNotFound {
            pattern: regex.as_str().to_string(),
            line: line.to_string(),
        })
}
