//! Metagame pages (`{timeframe}/metagame/{format}.txt`)
//!
//! A metagame page is a block of dotted style lines, a blank line, then the
//! stalliness histogram:
//!
//! ```text
//!  offense............................ 36.84582%
//!  hyperoffense....................... 25.60234%
//!
//!  Stalliness (mean: -0.357)
//!  ...
//!  one # =  0.51%
//! ```

use crate::convert::{convert_frequency, convert_number};
use crate::error::{Error, Result};
use crate::pattern::get_match_group;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Whitespace padding before the first digit of a line
pub static DEFAULT_PADDING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s+)\d").expect("static regex must compile"));

/// Dot leader (plus optional whitespace) before the first digit of a line
pub static DOTTED_PADDING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.+\s*)\d").expect("static regex must compile"));

static STALLINESS_MEAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" Stalliness \(mean: (-?[\d.]+)").expect("static regex must compile")
});

static STALLINESS_ONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" one # = {2}(-?[\d.]+%)").expect("static regex must compile"));

/// A parsed metagame page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metagame {
    /// Style name and frequency, in page order
    pub style: Vec<(String, f64)>,
    pub stalliness: Stalliness,
}

impl Metagame {
    /// Frequency of a style by name
    pub fn style_frequency(&self, name: &str) -> Option<f64> {
        self.style
            .iter()
            .find(|(style, _)| style == name)
            .map(|(_, frequency)| *frequency)
    }
}

/// Stalliness summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stalliness {
    /// Mean stalliness
    pub mean: f64,
    /// Share represented by one histogram mark
    pub one: f64,
}

/// Split a line like "foo....... 12%" into its label and frequency.
///
/// `padding` must capture the padding in group 1. The line is split at the
/// first occurrence of that exact padding text, so a label containing the
/// same padding earlier on yields a truncated label.
pub fn split_frequency_pair(line: &str, padding: &Regex) -> Result<(String, f64)> {
    let pad = get_match_group(line, padding, 1)?;
    let (name, frequency) = line
        .split_once(pad)
        .ok_or_else(|| Error::MalformedPage(format!("no padding in '{}'", line)))?;

    Ok((name.trim().to_string(), convert_frequency(frequency)))
}

/// Parse a metagame page
pub fn parse_metagame_page(page: &str) -> Result<Metagame> {
    let lines: Vec<&str> = page.split('\n').collect();

    let separator = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .ok_or_else(|| Error::MalformedPage("no blank line after style section".to_string()))?;

    let style = lines[..separator]
        .iter()
        .map(|line| split_frequency_pair(line, &DOTTED_PADDING_REGEX))
        .collect::<Result<Vec<_>>>()?;

    let mean_line = lines
        .get(separator + 1)
        .ok_or_else(|| Error::MalformedPage("missing stalliness section".to_string()))?;
    let one_line = lines[lines.len().saturating_sub(2)];

    let stalliness = Stalliness {
        mean: convert_number(get_match_group(mean_line, &STALLINESS_MEAN_REGEX, 1)?),
        one: convert_frequency(get_match_group(one_line, &STALLINESS_ONE_REGEX, 1)?),
    };

    tracing::debug!(styles = style.len(), mean = stalliness.mean, "parsed metagame page");

    Ok(Metagame { style, stalliness })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = " offense............................ 36.84582%
 hyperoffense....................... 25.60234%
 semistall..........................  9.12345%
 weatherless........................ 80.00000%

 Stalliness (mean: -0.357)
 -2.0|##
 -1.5|####
 +0.0|#
 more negative = more offensive, more positive = more stall
 one # =  0.51%
";

    #[test]
    fn test_parse_metagame_page() {
        let metagame = parse_metagame_page(PAGE).unwrap();

        assert_eq!(metagame.style.len(), 4);
        assert_eq!(metagame.style[0], ("offense".to_string(), 36.84582));
        assert_eq!(metagame.style[1], ("hyperoffense".to_string(), 25.60234));
        assert_eq!(metagame.style_frequency("semistall"), Some(9.12345));
        assert_eq!(metagame.style_frequency("weatherless"), Some(80.0));
        assert_eq!(metagame.style_frequency("stall"), None);
        assert_eq!(metagame.stalliness.mean, -0.357);
        assert_eq!(metagame.stalliness.one, 0.51);
    }

    #[test]
    fn test_parse_metagame_page_no_separator() {
        let page = " offense........ 36.84582%\n Stalliness (mean: -0.357)\n one # =  0.51%";
        assert!(matches!(
            parse_metagame_page(page),
            Err(Error::MalformedPage(_))
        ));
    }

    #[test]
    fn test_parse_metagame_page_missing_mean() {
        let page = " offense........ 36.84582%\n\n Stalliness unknown\n one # =  0.51%\n";
        assert!(matches!(
            parse_metagame_page(page),
            Err(Error::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_split_frequency_pair_dotted() {
        let (name, frequency) =
            split_frequency_pair(" rain............. 12.5%", &DOTTED_PADDING_REGEX).unwrap();
        assert_eq!(name, "rain");
        assert_eq!(frequency, 12.5);
    }

    #[test]
    fn test_split_frequency_pair_dots_without_space() {
        let (name, frequency) =
            split_frequency_pair("sand.....3.25%", &DOTTED_PADDING_REGEX).unwrap();
        assert_eq!(name, "sand");
        assert_eq!(frequency, 3.25);
    }

    #[test]
    fn test_split_frequency_pair_default_padding() {
        let (name, frequency) =
            split_frequency_pair("trick room   4%", &DEFAULT_PADDING_REGEX).unwrap();
        assert_eq!(name, "trick room");
        assert_eq!(frequency, 4.0);
    }

    #[test]
    fn test_split_frequency_pair_no_digit() {
        assert!(matches!(
            split_frequency_pair("offense.......", &DOTTED_PADDING_REGEX),
            Err(Error::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_split_frequency_pair_repeated_padding() {
        // The first occurrence of the padding text wins, even if no digit follows it.
        let (name, frequency) =
            split_frequency_pair("a... b... 5%", &DOTTED_PADDING_REGEX).unwrap();
        assert_eq!(name, "a");
        assert!(frequency.is_nan());
    }
}
