//! Usage ranking pages (`{timeframe}/{format}.txt`)

use super::{columns, line_at, lines_from, number_at, parse_total, text_at};
use crate::convert::{convert_number, Converter};
use crate::error::Result;
use crate::pattern::get_match_group;
use crate::table::{parse_layout_table, LayoutColumn, ParsedTable};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total battles: (-?\d+)").expect("static regex must compile"));

static WEIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Avg\. weight/team: (-?[\d.]+)").expect("static regex must compile")
});

/// Column layout of the usage table
pub const USAGE_TABLE_LAYOUT: [LayoutColumn; 7] = [
    LayoutColumn::new(columns::RANK, Converter::Number),
    LayoutColumn::new(columns::POKEMON, Converter::Identity),
    LayoutColumn::new(columns::USAGE_PERCENTAGE, Converter::Frequency),
    LayoutColumn::new(columns::USAGE_RAW, Converter::Number),
    LayoutColumn::new(columns::USAGE_RAW_PERCENTAGE, Converter::Frequency),
    LayoutColumn::new(columns::USAGE_REAL, Converter::Number),
    LayoutColumn::new(columns::USAGE_REAL_PERCENTAGE, Converter::Frequency),
];

/// A parsed usage page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usages {
    /// Total number of battles
    pub total: i64,
    /// Average weight per team
    pub weight: f64,
    /// Usage table, typed through [`USAGE_TABLE_LAYOUT`]
    pub data: ParsedTable,
}

/// One row of the usage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub rank: f64,
    pub pokemon: String,
    pub usage_percentage: f64,
    pub raw: f64,
    pub raw_percentage: f64,
    pub real: f64,
    pub real_percentage: f64,
}

impl Usages {
    /// Typed view of the table rows
    pub fn entries(&self) -> Vec<Usage> {
        self.data
            .rows
            .iter()
            .map(|row| Usage {
                rank: number_at(row, 0),
                pokemon: text_at(row, 1),
                usage_percentage: number_at(row, 2),
                raw: number_at(row, 3),
                raw_percentage: number_at(row, 4),
                real: number_at(row, 5),
                real_percentage: number_at(row, 6),
            })
            .collect()
    }
}

/// Parse a usage page.
///
/// Line 0 carries the battle total, line 1 the average team weight, and the
/// rest is the usage table.
pub fn parse_usage_page(page: &str) -> Result<Usages> {
    let lines: Vec<&str> = page.split('\n').collect();

    let total = parse_total(line_at(&lines, 0), &TOTAL_REGEX)?;
    let weight = convert_number(get_match_group(line_at(&lines, 1), &WEIGHT_REGEX, 1)?);
    let data = parse_layout_table(&lines_from(&lines, 2), &USAGE_TABLE_LAYOUT)?;

    tracing::debug!(total, weight, rows = data.row_count(), "parsed usage page");

    Ok(Usages {
        total,
        weight,
        data,
    })
}
