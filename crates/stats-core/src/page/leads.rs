//! Lead pick pages (`{timeframe}/leads/{format}.txt`)

use super::{columns, line_at, lines_from, number_at, parse_total, text_at};
use crate::convert::Converter;
use crate::error::Result;
use crate::table::{parse_layout_table, LayoutColumn, ParsedTable};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total leads: (-?\d+)").expect("static regex must compile"));

/// Column layout of the leads table
pub const LEADS_TABLE_LAYOUT: [LayoutColumn; 5] = [
    LayoutColumn::new(columns::RANK, Converter::Number),
    LayoutColumn::new(columns::POKEMON, Converter::Identity),
    LayoutColumn::new(columns::USAGE_PERCENTAGE, Converter::Frequency),
    LayoutColumn::new(columns::USAGE_RAW, Converter::Number),
    LayoutColumn::new(columns::USAGE_RAW_PERCENTAGE, Converter::Frequency),
];

/// A parsed leads page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leads {
    /// Total number of leads
    pub total: i64,
    pub data: ParsedTable,
}

/// One row of the leads table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub rank: f64,
    pub pokemon: String,
    pub usage_percentage: f64,
    pub raw: f64,
    pub raw_percentage: f64,
}

impl Leads {
    /// Typed view of the table rows
    pub fn entries(&self) -> Vec<Lead> {
        self.data
            .rows
            .iter()
            .map(|row| Lead {
                rank: number_at(row, 0),
                pokemon: text_at(row, 1),
                usage_percentage: number_at(row, 2),
                raw: number_at(row, 3),
                raw_percentage: number_at(row, 4),
            })
            .collect()
    }
}

/// Parse a leads page: a "Total leads" line followed by the table
pub fn parse_leads_page(page: &str) -> Result<Leads> {
    let lines: Vec<&str> = page.split('\n').collect();

    let total = parse_total(line_at(&lines, 0), &TOTAL_REGEX)?;
    let data = parse_layout_table(&lines_from(&lines, 1), &LEADS_TABLE_LAYOUT)?;

    tracing::debug!(total, rows = data.row_count(), "parsed leads page");

    Ok(Leads { total, data })
}
