//! stats-core: Core library for parsing competitive usage statistics pages
//!
//! This library provides functionality to:
//! - Convert raw table cells into typed scalars
//! - Parse the fixed-frame markdown tables used by the statistics pages
//! - Map tables through a declared column layout
//! - Parse usage, leads, metagame and chaos (moveset) pages
//! - Encode and decode timeframe and format identifiers
//!
//! Nothing in here performs I/O; callers hand in already-fetched text or JSON.

pub mod convert;
pub mod error;
pub mod format;
pub mod page;
pub mod pattern;
pub mod table;
pub mod timeframe;

pub use convert::{convert_frequency, convert_identity, convert_number, Converter, Value};
pub use error::{Error, Result};
pub use format::{format_from_str, format_to_string, Format};
pub use page::chaos::{map_chaos_data, parse_chaos_page, Chaos, ChaosInfo, EntityStats, RawChaos, Spread};
pub use page::leads::{parse_leads_page, Lead, Leads};
pub use page::metagame::{parse_metagame_page, split_frequency_pair, Metagame, Stalliness};
pub use page::usage::{parse_usage_page, Usage, Usages};
pub use pattern::get_match_group;
pub use table::{
    parse_layout_table, parse_markdown_table, split_table, LayoutColumn, ParsedTable, RawTable,
    TableLayout,
};
pub use timeframe::{timeframe_from_str, timeframe_to_string, Timeframe};
