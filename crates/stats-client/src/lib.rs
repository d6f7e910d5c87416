//! stats-client: fetch layer over stats-core
//!
//! Builds resource URLs, performs the HTTP requests, scrapes directory
//! listings and passes every page body to the matching stats-core parser.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod listing;

pub use client::{latest_timeframe, ClientConfig, StatsClient, DEFAULT_TIMEOUT};
pub use endpoint::{ApiPath, FileType, UrlBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use listing::{parse_directory_listing, parse_formats_page, parse_timeframes_page};
