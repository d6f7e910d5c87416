//! URL construction for the statistics resources
//!
//! Layout of the published tree:
//!
//! ```text
//! {base}/{timeframe}/[monotype/][{sub path}/]{format}.{ext}
//! ```
//!
//! A URL without a format points at a directory listing and ends in `/`.

use crate::error::Result;
use stats_core::{Format, Timeframe};
use url::Url;

/// Default location of the published statistics
pub const DEFAULT_BASE_URL: &str = "https://www.smogon.com/stats/";

const MONOTYPE_DIR: &str = "monotype";

/// Sub-directory of a timeframe holding one kind of page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPath {
    Leads,
    Metagame,
    Chaos,
    Moveset,
}

impl ApiPath {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiPath::Leads => "leads",
            ApiPath::Metagame => "metagame",
            ApiPath::Chaos => "chaos",
            ApiPath::Moveset => "moveset",
        }
    }
}

/// Extension of a page file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Text,
    Json,
}

impl FileType {
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Text => "txt",
            FileType::Json => "json",
        }
    }
}

/// Builder for page and listing URLs
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    timeframe: Option<Timeframe>,
    monotype: bool,
    sub_path: Option<ApiPath>,
    format: Option<Format>,
    file_type: FileType,
}

impl UrlBuilder {
    /// Create a builder rooted at `base`
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            timeframe: None,
            monotype: false,
            sub_path: None,
            format: None,
            file_type: FileType::default(),
        })
    }

    pub fn set_timeframe(mut self, timeframe: &Timeframe) -> Self {
        self.timeframe = Some(timeframe.clone());
        self
    }

    /// Use the monotype tree even without a monotype format
    pub fn set_monotype(mut self, monotype: bool) -> Self {
        self.monotype = monotype;
        self
    }

    pub fn set_sub_path(mut self, sub_path: ApiPath) -> Self {
        self.sub_path = Some(sub_path);
        self
    }

    /// Set the format; a monotype format implies the monotype tree
    pub fn set_format(mut self, format: &Format) -> Self {
        if format.monotype.is_some() {
            self.monotype = true;
        }
        self.format = Some(format.clone());
        self
    }

    pub fn set_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = file_type;
        self
    }

    /// Build the final URL
    pub fn build(&self) -> Result<Url> {
        let mut path = String::new();

        if let Some(timeframe) = &self.timeframe {
            path.push_str(&format!("{}/", timeframe));
        }
        if self.monotype {
            path.push_str(&format!("{}/", MONOTYPE_DIR));
        }
        if let Some(sub_path) = self.sub_path {
            path.push_str(&format!("{}/", sub_path.as_str()));
        }
        if let Some(format) = &self.format {
            path.push_str(&format!("{}.{}", format, self.file_type.extension()));
        }

        Ok(self.base.join(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeframe() -> Timeframe {
        Timeframe::new("2019", "01")
    }

    #[test]
    fn test_build_root() {
        let url = UrlBuilder::new(DEFAULT_BASE_URL).unwrap().build().unwrap();
        assert_eq!(url.as_str(), "https://www.smogon.com/stats/");
    }

    #[test]
    fn test_build_adds_trailing_slash() {
        let url = UrlBuilder::new("http://localhost:8080/mirror/stats")
            .unwrap()
            .set_timeframe(&timeframe())
            .build()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/mirror/stats/2019-01/");
    }

    #[test]
    fn test_build_usage_url() {
        let url = UrlBuilder::new(DEFAULT_BASE_URL)
            .unwrap()
            .set_timeframe(&timeframe())
            .set_format(&Format::new("gen7ou").with_rank("1500"))
            .build()
            .unwrap();
        assert_eq!(url.as_str(), "https://www.smogon.com/stats/2019-01/gen7ou-1500.txt");
    }

    #[test]
    fn test_build_leads_url_unranked() {
        let url = UrlBuilder::new(DEFAULT_BASE_URL)
            .unwrap()
            .set_sub_path(ApiPath::Leads)
            .set_timeframe(&timeframe())
            .set_format(&Format::new("gen7ou"))
            .build()
            .unwrap();
        assert_eq!(url.as_str(), "https://www.smogon.com/stats/2019-01/leads/gen7ou-0.txt");
    }

    #[test]
    fn test_build_chaos_url() {
        let url = UrlBuilder::new(DEFAULT_BASE_URL)
            .unwrap()
            .set_sub_path(ApiPath::Chaos)
            .set_file_type(FileType::Json)
            .set_timeframe(&Timeframe::new("2014", "11").with_modifier("DLC1"))
            .set_format(&Format::new("gen6ou").with_rank("1695"))
            .build()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.smogon.com/stats/2014-11-DLC1/chaos/gen6ou-1695.json"
        );
    }

    #[test]
    fn test_build_monotype_url() {
        let format = Format::new("gen7monotype")
            .with_monotype("monowater")
            .with_rank("1760");
        let url = UrlBuilder::new(DEFAULT_BASE_URL)
            .unwrap()
            .set_sub_path(ApiPath::Metagame)
            .set_timeframe(&timeframe())
            .set_format(&format)
            .build()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.smogon.com/stats/2019-01/monotype/metagame/gen7monotype-monowater-1760.txt"
        );
    }

    #[test]
    fn test_build_monotype_listing() {
        let url = UrlBuilder::new(DEFAULT_BASE_URL)
            .unwrap()
            .set_timeframe(&timeframe())
            .set_monotype(true)
            .build()
            .unwrap();
        assert_eq!(url.as_str(), "https://www.smogon.com/stats/2019-01/monotype/");
    }

    #[test]
    fn test_invalid_base() {
        assert!(UrlBuilder::new("not a url").is_err());
    }
}
