//! Parsing of the plain directory listings the statistics are served from

use crate::error::{Error, Result};
use scraper::{Html, Selector};
use stats_core::{Format, Timeframe};

const PARENT_DIRECTORY_LINK: &str = "../";
const DIRECTORY_LINK_SELECTOR: &str = "pre a";

/// Link texts of a directory listing, without the parent directory link
pub fn parse_directory_listing(html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(DIRECTORY_LINK_SELECTOR).map_err(|e| Error::Selector {
        selector: DIRECTORY_LINK_SELECTOR.to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|text| text != PARENT_DIRECTORY_LINK)
        .collect())
}

/// Timeframes listed on the root page
pub fn parse_timeframes_page(html: &str) -> Result<Vec<Timeframe>> {
    let timeframes = parse_directory_listing(html)?
        .iter()
        .map(|entry| entry.trim_end_matches('/').parse::<Timeframe>())
        .collect::<stats_core::Result<Vec<_>>>()?;
    Ok(timeframes)
}

/// Formats listed on a timeframe page; sub-directories are skipped
pub fn parse_formats_page(html: &str) -> Result<Vec<Format>> {
    let formats = parse_directory_listing(html)?
        .iter()
        .filter(|entry| is_file(entry))
        .map(|entry| remove_extension(entry).parse::<Format>())
        .collect::<stats_core::Result<Vec<_>>>()?;
    Ok(formats)
}

fn is_file(entry: &str) -> bool {
    !entry.ends_with('/')
}

/// Strip everything from the first dot, if something follows it
fn remove_extension(entry: &str) -> &str {
    match entry.find('.') {
        Some(idx) if idx + 1 < entry.len() => &entry[..idx],
        _ => entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_LISTING: &str = r#"<html>
<head><title>Index of /stats/</title></head>
<body>
<h1>Index of /stats/</h1><hr><pre><a href="../">../</a>
<a href="2014-11/">2014-11/</a>                                           01-Dec-2014 17:48       -
<a href="2014-11-DLC1/">2014-11-DLC1/</a>                                      01-Dec-2014 19:12       -
<a href="2019-01/">2019-01/</a>                                           02-Feb-2019 02:40       -
</pre><hr></body>
</html>"#;

    const FORMAT_LISTING: &str = r#"<html>
<body>
<h1>Index of /stats/2019-01/</h1><hr><pre><a href="../">../</a>
<a href="chaos/">chaos/</a>                                             02-Feb-2019 02:40       -
<a href="leads/">leads/</a>                                             02-Feb-2019 02:40       -
<a href="gen7ou-0.txt">gen7ou-0.txt</a>                                       02-Feb-2019 02:17      488K
<a href="gen7ou-1500.txt">gen7ou-1500.txt</a>                                    02-Feb-2019 02:17      488K
<a href="gen7monotype-monowater-1760.txt">gen7monotype-monowater-1760.txt</a>    02-Feb-2019 02:17      12K
</pre><hr></body>
</html>"#;

    #[test]
    fn test_parse_directory_listing() {
        let entries = parse_directory_listing(ROOT_LISTING).unwrap();
        assert_eq!(entries, vec!["2014-11/", "2014-11-DLC1/", "2019-01/"]);
    }

    #[test]
    fn test_parse_directory_listing_empty() {
        let entries = parse_directory_listing("<html><body>nothing</body></html>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_timeframes_page() {
        let timeframes = parse_timeframes_page(ROOT_LISTING).unwrap();

        assert_eq!(timeframes.len(), 3);
        assert_eq!(timeframes[0], Timeframe::new("2014", "11"));
        assert_eq!(timeframes[1], Timeframe::new("2014", "11").with_modifier("DLC1"));
        assert_eq!(timeframes[2], Timeframe::new("2019", "01"));
    }

    #[test]
    fn test_parse_formats_page() {
        let formats = parse_formats_page(FORMAT_LISTING).unwrap();

        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0], Format::new("gen7ou").with_rank("0"));
        assert_eq!(formats[1], Format::new("gen7ou").with_rank("1500"));
        assert_eq!(
            formats[2],
            Format::new("gen7monotype")
                .with_monotype("monowater")
                .with_rank("1760")
        );
    }

    #[test]
    fn test_parse_formats_page_invalid_entry() {
        let html = r#"<pre><a href="README.txt">README.txt</a></pre>"#;
        assert!(matches!(
            parse_formats_page(html),
            Err(Error::Parse(stats_core::Error::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension("gen7ou-1500.txt"), "gen7ou-1500");
        assert_eq!(remove_extension("gen7ou-1500.txt.gz"), "gen7ou-1500");
        assert_eq!(remove_extension("noext"), "noext");
        assert_eq!(remove_extension("trailing."), "trailing.");
    }
}
