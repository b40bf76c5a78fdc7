use std::sync::Arc;

use chrono::{DateTime, Utc};
use feed_rs::parser;

/// One entry from a fetched feed, tagged with the source it came from.
///
/// Entries are never persisted; every listing request re-fetches them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// Name of the configured source the entry was fetched from
    pub source_name: Arc<str>,
    pub title: String,
    pub link: Option<String>,
    /// Publish time, falling back to the entry's updated time
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    /// Entry-level author names, shown next to the source name
    pub authors: Vec<String>,
}

/// Parses RSS/Atom bytes into entries tagged with `source_name`.
///
/// # Errors
///
/// Returns the `feed-rs` parse error when the document is not a feed.
pub fn parse_feed(
    source_name: &str,
    bytes: &[u8],
) -> Result<Vec<FeedEntry>, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;
    let source_name: Arc<str> = Arc::from(source_name);

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone());
            let published = entry.published.or(entry.updated);
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());
            let authors = entry
                .authors
                .into_iter()
                .map(|p| p.name)
                .filter(|n| !n.trim().is_empty())
                .collect();

            FeedEntry {
                source_name: Arc::clone(&source_name),
                title,
                link,
                published,
                summary,
                authors,
            }
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Markets</title>
    <item>
        <guid>guid-1</guid>
        <title>The FED raises rates</title>
        <link>https://example.com/fed</link>
        <pubDate>Tue, 10 Oct 2023 12:00:00 GMT</pubDate>
        <description>Rates go up.</description>
    </item>
    <item>
        <title>No date here</title>
        <link>https://example.com/nodate</link>
    </item>
</channel></rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Blog</title>
    <id>urn:blog</id>
    <updated>2023-10-11T08:00:00Z</updated>
    <entry>
        <title>Atom post</title>
        <id>urn:post:1</id>
        <link href="https://blog.example/post"/>
        <updated>2023-10-11T08:00:00Z</updated>
        <author><name>Jane Doe</name></author>
    </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_entries_tagged_with_source() {
        let entries = parse_feed("Markets", RSS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(&*first.source_name, "Markets");
        assert_eq!(first.title, "The FED raises rates");
        assert_eq!(first.link.as_deref(), Some("https://example.com/fed"));
        assert_eq!(
            first.published,
            Some(Utc.with_ymd_and_hms(2023, 10, 10, 12, 0, 0).unwrap())
        );
        assert_eq!(first.summary.as_deref(), Some("Rates go up."));
    }

    #[test]
    fn test_missing_date_is_none() {
        let entries = parse_feed("Markets", RSS.as_bytes()).unwrap();
        assert_eq!(entries[1].published, None);
    }

    #[test]
    fn test_atom_uses_updated_and_authors() {
        let entries = parse_feed("Blog", ATOM.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].published,
            Some(Utc.with_ymd_and_hms(2023, 10, 11, 8, 0, 0).unwrap())
        );
        assert_eq!(entries[0].authors, vec!["Jane Doe".to_string()]);
    }

    #[test]
    fn test_invalid_document_errors() {
        assert!(parse_feed("Bad", b"<not valid xml").is_err());
    }
}
