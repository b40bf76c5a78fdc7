//! Feed aggregation for the configured RSS/Atom sources.
//!
//! - **Parsing**: Convert RSS/Atom XML into [`FeedEntry`] values via `feed-rs`
//! - **Fetching**: One GET per source, bounded concurrency, failing feeds skipped
//! - **Listing**: Newest-first ordering, pagination and title search
//!
//! Nothing here caches: every listing request fetches every source again.
//!
//! # Example
//!
//! ```ignore
//! use newsbrief::feed::{list_entries, paginate, FetchOptions};
//!
//! let entries = list_entries(&client, &sources, &FetchOptions::default()).await;
//! let page = paginate(&entries, 1, 10);
//! ```

mod fetcher;
mod listing;
mod parser;

pub use fetcher::{fetch_source, list_entries, FetchError, FetchOptions, DEFAULT_FEED_CONCURRENCY};
pub use listing::{paginate, search, sort_by_published, Page, DEFAULT_PAGE_SIZE};
pub use parser::{parse_feed, FeedEntry};
