//! Feed loading: from a user-supplied location to a parsed document tree.
//!
//! - [`location`] - Classifies input as a URL or a local path
//! - [`fetcher`] - HTTP retrieval with retries, timeouts, and a size limit
//! - [`loader`] - Reads or fetches, decodes, and parses into an [`XmlTree`](crate::xml::XmlTree)
//!
//! # Example
//!
//! ```ignore
//! use rsshtml::feed::{build_client, load_document, FeedLocation, FetchConfig};
//!
//! let config = FetchConfig::default();
//! let client = build_client(&config)?;
//! let location = FeedLocation::parse("https://example.com/rss.xml")?;
//! let root = load_document(&location, &client, &config).await?;
//! ```

mod error;
mod fetcher;
mod loader;
mod location;

pub use error::FeedError;
pub use fetcher::{build_client, fetch_feed, FetchConfig};
pub use loader::load_document;
pub use location::FeedLocation;
