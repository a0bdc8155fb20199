use std::path::Path;

use super::fetcher::{fetch_feed, FetchConfig};
use super::{FeedError, FeedLocation};
use crate::util::validate_url;
use crate::xml::{parse_document, XmlTree};

/// Reads or downloads a feed and parses it into an [`XmlTree`].
///
/// URLs are validated against `config.allow_private_hosts` before any request
/// is made. Local files are subject to the same `max_feed_bytes` limit as
/// network bodies. A leading UTF-8 byte order mark is ignored.
pub async fn load_document(
    location: &FeedLocation,
    client: &reqwest::Client,
    config: &FetchConfig,
) -> Result<XmlTree, FeedError> {
    let bytes = match location {
        FeedLocation::Url(raw) => {
            let url = validate_url(raw, config.allow_private_hosts)?;
            fetch_feed(client, &url, config).await?
        }
        FeedLocation::Path(path) => read_feed_file(path, config.max_feed_bytes).await?,
    };

    let content = String::from_utf8(bytes)?;
    let root = parse_document(content.trim_start_matches('\u{feff}'))?;

    tracing::info!(
        location = %location,
        root = %root.label(),
        children = root.number_of_children(),
        "Loaded feed document"
    );
    Ok(root)
}

async fn read_feed_file(path: &Path, limit: usize) -> Result<Vec<u8>, FeedError> {
    let io_err = |source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Check size before reading to avoid loading an oversized file into memory
    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    if metadata.len() > limit as u64 {
        return Err(FeedError::TooLarge { limit });
    }

    tokio::fs::read(path).await.map_err(io_err)
}
