//! Utility functions for common operations.
//!
//! - **URL validation**: Scheme checks and an opt-out guard against internal hosts
//! - **File output**: Atomic write-then-rename for the generated HTML
//!
//! # Examples
//!
//! ```
//! use rsshtml::util::validate_url;
//!
//! let url = validate_url("https://example.com/feed.xml", false).unwrap();
//! assert_eq!(url.scheme(), "https");
//! ```

mod fs;
mod url_validator;

pub use fs::write_atomic;
pub use url_validator::{validate_url, UrlValidationError};
