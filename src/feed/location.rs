use std::fmt;
use std::path::PathBuf;

use super::FeedError;

/// Where a feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    /// Anything with a `scheme://` prefix. Validated when loaded, so that
    /// unsupported schemes surface as URL errors rather than missing files.
    Url(String),
    /// A local file path.
    Path(PathBuf),
}

impl FeedLocation {
    /// Classifies user input as a URL or a filesystem path.
    ///
    /// Surrounding whitespace (including the newline from a prompt) is trimmed.
    pub fn parse(input: &str) -> Result<Self, FeedError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FeedError::EmptyLocation);
        }
        if input.contains("://") {
            Ok(Self::Url(input.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(input)))
        }
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
